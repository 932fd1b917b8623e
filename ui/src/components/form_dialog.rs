use std::collections::BTreeMap;

use payloads::forms::{
    FieldErrors, FieldKind, FormModel, FormValues, submit_form,
    validate_required,
};
use web_sys::File;
use yew::prelude::*;

use super::{FormField, Lookups, Modal};
use crate::contexts::use_toast;
use crate::upload::upload_image;

#[derive(Properties, PartialEq)]
pub struct FormDialogProps<F: PartialEq> {
    pub title: AttrValue,
    /// Values the form starts from each time it opens.
    pub initial: FormValues,
    /// Changes every time the dialog is opened.
    pub opening: u32,
    /// False while the starting values are still being fetched.
    #[prop_or(true)]
    pub ready: bool,
    #[prop_or_default]
    pub load_error: Option<AttrValue>,
    #[prop_or_default]
    pub lookups: Lookups,
    /// The mutation for this form is running.
    #[prop_or_default]
    pub is_running: bool,
    #[prop_or_else(|| AttrValue::from("Save"))]
    pub submit_text: AttrValue,
    pub on_submit: Callback<F>,
    pub on_close: Callback<()>,
}

/// Whether the form should load `initial` now: once the values are ready,
/// and only once per opening, so a background refetch never overwrites
/// what the user is typing.
pub fn should_reset(reset_for: Option<u32>, opening: u32, ready: bool) -> bool {
    ready && reset_for != Some(opening)
}

/// A modal form for `F`.
///
/// Required fields are checked first, then any picked images are uploaded
/// one after the other, then the values are parsed into `F`. Only a form
/// that parses reaches `on_submit`.
#[function_component]
pub fn FormDialog<F>(props: &FormDialogProps<F>) -> Html
where
    F: FormModel + PartialEq + 'static,
{
    let values = use_state(FormValues::new);
    let errors = use_state(FieldErrors::default);
    let pending_files = use_state(BTreeMap::<&'static str, File>::new);
    let uploading = use_state(|| false);
    let reset_for = use_mut_ref(|| None::<u32>);
    let toast = use_toast();

    {
        let values = values.clone();
        let errors = errors.clone();
        let pending_files = pending_files.clone();
        let reset_for = reset_for.clone();
        use_effect_with(
            (props.opening, props.ready, props.initial.clone()),
            move |(opening, ready, initial)| {
                if should_reset(*reset_for.borrow(), *opening, *ready) {
                    *reset_for.borrow_mut() = Some(*opening);
                    values.set(initial.clone());
                    errors.set(FieldErrors::default());
                    pending_files.set(BTreeMap::new());
                }
            },
        );
    }

    let on_change = {
        let values = values.clone();
        let errors = errors.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            let mut next = (*values).clone();
            next.set(name, value);
            values.set(next);
            if errors.get(name).is_some() {
                errors.set(FieldErrors::default());
            }
        })
    };

    let on_file = {
        let pending_files = pending_files.clone();
        Callback::from(move |(name, file): (&'static str, File)| {
            let mut next = (*pending_files).clone();
            next.insert(name, file);
            pending_files.set(next);
        })
    };

    let on_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let pending_files = pending_files.clone();
        let uploading = uploading.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut filled = (*values).clone();
            for name in pending_files.keys() {
                filled.set(name, "pending upload");
            }
            let missing = validate_required(&F::fields(), &filled);
            if !missing.is_empty() {
                errors.set(missing);
                return;
            }

            let submit = {
                let errors = errors.clone();
                let on_submit = on_submit.clone();
                move |values: &FormValues| {
                    let result = submit_form::<F>(values, |payload| {
                        on_submit.emit(payload)
                    });
                    errors.set(result.err().unwrap_or_default());
                }
            };

            if pending_files.is_empty() {
                submit(&*values);
                return;
            }

            let mut next = (*values).clone();
            let files = (*pending_files).clone();
            let values = values.clone();
            let pending_files = pending_files.clone();
            let uploading = uploading.clone();
            let toast = toast.clone();
            uploading.set(true);
            yew::platform::spawn_local(async move {
                for (name, file) in files {
                    let uploaded = upload_image(file).await.and_then(|image| {
                        serde_json::to_string(&image).map_err(Into::into)
                    });
                    match uploaded {
                        Ok(json) => next.set(name, json),
                        Err(e) => {
                            tracing::warn!(field = name, error = %e, "upload failed");
                            if let Some(toast) = &toast {
                                toast.error(e.to_string());
                            }
                            uploading.set(false);
                            return;
                        }
                    }
                }
                uploading.set(false);
                pending_files.set(BTreeMap::new());
                values.set(next.clone());
                submit(&next);
            });
        })
    };

    let busy = props.is_running || *uploading;
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    let body = if let Some(error) = &props.load_error {
        html! {
            <p class="text-sm text-red-600 dark:text-red-400">{error}</p>
        }
    } else if !props.ready || *reset_for.borrow() != Some(props.opening) {
        html! {
            <p class="py-8 text-center text-neutral-600 dark:text-neutral-400">
                {"Loading..."}
            </p>
        }
    } else {
        html! {
            <div class="space-y-4">
                {for F::fields().into_iter().map(|spec| {
                    let name = spec.name;
                    let options = match spec.kind {
                        FieldKind::Lookup | FieldKind::MultiLookup => {
                            props.lookups.options(name)
                        }
                        _ => Vec::new(),
                    };
                    html! {
                        <FormField
                            key={name}
                            value={AttrValue::from(values.get(name).to_string())}
                            error={errors.get(name).map(|e| AttrValue::from(e.to_string()))}
                            pending_file={pending_files.get(name).map(|f| AttrValue::from(f.name()))}
                            options={options}
                            disabled={busy}
                            on_change={on_change.clone()}
                            on_file={on_file.clone()}
                            spec={spec}
                        />
                    }
                })}
            </div>
        }
    };

    html! {
        <Modal on_close={props.on_close.clone()} max_width="max-w-2xl" close_on_backdrop={!busy}>
            <form onsubmit={on_submit} novalidate={true}>
                <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100 mb-4">
                    {&props.title}
                </h3>
                {body}
                <div class="flex justify-end gap-3 mt-6">
                    <button
                        type="button"
                        onclick={on_cancel}
                        disabled={busy}
                        class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                               bg-white dark:bg-neutral-700 border border-neutral-300 dark:border-neutral-600
                               rounded-md hover:bg-neutral-50 dark:hover:bg-neutral-600
                               disabled:opacity-50"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="submit"
                        disabled={busy || !props.ready}
                        class="px-4 py-2 text-sm font-medium text-white bg-neutral-900
                               dark:bg-neutral-100 dark:text-neutral-900 rounded-md
                               hover:bg-neutral-700 disabled:opacity-50"
                    >
                        {if *uploading {
                            "Uploading..."
                        } else if props.is_running {
                            "Saving..."
                        } else {
                            props.submit_text.as_str()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::should_reset;

    #[test]
    fn resets_once_per_opening() {
        // detail still loading
        assert!(!should_reset(None, 1, false));
        assert!(should_reset(None, 1, true));
        // refetch while the same dialog is open
        assert!(!should_reset(Some(1), 1, true));
        // opened again
        assert!(should_reset(Some(1), 2, true));
    }
}
