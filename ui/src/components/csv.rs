//! CSV download of loaded rows and CSV upload for bulk creation.

use std::rc::Rc;

use payloads::Resource;
use payloads::csv_io::{ImportRow, export_csv, parse_import, template_csv};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlInputElement, Url};
use yew::prelude::*;

use super::Modal;
use crate::contexts::use_toast;
use crate::upload::read_text;

/// Save `text` as a file through a temporary object url.
pub fn download(file_name: &str, text: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)
}

/// `employees.csv` for `employees`.
fn file_name<R: Resource>() -> String {
    format!("{}.csv", R::PATH)
}

#[derive(Properties, PartialEq)]
pub struct ExportButtonProps<R: PartialEq> {
    /// The rows currently shown, after filtering.
    pub rows: Rc<Vec<R>>,
}

#[function_component]
pub fn ExportButton<R: Resource>(props: &ExportButtonProps<R>) -> Html {
    let toast = use_toast();
    let onclick = {
        let rows = props.rows.clone();
        Callback::from(move |_: MouseEvent| {
            let result = export_csv(&rows, R::CSV_COLUMNS)
                .map_err(|e| e.to_string())
                .and_then(|text| {
                    download(&file_name::<R>(), &text)
                        .map_err(|_| "The browser refused the download".to_string())
                });
            match result {
                Ok(()) => tracing::debug!(rows = rows.len(), path = R::PATH, "exported"),
                Err(e) => {
                    if let Some(toast) = &toast {
                        toast.error(e);
                    }
                }
            }
        })
    };

    html! {
        <button
            {onclick}
            class="px-3 py-2 text-sm font-medium border border-neutral-300 dark:border-neutral-600 rounded-md"
        >
            {"Export CSV"}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ImportDialogProps {
    pub title: AttrValue,
    /// Headers a file may use.
    pub fields: &'static [&'static str],
    #[prop_or_default]
    pub is_running: bool,
    pub on_import: Callback<Vec<ImportRow>>,
    pub on_close: Callback<()>,
}

/// Pick a CSV, check its headers and hand the rows over. The rows are sent
/// in one bulk call by the caller.
#[function_component]
pub fn ImportDialog(props: &ImportDialogProps) -> Html {
    let rows = use_state(|| None::<Rc<Vec<ImportRow>>>);
    let error = use_state(|| None::<String>);

    let on_pick = {
        let rows = rows.clone();
        let error = error.clone();
        let fields = props.fields;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let rows = rows.clone();
            let error = error.clone();
            yew::platform::spawn_local(async move {
                let parsed = match read_text(&file).await {
                    Ok(text) => parse_import(&text, fields).map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                match parsed {
                    Ok(parsed) => {
                        rows.set(Some(Rc::new(parsed)));
                        error.set(None);
                    }
                    Err(e) => {
                        rows.set(None);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let on_template = {
        let fields = props.fields;
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let done = template_csv(fields)
                .map_err(|e| e.to_string())
                .and_then(|text| {
                    download("import-template.csv", &text)
                        .map_err(|_| "The browser refused the download".to_string())
                });
            if let Err(e) = done {
                error.set(Some(e));
            }
        })
    };

    let on_confirm = {
        let rows = rows.clone();
        let on_import = props.on_import.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(rows) = &*rows {
                on_import.emit(rows.as_ref().clone());
            }
        })
    };

    html! {
        <Modal on_close={props.on_close.clone()} close_on_backdrop={!props.is_running}>
            <h3 class="text-lg font-semibold mb-4">{&props.title}</h3>
            <div class="space-y-4 text-sm">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Columns: {}", props.fields.join(", "))}
                </p>
                <button onclick={on_template} class="underline">{"Download a template"}</button>
                <input type="file" accept=".csv,text/csv" onchange={on_pick} disabled={props.is_running} />
                if let Some(rows) = &*rows {
                    <p>{format!("{} rows ready to import", rows.len())}</p>
                }
                if let Some(error) = &*error {
                    <p class="text-red-600 dark:text-red-400">{error}</p>
                }
            </div>
            <div class="flex justify-end gap-3 mt-6">
                <button
                    onclick={props.on_close.reform(|_: MouseEvent| ())}
                    disabled={props.is_running}
                    class="px-4 py-2 text-sm font-medium border rounded-md"
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_confirm}
                    disabled={rows.is_none() || props.is_running}
                    class="px-4 py-2 text-sm font-medium text-white bg-neutral-900 rounded-md disabled:opacity-50"
                >
                    {if props.is_running { "Importing..." } else { "Import" }}
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::file_name;
    use payloads::responses::LeaveType;

    #[test]
    fn export_file_is_named_after_the_path() {
        assert_eq!(file_name::<LeaveType>(), "leave-types.csv");
    }
}
