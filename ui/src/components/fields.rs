//! One input per [`FieldKind`].

use std::collections::BTreeMap;
use std::rc::Rc;

use payloads::Image;
use payloads::Resource;
use payloads::forms::{FieldKind, FieldSpec, SelectOption};
use web_sys::{File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::MarkdownText;

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 \
    dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 focus:outline-none \
    focus:ring-2 focus:ring-neutral-500";

/// Options for lookup fields and filter controls, keyed by field name.
#[derive(Clone, PartialEq, Default)]
pub struct Lookups(Rc<BTreeMap<&'static str, Vec<SelectOption>>>);

impl Lookups {
    pub fn with(
        mut self,
        name: &'static str,
        options: Vec<SelectOption>,
    ) -> Self {
        Rc::make_mut(&mut self.0).insert(name, options);
        self
    }

    pub fn options(&self, name: &str) -> Vec<SelectOption> {
        self.0.get(name).cloned().unwrap_or_default()
    }

    /// The label shown for `value` in the `name` lookup, or the value
    /// itself when it isn't loaded.
    pub fn label(&self, name: &str, value: impl ToString) -> String {
        let value = value.to_string();
        self.0
            .get(name)
            .and_then(|options| options.iter().find(|o| o.value == value))
            .map(|o| o.label.clone())
            .unwrap_or(value)
    }

    pub fn labels<T: ToString>(&self, name: &str, values: &[T]) -> String {
        values
            .iter()
            .map(|v| self.label(name, v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lookup options built from loaded records.
pub fn options_of<R: Resource>(records: Option<&Vec<R>>) -> Vec<SelectOption> {
    records
        .map(|records| {
            records
                .iter()
                .map(|r| SelectOption::new(r.id().to_string(), r.label()))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub spec: FieldSpec,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// Used by lookup fields.
    #[prop_or_default]
    pub options: Vec<SelectOption>,
    /// A file picked but not uploaded yet.
    #[prop_or_default]
    pub pending_file: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<(&'static str, String)>,
    #[prop_or_default]
    pub on_file: Callback<(&'static str, File)>,
}

#[function_component]
pub fn FormField(props: &FormFieldProps) -> Html {
    let spec = &props.spec;
    let name = spec.name;

    let on_input = props.on_change.reform(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        (name, input.value())
    });

    let input = match &spec.kind {
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Password
        | FieldKind::Number
        | FieldKind::Date
        | FieldKind::Time => {
            let input_type = match spec.kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                FieldKind::Time => "time",
                _ => "text",
            };
            html! {
                <input
                    id={name}
                    type={input_type}
                    step={(spec.kind == FieldKind::Number).then_some("any")}
                    class={INPUT_CLASS}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    oninput={on_input}
                />
            }
        }
        FieldKind::Dates => html! {
            <DatesInput
                name={name}
                value={props.value.clone()}
                disabled={props.disabled}
                on_change={props.on_change.clone()}
            />
        },
        FieldKind::Select(options) => {
            select(name, &props.value, options, props.disabled, &props.on_change)
        }
        FieldKind::Lookup => select(
            name,
            &props.value,
            &props.options,
            props.disabled,
            &props.on_change,
        ),
        FieldKind::MultiLookup => html! {
            <MultiSelect
                name={name}
                value={props.value.clone()}
                options={props.options.clone()}
                disabled={props.disabled}
                on_change={props.on_change.clone()}
            />
        },
        FieldKind::TextArea => {
            let on_input = props.on_change.reform(move |e: InputEvent| {
                let input: HtmlTextAreaElement = e.target_unchecked_into();
                (name, input.value())
            });
            html! {
                <textarea
                    id={name}
                    rows="3"
                    class={INPUT_CLASS}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    oninput={on_input}
                />
            }
        }
        FieldKind::Markdown => html! {
            <MarkdownInput
                name={name}
                value={props.value.clone()}
                disabled={props.disabled}
                on_change={props.on_change.clone()}
            />
        },
        FieldKind::Checkbox => {
            let checked = props.value.as_str() == "true";
            let on_toggle = props.on_change.reform(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                (name, input.checked().to_string())
            });
            html! {
                <input
                    id={name}
                    type="checkbox"
                    class="h-4 w-4 rounded border-neutral-300"
                    checked={checked}
                    disabled={props.disabled}
                    onchange={on_toggle}
                />
            }
        }
        FieldKind::File => {
            let on_file = props.on_file.clone();
            let on_pick = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    on_file.emit((name, file));
                }
            });
            let current = serde_json::from_str::<Image>(&props.value)
                .ok()
                .map(|image| image.name);
            html! {
                <div class="space-y-1">
                    <input
                        id={name}
                        type="file"
                        accept="image/*"
                        class="block text-sm"
                        disabled={props.disabled}
                        onchange={on_pick}
                    />
                    if let Some(pending) = &props.pending_file {
                        <p class="text-xs text-neutral-500">
                            {format!("{pending} will be uploaded on save")}
                        </p>
                    } else if let Some(current) = current {
                        <p class="text-xs text-neutral-500">
                            {format!("Current: {current}")}
                        </p>
                    }
                </div>
            }
        }
    };

    let label_after = spec.kind == FieldKind::Checkbox;
    html! {
        <div>
            if label_after {
                <label for={name} class="flex items-center gap-2 text-sm text-neutral-700 dark:text-neutral-300">
                    {input}
                    {spec.label}
                </label>
            } else {
                <label for={name} class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                    {spec.label}
                    if spec.required {
                        <span class="text-red-600">{" *"}</span>
                    }
                </label>
                {input}
            }
            if let Some(error) = &props.error {
                <p class="mt-1 text-xs text-red-600 dark:text-red-400">{error}</p>
            }
        </div>
    }
}

fn select(
    name: &'static str,
    value: &AttrValue,
    options: &[SelectOption],
    disabled: bool,
    on_change: &Callback<(&'static str, String)>,
) -> Html {
    let on_select = on_change.reform(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        (name, select.value())
    });
    html! {
        <select id={name} class={INPUT_CLASS} disabled={disabled} onchange={on_select}>
            <option value="" selected={value.is_empty()}>{"Select..."}</option>
            {for options.iter().map(|o| html! {
                <option value={o.value.clone()} selected={o.value == value.as_str()}>
                    {&o.label}
                </option>
            })}
        </select>
    }
}

/// Split a comma separated field value.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `value` with `item` added, or removed if it was there.
pub fn toggle_in_list(value: &str, item: &str) -> String {
    let mut items = split_list(value);
    if let Some(at) = items.iter().position(|i| i == item) {
        items.remove(at);
    } else {
        items.push(item.to_string());
    }
    items.join(",")
}

#[derive(Properties, PartialEq)]
struct ListInputProps {
    name: &'static str,
    value: AttrValue,
    #[prop_or_default]
    options: Vec<SelectOption>,
    disabled: bool,
    on_change: Callback<(&'static str, String)>,
}

#[function_component]
fn MultiSelect(props: &ListInputProps) -> Html {
    let picked = split_list(&props.value);
    html! {
        <div class="max-h-40 overflow-y-auto border border-neutral-300 dark:border-neutral-600 rounded-md p-2 space-y-1">
            if props.options.is_empty() {
                <p class="text-xs text-neutral-500">{"Nothing to pick from"}</p>
            }
            {for props.options.iter().map(|o| {
                let name = props.name;
                let value = props.value.clone();
                let item = o.value.clone();
                let on_toggle = props
                    .on_change
                    .reform(move |_: Event| (name, toggle_in_list(&value, &item)));
                html! {
                    <label class="flex items-center gap-2 text-sm">
                        <input
                            type="checkbox"
                            checked={picked.contains(&o.value)}
                            disabled={props.disabled}
                            onchange={on_toggle}
                        />
                        {&o.label}
                    </label>
                }
            })}
        </div>
    }
}

/// Several days, added one at a time.
#[function_component]
fn DatesInput(props: &ListInputProps) -> Html {
    let days = split_list(&props.value);
    let name = props.name;

    let on_add = {
        let value = props.value.clone();
        props.on_change.reform(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let day = input.value();
            input.set_value("");
            if split_list(&value).contains(&day) {
                (name, value.to_string())
            } else {
                (name, toggle_in_list(&value, &day))
            }
        })
    };

    html! {
        <div class="space-y-2">
            <input type="date" class={INPUT_CLASS} disabled={props.disabled} onchange={on_add} />
            <div class="flex flex-wrap gap-2">
                {for days.iter().map(|day| {
                    let value = props.value.clone();
                    let item = day.clone();
                    let on_remove = props
                        .on_change
                        .reform(move |_: MouseEvent| (name, toggle_in_list(&value, &item)));
                    html! {
                        <span class="inline-flex items-center gap-1 px-2 py-1 rounded bg-neutral-100 dark:bg-neutral-700 text-xs">
                            {day}
                            <button type="button" onclick={on_remove} title="Remove">{"×"}</button>
                        </span>
                    }
                })}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MarkdownInputProps {
    name: &'static str,
    value: AttrValue,
    disabled: bool,
    on_change: Callback<(&'static str, String)>,
}

#[function_component]
fn MarkdownInput(props: &MarkdownInputProps) -> Html {
    let show_preview = use_state(|| false);
    let name = props.name;

    let on_input = props.on_change.reform(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        (name, input.value())
    });
    let on_toggle = {
        let show_preview = show_preview.clone();
        Callback::from(move |_: MouseEvent| show_preview.set(!*show_preview))
    };

    html! {
        <div class="space-y-2">
            <button
                type="button"
                onclick={on_toggle}
                class="text-xs text-neutral-600 dark:text-neutral-400 underline"
            >
                {if *show_preview { "Edit" } else { "Preview" }}
            </button>
            if *show_preview {
                <div class="min-h-24 p-3 border border-neutral-200 dark:border-neutral-700 rounded-md">
                    <MarkdownText text={props.value.clone()} />
                </div>
            } else {
                <textarea
                    id={name}
                    rows="5"
                    class={INPUT_CLASS}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    oninput={on_input}
                />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_toggle_items() {
        assert_eq!(toggle_in_list("", "3"), "3");
        assert_eq!(toggle_in_list("3,5", "7"), "3,5,7");
        assert_eq!(toggle_in_list("3, 5,7", "5"), "3,7");
    }

    #[test]
    fn lookups_fall_back_to_the_raw_value() {
        let lookups = Lookups::default().with(
            "employee",
            vec![
                SelectOption::new("4", "Maya Lin"),
                SelectOption::new("9", "Eli Novak"),
            ],
        );
        assert_eq!(lookups.label("employee", 9), "Eli Novak");
        assert_eq!(lookups.label("employee", 12), "12");
        assert_eq!(lookups.labels("employee", &[4, 9]), "Maya Lin, Eli Novak");
        assert!(lookups.options("client").is_empty());
    }
}
