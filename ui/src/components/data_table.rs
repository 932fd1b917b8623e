use std::rc::Rc;

use payloads::Resource;
use yew::prelude::*;

use super::Lookups;

/// One table column: a header and how to draw a record's cell.
pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R, &Lookups) -> Html,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, cell: fn(&R, &Lookups) -> Html) -> Self {
        Self { header, cell }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            cell: self.cell,
        }
    }
}

// columns are fixed per page, the header is enough to tell them apart
impl<R> PartialEq for Column<R> {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<R: Resource> {
    pub rows: Rc<Vec<R>>,
    pub columns: Rc<Vec<Column<R>>>,
    #[prop_or_default]
    pub lookups: Lookups,
    /// Show a checkbox per row.
    #[prop_or_default]
    pub selectable: bool,
    #[prop_or_default]
    pub selected: Vec<R::Id>,
    #[prop_or_default]
    pub on_toggle: Callback<R::Id>,
    #[prop_or_default]
    pub on_toggle_all: Callback<()>,
    /// Buttons at the end of each row.
    #[prop_or_default]
    pub actions: Option<Callback<R, Html>>,
    #[prop_or_else(|| AttrValue::from("Nothing here yet"))]
    pub empty_text: AttrValue,
}

#[function_component]
pub fn DataTable<R: Resource>(props: &DataTableProps<R>) -> Html {
    let all_selected = !props.rows.is_empty()
        && props.rows.iter().all(|r| props.selected.contains(&r.id()));
    let span = props.columns.len()
        + usize::from(props.selectable)
        + usize::from(props.actions.is_some());

    let header = html! {
        <tr>
            if props.selectable {
                <th class="w-10 px-3 py-2">
                    <input
                        type="checkbox"
                        title="Select all"
                        checked={all_selected}
                        onchange={props.on_toggle_all.reform(|_: Event| ())}
                    />
                </th>
            }
            {for props.columns.iter().map(|c| html! {
                <th class="px-3 py-2 text-left text-xs font-semibold uppercase tracking-wide
                           text-neutral-600 dark:text-neutral-400">
                    {c.header}
                </th>
            })}
            if props.actions.is_some() {
                <th class="px-3 py-2" />
            }
        </tr>
    };

    let rows = props.rows.iter().map(|row| {
        let id = row.id();
        let on_toggle = props.on_toggle.reform(move |_: Event| id);
        html! {
            <tr key={id.to_string()} class="border-t border-neutral-200 dark:border-neutral-700
                                          hover:bg-neutral-50 dark:hover:bg-neutral-800">
                if props.selectable {
                    <td class="px-3 py-2">
                        <input
                            type="checkbox"
                            checked={props.selected.contains(&id)}
                            onchange={on_toggle}
                        />
                    </td>
                }
                {for props.columns.iter().map(|c| html! {
                    <td class="px-3 py-2 text-sm text-neutral-900 dark:text-neutral-100">
                        {(c.cell)(row, &props.lookups)}
                    </td>
                })}
                if let Some(actions) = &props.actions {
                    <td class="px-3 py-2 text-right whitespace-nowrap">
                        {actions.emit(row.clone())}
                    </td>
                }
            </tr>
        }
    });

    html! {
        <div class="overflow-x-auto border border-neutral-200 dark:border-neutral-700 rounded-lg">
            <table class="min-w-full">
                <thead class="bg-neutral-50 dark:bg-neutral-800">{header}</thead>
                <tbody>
                    if props.rows.is_empty() {
                        <tr>
                            <td colspan={span.to_string()} class="px-3 py-8 text-center text-sm text-neutral-500">
                                {&props.empty_text}
                            </td>
                        </tr>
                    } else {
                        {for rows}
                    }
                </tbody>
            </table>
        </div>
    }
}

/// Cell helpers shared by the pages.
pub mod cells {
    use std::fmt::Display;

    use payloads::Image;
    use yew::prelude::*;

    pub fn text(value: impl Display) -> Html {
        html! { {value.to_string()} }
    }

    /// A hosted file, opened in a new tab.
    pub fn file(file: &Image) -> Html {
        html! {
            <a href={file.url.clone()} target="_blank" rel="noopener" class="underline">
                {&file.name}
            </a>
        }
    }

    pub fn opt(value: Option<impl Display>) -> Html {
        match value {
            Some(value) => text(value),
            None => html! { <span class="text-neutral-400">{"-"}</span> },
        }
    }

    pub fn flag(value: bool) -> Html {
        text(if value { "Yes" } else { "No" })
    }

    pub fn badge(label: impl Display, color: &str) -> Html {
        html! {
            <span
                class="inline-block px-2 py-0.5 rounded text-xs font-medium text-white"
                style={format!("background-color: {color}")}
            >
                {label.to_string()}
            </span>
        }
    }
}
