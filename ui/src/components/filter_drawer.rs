use jiff::civil::Date;
use payloads::Resource;
use payloads::filters::{
    ControlKind, DateRange, FilterControl, FilterInput, RecordFilter,
};
use payloads::forms::SelectOption;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::Lookups;

#[derive(Properties, PartialEq)]
pub struct FilterDrawerProps<R: Resource> {
    pub active: Option<R::Filter>,
    #[prop_or_default]
    pub lookups: Lookups,
    /// `None` clears the filter.
    pub on_apply: Callback<Option<R::Filter>>,
    pub on_close: Callback<()>,
}

/// Side panel with one control per filterable column. Only one filter is
/// active at a time.
#[function_component]
pub fn FilterDrawer<R: Resource>(props: &FilterDrawerProps<R>) -> Html {
    let controls = <R::Filter as RecordFilter<R>>::controls();
    let column = use_state(|| {
        props
            .active
            .as_ref()
            .map(|f| f.column_id())
            .or_else(|| controls.first().map(|c| c.column_id))
            .unwrap_or_default()
    });
    let text = use_state(String::new);
    let from = use_state(String::new);
    let to = use_state(String::new);

    let Some(control) = controls.iter().find(|c| c.column_id == *column).cloned()
    else {
        return html! {};
    };

    let on_column = {
        let column = column.clone();
        let text = text.clone();
        let controls = controls.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(c) = controls.iter().find(|c| c.column_id == select.value()) {
                column.set(c.column_id);
                text.set(String::new());
            }
        })
    };

    let on_apply = {
        let control = control.clone();
        let text = text.clone();
        let from = from.clone();
        let to = to.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let input = filter_input(&control, &text, &from, &to);
            on_apply.emit(<R::Filter as RecordFilter<R>>::from_input(
                control.column_id,
                &input,
            ));
        })
    };

    let on_clear = props.on_apply.reform(|_: MouseEvent| None);
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="fixed inset-0 z-40 flex justify-end bg-black bg-opacity-30">
            <aside class="w-80 h-full bg-white dark:bg-neutral-800 shadow-xl p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h3 class="text-lg font-semibold">{"Filter"}</h3>
                    <button onclick={on_close} title="Close">{"×"}</button>
                </div>
                <select class="w-full px-3 py-2 border rounded-md" onchange={on_column}>
                    {for controls.iter().map(|c| html! {
                        <option value={c.column_id} selected={c.column_id == *column}>
                            {c.label}
                        </option>
                    })}
                </select>
                {control_input(&control, &props.lookups, &text, &from, &to)}
                <div class="flex gap-3">
                    <button
                        onclick={on_apply}
                        class="flex-1 px-4 py-2 text-sm font-medium text-white bg-neutral-900 rounded-md"
                    >
                        {"Apply"}
                    </button>
                    <button
                        onclick={on_clear}
                        class="flex-1 px-4 py-2 text-sm font-medium border rounded-md"
                    >
                        {"Clear"}
                    </button>
                </div>
            </aside>
        </div>
    }
}

fn filter_input(
    control: &FilterControl,
    text: &str,
    from: &str,
    to: &str,
) -> FilterInput {
    match control.kind {
        ControlKind::DateRange => {
            match (from.parse::<Date>(), to.parse::<Date>()) {
                (Ok(a), Ok(b)) => FilterInput::Range(DateRange::new(a, b)),
                // a single day is a one day range
                (Ok(day), Err(_)) | (Err(_), Ok(day)) => {
                    FilterInput::Range(DateRange::new(day, day))
                }
                _ => FilterInput::Text(String::new()),
            }
        }
        _ => FilterInput::Text(text.to_string()),
    }
}

fn control_input(
    control: &FilterControl,
    lookups: &Lookups,
    text: &UseStateHandle<String>,
    from: &UseStateHandle<String>,
    to: &UseStateHandle<String>,
) -> Html {
    let set = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    match &control.kind {
        ControlKind::Text => html! {
            <input
                type="text"
                class="w-full px-3 py-2 border rounded-md"
                placeholder={control.label}
                value={(**text).clone()}
                onchange={set(text)}
            />
        },
        ControlKind::Select(options) => options_input(options, text),
        ControlKind::Lookup => {
            options_input(&lookups.options(control.column_id), text)
        }
        ControlKind::DateRange => html! {
            <div class="space-y-2">
                <input type="date" class="w-full px-3 py-2 border rounded-md"
                    value={(**from).clone()} onchange={set(from)} />
                <input type="date" class="w-full px-3 py-2 border rounded-md"
                    value={(**to).clone()} onchange={set(to)} />
            </div>
        },
    }
}

fn options_input(options: &[SelectOption], text: &UseStateHandle<String>) -> Html {
    let on_select = {
        let text = text.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            text.set(select.value());
        })
    };
    html! {
        <select class="w-full px-3 py-2 border rounded-md" onchange={on_select}>
            <option value="" selected={text.is_empty()}>{"Any"}</option>
            {for options.iter().map(|o| html! {
                <option value={o.value.clone()} selected={o.value == **text}>
                    {&o.label}
                </option>
            })}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn date_range_input() {
        let control = FilterControl::new("date", "Date", ControlKind::DateRange);
        assert_eq!(
            filter_input(&control, "", "2024-03-10", "2024-03-01"),
            FilterInput::Range(DateRange::new(date(2024, 3, 1), date(2024, 3, 10)))
        );
        assert_eq!(
            filter_input(&control, "", "2024-03-10", ""),
            FilterInput::Range(DateRange::new(date(2024, 3, 10), date(2024, 3, 10)))
        );
        assert_eq!(
            filter_input(&control, "", "", ""),
            FilterInput::Text(String::new())
        );
    }

    #[test]
    fn text_input() {
        let control = FilterControl::new("name", "Name", ControlKind::Text);
        assert_eq!(
            filter_input(&control, "maya", "", ""),
            FilterInput::Text("maya".into())
        );
    }
}
