use std::collections::BTreeMap;
use std::rc::Rc;

use jiff::Zoned;
use jiff::civil::Date;
use payloads::EmployeeId;
use payloads::forms::{FormModel, SelectOption};
use payloads::query::list_key;
use payloads::requests::CheckAttendance;
use payloads::responses::{Attendance, Department, Employee, MutationResponse};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::PageProps;
use crate::components::{FormDialog, Lookups};
use crate::get_api_client;
use crate::hooks::{use_mutation, use_options, use_query};

/// How one day of a sheet is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Present,
    Late,
    HalfDay,
}

impl Mark {
    fn of(record: &Attendance) -> Self {
        if record.half_day {
            Mark::HalfDay
        } else if record.late {
            Mark::Late
        } else {
            Mark::Present
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Mark::Present => "✓",
            Mark::Late => "L",
            Mark::HalfDay => "½",
        }
    }
}

/// One employee's month, a slot per day.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub employee: EmployeeId,
    pub days: Vec<Option<Mark>>,
}

/// The first day of a `YYYY-MM` month.
pub fn month_start(month: &str) -> Option<Date> {
    format!("{}-01", month.trim()).parse().ok()
}

fn current_month() -> String {
    let today = Zoned::now().date();
    format!("{:04}-{:02}", today.year(), today.month())
}

/// Lay the records of the month starting at `start` out as a grid. Records
/// from other months are left out.
pub fn month_sheet(records: &[Attendance], start: Date) -> Vec<SheetRow> {
    let days = usize::try_from(start.days_in_month()).unwrap_or(31);
    let mut rows: BTreeMap<EmployeeId, Vec<Option<Mark>>> = BTreeMap::new();
    for record in records {
        if record.date.year() != start.year() || record.date.month() != start.month() {
            continue;
        }
        let Ok(day) = usize::try_from(record.date.day() - 1) else {
            continue;
        };
        let row = rows.entry(record.employee).or_insert_with(|| vec![None; days]);
        if let Some(slot) = row.get_mut(day) {
            *slot = Some(Mark::of(record));
        }
    }
    rows.into_iter()
        .map(|(employee, days)| SheetRow { employee, days })
        .collect()
}

fn select(
    label: &'static str,
    options: &[SelectOption],
    value: &str,
    on_change: Callback<String>,
) -> Html {
    let onchange = on_change.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });
    html! {
        <label class="text-sm space-y-1">
            <span class="block text-neutral-600 dark:text-neutral-400">{label}</span>
            <select class="px-3 py-2 border rounded-md" {onchange}>
                <option value="" selected={value.is_empty()}>{"All"}</option>
                {for options.iter().map(|o| html! {
                    <option value={o.value.clone()} selected={o.value == value}>{&o.label}</option>
                })}
            </select>
        </label>
    }
}

/// Monthly attendance sheet with department and employee filters, and a
/// dialog to record a clock-in.
#[function_component]
pub fn AttendancePage(props: &PageProps) -> Html {
    let session = &props.session;
    let month = use_state(current_month);
    let department = use_state(String::new);
    let employee = use_state(String::new);
    let opening = use_state(|| None::<u32>);
    let opened = use_mut_ref(|| 0_u32);

    let departments = use_options::<Department>();
    let employees = use_options::<Employee>();
    let lookups = Lookups::default().with("employee", employees.clone());

    let start = month_start(&month);
    let key = list_key(
        start.is_some(),
        "attendances",
        &[
            ("date", start.map(|d| d.to_string())),
            ("department", Some((*department).clone())),
            ("employee", Some((*employee).clone())),
        ],
    );
    let sheet = use_query(key, |key| async move {
        get_api_client().attendances(&key).await
    });

    let check = use_mutation(
        |details: CheckAttendance| async move {
            get_api_client().check_attendance(&details).await
        },
        session.toast.error_callback(),
    );

    let on_month = {
        let month = month.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            month.set(input.value());
        })
    };
    let set = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |value: String| state.set(value))
    };

    let on_open = {
        let opening = opening.clone();
        Callback::from(move |_: MouseEvent| {
            *opened.borrow_mut() += 1;
            opening.set(Some(*opened.borrow()));
        })
    };
    let on_close = {
        let opening = opening.clone();
        Callback::from(move |_: ()| opening.set(None))
    };
    let on_submit = {
        let trigger = check.trigger();
        let toast = session.toast.clone();
        let refetch = sheet.refetch.clone();
        let on_close = on_close.clone();
        Callback::from(move |details: CheckAttendance| {
            let toast = toast.clone();
            let refetch = refetch.clone();
            let on_close = on_close.clone();
            let on_success =
                Callback::from(move |response: Rc<MutationResponse<Attendance>>| {
                    toast.success_or(&response.message, "Attendance saved");
                    refetch.emit(());
                    on_close.emit(());
                });
            trigger.emit((details, on_success));
        })
    };

    let body = match start {
        None => html! { <p class="text-sm text-neutral-500">{"Pick a month"}</p> },
        Some(start) => sheet.render("attendance", |records, refreshing| {
            let rows = month_sheet(records, start);
            let days = start.days_in_month();
            html! {
                <div class="space-y-2">
                    if refreshing {
                        <p class="text-sm text-neutral-500">{"Refreshing..."}</p>
                    }
                    <div class="overflow-x-auto border border-neutral-200 dark:border-neutral-700 rounded-lg">
                        <table class="min-w-full text-xs">
                            <thead class="bg-neutral-50 dark:bg-neutral-800">
                                <tr>
                                    <th class="px-3 py-2 text-left">{"Employee"}</th>
                                    {for (1..=days).map(|d| html! { <th class="px-1 py-2">{d}</th> })}
                                </tr>
                            </thead>
                            <tbody>
                                if rows.is_empty() {
                                    <tr>
                                        <td colspan={(days + 1).to_string()} class="px-3 py-8 text-center text-neutral-500">
                                            {"No attendance recorded"}
                                        </td>
                                    </tr>
                                }
                                {for rows.iter().map(|row| html! {
                                    <tr key={row.employee.to_string()} class="border-t border-neutral-200 dark:border-neutral-700">
                                        <td class="px-3 py-1 whitespace-nowrap">
                                            {lookups.label("employee", row.employee)}
                                        </td>
                                        {for row.days.iter().map(|mark| html! {
                                            <td class="px-1 py-1 text-center">
                                                {mark.map(Mark::symbol).unwrap_or("")}
                                            </td>
                                        })}
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                    <p class="text-xs text-neutral-500">{"✓ present, L late, ½ half day"}</p>
                </div>
            }
        }),
    };

    let dialog = match *opening {
        Some(opening) => {
            let initial = CheckAttendance::initial_values()
                .with("date", Zoned::now().date().to_string());
            html! {
                <FormDialog<CheckAttendance>
                    title="Check attendance"
                    {initial}
                    {opening}
                    lookups={lookups.clone()}
                    is_running={check.status.is_running()}
                    {on_submit}
                    {on_close}
                />
            }
        }
        None => html! {},
    };

    html! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-end gap-4">
                <h1 class="text-2xl font-bold mr-auto">{"Attendance"}</h1>
                <label class="text-sm space-y-1">
                    <span class="block text-neutral-600 dark:text-neutral-400">{"Month"}</span>
                    <input type="month" class="px-3 py-2 border rounded-md" value={(*month).clone()} onchange={on_month} />
                </label>
                {select("Department", &departments, &department, set(&department))}
                {select("Employee", &employees, &employee, set(&employee))}
                if session.can_edit() {
                    <button
                        onclick={on_open}
                        class="px-3 py-2 text-sm text-white bg-neutral-900 dark:bg-neutral-100
                               dark:text-neutral-900 rounded-md"
                    >
                        {"Check attendance"}
                    </button>
                }
            </div>
            {body}
            {dialog}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::{date, time};
    use payloads::AttendanceId;

    fn record(id: i64, employee: i64, day: Date, late: bool, half_day: bool) -> Attendance {
        Attendance {
            id: AttendanceId(id),
            employee: EmployeeId(employee),
            date: day,
            clock_in_time: time(8, 0, 0, 0),
            clock_out_time: time(17, 0, 0, 0),
            late,
            half_day,
            working_from: "Office".into(),
        }
    }

    #[test]
    fn month_input_gives_the_first_day() {
        assert_eq!(month_start("2025-02"), Some(date(2025, 2, 1)));
        assert_eq!(month_start(""), None);
        assert_eq!(month_start("2025-13"), None);
    }

    #[test]
    fn sheet_has_a_slot_per_day() {
        let records = vec![
            record(1, 2, date(2024, 2, 1), false, false),
            record(2, 2, date(2024, 2, 29), true, false),
            record(3, 1, date(2024, 2, 10), false, true),
            record(4, 1, date(2024, 3, 1), false, false),
        ];
        let sheet = month_sheet(&records, date(2024, 2, 1));
        assert_eq!(sheet.len(), 2);

        assert_eq!(sheet[0].employee, EmployeeId(1));
        assert_eq!(sheet[0].days.len(), 29);
        assert_eq!(sheet[0].days[9], Some(Mark::HalfDay));
        assert_eq!(sheet[0].days.iter().flatten().count(), 1);

        assert_eq!(sheet[1].days[0], Some(Mark::Present));
        assert_eq!(sheet[1].days[28], Some(Mark::Late));
    }
}
