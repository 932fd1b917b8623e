//! Landing pages, one per kind of account.

use jiff::Zoned;
use jiff::civil::Date;
use payloads::query::list_key;
use payloads::responses::{
    Client, Contract, Employee, Holiday, Leave, NoticeBoard, Project, Task,
};
use payloads::{ClientId, EmployeeId, LeaveStatus, NoticeTo, ProjectStatus, Resource};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::{QueryHandle, use_list};
use crate::session::AuthSession;

/// Board column a finished task sits in.
const DONE_COLUMN: &str = "Completed";

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub session: AuthSession,
}

#[hook]
fn use_all<R: Resource>() -> QueryHandle<Vec<R>> {
    use_list::<R>(list_key(true, R::PATH, &[]))
}

/// `n` of `records` matching `keep`, or a dash while they load.
fn count<R>(records: &QueryHandle<Vec<R>>, keep: impl Fn(&R) -> bool) -> String {
    match &records.data {
        Some(records) => records.iter().filter(|r| keep(r)).count().to_string(),
        None => "-".into(),
    }
}

fn today() -> Date {
    Zoned::now().date()
}

/// The next `n` holidays from `today` on, soonest first.
pub fn upcoming_holidays(holidays: &[Holiday], today: Date, n: usize) -> Vec<&Holiday> {
    let mut upcoming: Vec<&Holiday> =
        holidays.iter().filter(|h| h.date >= today).collect();
    upcoming.sort_by_key(|h| h.date);
    upcoming.truncate(n);
    upcoming
}

/// Tasks assigned to `employee` that are not done yet, nearest deadline
/// first.
pub fn open_tasks_of(tasks: &[Task], employee: EmployeeId) -> Vec<&Task> {
    let mut open: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.employees.contains(&employee))
        .filter(|t| t.status.as_ref().is_none_or(|s| s.title != DONE_COLUMN))
        .collect();
    open.sort_by_key(|t| t.deadline);
    open
}

/// Latest notices for `audience`, newest first.
fn latest_notices(notices: &[NoticeBoard], audience: NoticeTo, n: usize) -> Vec<&NoticeBoard> {
    let mut latest: Vec<&NoticeBoard> =
        notices.iter().filter(|n| n.notice_to == audience).collect();
    latest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    latest.truncate(n);
    latest
}

#[derive(Properties, PartialEq)]
struct StatProps {
    label: &'static str,
    value: String,
    to: Route,
}

#[function_component]
fn Stat(props: &StatProps) -> Html {
    html! {
        <Link<Route>
            to={props.to.clone()}
            classes="block p-4 rounded-lg border border-neutral-200 dark:border-neutral-700
                     hover:bg-neutral-50 dark:hover:bg-neutral-800"
        >
            <p class="text-sm text-neutral-600 dark:text-neutral-400">{props.label}</p>
            <p class="text-3xl font-semibold">{&props.value}</p>
        </Link<Route>>
    }
}

fn panel(title: &str, body: Html) -> Html {
    html! {
        <div class="p-4 rounded-lg border border-neutral-200 dark:border-neutral-700 space-y-2">
            <h2 class="font-semibold">{title}</h2>
            {body}
        </div>
    }
}

fn notice_list(notices: &QueryHandle<Vec<NoticeBoard>>, audience: NoticeTo) -> Html {
    notices.render("notices", |notices, _| {
        let latest = latest_notices(notices, audience, 5);
        if latest.is_empty() {
            return html! { <p class="text-sm text-neutral-500">{"No notices"}</p> };
        }
        html! {
            <ul class="text-sm space-y-1">
                {for latest.into_iter().map(|notice| html! {
                    <li key={notice.id.to_string()}>
                        <Link<Route> to={Route::NoticeBoardDetail { id: notice.id }} classes="underline">
                            {&notice.heading}
                        </Link<Route>>
                    </li>
                })}
            </ul>
        }
    })
}

#[function_component]
pub fn AdminDashboardPage(_props: &DashboardProps) -> Html {
    let employees = use_all::<Employee>();
    let clients = use_all::<Client>();
    let projects = use_all::<Project>();
    let leaves = use_all::<Leave>();
    let contracts = use_all::<Contract>();
    let notices = use_all::<NoticeBoard>();

    html! {
        <section class="space-y-6">
            <h1 class="text-2xl font-bold">{"Dashboard"}</h1>
            <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
                <Stat label="Employees" value={count(&employees, |_| true)} to={Route::Employees} />
                <Stat label="Clients" value={count(&clients, |_| true)} to={Route::Clients} />
                <Stat
                    label="Projects in progress"
                    value={count(&projects, |p| p.status == ProjectStatus::InProgress)}
                    to={Route::Projects}
                />
                <Stat
                    label="Pending leaves"
                    value={count(&leaves, |l| l.status == LeaveStatus::Pending)}
                    to={Route::Leaves}
                />
                <Stat label="Contracts" value={count(&contracts, |_| true)} to={Route::Contracts} />
            </div>
            {panel("Latest notices", notice_list(&notices, NoticeTo::Employees))}
        </section>
    }
}

#[function_component]
pub fn PrivateDashboardPage(props: &DashboardProps) -> Html {
    let me = EmployeeId(props.session.user.id);
    let tasks = use_all::<Task>();
    let holidays = use_all::<Holiday>();
    let notices = use_all::<NoticeBoard>();

    let my_tasks = tasks.render("tasks", |tasks, _| {
        let open = open_tasks_of(tasks, me);
        if open.is_empty() {
            return html! { <p class="text-sm text-neutral-500">{"Nothing assigned"}</p> };
        }
        html! {
            <ul class="text-sm space-y-1">
                {for open.into_iter().map(|task| html! {
                    <li key={task.id.to_string()} class="flex justify-between gap-4">
                        <span>{&task.name}</span>
                        <span class="text-neutral-500">{task.deadline.to_string()}</span>
                    </li>
                })}
            </ul>
        }
    });

    let next_holidays = holidays.render("holidays", |holidays, _| {
        let upcoming = upcoming_holidays(holidays, today(), 5);
        if upcoming.is_empty() {
            return html! { <p class="text-sm text-neutral-500">{"No upcoming holidays"}</p> };
        }
        html! {
            <ul class="text-sm space-y-1">
                {for upcoming.into_iter().map(|holiday| html! {
                    <li key={holiday.id.to_string()} class="flex justify-between gap-4">
                        <span>{&holiday.occasion}</span>
                        <span class="text-neutral-500">{holiday.date.to_string()}</span>
                    </li>
                })}
            </ul>
        }
    });

    html! {
        <section class="space-y-6">
            <h1 class="text-2xl font-bold">{format!("Welcome, {}", props.session.user.name)}</h1>
            <div class="grid lg:grid-cols-3 gap-4">
                {panel("My open tasks", my_tasks)}
                {panel("Upcoming holidays", next_holidays)}
                {panel("Notices", notice_list(&notices, NoticeTo::Employees))}
            </div>
        </section>
    }
}

#[function_component]
pub fn ClientDashboardPage(props: &DashboardProps) -> Html {
    let me = ClientId(props.session.user.id);
    let projects = use_all::<Project>();
    let contracts = use_all::<Contract>();
    let notices = use_all::<NoticeBoard>();

    html! {
        <section class="space-y-6">
            <h1 class="text-2xl font-bold">{format!("Welcome, {}", props.session.user.name)}</h1>
            <div class="grid grid-cols-2 lg:grid-cols-3 gap-4">
                <Stat
                    label="My projects"
                    value={count(&projects, |p| p.client == Some(me))}
                    to={Route::Projects}
                />
                <Stat
                    label="My contracts"
                    value={count(&contracts, |c| c.client == me)}
                    to={Route::Contracts}
                />
            </div>
            {panel("Notices", notice_list(&notices, NoticeTo::Clients))}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use payloads::responses::StatusColumn;
    use payloads::{HolidayId, StatusColumnId, TaskId, TaskPriority};

    fn holiday(id: i64, day: Date) -> Holiday {
        Holiday {
            id: HolidayId(id),
            date: day,
            occasion: format!("Holiday {id}"),
        }
    }

    fn task(id: i64, deadline: Date, status: &str, employees: &[i64]) -> Task {
        Task {
            id: TaskId(id),
            name: format!("Task {id}"),
            project: None,
            milestone: None,
            start_date: date(2025, 1, 1),
            deadline,
            status: Some(StatusColumn {
                id: StatusColumnId(1),
                title: status.into(),
                color: "#999".into(),
            }),
            priority: TaskPriority::Medium,
            employees: employees.iter().copied().map(EmployeeId).collect(),
            description: None,
            assign_by: None,
            task_category: None,
            created_at: jiff::Timestamp::UNIX_EPOCH,
            updated_at: jiff::Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn only_future_holidays_soonest_first() {
        let holidays = vec![
            holiday(1, date(2025, 12, 25)),
            holiday(2, date(2025, 1, 1)),
            holiday(3, date(2025, 5, 1)),
            holiday(4, date(2025, 4, 30)),
        ];
        let next = upcoming_holidays(&holidays, date(2025, 4, 30), 2);
        let ids: Vec<i64> = next.iter().map(|h| h.id.0).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn open_tasks_skip_finished_and_foreign_ones() {
        let tasks = vec![
            task(1, date(2025, 3, 9), "Doing", &[7]),
            task(2, date(2025, 3, 1), "Completed", &[7]),
            task(3, date(2025, 3, 2), "To Do", &[7, 8]),
            task(4, date(2025, 3, 1), "To Do", &[8]),
        ];
        let open = open_tasks_of(&tasks, EmployeeId(7));
        let ids: Vec<i64> = open.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
