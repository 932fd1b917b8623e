use std::collections::BTreeMap;
use std::rc::Rc;

use payloads::query::list_key;
use payloads::requests::ChangeRole;
use payloads::responses::{
    Client, Department, Designation, Employee, Leave, MutationResponse,
    Project, Task, TimeLog,
};
use payloads::{EmployeeId, LeaveStatus, Resource, Role};
use rust_decimal::Decimal;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use super::dashboards::open_tasks_of;
use crate::components::{Column, Lookups, Modal, ResourceListPage, cells};
use crate::hooks::{use_detail, use_list, use_mutation, use_options};
use crate::session::AuthSession;
use crate::{Route, get_api_client};

fn employee_columns() -> Rc<Vec<Column<Employee>>> {
    type C = Column<Employee>;
    Rc::new(vec![
        C::new("Staff ID", |e, _| cells::text(&e.employee_id)),
        C::new("Name", |e, _| html! {
            <Link<Route> to={Route::EmployeeDetail { id: e.id }} classes="underline">
                {&e.name}
            </Link<Route>>
        }),
        C::new("Email", |e, _| cells::text(&e.email)),
        C::new("Role", |e, _| cells::text(e.role)),
        C::new("Department", |e, _| {
            cells::opt(e.department.as_ref().map(|d| &d.name))
        }),
        C::new("Designation", |e, _| {
            cells::opt(e.designation.as_ref().map(|d| &d.name))
        }),
        C::new("Joined", |e, _| cells::text(e.joining_date)),
        C::new("Can log in", |e, _| cells::flag(e.can_login)),
    ])
}

#[function_component]
pub fn EmployeesPage(props: &PageProps) -> Html {
    let session = &props.session;
    let lookups = Lookups::default()
        .with("department", use_options::<Department>())
        .with("designation", use_options::<Designation>());
    // same key as the page's list, so refetching here refreshes the table
    let employees = use_list::<Employee>(list_key(true, Employee::PATH, &[]));
    let changing = use_state(|| None::<Employee>);

    let change_role = use_mutation(
        |details: ChangeRole| async move { get_api_client().change_role(&details).await },
        session.toast.error_callback(),
    );

    let row_extra = session.is_admin().then(|| {
        let changing = changing.clone();
        Callback::from(move |employee: Employee| {
            let changing = changing.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                changing.set(Some(employee.clone()))
            });
            html! { <button {onclick} class="text-sm underline">{"Role"}</button> }
        })
    });

    let dialog = match &*changing {
        Some(employee) => {
            let on_close = {
                let changing = changing.clone();
                Callback::from(move |_: ()| changing.set(None))
            };
            let on_submit = {
                let trigger = change_role.trigger();
                let toast = session.toast.clone();
                let refetch = employees.refetch.clone();
                let on_close = on_close.clone();
                Callback::from(move |details: ChangeRole| {
                    let toast = toast.clone();
                    let refetch = refetch.clone();
                    let on_close = on_close.clone();
                    let on_success =
                        Callback::from(move |response: Rc<MutationResponse<Employee>>| {
                            toast.success_or(&response.message, "Role updated");
                            refetch.emit(());
                            on_close.emit(());
                        });
                    trigger.emit((details, on_success));
                })
            };
            html! {
                <ChangeRoleDialog
                    employee={employee.clone()}
                    is_running={change_role.status.is_running()}
                    {on_submit}
                    {on_close}
                />
            }
        }
        None => html! {},
    };

    html! {
        <>
            <ResourceListPage<Employee>
                session={session.clone()}
                columns={employee_columns()}
                {lookups}
                {row_extra}
            />
            {dialog}
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ChangeRoleDialogProps {
    employee: Employee,
    is_running: bool,
    on_submit: Callback<ChangeRole>,
    on_close: Callback<()>,
}

#[function_component]
fn ChangeRoleDialog(props: &ChangeRoleDialogProps) -> Html {
    let role = use_state(|| props.employee.role);

    let on_select = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(picked) =
                Role::STAFF.iter().find(|r| r.to_string() == select.value())
            {
                role.set(*picked);
            }
        })
    };

    let on_save = {
        let role = role.clone();
        let employee_id = props.employee.id;
        props.on_submit.reform(move |_: MouseEvent| ChangeRole {
            employee_id,
            role: *role,
        })
    };

    html! {
        <Modal on_close={props.on_close.clone()} close_on_backdrop={!props.is_running}>
            <h3 class="text-lg font-semibold mb-4">
                {format!("Change role of {}", props.employee.name)}
            </h3>
            <select class="w-full px-3 py-2 border rounded-md" onchange={on_select}>
                {for Role::STAFF.iter().map(|r| html! {
                    <option value={r.to_string()} selected={*r == *role}>{r.to_string()}</option>
                })}
            </select>
            <div class="flex justify-end gap-3 mt-6">
                <button
                    onclick={props.on_close.reform(|_: MouseEvent| ())}
                    disabled={props.is_running}
                    class="px-4 py-2 text-sm font-medium border rounded-md"
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_save}
                    disabled={props.is_running || *role == props.employee.role}
                    class="px-4 py-2 text-sm font-medium text-white bg-neutral-900 rounded-md disabled:opacity-50"
                >
                    {if props.is_running { "Saving..." } else { "Save" }}
                </button>
            </div>
        </Modal>
    }
}

#[function_component]
pub fn ClientsPage(props: &PageProps) -> Html {
    type C = Column<Client>;
    let columns = Rc::new(vec![
        C::new("Name", |c, _| {
            cells::text(format!("{} {}", c.salutation, c.name))
        }),
        C::new("Email", |c, _| cells::text(&c.email)),
        C::new("Company", |c, _| cells::opt(c.company_name.as_ref())),
        C::new("Mobile", |c, _| cells::text(&c.mobile)),
        C::new("Country", |c, _| cells::opt(c.country.as_ref())),
        C::new("Can log in", |c, _| cells::flag(c.can_login)),
    ]);

    html! {
        <ResourceListPage<Client> session={props.session.clone()} {columns} />
    }
}

/// Figures shown next to an employee's profile.
#[derive(Debug, PartialEq)]
pub struct EmployeeSummary {
    pub open_tasks: usize,
    pub projects: usize,
    pub hours_logged: Decimal,
    pub leaves_taken: usize,
    /// Assigned tasks per board column.
    pub tasks_by_status: BTreeMap<String, usize>,
}

pub fn employee_summary(
    employee: EmployeeId,
    tasks: &[Task],
    projects: &[Project],
    logs: &[TimeLog],
    leaves: &[Leave],
) -> EmployeeSummary {
    let mut tasks_by_status = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.employees.contains(&employee)) {
        if let Some(status) = &task.status {
            *tasks_by_status.entry(status.title.clone()).or_default() += 1;
        }
    }
    EmployeeSummary {
        open_tasks: open_tasks_of(tasks, employee).len(),
        projects: projects
            .iter()
            .filter(|p| p.employees.contains(&employee))
            .count(),
        hours_logged: logs
            .iter()
            .filter(|l| l.employee == employee)
            .map(|l| l.total_hours)
            .sum(),
        leaves_taken: leaves
            .iter()
            .filter(|l| l.employee == employee && l.status == LeaveStatus::Approved)
            .count(),
        tasks_by_status,
    }
}

#[derive(Properties, PartialEq)]
pub struct EmployeeDetailProps {
    pub session: AuthSession,
    pub id: EmployeeId,
}

fn profile_row(label: &str, value: Html) -> Html {
    html! {
        <>
            <dt class="text-neutral-500">{label.to_string()}</dt>
            <dd>{value}</dd>
        </>
    }
}

/// One employee's profile with their work at a glance.
#[function_component]
pub fn EmployeeDetailPage(props: &EmployeeDetailProps) -> Html {
    let employee = use_detail::<Employee>(true, Some(props.id));
    let of_employee = |path: &str, field: &str| {
        list_key(true, path, &[(field, Some(props.id.to_string()))])
    };
    let tasks = use_list::<Task>(of_employee(Task::PATH, "employees"));
    let projects = use_list::<Project>(of_employee(Project::PATH, "employees"));
    let logs = use_list::<TimeLog>(of_employee(TimeLog::PATH, "employee"));
    let leaves = use_list::<Leave>(of_employee(Leave::PATH, "employee"));

    let summary = employee_summary(
        props.id,
        tasks.data.as_deref().map(Vec::as_slice).unwrap_or_default(),
        projects.data.as_deref().map(Vec::as_slice).unwrap_or_default(),
        logs.data.as_deref().map(Vec::as_slice).unwrap_or_default(),
        leaves.data.as_deref().map(Vec::as_slice).unwrap_or_default(),
    );

    let profile = employee.render("employee", |e, _| html! {
        <div class="space-y-2">
            <h1 class="text-2xl font-bold">{&e.name}</h1>
            <p class="text-sm text-neutral-600 dark:text-neutral-400">{e.role.to_string()}</p>
            <dl class="grid grid-cols-2 gap-2 text-sm max-w-xl">
                {profile_row("Staff ID", cells::text(&e.employee_id))}
                {profile_row("Email", cells::text(&e.email))}
                {profile_row("Designation", cells::opt(e.designation.as_ref().map(|d| &d.name)))}
                {profile_row("Department", cells::opt(e.department.as_ref().map(|d| &d.name)))}
                {profile_row("Mobile", cells::text(&e.mobile))}
                {profile_row("Gender", cells::text(e.gender))}
                {profile_row("Joined", cells::text(e.joining_date))}
                {profile_row("Date of birth", cells::opt(e.date_of_birth))}
                {profile_row("Hourly rate", cells::text(e.hourly_rate))}
                {profile_row("Address", cells::opt(e.address.as_ref()))}
                {profile_row("Skills", cells::text(e.skills.join(", ")))}
            </dl>
        </div>
    });

    let stats = [
        ("Open tasks", summary.open_tasks.to_string()),
        ("Projects", summary.projects.to_string()),
        ("Hours logged", summary.hours_logged.to_string()),
        ("Leaves taken", summary.leaves_taken.to_string()),
    ];

    html! {
        <section class="space-y-6">
            <Link<Route> to={Route::Employees} classes="text-sm underline">{"All employees"}</Link<Route>>
            {profile}
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {for stats.into_iter().map(|(label, value)| html! {
                    <div class="p-4 rounded-lg border border-neutral-200 dark:border-neutral-700">
                        <p class="text-sm text-neutral-600 dark:text-neutral-400">{label}</p>
                        <p class="text-3xl font-semibold">{value}</p>
                    </div>
                })}
            </div>
            <ul class="text-sm space-y-1">
                {for summary.tasks_by_status.iter().map(|(status, n)| html! {
                    <li key={status.clone()}>{format!("{status}: {n}")}</li>
                })}
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use jiff::civil::{date, time};
    use payloads::responses::StatusColumn;
    use payloads::{
        LeaveDuration, LeaveId, LeaveTypeId, ProjectId, ProjectStatus,
        StatusColumnId, TaskId, TaskPriority, TimeLogId,
    };
    use rust_decimal::dec;

    fn task(id: i64, status: &str, employees: &[i64]) -> Task {
        Task {
            id: TaskId(id),
            name: format!("Task {id}"),
            project: None,
            milestone: None,
            start_date: date(2025, 1, 1),
            deadline: date(2025, 2, 1),
            status: Some(StatusColumn {
                id: StatusColumnId(1),
                title: status.into(),
                color: "#999".into(),
            }),
            priority: TaskPriority::Low,
            employees: employees.iter().copied().map(EmployeeId).collect(),
            description: None,
            assign_by: None,
            task_category: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn log(employee: i64, hours: Decimal) -> TimeLog {
        TimeLog {
            id: TimeLogId(employee),
            task: TaskId(1),
            employee: EmployeeId(employee),
            project: None,
            starts_on_date: date(2025, 1, 2),
            starts_on_time: time(9, 0, 0, 0),
            ends_on_date: date(2025, 1, 2),
            ends_on_time: time(17, 0, 0, 0),
            memo: String::new(),
            total_hours: hours,
        }
    }

    fn leave(id: i64, status: LeaveStatus) -> Leave {
        Leave {
            id: LeaveId(id),
            employee: EmployeeId(3),
            leave_type: LeaveTypeId(1),
            date: date(2025, 3, id as i8),
            duration: LeaveDuration::Single,
            status,
            reason: "Trip".into(),
        }
    }

    #[test]
    fn summary_counts_only_the_employees_own_work() {
        let me = EmployeeId(3);
        let tasks = vec![
            task(1, "Doing", &[3]),
            task(2, "Completed", &[3, 4]),
            task(3, "Doing", &[4]),
            task(4, "To Do", &[3]),
        ];
        let projects = vec![Project {
            id: ProjectId(1),
            name: "Relaunch".into(),
            client: None,
            start_date: date(2025, 1, 1),
            deadline: None,
            status: ProjectStatus::InProgress,
            budget: None,
            currency: None,
            summary: None,
            employees: vec![me],
        }];
        let logs = vec![log(3, dec!(7.5)), log(4, dec!(8)), log(3, dec!(1.25))];
        let leaves = vec![
            leave(1, LeaveStatus::Approved),
            leave(2, LeaveStatus::Pending),
        ];

        let summary = employee_summary(me, &tasks, &projects, &logs, &leaves);
        assert_eq!(summary.open_tasks, 2);
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.hours_logged, dec!(8.75));
        assert_eq!(summary.leaves_taken, 1);
        assert_eq!(
            summary.tasks_by_status.into_iter().collect::<Vec<_>>(),
            vec![
                ("Completed".to_string(), 1),
                ("Doing".to_string(), 1),
                ("To Do".to_string(), 1),
            ]
        );
    }
}
