use std::rc::Rc;

use payloads::forms::{FormValues, SelectOption};
use payloads::query::{list_key, nested_key};
use payloads::realtime::Room;
use payloads::responses::{
    Client, Employee, Milestone, Project, ProjectDiscussionRoom, StatusColumn,
    Task, TimeLog,
};
use payloads::{ProjectId, ProjectStatus, Resource, Role};
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use crate::Route;
use crate::components::{
    Column, Lookups, MarkdownText, ResourceListPage, cells, options_of,
};
use crate::hooks::{
    QueryHandle, use_detail, use_list, use_options, use_status_columns,
};
use crate::session::AuthSession;

fn project_badge(status: ProjectStatus) -> Html {
    let color = match status {
        ProjectStatus::NotStarted => "#6b7280",
        ProjectStatus::InProgress => "#2563eb",
        ProjectStatus::OnHold => "#d97706",
        ProjectStatus::Canceled => "#dc2626",
        ProjectStatus::Finished => "#16a34a",
    };
    cells::badge(status, color)
}

#[function_component]
pub fn ProjectsPage(props: &PageProps) -> Html {
    let lookups = Lookups::default()
        .with("client", use_options::<Client>())
        .with("employees", use_options::<Employee>());

    type C = Column<Project>;
    let columns = Rc::new(vec![
        C::new("Name", |p, _| html! {
            <Link<Route> to={Route::ProjectTasks { id: p.id }} classes="underline">
                {&p.name}
            </Link<Route>>
        }),
        C::new("Client", |p, l| cells::opt(p.client.map(|c| l.label("client", c)))),
        C::new("Start", |p, _| cells::text(p.start_date)),
        C::new("Deadline", |p, _| cells::opt(p.deadline)),
        C::new("Status", |p, _| project_badge(p.status)),
        C::new("Members", |p, l| cells::text(l.labels("employees", &p.employees))),
    ]);

    html! {
        <ResourceListPage<Project> session={props.session.clone()} {columns} {lookups} />
    }
}

fn status_options(columns: Option<&Vec<StatusColumn>>) -> Vec<SelectOption> {
    columns
        .map(|columns| {
            columns
                .iter()
                .map(|c| SelectOption::new(c.id.to_string(), &c.title))
                .collect()
        })
        .unwrap_or_default()
}

fn task_columns() -> Rc<Vec<Column<Task>>> {
    type C = Column<Task>;
    Rc::new(vec![
        C::new("Name", |t, _| cells::text(&t.name)),
        C::new("Project", |t, l| cells::opt(t.project.map(|p| l.label("project", p)))),
        C::new("Deadline", |t, _| cells::text(t.deadline)),
        C::new("Status", |t, _| match &t.status {
            Some(status) => cells::badge(&status.title, &status.color),
            None => cells::opt(None::<&str>),
        }),
        C::new("Priority", |t, _| cells::text(t.priority)),
        C::new("Assignees", |t, l| cells::text(l.labels("employees", &t.employees))),
    ])
}

/// Lookups a task form needs. Milestones are narrowed to `project` when
/// the tasks belong to one.
#[hook]
fn use_task_lookups(project: Option<ProjectId>) -> Lookups {
    let milestones = use_list::<Milestone>(list_key(
        true,
        "milestones",
        &[("project", project.map(|p| p.to_string()))],
    ));
    let status_columns = use_status_columns();
    Lookups::default()
        .with("project", use_options::<Project>())
        .with("milestone", options_of(milestones.data.as_deref()))
        .with("status", status_options(status_columns.data.as_deref()))
        .with("employees", use_options::<Employee>())
}

#[function_component]
pub fn TasksPage(props: &PageProps) -> Html {
    let lookups = use_task_lookups(None);
    html! {
        <ResourceListPage<Task>
            session={props.session.clone()}
            columns={task_columns()}
            {lookups}
            room={Some(Room::Task)}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectTasksProps {
    pub session: AuthSession,
    pub id: ProjectId,
}

/// The tasks of one project. Changes made by anyone working on the
/// project show up without a reload.
#[function_component]
pub fn ProjectTasksPage(props: &ProjectTasksProps) -> Html {
    let project = use_detail::<Project>(true, Some(props.id));
    let lookups = use_task_lookups(Some(props.id));

    html! {
        <div class="space-y-6">
            {project_header(&project, &props.session)}
            <ResourceListPage<Task>
                session={props.session.clone()}
                columns={task_columns()}
                {lookups}
                title={AttrValue::from("Tasks")}
                query_key={nested_key(true, "projects", Some(props.id), "tasks")}
                room={Some(Room::ProjectTask(props.id))}
                create_values={FormValues::new().with("project", props.id.to_string())}
            />
        </div>
    }
}

/// The project's name and status with links to its sub-pages. Clients
/// never see the discussion link.
fn project_header(project: &QueryHandle<Project>, session: &AuthSession) -> Html {
    let staff = session.role() != Role::Client;
    project.render("project", |project, _| html! {
        <div class="space-y-1">
            <Link<Route> to={Route::Projects} classes="text-sm underline">{"All projects"}</Link<Route>>
            <div class="flex items-center gap-3">
                <h1 class="text-2xl font-bold">{&project.name}</h1>
                {project_badge(project.status)}
            </div>
            if let Some(summary) = &project.summary {
                <p class="text-sm text-neutral-600 dark:text-neutral-400">{summary}</p>
            }
            <nav class="flex gap-4 text-sm">
                <Link<Route> to={Route::ProjectTasks { id: project.id }} classes="underline">{"Tasks"}</Link<Route>>
                if staff {
                    <Link<Route> to={Route::ProjectDiscussions { id: project.id }} classes="underline">
                        {"Discussion"}
                    </Link<Route>>
                }
            </nav>
        </div>
    })
}

/// Threads opened on one project. New threads from anyone on the project
/// show up without a reload.
#[function_component]
pub fn ProjectDiscussionsPage(props: &ProjectTasksProps) -> Html {
    let project = use_detail::<Project>(true, Some(props.id));
    let lookups = Lookups::default().with("assigner", use_options::<Employee>());

    type C = Column<ProjectDiscussionRoom>;
    let columns = Rc::new(vec![
        C::new("Title", |d, _| html! {
            <div class="space-y-1">
                <p class="font-medium">{&d.title}</p>
                <MarkdownText text={d.description.clone()} />
            </div>
        }),
        C::new("Category", |d, _| cells::opt(d.category.as_ref())),
        C::new("Started by", |d, l| cells::opt(d.assigner.map(|a| l.label("assigner", a)))),
        C::new("Opened", |d, _| cells::text(d.created_at.strftime("%Y-%m-%d %H:%M"))),
    ]);

    html! {
        <div class="space-y-6">
            {project_header(&project, &props.session)}
            <ResourceListPage<ProjectDiscussionRoom>
                session={props.session.clone()}
                {columns}
                {lookups}
                query_key={nested_key(true, "projects", Some(props.id), ProjectDiscussionRoom::PATH)}
                room={Some(Room::ProjectDiscussion(props.id))}
                create_values={FormValues::new().with("project", props.id.to_string())}
            />
        </div>
    }
}

#[function_component]
pub fn MilestonesPage(props: &PageProps) -> Html {
    let lookups = Lookups::default().with("project", use_options::<Project>());

    type C = Column<Milestone>;
    let columns = Rc::new(vec![
        C::new("Title", |m, _| cells::text(&m.title)),
        C::new("Project", |m, l| cells::text(l.label("project", m.project))),
        C::new("Cost", |m, _| cells::text(m.cost)),
        C::new("In budget", |m, _| cells::flag(m.add_to_budget)),
        C::new("Complete", |m, _| cells::flag(m.status)),
    ]);

    html! {
        <ResourceListPage<Milestone> session={props.session.clone()} {columns} {lookups} />
    }
}

#[function_component]
pub fn TimeLogsPage(props: &PageProps) -> Html {
    let lookups = Lookups::default()
        .with("project", use_options::<Project>())
        .with("task", use_options::<Task>())
        .with("employee", use_options::<Employee>());

    type C = Column<TimeLog>;
    let columns = Rc::new(vec![
        C::new("Employee", |t, l| cells::text(l.label("employee", t.employee))),
        C::new("Task", |t, l| cells::text(l.label("task", t.task))),
        C::new("Start", |t, _| {
            cells::text(format!("{} {}", t.starts_on_date, t.starts_on_time.strftime("%H:%M")))
        }),
        C::new("End", |t, _| {
            cells::text(format!("{} {}", t.ends_on_date, t.ends_on_time.strftime("%H:%M")))
        }),
        C::new("Hours", |t, _| cells::text(t.total_hours)),
        C::new("Memo", |t, _| cells::text(&t.memo)),
    ]);

    html! {
        <ResourceListPage<TimeLog>
            session={props.session.clone()}
            {columns}
            {lookups}
            room={Some(Room::TimeLog)}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::StatusColumnId;

    #[test]
    fn status_columns_become_options() {
        let columns = vec![
            StatusColumn {
                id: StatusColumnId(1),
                title: "To Do".into(),
                color: "#aaa".into(),
            },
            StatusColumn {
                id: StatusColumnId(4),
                title: "Completed".into(),
                color: "#0a0".into(),
            },
        ];
        let options = status_options(Some(&columns));
        assert_eq!(options[1], SelectOption::new("4", "Completed"));
        assert!(status_options(None).is_empty());
    }
}
