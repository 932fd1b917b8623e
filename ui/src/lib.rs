use payloads::{
    APIClient, ContractId, EmployeeId, InterviewId, NoticeBoardId, ProjectId,
    Role,
};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

pub mod components;
pub mod contexts;
pub mod hooks;
mod logs;
pub mod pages;
pub mod realtime;
pub mod session;
pub mod state;
pub mod upload;

pub use state::{AuthState, State};

use components::{MainLayout, ToastContainer};
use contexts::{ToastProvider, use_toast};
use hooks::{use_authentication, use_realtime_connection, use_route_guard};
use pages::*;
use session::AuthSession;

/// Api client for the configured backend, or the page's own origin when
/// no `BACKEND_URL` was set at build time.
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(str::to_string)
        .unwrap_or_else(same_origin);

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

fn same_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Websocket url of the realtime channel.
pub fn realtime_url() -> String {
    match option_env!("REALTIME_URL") {
        Some(url) => url.to_string(),
        None => format!("{}/realtime", ws_address(&get_api_client().address)),
    }
}

fn ws_address(http: &str) -> String {
    if let Some(rest) = http.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = http.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        http.to_string()
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/private-dashboard")]
    PrivateDashboard,
    #[at("/private-dashboard-client")]
    ClientDashboard,
    #[at("/employees")]
    Employees,
    #[at("/employees/:id")]
    EmployeeDetail { id: EmployeeId },
    #[at("/clients")]
    Clients,
    #[at("/contracts")]
    Contracts,
    #[at("/contracts/:id/discussions")]
    ContractDiscussion { id: ContractId },
    #[at("/contracts/:id/files")]
    ContractFiles { id: ContractId },
    #[at("/contract-types")]
    ContractTypes,
    #[at("/designations")]
    Designations,
    #[at("/departments")]
    Departments,
    #[at("/leave-types")]
    LeaveTypes,
    #[at("/leaves")]
    Leaves,
    #[at("/attendance")]
    Attendance,
    #[at("/holidays")]
    Holidays,
    #[at("/notice-boards")]
    NoticeBoards,
    #[at("/notice-boards/:id")]
    NoticeBoardDetail { id: NoticeBoardId },
    #[at("/job-applications")]
    JobApplications,
    #[at("/interviews")]
    Interviews,
    #[at("/interviews/:id/files")]
    InterviewFiles { id: InterviewId },
    #[at("/projects")]
    Projects,
    #[at("/projects/:id/tasks")]
    ProjectTasks { id: ProjectId },
    #[at("/projects/:id/discussions")]
    ProjectDiscussions { id: ProjectId },
    #[at("/milestones")]
    Milestones,
    #[at("/tasks")]
    Tasks,
    #[at("/time-logs")]
    TimeLogs,
    #[at("/events")]
    Events,
    #[at("/rooms")]
    Rooms,
    #[at("/sticky-notes")]
    StickyNotes,
    #[at("/notifications")]
    Notifications,
    #[at("/403")]
    Forbidden,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Where `/` leads for each role.
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::Dashboard,
        Role::Client => Route::ClientDashboard,
        Role::Employee | Role::Manager => Route::PrivateDashboard,
    }
}

fn switch(route: Route, session: AuthSession) -> Html {
    match route {
        Route::Home | Route::Login => {
            html! { <Redirect<Route> to={home_route(session.role())} /> }
        }
        Route::Dashboard => html! { <AdminDashboardPage {session} /> },
        Route::PrivateDashboard => html! { <PrivateDashboardPage {session} /> },
        Route::ClientDashboard => html! { <ClientDashboardPage {session} /> },
        Route::Employees => html! { <EmployeesPage {session} /> },
        Route::EmployeeDetail { id } => html! { <EmployeeDetailPage {session} {id} /> },
        Route::Clients => html! { <ClientsPage {session} /> },
        Route::Contracts => html! { <ContractsPage {session} /> },
        Route::ContractDiscussion { id } => {
            html! { <ContractDiscussionPage {session} {id} /> }
        }
        Route::ContractFiles { id } => html! { <ContractFilesPage {session} {id} /> },
        Route::ContractTypes => html! { <ContractTypesPage {session} /> },
        Route::Designations => html! { <DesignationsPage {session} /> },
        Route::Departments => html! { <DepartmentsPage {session} /> },
        Route::LeaveTypes => html! { <LeaveTypesPage {session} /> },
        Route::Leaves => html! { <LeavesPage {session} /> },
        Route::Attendance => html! { <AttendancePage {session} /> },
        Route::Holidays => html! { <HolidaysPage {session} /> },
        Route::NoticeBoards => html! { <NoticeBoardsPage {session} /> },
        Route::NoticeBoardDetail { id } => {
            html! { <NoticeBoardDetailPage {session} {id} /> }
        }
        Route::JobApplications => html! { <JobApplicationsPage {session} /> },
        Route::Interviews => html! { <InterviewsPage {session} /> },
        Route::InterviewFiles { id } => html! { <InterviewFilesPage {session} {id} /> },
        Route::Projects => html! { <ProjectsPage {session} /> },
        Route::ProjectTasks { id } => html! { <ProjectTasksPage {session} {id} /> },
        Route::ProjectDiscussions { id } => {
            html! { <ProjectDiscussionsPage {session} {id} /> }
        }
        Route::Milestones => html! { <MilestonesPage {session} /> },
        Route::Tasks => html! { <TasksPage {session} /> },
        Route::TimeLogs => html! { <TimeLogsPage {session} /> },
        Route::Events => html! { <EventsPage {session} /> },
        Route::Rooms => html! { <RoomsPage {session} /> },
        Route::StickyNotes => html! { <StickyNotesPage {session} /> },
        Route::Notifications => html! { <NotificationsPage {session} /> },
        Route::Forbidden => html! { <ForbiddenPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <ToastProvider>
            <BrowserRouter>
                <AppShell />
                <ToastContainer />
            </BrowserRouter>
        </ToastProvider>
    }
}

/// Resolves the session, guards the current path and wraps every logged
/// in page in the main layout.
#[function_component]
fn AppShell() -> Html {
    use_authentication();
    use_realtime_connection();

    let (state, dispatch) = use_store::<State>();
    let toast = use_toast();
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let allowed = use_route_guard(state.auth_state.clone(), path);
    let loading = use_callback((), move |on: bool, _| {
        dispatch.reduce_mut(|state| state.set_busy(on))
    });

    match (&state.auth_state, toast) {
        (AuthState::Unknown, _) | (_, None) => html! {
            <div class="min-h-screen flex items-center justify-center text-neutral-500">
                {"Loading..."}
            </div>
        },
        (AuthState::LoggedOut, _) => {
            if allowed {
                html! { <LoginPage /> }
            } else {
                html! {}
            }
        }
        (AuthState::LoggedIn(user), Some(toast)) => {
            if !allowed {
                return html! {};
            }
            let session = AuthSession {
                user: user.clone(),
                channel: state.channel.clone(),
                loading,
                toast,
            };
            let render = {
                let session = session.clone();
                Callback::from(move |route: Route| switch(route, session.clone()))
            };
            html! {
                <MainLayout {session}>
                    <Switch<Route> {render} />
                </MainLayout>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realtime_url_follows_the_backend_scheme() {
        assert_eq!(ws_address("https://hr.acme.io"), "wss://hr.acme.io");
        assert_eq!(ws_address("http://localhost:8000"), "ws://localhost:8000");
        assert_eq!(ws_address(""), "");
    }

    #[test]
    fn every_role_lands_on_a_page_it_may_open() {
        for role in [Role::Admin, Role::Employee, Role::Manager, Role::Client] {
            let home = home_route(role).to_path();
            assert!(
                payloads::access::check(Some(role), &home).is_allowed(),
                "{role} cannot open {home}"
            );
        }
    }

    #[test]
    fn routes_parse_their_ids() {
        assert_eq!(
            Route::recognize("/projects/12/tasks"),
            Some(Route::ProjectTasks { id: ProjectId(12) })
        );
        assert_eq!(
            Route::recognize("/contracts/3/discussions"),
            Some(Route::ContractDiscussion { id: ContractId(3) })
        );
        assert_eq!(
            Route::recognize("/projects/12/discussions"),
            Some(Route::ProjectDiscussions { id: ProjectId(12) })
        );
        assert_eq!(
            Route::recognize("/employees/7"),
            Some(Route::EmployeeDetail { id: EmployeeId(7) })
        );
        assert_eq!(
            Route::recognize("/interviews/2/files"),
            Some(Route::InterviewFiles { id: InterviewId(2) })
        );
    }
}
