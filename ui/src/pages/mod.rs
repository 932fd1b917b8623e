pub mod attendance;
pub mod calendar;
pub mod contracts;
pub mod dashboards;
pub mod leaves;
pub mod login;
pub mod notice_boards;
pub mod notifications;
pub mod people;
pub mod projects;
pub mod recruitment;
pub mod settings;
pub mod status;
pub mod sticky_notes;

use yew::prelude::*;

use crate::session::AuthSession;

pub use attendance::AttendancePage;
pub use calendar::{EventsPage, RoomsPage};
pub use contracts::{ContractDiscussionPage, ContractFilesPage, ContractsPage};
pub use dashboards::{AdminDashboardPage, ClientDashboardPage, PrivateDashboardPage};
pub use leaves::{HolidaysPage, LeavesPage};
pub use login::LoginPage;
pub use notice_boards::{NoticeBoardDetailPage, NoticeBoardsPage};
pub use notifications::NotificationsPage;
pub use people::{ClientsPage, EmployeeDetailPage, EmployeesPage};
pub use projects::{
    MilestonesPage, ProjectDiscussionsPage, ProjectTasksPage, ProjectsPage,
    TasksPage, TimeLogsPage,
};
pub use recruitment::{InterviewFilesPage, InterviewsPage, JobApplicationsPage};
pub use settings::{
    ContractTypesPage, DepartmentsPage, DesignationsPage, LeaveTypesPage,
};
pub use status::{ForbiddenPage, NotFoundPage};
pub use sticky_notes::StickyNotesPage;

/// Props of every page that only needs the session.
#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub session: AuthSession,
}
