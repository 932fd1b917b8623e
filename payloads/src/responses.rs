use crate::{
    AttendanceId, ClientId, ContractFileId, ContractId, ContractTypeId,
    Currency, DepartmentId, DesignationId, DiscussionId, EmployeeId, EventId,
    Gender, HolidayId, Image, InterviewFileId, InterviewId, InterviewStatus,
    JobApplicationId, JobApplicationStatus, JobId, LeaveDuration, LeaveId,
    LeaveStatus, LeaveTypeId, MilestoneId, NoticeBoardId, NoticeTo,
    NotificationId, ProjectDiscussionRoomId, ProjectId, ProjectStatus, Role,
    RoomId, Salutation, StatusColumnId, StickyNoteId, TaskId, TaskPriority,
    TimeLogId,
};
use jiff::Timestamp;
use jiff::civil::{Date, Time};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// The envelope every endpoint answers with.
///
/// The payload sits next to the status fields under an entity-specific key
/// (`employee` / `employees`, `leave` / `leaves`, ...), so it is kept as raw
/// json until a [`crate::Resource`] picks it apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: u16,
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Envelope {
    /// Take the value stored under `key`, if present and not null.
    pub fn take<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        match self.payload.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some),
        }
    }
}

/// A decoded envelope for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResponse<T> {
    pub code: u16,
    pub message: String,
    pub record: Option<T>,
    pub records: Option<Vec<T>>,
}

impl<T> MutationResponse<T> {
    /// The list payload, or an empty list when the endpoint returned none.
    pub fn into_records(self) -> Vec<T> {
        self.records.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation {
    pub id: DesignationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Staff code shown on badges, distinct from the database id.
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub role: Role,
    pub mobile: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub joining_date: Date,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    pub hourly_rate: Decimal,
    pub can_login: bool,
    pub can_receive_email: bool,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub designation: Option<Designation>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub avatar: Option<Image>,
}

/// The logged in account, either staff or a client login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub salutation: Salutation,
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(default)]
    pub country: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub official_website: Option<String>,
    #[serde(default)]
    pub gst_vat_number: Option<String>,
    #[serde(default)]
    pub office_phone_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub can_login: bool,
    pub can_receive_email: bool,
    #[serde(default)]
    pub avatar: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractType {
    pub id: ContractTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub subject: String,
    pub client: ClientId,
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    pub contract_value: Decimal,
    pub currency: Currency,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub alternate_address: Option<String>,
    #[serde(default)]
    pub cell: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub office_phone_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub company_logo: Option<Image>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicContractLink {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: LeaveTypeId,
    pub name: String,
    pub color_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub id: LeaveId,
    pub employee: EmployeeId,
    pub leave_type: LeaveTypeId,
    pub date: Date,
    pub duration: LeaveDuration,
    pub status: LeaveStatus,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub employee: EmployeeId,
    pub date: Date,
    pub clock_in_time: Time,
    pub clock_out_time: Time,
    pub late: bool,
    pub half_day: bool,
    pub working_from: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub date: Date,
    pub occasion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: Option<ClientId>,
    pub start_date: Date,
    pub deadline: Option<Date>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub project: ProjectId,
    pub title: String,
    pub cost: Decimal,
    pub add_to_budget: bool,
    /// True once the milestone is complete.
    pub status: bool,
    #[serde(default)]
    pub summary: Option<String>,
}

/// An opening candidates apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// A board column tasks can sit in (e.g. "Incomplete", "Doing").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColumn {
    pub id: StatusColumnId,
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub project: Option<ProjectId>,
    #[serde(default)]
    pub milestone: Option<MilestoneId>,
    pub start_date: Date,
    pub deadline: Date,
    #[serde(default)]
    pub status: Option<StatusColumn>,
    pub priority: TaskPriority,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
    #[serde(default)]
    pub description: Option<String>,
    /// Who handed the task out.
    #[serde(default)]
    pub assign_by: Option<EmployeeId>,
    #[serde(default)]
    pub task_category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: TimeLogId,
    pub task: TaskId,
    pub employee: EmployeeId,
    #[serde(default)]
    pub project: Option<ProjectId>,
    pub starts_on_date: Date,
    pub starts_on_time: Time,
    pub ends_on_date: Date,
    pub ends_on_time: Time,
    pub memo: String,
    /// Logged hours, computed by the backend.
    pub total_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: JobApplicationId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    pub jobs: JobId,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub status: JobApplicationStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub candidate: JobApplicationId,
    #[serde(default)]
    pub interviewer: Vec<EmployeeId>,
    pub date: Date,
    pub start_time: Time,
    pub status: InterviewStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeBoard {
    pub id: NoticeBoardId,
    pub heading: String,
    pub notice_to: NoticeTo,
    /// Markdown body.
    pub details: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(rename = "where")]
    pub location: String,
    pub color: String,
    pub starts_on_date: Date,
    pub starts_on_time: Time,
    pub ends_on_date: Date,
    pub ends_on_time: Time,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
    #[serde(default)]
    pub clients: Vec<ClientId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub title: String,
    pub date: Date,
    pub start_time: Time,
    /// Minutes.
    pub duration: u32,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: DiscussionId,
    pub contract: ContractId,
    #[serde(default)]
    pub employee: Option<EmployeeId>,
    #[serde(default)]
    pub client: Option<ClientId>,
    pub content: String,
    pub created_at: Timestamp,
}

/// A thread opened on a project. The description is the opening post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDiscussionRoom {
    pub id: ProjectDiscussionRoomId,
    pub project: ProjectId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Markdown body.
    pub description: String,
    #[serde(default)]
    pub assigner: Option<EmployeeId>,
    pub created_at: Timestamp,
}

/// A private note pinned by one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: StickyNoteId,
    pub employee: EmployeeId,
    pub color: String,
    /// Markdown body.
    pub note: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractFile {
    pub id: ContractFileId,
    pub contract: ContractId,
    pub file: Image,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFile {
    pub id: InterviewFileId,
    pub interview: InterviewId,
    pub file: Image,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub content: String,
    pub url: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: Timestamp,
}
