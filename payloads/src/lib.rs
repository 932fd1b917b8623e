pub mod access;
pub mod api_client;
pub mod claims;
pub mod csv_io;
pub mod filters;
pub mod forms;
pub mod query;
pub mod realtime;
pub mod requests;
pub mod resource;
pub mod resources;
pub mod responses;

pub use access::{Access, Role};
pub use api_client::{APIClient, ClientError};
pub use resource::Resource;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Declares an id wrapper so ids for different entities can't be mixed up.
///
/// The backend uses auto-increment integer keys, so every id serializes as a
/// bare number.
macro_rules! id_type {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
                Serialize, Deserialize, Display,
            )]
            #[serde(transparent)]
            pub struct $name(pub i64);

            impl std::str::FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.trim().parse().map($name)
                }
            }
        )*
    };
}

id_type!(
    AttendanceId,
    ClientId,
    ContractFileId,
    ContractId,
    ContractTypeId,
    DepartmentId,
    DesignationId,
    DiscussionId,
    EmployeeId,
    EventId,
    HolidayId,
    InterviewFileId,
    InterviewId,
    JobApplicationId,
    JobId,
    LeaveId,
    LeaveTypeId,
    MilestoneId,
    NoticeBoardId,
    NotificationId,
    ProjectDiscussionRoomId,
    ProjectId,
    RoomId,
    StatusColumnId,
    StickyNoteId,
    TaskId,
    TimeLogId,
);

/// A closed set of values that a select field can offer.
///
/// The `Display` output is the wire value and the option label.
pub trait Choice: Sized + Copy + std::fmt::Display + 'static {
    const ALL: &'static [Self];

    fn parse_choice(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.iter().copied().find(|c| c.to_string() == value)
    }

    fn options() -> Vec<forms::SelectOption> {
        Self::ALL
            .iter()
            .map(|c| forms::SelectOption::new(c.to_string(), c.to_string()))
            .collect()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female, Self::Others];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum Salutation {
    Mr,
    Mrs,
    Miss,
    Dr,
    Sir,
    Madam,
}

impl Choice for Salutation {
    const ALL: &'static [Self] = &[
        Self::Mr,
        Self::Mrs,
        Self::Miss,
        Self::Dr,
        Self::Sir,
        Self::Madam,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum Currency {
    USD,
    GBP,
    EUR,
    INR,
    VND,
}

impl Choice for Currency {
    const ALL: &'static [Self] =
        &[Self::USD, Self::GBP, Self::EUR, Self::INR, Self::VND];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
}

impl Choice for LeaveStatus {
    const ALL: &'static [Self] =
        &[Self::Approved, Self::Pending, Self::Rejected];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum LeaveDuration {
    Single,
    Multiple,
    #[serde(rename = "Half Day")]
    #[display("Half Day")]
    HalfDay,
}

impl Choice for LeaveDuration {
    const ALL: &'static [Self] = &[Self::Single, Self::Multiple, Self::HalfDay];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum JobApplicationStatus {
    Applied,
    #[serde(rename = "Phone screen")]
    #[display("Phone screen")]
    PhoneScreen,
    Interview,
    Hired,
    Rejected,
}

impl Choice for JobApplicationStatus {
    const ALL: &'static [Self] = &[
        Self::Applied,
        Self::PhoneScreen,
        Self::Interview,
        Self::Hired,
        Self::Rejected,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum InterviewStatus {
    Pending,
    Hired,
    Completed,
    Canceled,
    Rejected,
}

impl Choice for InterviewStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Hired,
        Self::Completed,
        Self::Canceled,
        Self::Rejected,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Choice for TaskPriority {
    const ALL: &'static [Self] =
        &[Self::Low, Self::Medium, Self::High, Self::Urgent];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    #[display("Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    #[display("In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    #[display("On Hold")]
    OnHold,
    Canceled,
    Finished,
}

impl Choice for ProjectStatus {
    const ALL: &'static [Self] = &[
        Self::NotStarted,
        Self::InProgress,
        Self::OnHold,
        Self::Canceled,
        Self::Finished,
    ];
}

/// Audience of a notice board entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum NoticeTo {
    Employees,
    Clients,
}

impl Choice for NoticeTo {
    const ALL: &'static [Self] = &[Self::Employees, Self::Clients];
}

/// An uploaded image as stored by the third-party image host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub public_id: String,
    pub url: String,
}
