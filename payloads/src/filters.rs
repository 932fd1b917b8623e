//! Typed list filters.
//!
//! A list has at most one active filter at a time. Each entity has a closed
//! enum of the predicates its filter drawer offers, so every page's filter
//! set is checked exhaustively instead of being a column name plus an
//! untyped value.

use jiff::civil::Date;
use jiff::{Timestamp, tz::TimeZone};

use crate::forms::SelectOption;
use crate::responses::{
    Client, Contract, Employee, Event, Holiday, Interview, JobApplication,
    Leave, Milestone, NoticeBoard, Notification, Project, Room, Task, TimeLog,
};
use crate::{
    Choice, ClientId, ContractTypeId, DepartmentId, DesignationId, EmployeeId,
    Gender, InterviewStatus, JobApplicationStatus, JobId, LeaveStatus,
    LeaveTypeId, NoticeTo, ProjectId, ProjectStatus, Role, StatusColumnId,
    TaskId, TaskPriority,
};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Build a range, swapping the ends if they were picked backwards.
    pub fn new(a: Date, b: Date) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn contains_timestamp(&self, ts: Timestamp) -> bool {
        self.contains(ts.to_zoned(TimeZone::UTC).date())
    }
}

/// What the user entered in one filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    Text(String),
    Range(DateRange),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Text,
    Select(Vec<SelectOption>),
    /// Options come from fetched data, keyed by the control's column id.
    Lookup,
    DateRange,
}

/// One control in a list's filter drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControl {
    pub column_id: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
}

impl FilterControl {
    pub fn new(
        column_id: &'static str,
        label: &'static str,
        kind: ControlKind,
    ) -> Self {
        Self {
            column_id,
            label,
            kind,
        }
    }
}

pub trait RecordFilter<R>: Clone + PartialEq + Sized + 'static {
    /// Column the filter applies to, used to highlight the active control.
    fn column_id(&self) -> &'static str;

    fn matches(&self, record: &R) -> bool;

    /// Controls offered in the filter drawer.
    fn controls() -> Vec<FilterControl>;

    /// Build the filter for a control. Blank or unreadable input clears
    /// the filter.
    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self>;
}

/// Records that pass `filter`, or all of them when no filter is active.
pub fn apply<'a, R, F: RecordFilter<R>>(
    filter: Option<&F>,
    records: &'a [R],
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| filter.is_none_or(|f| f.matches(r)))
        .collect()
}

/// For lists that offer no client-side filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilter {}

impl<R> RecordFilter<R> for NoFilter {
    fn column_id(&self) -> &'static str {
        match *self {}
    }

    fn matches(&self, _: &R) -> bool {
        match *self {}
    }

    fn controls() -> Vec<FilterControl> {
        Vec::new()
    }

    fn from_input(_: &str, _: &FilterInput) -> Option<Self> {
        None
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn text(input: &FilterInput) -> Option<String> {
    match input {
        FilterInput::Text(s) if !s.trim().is_empty() => {
            Some(s.trim().to_string())
        }
        _ => None,
    }
}

fn parsed<T: std::str::FromStr>(input: &FilterInput) -> Option<T> {
    text(input)?.parse().ok()
}

fn choice<C: Choice>(input: &FilterInput) -> Option<C> {
    C::parse_choice(&text(input)?)
}

fn range(input: &FilterInput) -> Option<DateRange> {
    match input {
        FilterInput::Range(r) => Some(*r),
        FilterInput::Text(_) => None,
    }
}

/// Filter for the small lookup tables that only have a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter(pub String);

/// Records with a display name.
pub trait Named {
    fn name(&self) -> &str;
}

impl<R: Named> RecordFilter<R> for NameFilter {
    fn column_id(&self) -> &'static str {
        "name"
    }

    fn matches(&self, record: &R) -> bool {
        contains_ci(record.name(), &self.0)
    }

    fn controls() -> Vec<FilterControl> {
        vec![FilterControl::new("name", "Name", ControlKind::Text)]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        (column_id == "name").then(|| text(input)).flatten().map(NameFilter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    Name(String),
    Email(String),
    Department(DepartmentId),
    Designation(DesignationId),
    Role(Role),
    Gender(Gender),
}

impl RecordFilter<Employee> for EmployeeFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Department(_) => "department",
            Self::Designation(_) => "designation",
            Self::Role(_) => "role",
            Self::Gender(_) => "gender",
        }
    }

    fn matches(&self, e: &Employee) -> bool {
        match self {
            Self::Name(n) => contains_ci(&e.name, n),
            Self::Email(m) => contains_ci(&e.email, m),
            Self::Department(id) => {
                e.department.as_ref().is_some_and(|d| d.id == *id)
            }
            Self::Designation(id) => {
                e.designation.as_ref().is_some_and(|d| d.id == *id)
            }
            Self::Role(role) => e.role == *role,
            Self::Gender(gender) => e.gender == *gender,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new("email", "Email", ControlKind::Text),
            FilterControl::new("department", "Department", ControlKind::Lookup),
            FilterControl::new(
                "designation",
                "Designation",
                ControlKind::Lookup,
            ),
            FilterControl::new("role", "Role", ControlKind::Select(Role::options())),
            FilterControl::new(
                "gender",
                "Gender",
                ControlKind::Select(Gender::options()),
            ),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "email" => text(input).map(Self::Email),
            "department" => parsed(input).map(Self::Department),
            "designation" => parsed(input).map(Self::Designation),
            "role" => choice(input).map(Self::Role),
            "gender" => choice(input).map(Self::Gender),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFilter {
    Name(String),
    Email(String),
    Country(String),
    Gender(Gender),
}

impl RecordFilter<Client> for ClientFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Country(_) => "country",
            Self::Gender(_) => "gender",
        }
    }

    fn matches(&self, c: &Client) -> bool {
        match self {
            Self::Name(n) => contains_ci(&c.name, n),
            Self::Email(m) => contains_ci(&c.email, m),
            Self::Country(country) => {
                c.country.as_deref().is_some_and(|v| contains_ci(v, country))
            }
            Self::Gender(gender) => c.gender == *gender,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new("email", "Email", ControlKind::Text),
            FilterControl::new("country", "Country", ControlKind::Text),
            FilterControl::new(
                "gender",
                "Gender",
                ControlKind::Select(Gender::options()),
            ),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "email" => text(input).map(Self::Email),
            "country" => text(input).map(Self::Country),
            "gender" => choice(input).map(Self::Gender),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractFilter {
    Subject(String),
    Client(ClientId),
    ContractType(ContractTypeId),
    StartBetween(DateRange),
}

impl RecordFilter<Contract> for ContractFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Subject(_) => "subject",
            Self::Client(_) => "client",
            Self::ContractType(_) => "contract_type",
            Self::StartBetween(_) => "start_date",
        }
    }

    fn matches(&self, c: &Contract) -> bool {
        match self {
            Self::Subject(s) => contains_ci(&c.subject, s),
            Self::Client(id) => c.client == *id,
            Self::ContractType(id) => {
                c.contract_type.as_ref().is_some_and(|t| t.id == *id)
            }
            Self::StartBetween(r) => r.contains(c.start_date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("subject", "Subject", ControlKind::Text),
            FilterControl::new("client", "Client", ControlKind::Lookup),
            FilterControl::new(
                "contract_type",
                "Contract type",
                ControlKind::Lookup,
            ),
            FilterControl::new("start_date", "Start date", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "subject" => text(input).map(Self::Subject),
            "client" => parsed(input).map(Self::Client),
            "contract_type" => parsed(input).map(Self::ContractType),
            "start_date" => range(input).map(Self::StartBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveFilter {
    Employee(EmployeeId),
    LeaveType(LeaveTypeId),
    Status(LeaveStatus),
    DateBetween(DateRange),
}

impl RecordFilter<Leave> for LeaveFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Employee(_) => "employee",
            Self::LeaveType(_) => "leave_type",
            Self::Status(_) => "status",
            Self::DateBetween(_) => "date",
        }
    }

    fn matches(&self, l: &Leave) -> bool {
        match self {
            Self::Employee(id) => l.employee == *id,
            Self::LeaveType(id) => l.leave_type == *id,
            Self::Status(status) => l.status == *status,
            Self::DateBetween(r) => r.contains(l.date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("employee", "Employee", ControlKind::Lookup),
            FilterControl::new("leave_type", "Leave type", ControlKind::Lookup),
            FilterControl::new(
                "status",
                "Status",
                ControlKind::Select(LeaveStatus::options()),
            ),
            FilterControl::new("date", "Date", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "employee" => parsed(input).map(Self::Employee),
            "leave_type" => parsed(input).map(Self::LeaveType),
            "status" => choice(input).map(Self::Status),
            "date" => range(input).map(Self::DateBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidayFilter {
    Occasion(String),
    DateBetween(DateRange),
}

impl RecordFilter<Holiday> for HolidayFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Occasion(_) => "occasion",
            Self::DateBetween(_) => "date",
        }
    }

    fn matches(&self, h: &Holiday) -> bool {
        match self {
            Self::Occasion(o) => contains_ci(&h.occasion, o),
            Self::DateBetween(r) => r.contains(h.date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("occasion", "Occasion", ControlKind::Text),
            FilterControl::new("date", "Date", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "occasion" => text(input).map(Self::Occasion),
            "date" => range(input).map(Self::DateBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobApplicationFilter {
    Name(String),
    Status(JobApplicationStatus),
    Location(String),
    Job(JobId),
    CreatedBetween(DateRange),
}

impl RecordFilter<JobApplication> for JobApplicationFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Status(_) => "status",
            Self::Location(_) => "location",
            Self::Job(_) => "jobs",
            Self::CreatedBetween(_) => "created_at",
        }
    }

    fn matches(&self, a: &JobApplication) -> bool {
        match self {
            Self::Name(n) => contains_ci(&a.name, n),
            Self::Status(status) => a.status == *status,
            Self::Location(l) => a.location.as_deref() == Some(l.as_str()),
            Self::Job(id) => a.jobs == *id,
            Self::CreatedBetween(r) => r.contains_timestamp(a.created_at),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new(
                "status",
                "Status",
                ControlKind::Select(JobApplicationStatus::options()),
            ),
            FilterControl::new("location", "Location", ControlKind::Lookup),
            FilterControl::new("jobs", "Job", ControlKind::Lookup),
            FilterControl::new("created_at", "Applied", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "status" => choice(input).map(Self::Status),
            "location" => text(input).map(Self::Location),
            "jobs" => parsed(input).map(Self::Job),
            "created_at" => range(input).map(Self::CreatedBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewFilter {
    Status(InterviewStatus),
    Interviewer(EmployeeId),
    DateBetween(DateRange),
}

impl RecordFilter<Interview> for InterviewFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Interviewer(_) => "interviewer",
            Self::DateBetween(_) => "date",
        }
    }

    fn matches(&self, i: &Interview) -> bool {
        match self {
            Self::Status(status) => i.status == *status,
            Self::Interviewer(id) => i.interviewer.contains(id),
            Self::DateBetween(r) => r.contains(i.date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new(
                "status",
                "Status",
                ControlKind::Select(InterviewStatus::options()),
            ),
            FilterControl::new("interviewer", "Interviewer", ControlKind::Lookup),
            FilterControl::new("date", "Date", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "status" => choice(input).map(Self::Status),
            "interviewer" => parsed(input).map(Self::Interviewer),
            "date" => range(input).map(Self::DateBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    Name(String),
    Client(ClientId),
    Status(ProjectStatus),
}

impl RecordFilter<Project> for ProjectFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Client(_) => "client",
            Self::Status(_) => "status",
        }
    }

    fn matches(&self, p: &Project) -> bool {
        match self {
            Self::Name(n) => contains_ci(&p.name, n),
            Self::Client(id) => p.client == Some(*id),
            Self::Status(status) => p.status == *status,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new("client", "Client", ControlKind::Lookup),
            FilterControl::new(
                "status",
                "Status",
                ControlKind::Select(ProjectStatus::options()),
            ),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "client" => parsed(input).map(Self::Client),
            "status" => choice(input).map(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneFilter {
    Title(String),
    Completed(bool),
}

impl RecordFilter<Milestone> for MilestoneFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Completed(_) => "status",
        }
    }

    fn matches(&self, m: &Milestone) -> bool {
        match self {
            Self::Title(t) => contains_ci(&m.title, t),
            Self::Completed(done) => m.status == *done,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("title", "Title", ControlKind::Text),
            FilterControl::new(
                "status",
                "Status",
                ControlKind::Select(vec![
                    SelectOption::new("true", "Complete"),
                    SelectOption::new("false", "Incomplete"),
                ]),
            ),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "title" => text(input).map(Self::Title),
            "status" => parsed(input).map(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    Name(String),
    Project(ProjectId),
    Status(StatusColumnId),
    Priority(TaskPriority),
    Assignee(EmployeeId),
    DeadlineBetween(DateRange),
}

impl RecordFilter<Task> for TaskFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Project(_) => "project",
            Self::Status(_) => "status",
            Self::Priority(_) => "priority",
            Self::Assignee(_) => "employees",
            Self::DeadlineBetween(_) => "deadline",
        }
    }

    fn matches(&self, t: &Task) -> bool {
        match self {
            Self::Name(n) => contains_ci(&t.name, n),
            Self::Project(id) => t.project == Some(*id),
            Self::Status(id) => t.status.as_ref().is_some_and(|s| s.id == *id),
            Self::Priority(p) => t.priority == *p,
            Self::Assignee(id) => t.employees.contains(id),
            Self::DeadlineBetween(r) => r.contains(t.deadline),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new("project", "Project", ControlKind::Lookup),
            FilterControl::new("status", "Status", ControlKind::Lookup),
            FilterControl::new(
                "priority",
                "Priority",
                ControlKind::Select(TaskPriority::options()),
            ),
            FilterControl::new("employees", "Assignee", ControlKind::Lookup),
            FilterControl::new("deadline", "Deadline", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "project" => parsed(input).map(Self::Project),
            "status" => parsed(input).map(Self::Status),
            "priority" => choice(input).map(Self::Priority),
            "employees" => parsed(input).map(Self::Assignee),
            "deadline" => range(input).map(Self::DeadlineBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeLogFilter {
    Employee(EmployeeId),
    Project(ProjectId),
    Task(TaskId),
    StartBetween(DateRange),
}

impl RecordFilter<TimeLog> for TimeLogFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Employee(_) => "employee",
            Self::Project(_) => "project",
            Self::Task(_) => "task",
            Self::StartBetween(_) => "starts_on_date",
        }
    }

    fn matches(&self, t: &TimeLog) -> bool {
        match self {
            Self::Employee(id) => t.employee == *id,
            Self::Project(id) => t.project == Some(*id),
            Self::Task(id) => t.task == *id,
            Self::StartBetween(r) => r.contains(t.starts_on_date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("employee", "Employee", ControlKind::Lookup),
            FilterControl::new("project", "Project", ControlKind::Lookup),
            FilterControl::new("task", "Task", ControlKind::Lookup),
            FilterControl::new("starts_on_date", "Start", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "employee" => parsed(input).map(Self::Employee),
            "project" => parsed(input).map(Self::Project),
            "task" => parsed(input).map(Self::Task),
            "starts_on_date" => range(input).map(Self::StartBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeBoardFilter {
    Heading(String),
    NoticeTo(NoticeTo),
}

impl RecordFilter<NoticeBoard> for NoticeBoardFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::NoticeTo(_) => "notice_to",
        }
    }

    fn matches(&self, n: &NoticeBoard) -> bool {
        match self {
            Self::Heading(h) => contains_ci(&n.heading, h),
            Self::NoticeTo(to) => n.notice_to == *to,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("heading", "Heading", ControlKind::Text),
            FilterControl::new(
                "notice_to",
                "Notice to",
                ControlKind::Select(NoticeTo::options()),
            ),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "heading" => text(input).map(Self::Heading),
            "notice_to" => choice(input).map(Self::NoticeTo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    Name(String),
    Employee(EmployeeId),
    StartBetween(DateRange),
}

impl RecordFilter<Event> for EventFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Employee(_) => "employees",
            Self::StartBetween(_) => "starts_on_date",
        }
    }

    fn matches(&self, e: &Event) -> bool {
        match self {
            Self::Name(n) => contains_ci(&e.name, n),
            Self::Employee(id) => e.employees.contains(id),
            Self::StartBetween(r) => r.contains(e.starts_on_date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("name", "Name", ControlKind::Text),
            FilterControl::new("employees", "Employee", ControlKind::Lookup),
            FilterControl::new("starts_on_date", "Starts", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "name" => text(input).map(Self::Name),
            "employees" => parsed(input).map(Self::Employee),
            "starts_on_date" => range(input).map(Self::StartBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomFilter {
    Title(String),
    DateBetween(DateRange),
}

impl RecordFilter<Room> for RoomFilter {
    fn column_id(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::DateBetween(_) => "date",
        }
    }

    fn matches(&self, r: &Room) -> bool {
        match self {
            Self::Title(t) => contains_ci(&r.title, t),
            Self::DateBetween(range) => range.contains(r.date),
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![
            FilterControl::new("title", "Title", ControlKind::Text),
            FilterControl::new("date", "Date", ControlKind::DateRange),
        ]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        match column_id {
            "title" => text(input).map(Self::Title),
            "date" => range(input).map(Self::DateBetween),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFilter {
    Unread,
}

impl RecordFilter<Notification> for NotificationFilter {
    fn column_id(&self) -> &'static str {
        "read"
    }

    fn matches(&self, n: &Notification) -> bool {
        match self {
            Self::Unread => !n.read,
        }
    }

    fn controls() -> Vec<FilterControl> {
        vec![FilterControl::new(
            "read",
            "Show",
            ControlKind::Select(vec![SelectOption::new("unread", "Unread only")]),
        )]
    }

    fn from_input(column_id: &str, input: &FilterInput) -> Option<Self> {
        (column_id == "read" && text(input).as_deref() == Some("unread"))
            .then_some(Self::Unread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{Department, Designation};
    use jiff::civil::date;
    use rust_decimal::Decimal;

    fn employee(id: i64, name: &str, role: Role, department: i64) -> Employee {
        Employee {
            id: EmployeeId(id),
            employee_id: format!("EMP-{id}"),
            name: name.into(),
            email: format!("{}@acme.io", name.to_lowercase()),
            gender: Gender::Female,
            role,
            mobile: "555".into(),
            country: None,
            address: None,
            joining_date: date(2023, 1, 9),
            date_of_birth: None,
            hourly_rate: Decimal::new(2500, 2),
            can_login: true,
            can_receive_email: true,
            department: Some(Department {
                id: DepartmentId(department),
                name: "Ops".into(),
            }),
            designation: Some(Designation {
                id: DesignationId(1),
                name: "Engineer".into(),
            }),
            skills: vec![],
            avatar: None,
        }
    }

    #[test]
    fn no_filter_keeps_everything() {
        let rows = [
            employee(1, "Ann", Role::Admin, 1),
            employee(2, "Bob", Role::Employee, 2),
        ];
        assert_eq!(apply::<_, EmployeeFilter>(None, &rows).len(), 2);
    }

    #[test]
    fn employee_filters() {
        let rows = [
            employee(1, "Annabel", Role::Admin, 1),
            employee(2, "Bob", Role::Employee, 2),
            employee(3, "hANNah", Role::Employee, 1),
        ];
        let by_name = EmployeeFilter::Name("ann".into());
        let ids: Vec<_> =
            apply(Some(&by_name), &rows).iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3]);

        let by_department = EmployeeFilter::Department(DepartmentId(2));
        assert_eq!(apply(Some(&by_department), &rows).len(), 1);

        let by_role = EmployeeFilter::Role(Role::Employee);
        assert_eq!(apply(Some(&by_role), &rows).len(), 2);
    }

    #[test]
    fn from_input_builds_typed_filters() {
        let text = FilterInput::Text("3".into());
        assert_eq!(
            EmployeeFilter::from_input("department", &text),
            Some(EmployeeFilter::Department(DepartmentId(3)))
        );
        assert_eq!(
            EmployeeFilter::from_input("role", &FilterInput::Text("Admin".into())),
            Some(EmployeeFilter::Role(Role::Admin))
        );
        // blank input clears the filter
        assert_eq!(
            EmployeeFilter::from_input("name", &FilterInput::Text("  ".into())),
            None
        );
        assert_eq!(EmployeeFilter::from_input("salary", &text), None);
        assert_eq!(
            EmployeeFilter::from_input("department", &FilterInput::Text("ops".into())),
            None
        );
    }

    #[test]
    fn date_range_is_inclusive_and_ordered() {
        let r = DateRange::new(date(2024, 3, 31), date(2024, 3, 1));
        assert_eq!(r.from, date(2024, 3, 1));
        assert!(r.contains(date(2024, 3, 1)));
        assert!(r.contains(date(2024, 3, 31)));
        assert!(!r.contains(date(2024, 4, 1)));
        let ts: Timestamp = "2024-03-31T23:59:00Z".parse().unwrap();
        assert!(r.contains_timestamp(ts));
    }

    #[test]
    fn every_control_round_trips_to_its_column() {
        for control in EmployeeFilter::controls() {
            let input = match control.kind {
                ControlKind::Text => FilterInput::Text("x".into()),
                ControlKind::Lookup => FilterInput::Text("1".into()),
                ControlKind::Select(options) => {
                    FilterInput::Text(options[0].value.clone())
                }
                ControlKind::DateRange => FilterInput::Range(DateRange::new(
                    date(2024, 1, 1),
                    date(2024, 1, 2),
                )),
            };
            let filter = EmployeeFilter::from_input(control.column_id, &input)
                .unwrap_or_else(|| panic!("{} gave no filter", control.column_id));
            assert_eq!(filter.column_id(), control.column_id);
        }
    }
}
