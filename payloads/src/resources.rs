use crate::csv_io::{CsvColumn, CsvRecord, cell, column, list_cell, opt_cell};
use crate::filters::{
    ClientFilter, ContractFilter, EmployeeFilter, EventFilter, HolidayFilter,
    InterviewFilter, JobApplicationFilter, LeaveFilter, MilestoneFilter,
    NameFilter, Named, NoFilter, NoticeBoardFilter, ProjectFilter, RoomFilter,
    TaskFilter, TimeLogFilter,
};
use crate::forms::FormValues;
use crate::requests::{
    ContractFileForm, ContractForm, CreateClient, CreateEmployee, CreateLeave,
    DiscussionForm, EventForm, HolidayForm, InterviewFileForm, InterviewForm,
    JobApplicationForm, LeaveTypeForm, MilestoneForm, NameForm,
    NoticeBoardForm, ProjectDiscussionRoomForm, ProjectForm, RoomForm,
    StickyNoteForm, TaskForm, TimeLogForm, UpdateClient, UpdateEmployee,
    UpdateLeave,
};
use crate::responses::{
    Client, Contract, ContractFile, ContractType, Department, Designation,
    Discussion, Employee, Event, Holiday, Interview, InterviewFile,
    JobApplication, Leave, LeaveType, Milestone, NoticeBoard, Project,
    ProjectDiscussionRoom, Room, StickyNote, Task, TimeLog,
};
use crate::{
    ClientId, ContractFileId, ContractId, ContractTypeId, DepartmentId,
    DesignationId, DiscussionId, EmployeeId, EventId, HolidayId, Image,
    InterviewFileId, InterviewId, JobApplicationId, LeaveId, LeaveTypeId,
    MilestoneId, NoticeBoardId, ProjectDiscussionRoomId, ProjectId, Resource,
    RoomId, StickyNoteId, TaskId, TimeLogId,
};

fn image_value(image: &Option<Image>) -> Option<String> {
    image.as_ref().and_then(|i| serde_json::to_string(i).ok())
}

fn name_values(name: &str) -> FormValues {
    FormValues::new().with("name", name)
}

impl Resource for Employee {
    const PATH: &'static str = "employees";
    const SINGULAR: &'static str = "employee";
    const PLURAL: &'static str = "employees";
    const TITLE: &'static str = "Employees";
    const NOUN: &'static str = "employee";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Employee Id", "employee_id"),
        column("Name", "name"),
        column("Email", "email"),
        column("Gender", "gender"),
        column("Role", "role"),
        column("Mobile", "mobile"),
        column("Department", "department"),
        column("Designation", "designation"),
        column("Joining date", "joining_date"),
        column("Hourly rate", "hourly_rate"),
    ];
    const IMPORT_FIELDS: &'static [&'static str] = &[
        "employee_id",
        "name",
        "email",
        "password",
        "designation",
        "department",
        "joining_date",
        "hourly_rate",
        "gender",
        "mobile",
        "date_of_birth",
        "country",
        "address",
        "can_login",
        "can_receive_email",
    ];

    type Id = EmployeeId;
    type Create = CreateEmployee;
    type Update = UpdateEmployee;
    type Filter = EmployeeFilter;

    fn id(&self) -> EmployeeId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("employee_id", &self.employee_id)
            .with("name", &self.name)
            .with("email", &self.email)
            .with("joining_date", self.joining_date.to_string())
            .with("hourly_rate", self.hourly_rate.to_string())
            .with("gender", self.gender.to_string())
            .with("mobile", &self.mobile)
            .with("can_login", self.can_login.to_string())
            .with("can_receive_email", self.can_receive_email.to_string());
        values.set_opt("designation", self.designation.as_ref().map(|d| d.id));
        values.set_opt("department", self.department.as_ref().map(|d| d.id));
        values.set_opt("date_of_birth", self.date_of_birth);
        values.set_opt("country", self.country.as_ref());
        values.set_opt("address", self.address.as_ref());
        values.set_opt("avatar", image_value(&self.avatar));
        values.set("skills", self.skills.join(", "));
        values
    }
}

impl CsvRecord for Employee {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "employee_id" => self.employee_id.clone(),
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "gender" => cell(&self.gender),
            "role" => cell(&self.role),
            "mobile" => self.mobile.clone(),
            "department" => opt_cell(&self.department.as_ref().map(|d| &d.name)),
            "designation" => {
                opt_cell(&self.designation.as_ref().map(|d| &d.name))
            }
            "joining_date" => cell(&self.joining_date),
            "hourly_rate" => cell(&self.hourly_rate),
            _ => String::new(),
        }
    }
}

impl Resource for Client {
    const PATH: &'static str = "clients";
    const SINGULAR: &'static str = "client";
    const PLURAL: &'static str = "clients";
    const TITLE: &'static str = "Clients";
    const NOUN: &'static str = "client";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Salutation", "salutation"),
        column("Name", "name"),
        column("Email", "email"),
        column("Mobile", "mobile"),
        column("Company", "company_name"),
        column("Country", "country"),
        column("Gender", "gender"),
    ];
    const IMPORT_FIELDS: &'static [&'static str] = &[
        "salutation",
        "name",
        "email",
        "password",
        "mobile",
        "gender",
        "country",
        "company_name",
        "official_website",
        "gst_vat_number",
        "office_phone_number",
        "city",
        "state",
        "postal_code",
        "company_address",
        "shipping_address",
        "can_login",
        "can_receive_email",
    ];

    type Id = ClientId;
    type Create = CreateClient;
    type Update = UpdateClient;
    type Filter = ClientFilter;

    fn id(&self) -> ClientId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("salutation", self.salutation.to_string())
            .with("name", &self.name)
            .with("email", &self.email)
            .with("mobile", &self.mobile)
            .with("gender", self.gender.to_string())
            .with("can_login", self.can_login.to_string())
            .with("can_receive_email", self.can_receive_email.to_string());
        let optional = [
            ("country", &self.country),
            ("company_name", &self.company_name),
            ("official_website", &self.official_website),
            ("gst_vat_number", &self.gst_vat_number),
            ("office_phone_number", &self.office_phone_number),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("company_address", &self.company_address),
            ("shipping_address", &self.shipping_address),
        ];
        for (name, value) in optional {
            values.set_opt(name, value.as_ref());
        }
        values.set_opt("avatar", image_value(&self.avatar));
        values
    }
}

impl CsvRecord for Client {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "salutation" => cell(&self.salutation),
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "mobile" => self.mobile.clone(),
            "company_name" => opt_cell(&self.company_name),
            "country" => opt_cell(&self.country),
            "gender" => cell(&self.gender),
            _ => String::new(),
        }
    }
}

impl Resource for Contract {
    const PATH: &'static str = "contracts";
    const SINGULAR: &'static str = "contract";
    const PLURAL: &'static str = "contracts";
    const TITLE: &'static str = "Contracts";
    const NOUN: &'static str = "contract";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Alternate address", "alternate_address"),
        column("Cell", "cell"),
        column("City", "city"),
        column("Client", "client"),
        column("Company logo", "company_logo"),
        column("Contract type", "contract_type"),
        column("Contract value", "contract_value"),
        column("Country", "country"),
        column("Currency", "currency"),
        column("Description", "description"),
        column("Notes", "notes"),
        column("Office phone number", "office_phone_number"),
        column("Postal code", "postal_code"),
        column("Signed by", "sign"),
        column("State", "state"),
        column("Subject", "subject"),
        column("End date", "end_date"),
        column("Start date", "start_date"),
        column("Created", "created_at"),
        column("Updated", "updated_at"),
    ];
    const IMPORT_FIELDS: &'static [&'static str] = &[
        "alternate_address",
        "cell",
        "city",
        "client",
        "contract_type",
        "contract_value",
        "country",
        "currency",
        "notes",
        "office_phone_number",
        "postal_code",
        "state",
        "subject",
        "end_date",
        "start_date",
    ];

    type Id = ContractId;
    type Create = ContractForm;
    type Update = ContractForm;
    type Filter = ContractFilter;

    fn id(&self) -> ContractId {
        self.id
    }

    fn label(&self) -> String {
        self.subject.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("subject", &self.subject)
            .with("client", self.client.to_string())
            .with("contract_value", self.contract_value.to_string())
            .with("currency", self.currency.to_string())
            .with("start_date", self.start_date.to_string())
            .with("end_date", self.end_date.to_string());
        values.set_opt("contract_type", self.contract_type.as_ref().map(|t| t.id));
        let optional = [
            ("description", &self.description),
            ("notes", &self.notes),
            ("cell", &self.cell),
            ("office_phone_number", &self.office_phone_number),
            ("city", &self.city),
            ("state", &self.state),
            ("country", &self.country),
            ("postal_code", &self.postal_code),
            ("alternate_address", &self.alternate_address),
        ];
        for (name, value) in optional {
            values.set_opt(name, value.as_ref());
        }
        values.set_opt("company_logo", image_value(&self.company_logo));
        values
    }
}

impl CsvRecord for Contract {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "alternate_address" => opt_cell(&self.alternate_address),
            "cell" => opt_cell(&self.cell),
            "city" => opt_cell(&self.city),
            "client" => cell(&self.client),
            "company_logo" => {
                opt_cell(&self.company_logo.as_ref().map(|i| &i.url))
            }
            "contract_type" => {
                opt_cell(&self.contract_type.as_ref().map(|t| &t.name))
            }
            "contract_value" => cell(&self.contract_value),
            "country" => opt_cell(&self.country),
            "currency" => cell(&self.currency),
            "description" => opt_cell(&self.description),
            "notes" => opt_cell(&self.notes),
            "office_phone_number" => opt_cell(&self.office_phone_number),
            "postal_code" => opt_cell(&self.postal_code),
            "sign" => opt_cell(&self.sign),
            "state" => opt_cell(&self.state),
            "subject" => self.subject.clone(),
            "end_date" => cell(&self.end_date),
            "start_date" => cell(&self.start_date),
            "created_at" => cell(&self.created_at),
            "updated_at" => cell(&self.updated_at),
            _ => String::new(),
        }
    }
}

impl Named for ContractType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for ContractType {
    const PATH: &'static str = "contract-types";
    const SINGULAR: &'static str = "contractType";
    const PLURAL: &'static str = "contractTypes";
    const TITLE: &'static str = "Contract types";
    const NOUN: &'static str = "contract type";
    const CSV_COLUMNS: &'static [CsvColumn] =
        &[column("Id", "id"), column("Name", "name")];

    type Id = ContractTypeId;
    type Create = NameForm;
    type Update = NameForm;
    type Filter = NameFilter;

    fn id(&self) -> ContractTypeId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        name_values(&self.name)
    }
}

impl CsvRecord for ContractType {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            _ => String::new(),
        }
    }
}

impl Named for Department {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Department {
    const PATH: &'static str = "departments";
    const SINGULAR: &'static str = "department";
    const PLURAL: &'static str = "departments";
    const TITLE: &'static str = "Departments";
    const NOUN: &'static str = "department";
    const CSV_COLUMNS: &'static [CsvColumn] =
        &[column("Id", "id"), column("Name", "name")];

    type Id = DepartmentId;
    type Create = NameForm;
    type Update = NameForm;
    type Filter = NameFilter;

    fn id(&self) -> DepartmentId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        name_values(&self.name)
    }
}

impl CsvRecord for Department {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            _ => String::new(),
        }
    }
}

impl Named for Designation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Designation {
    const PATH: &'static str = "designations";
    const SINGULAR: &'static str = "designation";
    const PLURAL: &'static str = "designations";
    const TITLE: &'static str = "Designations";
    const NOUN: &'static str = "designation";
    const CSV_COLUMNS: &'static [CsvColumn] =
        &[column("Id", "id"), column("Name", "name")];

    type Id = DesignationId;
    type Create = NameForm;
    type Update = NameForm;
    type Filter = NameFilter;

    fn id(&self) -> DesignationId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        name_values(&self.name)
    }
}

impl CsvRecord for Designation {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            _ => String::new(),
        }
    }
}

impl Named for LeaveType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for LeaveType {
    const PATH: &'static str = "leave-types";
    const SINGULAR: &'static str = "leaveType";
    const PLURAL: &'static str = "leaveTypes";
    const TITLE: &'static str = "Leave types";
    const NOUN: &'static str = "leave type";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Color", "color_code"),
    ];

    type Id = LeaveTypeId;
    type Create = LeaveTypeForm;
    type Update = LeaveTypeForm;
    type Filter = NameFilter;

    fn id(&self) -> LeaveTypeId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        name_values(&self.name).with("color_code", &self.color_code)
    }
}

impl CsvRecord for LeaveType {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            "color_code" => self.color_code.clone(),
            _ => String::new(),
        }
    }
}

impl Resource for Leave {
    const PATH: &'static str = "leaves";
    const SINGULAR: &'static str = "leave";
    const PLURAL: &'static str = "leaves";
    const TITLE: &'static str = "Leaves";
    const NOUN: &'static str = "leave";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Employee", "employee"),
        column("Leave type", "leave_type"),
        column("Date", "date"),
        column("Duration", "duration"),
        column("Status", "status"),
        column("Reason", "reason"),
    ];

    type Id = LeaveId;
    type Create = CreateLeave;
    type Update = UpdateLeave;
    type Filter = LeaveFilter;

    fn id(&self) -> LeaveId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} leave on {}", self.duration, self.date)
    }

    fn edit_values(&self) -> FormValues {
        FormValues::new()
            .with("employee", self.employee.to_string())
            .with("leave_type", self.leave_type.to_string())
            .with("status", self.status.to_string())
            .with("date", self.date.to_string())
            .with("duration", self.duration.to_string())
            .with("reason", &self.reason)
    }
}

impl CsvRecord for Leave {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "employee" => cell(&self.employee),
            "leave_type" => cell(&self.leave_type),
            "date" => cell(&self.date),
            "duration" => cell(&self.duration),
            "status" => cell(&self.status),
            "reason" => self.reason.clone(),
            _ => String::new(),
        }
    }
}

impl Resource for Holiday {
    const PATH: &'static str = "holidays";
    const SINGULAR: &'static str = "holiday";
    const PLURAL: &'static str = "holidays";
    const TITLE: &'static str = "Holidays";
    const NOUN: &'static str = "holiday";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Date", "date"),
        column("Occasion", "occasion"),
    ];
    const IMPORT_FIELDS: &'static [&'static str] = &["date", "occasion"];

    type Id = HolidayId;
    type Create = HolidayForm;
    type Update = HolidayForm;
    type Filter = HolidayFilter;

    fn id(&self) -> HolidayId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.occasion, self.date)
    }

    fn edit_values(&self) -> FormValues {
        FormValues::new()
            .with("date", self.date.to_string())
            .with("occasion", &self.occasion)
    }
}

impl CsvRecord for Holiday {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "date" => cell(&self.date),
            "occasion" => self.occasion.clone(),
            _ => String::new(),
        }
    }
}

impl Resource for Project {
    const PATH: &'static str = "projects";
    const SINGULAR: &'static str = "project";
    const PLURAL: &'static str = "projects";
    const TITLE: &'static str = "Projects";
    const NOUN: &'static str = "project";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Client", "client"),
        column("Start date", "start_date"),
        column("Deadline", "deadline"),
        column("Status", "status"),
        column("Budget", "budget"),
        column("Currency", "currency"),
    ];

    type Id = ProjectId;
    type Create = ProjectForm;
    type Update = ProjectForm;
    type Filter = ProjectFilter;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", &self.name)
            .with("start_date", self.start_date.to_string())
            .with("status", self.status.to_string());
        values.set_opt("client", self.client);
        values.set_opt("deadline", self.deadline);
        values.set_opt("budget", self.budget);
        values.set_opt("currency", self.currency);
        values.set_opt("summary", self.summary.as_ref());
        values.set_list("employees", &self.employees);
        values
    }
}

impl CsvRecord for Project {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            "client" => opt_cell(&self.client),
            "start_date" => cell(&self.start_date),
            "deadline" => opt_cell(&self.deadline),
            "status" => cell(&self.status),
            "budget" => opt_cell(&self.budget),
            "currency" => opt_cell(&self.currency),
            _ => String::new(),
        }
    }
}

impl Resource for Milestone {
    const PATH: &'static str = "milestones";
    const SINGULAR: &'static str = "milestone";
    const PLURAL: &'static str = "milestones";
    const TITLE: &'static str = "Milestones";
    const NOUN: &'static str = "milestone";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Title", "title"),
        column("Cost", "cost"),
        column("Complete", "status"),
    ];

    type Id = MilestoneId;
    type Create = MilestoneForm;
    type Update = MilestoneForm;
    type Filter = MilestoneFilter;

    fn id(&self) -> MilestoneId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("project", self.project.to_string())
            .with("title", &self.title)
            .with("cost", self.cost.to_string())
            .with("add_to_budget", self.add_to_budget.to_string())
            .with("status", self.status.to_string());
        values.set_opt("summary", self.summary.as_ref());
        values
    }
}

impl CsvRecord for Milestone {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "title" => self.title.clone(),
            "cost" => cell(&self.cost),
            "status" => cell(&self.status),
            _ => String::new(),
        }
    }
}

impl Resource for Task {
    const PATH: &'static str = "tasks";
    const SINGULAR: &'static str = "task";
    const PLURAL: &'static str = "tasks";
    const TITLE: &'static str = "Tasks";
    const NOUN: &'static str = "task";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Assigned by", "assign_by"),
        column("Start date", "start_date"),
        column("Deadline", "deadline"),
        column("Description", "description"),
        column("Milestone", "milestone"),
        column("Priority", "priority"),
        column("Project", "project"),
        column("Status", "status"),
        column("Category", "task_category"),
        column("Created", "created_at"),
        column("Updated", "updated_at"),
    ];

    type Id = TaskId;
    type Create = TaskForm;
    type Update = TaskForm;
    type Filter = TaskFilter;

    fn id(&self) -> TaskId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", &self.name)
            .with("start_date", self.start_date.to_string())
            .with("deadline", self.deadline.to_string())
            .with("priority", self.priority.to_string());
        values.set_opt("project", self.project);
        values.set_opt("milestone", self.milestone);
        values.set_opt("status", self.status.as_ref().map(|s| s.id));
        values.set_opt("description", self.description.as_ref());
        values.set_list("employees", &self.employees);
        values
    }
}

impl CsvRecord for Task {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            "assign_by" => opt_cell(&self.assign_by),
            "start_date" => cell(&self.start_date),
            "deadline" => cell(&self.deadline),
            "description" => opt_cell(&self.description),
            "milestone" => opt_cell(&self.milestone),
            "priority" => cell(&self.priority),
            "project" => opt_cell(&self.project),
            "status" => opt_cell(&self.status.as_ref().map(|s| &s.title)),
            "task_category" => opt_cell(&self.task_category),
            "created_at" => cell(&self.created_at),
            "updated_at" => cell(&self.updated_at),
            _ => String::new(),
        }
    }
}

impl Resource for TimeLog {
    const PATH: &'static str = "time-logs";
    const SINGULAR: &'static str = "timeLog";
    const PLURAL: &'static str = "timeLogs";
    const TITLE: &'static str = "Time logs";
    const NOUN: &'static str = "time log";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Task", "task"),
        column("Employee", "employee"),
        column("Start", "starts"),
        column("End", "ends"),
        column("Memo", "memo"),
        column("Total hours", "total_hours"),
    ];

    type Id = TimeLogId;
    type Create = TimeLogForm;
    type Update = TimeLogForm;
    type Filter = TimeLogFilter;

    fn id(&self) -> TimeLogId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} on {}", self.memo, self.starts_on_date)
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("task", self.task.to_string())
            .with("employee", self.employee.to_string())
            .with("starts_on_date", self.starts_on_date.to_string())
            .with("starts_on_time", self.starts_on_time.strftime("%H:%M").to_string())
            .with("ends_on_date", self.ends_on_date.to_string())
            .with("ends_on_time", self.ends_on_time.strftime("%H:%M").to_string())
            .with("memo", &self.memo);
        values.set_opt("project", self.project);
        values
    }
}

impl CsvRecord for TimeLog {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "task" => cell(&self.task),
            "employee" => cell(&self.employee),
            "starts" => format!(
                "{} {}",
                self.starts_on_date,
                self.starts_on_time.strftime("%H:%M")
            ),
            "ends" => format!(
                "{} {}",
                self.ends_on_date,
                self.ends_on_time.strftime("%H:%M")
            ),
            "memo" => self.memo.clone(),
            "total_hours" => cell(&self.total_hours),
            _ => String::new(),
        }
    }
}

impl Resource for JobApplication {
    const PATH: &'static str = "job-applications";
    const SINGULAR: &'static str = "jobApplication";
    const PLURAL: &'static str = "jobApplications";
    const TITLE: &'static str = "Job applications";
    const NOUN: &'static str = "job application";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Email", "email"),
        column("Mobile", "mobile"),
        column("Job id", "jobs"),
        column("Job", "job_title"),
        column("Location", "location"),
        column("Skills", "skills"),
        column("Source", "source"),
        column("Status", "status"),
        column("Applied", "created_at"),
    ];

    type Id = JobApplicationId;
    type Create = JobApplicationForm;
    type Update = JobApplicationForm;
    type Filter = JobApplicationFilter;

    fn id(&self) -> JobApplicationId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("jobs", self.jobs.to_string())
            .with("status", self.status.to_string())
            .with("skills", self.skills.join(", "));
        values.set_opt("mobile", self.mobile.as_ref());
        values.set_opt("location", self.location.as_ref());
        values.set_opt("source", self.source.as_ref());
        values
    }
}

impl CsvRecord for JobApplication {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "mobile" => opt_cell(&self.mobile),
            "jobs" => cell(&self.jobs),
            "job_title" => opt_cell(&self.job_title),
            "location" => opt_cell(&self.location),
            "skills" => list_cell(&self.skills),
            "source" => opt_cell(&self.source),
            "status" => cell(&self.status),
            "created_at" => cell(&self.created_at),
            _ => String::new(),
        }
    }
}

impl Resource for Interview {
    const PATH: &'static str = "interviews";
    const SINGULAR: &'static str = "interview";
    const PLURAL: &'static str = "interviews";
    const TITLE: &'static str = "Interviews";
    const NOUN: &'static str = "interview";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Candidate", "candidate"),
        column("Interviewers", "interviewer"),
        column("Date", "date"),
        column("Start time", "start_time"),
        column("Status", "status"),
    ];

    type Id = InterviewId;
    type Create = InterviewForm;
    type Update = InterviewForm;
    type Filter = InterviewFilter;

    fn id(&self) -> InterviewId {
        self.id
    }

    fn label(&self) -> String {
        format!("Interview on {}", self.date)
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("candidate", self.candidate.to_string())
            .with("date", self.date.to_string())
            .with("start_time", self.start_time.strftime("%H:%M").to_string())
            .with("status", self.status.to_string());
        values.set_list("interviewer", &self.interviewer);
        values.set_opt("comment", self.comment.as_ref());
        values
    }
}

impl CsvRecord for Interview {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "candidate" => cell(&self.candidate),
            "interviewer" => list_cell(&self.interviewer),
            "date" => cell(&self.date),
            "start_time" => self.start_time.strftime("%H:%M").to_string(),
            "status" => cell(&self.status),
            _ => String::new(),
        }
    }
}

impl Resource for NoticeBoard {
    const PATH: &'static str = "notice-boards";
    const SINGULAR: &'static str = "noticeBoard";
    const PLURAL: &'static str = "noticeBoards";
    const TITLE: &'static str = "Notice board";
    const NOUN: &'static str = "notice";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Details", "details"),
        column("Heading", "heading"),
        column("Notice to", "notice_to"),
        column("Created", "created_at"),
        column("Updated", "updated_at"),
    ];

    type Id = NoticeBoardId;
    type Create = NoticeBoardForm;
    type Update = NoticeBoardForm;
    type Filter = NoticeBoardFilter;

    fn id(&self) -> NoticeBoardId {
        self.id
    }

    fn label(&self) -> String {
        self.heading.clone()
    }

    fn edit_values(&self) -> FormValues {
        FormValues::new()
            .with("heading", &self.heading)
            .with("notice_to", self.notice_to.to_string())
            .with("details", &self.details)
    }
}

impl CsvRecord for NoticeBoard {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "details" => self.details.clone(),
            "heading" => self.heading.clone(),
            "notice_to" => cell(&self.notice_to),
            "created_at" => cell(&self.created_at),
            "updated_at" => cell(&self.updated_at),
            _ => String::new(),
        }
    }
}

impl Resource for Event {
    const PATH: &'static str = "events";
    const SINGULAR: &'static str = "event";
    const PLURAL: &'static str = "events";
    const TITLE: &'static str = "Events";
    const NOUN: &'static str = "event";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Where", "where"),
        column("Starts", "starts_on_date"),
        column("Ends", "ends_on_date"),
    ];

    type Id = EventId;
    type Create = EventForm;
    type Update = EventForm;
    type Filter = EventFilter;

    fn id(&self) -> EventId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", &self.name)
            .with("where", &self.location)
            .with("color", &self.color)
            .with("starts_on_date", self.starts_on_date.to_string())
            .with("starts_on_time", self.starts_on_time.strftime("%H:%M").to_string())
            .with("ends_on_date", self.ends_on_date.to_string())
            .with("ends_on_time", self.ends_on_time.strftime("%H:%M").to_string());
        values.set_opt("description", self.description.as_ref());
        values.set_list("employees", &self.employees);
        values.set_list("clients", &self.clients);
        values
    }
}

impl CsvRecord for Event {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.name.clone(),
            "where" => self.location.clone(),
            "starts_on_date" => cell(&self.starts_on_date),
            "ends_on_date" => cell(&self.ends_on_date),
            _ => String::new(),
        }
    }
}

impl Resource for Room {
    const PATH: &'static str = "rooms";
    const SINGULAR: &'static str = "room";
    const PLURAL: &'static str = "rooms";
    const TITLE: &'static str = "Rooms";
    const NOUN: &'static str = "room";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Title", "title"),
        column("Date", "date"),
        column("Start time", "start_time"),
        column("Duration", "duration"),
        column("Link", "link"),
    ];

    type Id = RoomId;
    type Create = RoomForm;
    type Update = RoomForm;
    type Filter = RoomFilter;

    fn id(&self) -> RoomId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("title", &self.title)
            .with("date", self.date.to_string())
            .with("start_time", self.start_time.strftime("%H:%M").to_string())
            .with("duration", self.duration.to_string());
        values.set_opt("description", self.description.as_ref());
        values.set_list("employees", &self.employees);
        values
    }
}

impl CsvRecord for Room {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "title" => self.title.clone(),
            "date" => cell(&self.date),
            "start_time" => self.start_time.strftime("%H:%M").to_string(),
            "duration" => cell(&self.duration),
            "link" => self.link.clone(),
            _ => String::new(),
        }
    }
}

impl Resource for Discussion {
    const PATH: &'static str = "discussions";
    const SINGULAR: &'static str = "discussion";
    const PLURAL: &'static str = "discussions";
    const TITLE: &'static str = "Discussion";
    const NOUN: &'static str = "reply";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Content", "content"),
        column("Created", "created_at"),
    ];

    type Id = DiscussionId;
    type Create = DiscussionForm;
    type Update = DiscussionForm;
    type Filter = NoFilter;

    fn id(&self) -> DiscussionId {
        self.id
    }

    fn label(&self) -> String {
        self.content.chars().take(40).collect()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("contract", self.contract.to_string())
            .with("content", &self.content);
        values.set_opt("employee", self.employee);
        values.set_opt("client", self.client);
        values
    }
}

impl CsvRecord for Discussion {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "content" => self.content.clone(),
            "created_at" => cell(&self.created_at),
            _ => String::new(),
        }
    }
}

impl Resource for ProjectDiscussionRoom {
    const PATH: &'static str = "project-discussion-rooms";
    const SINGULAR: &'static str = "projectDiscussionRoom";
    const PLURAL: &'static str = "projectDiscussionRooms";
    const TITLE: &'static str = "Discussions";
    const NOUN: &'static str = "discussion";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Title", "title"),
        column("Category", "category"),
        column("Started by", "assigner"),
        column("Created", "created_at"),
    ];

    type Id = ProjectDiscussionRoomId;
    type Create = ProjectDiscussionRoomForm;
    type Update = ProjectDiscussionRoomForm;
    type Filter = NoFilter;

    fn id(&self) -> ProjectDiscussionRoomId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn edit_values(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("project", self.project.to_string())
            .with("title", &self.title)
            .with("description", &self.description);
        values.set_opt("category", self.category.as_ref());
        values
    }
}

impl CsvRecord for ProjectDiscussionRoom {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "title" => self.title.clone(),
            "category" => opt_cell(&self.category),
            "assigner" => opt_cell(&self.assigner),
            "created_at" => cell(&self.created_at),
            _ => String::new(),
        }
    }
}

impl Resource for StickyNote {
    const PATH: &'static str = "sticky-notes";
    const SINGULAR: &'static str = "stickyNote";
    const PLURAL: &'static str = "stickyNotes";
    const TITLE: &'static str = "Sticky notes";
    const NOUN: &'static str = "note";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Color", "color"),
        column("Note", "note"),
        column("Created", "created_at"),
        column("Updated", "updated_at"),
    ];

    type Id = StickyNoteId;
    type Create = StickyNoteForm;
    type Update = StickyNoteForm;
    type Filter = NoFilter;

    fn id(&self) -> StickyNoteId {
        self.id
    }

    fn label(&self) -> String {
        self.note.chars().take(40).collect()
    }

    fn edit_values(&self) -> FormValues {
        FormValues::new()
            .with("employee", self.employee.to_string())
            .with("color", &self.color)
            .with("note", &self.note)
    }
}

impl CsvRecord for StickyNote {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "color" => self.color.clone(),
            "note" => self.note.clone(),
            "created_at" => cell(&self.created_at),
            "updated_at" => cell(&self.updated_at),
            _ => String::new(),
        }
    }
}

fn attachment_values(owner: &str, id: impl ToString, file: &Image) -> FormValues {
    let mut values = FormValues::new().with(owner, id.to_string());
    values.set_opt("file", image_value(&Some(file.clone())));
    values
}

impl Resource for ContractFile {
    const PATH: &'static str = "contract-files";
    const SINGULAR: &'static str = "contractFile";
    const PLURAL: &'static str = "contractFiles";
    const TITLE: &'static str = "Files";
    const NOUN: &'static str = "file";
    const CSV_COLUMNS: &'static [CsvColumn] = &[
        column("Id", "id"),
        column("Name", "name"),
        column("Url", "url"),
        column("Uploaded", "created_at"),
    ];

    type Id = ContractFileId;
    type Create = ContractFileForm;
    type Update = ContractFileForm;
    type Filter = NoFilter;

    fn id(&self) -> ContractFileId {
        self.id
    }

    fn label(&self) -> String {
        self.file.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        attachment_values("contract", self.contract, &self.file)
    }
}

impl CsvRecord for ContractFile {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.file.name.clone(),
            "url" => self.file.url.clone(),
            "created_at" => cell(&self.created_at),
            _ => String::new(),
        }
    }
}

impl Resource for InterviewFile {
    const PATH: &'static str = "interview-files";
    const SINGULAR: &'static str = "interviewFile";
    const PLURAL: &'static str = "interviewFiles";
    const TITLE: &'static str = "Files";
    const NOUN: &'static str = "file";
    const CSV_COLUMNS: &'static [CsvColumn] = ContractFile::CSV_COLUMNS;

    type Id = InterviewFileId;
    type Create = InterviewFileForm;
    type Update = InterviewFileForm;
    type Filter = NoFilter;

    fn id(&self) -> InterviewFileId {
        self.id
    }

    fn label(&self) -> String {
        self.file.name.clone()
    }

    fn edit_values(&self) -> FormValues {
        attachment_values("interview", self.interview, &self.file)
    }
}

impl CsvRecord for InterviewFile {
    fn csv_field(&self, key: &str) -> String {
        match key {
            "id" => cell(&self.id),
            "name" => self.file.name.clone(),
            "url" => self.file.url.clone(),
            "created_at" => cell(&self.created_at),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_io::export_csv;
    use crate::forms::FormModel;
    use crate::responses::StatusColumn;
    use crate::{
        Currency, JobApplicationStatus, JobId, LeaveDuration, LeaveStatus,
        NoticeTo, StatusColumnId, TaskPriority,
    };
    use jiff::civil::date;
    use rust_decimal::Decimal;

    fn contract() -> Contract {
        Contract {
            id: ContractId(11),
            subject: "Hosting, yearly".into(),
            client: ClientId(4),
            contract_type: Some(ContractType {
                id: ContractTypeId(2),
                name: "Retainer".into(),
            }),
            contract_value: Decimal::new(120000, 2),
            currency: Currency::EUR,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            alternate_address: None,
            cell: None,
            city: Some("Porto".into()),
            state: None,
            country: None,
            postal_code: None,
            office_phone_number: None,
            description: Some("Managed *hosting*".into()),
            notes: Some("internal only".into()),
            sign: None,
            company_logo: None,
            created_at: "2024-01-01T10:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T10:00:00Z".parse().unwrap(),
        }
    }

    fn stamp() -> jiff::Timestamp {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn contract_export_uses_declared_columns() {
        let out = export_csv(&[contract()], Contract::CSV_COLUMNS).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Id,Alternate address,Cell,City,Client,Company logo,\
                 Contract type,Contract value,Country,Currency,Description,\
                 Notes,Office phone number,Postal code,Signed by,State,\
                 Subject,End date,Start date,Created,Updated"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "11,,,Porto,4,,Retainer,1200.00,,EUR,Managed *hosting*,\
                 internal only,,,,,\"Hosting, yearly\",2024-12-31,2024-01-01,\
                 2024-01-01T10:00:00Z,2024-01-01T10:00:00Z"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn task_export_names_assigner_and_board_column() {
        let task = Task {
            id: TaskId(5),
            name: "Write invoice".into(),
            project: Some(ProjectId(2)),
            milestone: None,
            start_date: date(2024, 3, 1),
            deadline: date(2024, 3, 8),
            status: Some(StatusColumn {
                id: StatusColumnId(4),
                title: "Doing".into(),
                color: "#2196f3".into(),
            }),
            priority: TaskPriority::High,
            employees: vec![EmployeeId(7)],
            description: None,
            assign_by: Some(EmployeeId(1)),
            task_category: Some("Billing".into()),
            created_at: stamp(),
            updated_at: stamp(),
        };
        let out = export_csv(&[task], Task::CSV_COLUMNS).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Id,Name,Assigned by,Start date,Deadline,Description,\
                 Milestone,Priority,Project,Status,Category,Created,Updated"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "5,Write invoice,1,2024-03-01,2024-03-08,,,High,2,Doing,\
                 Billing,2024-01-01T10:00:00Z,2024-01-01T10:00:00Z"
            )
        );
    }

    #[test]
    fn job_application_export_lists_candidate_contact_and_skills() {
        let application = JobApplication {
            id: JobApplicationId(3),
            name: "Ana Reis".into(),
            email: "ana@example.com".into(),
            mobile: Some("+351 900".into()),
            jobs: JobId(9),
            job_title: Some("Designer".into()),
            location: Some("Lisbon".into()),
            skills: vec!["figma".into(), "css".into()],
            source: None,
            status: JobApplicationStatus::PhoneScreen,
            created_at: stamp(),
        };
        let out =
            export_csv(&[application], JobApplication::CSV_COLUMNS).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Id,Name,Email,Mobile,Job id,Job,Location,Skills,Source,\
                 Status,Applied"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "3,Ana Reis,ana@example.com,+351 900,9,Designer,Lisbon,\
                 \"figma, css\",,Phone screen,2024-01-01T10:00:00Z"
            )
        );
    }

    #[test]
    fn notice_export_includes_the_body() {
        let notice = NoticeBoard {
            id: NoticeBoardId(1),
            heading: "Office closed".into(),
            notice_to: NoticeTo::Employees,
            details: "Back on **Monday**".into(),
            created_at: stamp(),
            updated_at: stamp(),
        };
        let out = export_csv(&[notice], NoticeBoard::CSV_COLUMNS).unwrap();
        assert_eq!(
            out,
            "Id,Details,Heading,Notice to,Created,Updated\n\
             1,Back on **Monday**,Office closed,Employees,\
             2024-01-01T10:00:00Z,2024-01-01T10:00:00Z\n"
        );
    }

    #[test]
    fn edit_values_round_trip_through_the_update_form() {
        let original = contract();
        let form = ContractForm::from_values(&original.edit_values()).unwrap();
        assert_eq!(form.subject, original.subject);
        assert_eq!(form.contract_type, Some(ContractTypeId(2)));
        assert_eq!(form.contract_value, original.contract_value);
        assert_eq!(form.city.as_deref(), Some("Porto"));
    }

    #[test]
    fn leave_edit_values() {
        let leave = Leave {
            id: LeaveId(1),
            employee: EmployeeId(3),
            leave_type: LeaveTypeId(2),
            date: date(2024, 2, 5),
            duration: LeaveDuration::HalfDay,
            status: LeaveStatus::Approved,
            reason: "Dentist".into(),
        };
        let update = UpdateLeave::from_values(&leave.edit_values()).unwrap();
        assert_eq!(update.duration, LeaveDuration::HalfDay);
        assert_eq!(update.date, leave.date);
    }

    #[test]
    fn envelope_keys() {
        assert_eq!(LeaveType::PLURAL, "leaveTypes");
        assert_eq!(TimeLog::detail_path(TimeLogId(8)), "time-logs/8");
        assert!(Holiday::supports_import());
        assert!(Contract::supports_import());
        assert!(!Task::supports_import());
    }
}
