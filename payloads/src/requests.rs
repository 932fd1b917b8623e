use jiff::civil::{Date, DateTime, Time};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forms::{
    FieldErrors, FieldKind, FieldReader, FieldSpec, FormModel, FormValues,
};
use crate::{
    Choice, ClientId, ContractId, ContractTypeId, Currency, DepartmentId,
    DesignationId, EmployeeId, Gender, Image, InterviewId, InterviewStatus,
    JobApplicationId, JobApplicationStatus, JobId, LeaveDuration, LeaveStatus,
    LeaveTypeId, MilestoneId, NoticeTo, ProjectId, ProjectStatus, Role,
    Salutation, StatusColumnId, TaskId, TaskPriority,
};

pub const EMAIL_MAX_LEN: usize = 255;
pub const NAME_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 6;

fn select<C: Choice>() -> FieldKind {
    FieldKind::Select(C::options())
}

fn check_len(r: &mut FieldReader, name: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        r.error(name, format!("Must be at most {max} characters"));
    }
}

fn check_password(r: &mut FieldReader, password: &str) {
    if !password.is_empty() && password.chars().count() < PASSWORD_MIN_LEN {
        r.error(
            "password",
            format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
        );
    }
}

fn starts_before_ends(
    r: &mut FieldReader,
    start: Option<DateTime>,
    end: Option<DateTime>,
    end_field: &str,
) {
    r.ordered(
        start.as_ref(),
        end.as_ref(),
        end_field,
        "End must be after start",
    );
}

fn joined(date: Option<Date>, time: Option<Time>) -> Option<DateTime> {
    Some(date?.to_datetime(time?))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginCredentials {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("email", "Email", FieldKind::Email),
            FieldSpec::required("password", "Password", FieldKind::Password),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let email = r.email("email");
        // passwords are sent untrimmed
        let password = values.get("password").to_string();
        r.finish(|| Some(Self { email, password }))
    }
}

/// Body of `PUT employees/role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRole {
    pub employee_id: EmployeeId,
    pub role: Role,
}

/// A form with nothing but a name: departments, designations and
/// contract types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameForm {
    pub name: String,
}

impl FormModel for NameForm {
    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("name", "Name", FieldKind::Text)]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        check_len(&mut r, "name", &name, NAME_MAX_LEN);
        r.finish(|| Some(Self { name }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeForm {
    pub name: String,
    pub color_code: String,
}

impl FormModel for LeaveTypeForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::required("color_code", "Color", FieldKind::Text),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        let color_code = r.text("color_code");
        r.finish(|| Some(Self { name, color_code }))
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("color_code", "#16813D")
    }
}

/// Employee fields shared by the create and update forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub designation: DesignationId,
    pub department: DepartmentId,
    pub joining_date: Date,
    pub hourly_rate: Decimal,
    pub gender: Gender,
    pub mobile: String,
    pub date_of_birth: Option<Date>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub skills: Vec<String>,
    pub can_login: bool,
    pub can_receive_email: bool,
    pub avatar: Option<Image>,
}

fn employee_fields(password_required: bool) -> Vec<FieldSpec> {
    let password = if password_required {
        FieldSpec::required("password", "Password", FieldKind::Password)
    } else {
        FieldSpec::optional("password", "New password", FieldKind::Password)
    };
    vec![
        FieldSpec::required("employee_id", "Employee ID", FieldKind::Text),
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("email", "Email", FieldKind::Email),
        password,
        FieldSpec::required("designation", "Designation", FieldKind::Lookup),
        FieldSpec::required("department", "Department", FieldKind::Lookup),
        FieldSpec::required("joining_date", "Joining date", FieldKind::Date),
        FieldSpec::required("hourly_rate", "Hourly rate", FieldKind::Number),
        FieldSpec::required("gender", "Gender", select::<Gender>()),
        FieldSpec::required("mobile", "Mobile", FieldKind::Text),
        FieldSpec::optional("date_of_birth", "Date of birth", FieldKind::Date),
        FieldSpec::optional("country", "Country", FieldKind::Text),
        FieldSpec::optional("address", "Address", FieldKind::TextArea),
        FieldSpec::optional("skills", "Skills", FieldKind::Text),
        FieldSpec::optional("can_login", "Can log in", FieldKind::Checkbox),
        FieldSpec::optional(
            "can_receive_email",
            "Receives email notifications",
            FieldKind::Checkbox,
        ),
        FieldSpec::optional("avatar", "Avatar", FieldKind::File),
    ]
}

fn read_employee(r: &mut FieldReader) -> Option<EmployeeDetails> {
    let employee_id = r.text("employee_id");
    let name = r.text("name");
    check_len(r, "name", &name, NAME_MAX_LEN);
    let email = r.email("email");
    check_len(r, "email", &email, EMAIL_MAX_LEN);
    let designation = r.parse("designation", "Please select a designation");
    let department = r.parse("department", "Please select a department");
    let joining_date = r.date("joining_date");
    let hourly_rate = r.decimal("hourly_rate");
    let gender = r.choice("gender");
    let mobile = r.text("mobile");
    let date_of_birth = r.opt_date("date_of_birth");
    r.ordered(
        date_of_birth.as_ref(),
        joining_date.as_ref(),
        "joining_date",
        "Joining date must be after the date of birth",
    );
    let country = r.opt_text("country");
    let address = r.opt_text("address");
    let skills = r.tags("skills");
    let can_login = r.flag("can_login");
    let can_receive_email = r.flag("can_receive_email");
    let avatar = r.image("avatar");
    Some(EmployeeDetails {
        employee_id,
        name,
        email,
        designation: designation?,
        department: department?,
        joining_date: joining_date?,
        hourly_rate: hourly_rate?,
        gender: gender?,
        mobile,
        date_of_birth,
        country,
        address,
        skills,
        can_login,
        can_receive_email,
        avatar,
    })
}

fn employee_defaults() -> FormValues {
    FormValues::new()
        .with("gender", Gender::Male.to_string())
        .with("can_login", "true")
        .with("can_receive_email", "true")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployee {
    #[serde(flatten)]
    pub details: EmployeeDetails,
    pub password: String,
}

impl FormModel for CreateEmployee {
    fn fields() -> Vec<FieldSpec> {
        employee_fields(true)
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let details = read_employee(&mut r);
        let password = values.get("password").to_string();
        check_password(&mut r, &password);
        r.finish(|| Some(Self { details: details?, password }))
    }

    fn initial_values() -> FormValues {
        employee_defaults()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployee {
    #[serde(flatten)]
    pub details: EmployeeDetails,
    /// Left out to keep the current password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FormModel for UpdateEmployee {
    fn fields() -> Vec<FieldSpec> {
        employee_fields(false)
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let details = read_employee(&mut r);
        let password = values.get("password").to_string();
        check_password(&mut r, &password);
        let password = (!password.is_empty()).then_some(password);
        r.finish(|| Some(Self { details: details?, password }))
    }

    fn initial_values() -> FormValues {
        employee_defaults()
    }
}

/// Client fields shared by the create and update forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub salutation: Salutation,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Gender,
    pub country: Option<String>,
    pub company_name: Option<String>,
    pub official_website: Option<String>,
    pub gst_vat_number: Option<String>,
    pub office_phone_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub company_address: Option<String>,
    pub shipping_address: Option<String>,
    pub can_login: bool,
    pub can_receive_email: bool,
    pub avatar: Option<Image>,
}

/// Optional free text fields of a client, in form order.
const CLIENT_TEXT_FIELDS: &[(&str, &str)] = &[
    ("country", "Country"),
    ("company_name", "Company name"),
    ("official_website", "Official website"),
    ("gst_vat_number", "GST/VAT number"),
    ("office_phone_number", "Office phone"),
    ("city", "City"),
    ("state", "State"),
    ("postal_code", "Postal code"),
];

fn client_fields(password_required: bool) -> Vec<FieldSpec> {
    let password = if password_required {
        FieldSpec::required("password", "Password", FieldKind::Password)
    } else {
        FieldSpec::optional("password", "New password", FieldKind::Password)
    };
    let mut fields = vec![
        FieldSpec::required("salutation", "Salutation", select::<Salutation>()),
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("email", "Email", FieldKind::Email),
        password,
        FieldSpec::required("mobile", "Mobile", FieldKind::Text),
        FieldSpec::required("gender", "Gender", select::<Gender>()),
    ];
    fields.extend(
        CLIENT_TEXT_FIELDS
            .iter()
            .map(|(name, label)| FieldSpec::optional(name, label, FieldKind::Text)),
    );
    fields.extend([
        FieldSpec::optional(
            "company_address",
            "Company address",
            FieldKind::TextArea,
        ),
        FieldSpec::optional(
            "shipping_address",
            "Shipping address",
            FieldKind::TextArea,
        ),
        FieldSpec::optional("can_login", "Can log in", FieldKind::Checkbox),
        FieldSpec::optional(
            "can_receive_email",
            "Receives email notifications",
            FieldKind::Checkbox,
        ),
        FieldSpec::optional("avatar", "Avatar", FieldKind::File),
    ]);
    fields
}

fn read_client(r: &mut FieldReader) -> Option<ClientDetails> {
    let salutation = r.choice("salutation");
    let name = r.text("name");
    check_len(r, "name", &name, NAME_MAX_LEN);
    let email = r.email("email");
    check_len(r, "email", &email, EMAIL_MAX_LEN);
    let mobile = r.text("mobile");
    let gender = r.choice("gender");
    Some(ClientDetails {
        salutation: salutation?,
        name,
        email,
        mobile,
        gender: gender?,
        country: r.opt_text("country"),
        company_name: r.opt_text("company_name"),
        official_website: r.opt_text("official_website"),
        gst_vat_number: r.opt_text("gst_vat_number"),
        office_phone_number: r.opt_text("office_phone_number"),
        city: r.opt_text("city"),
        state: r.opt_text("state"),
        postal_code: r.opt_text("postal_code"),
        company_address: r.opt_text("company_address"),
        shipping_address: r.opt_text("shipping_address"),
        can_login: r.flag("can_login"),
        can_receive_email: r.flag("can_receive_email"),
        avatar: r.image("avatar"),
    })
}

fn client_defaults() -> FormValues {
    FormValues::new()
        .with("salutation", Salutation::Mr.to_string())
        .with("gender", Gender::Male.to_string())
        .with("can_login", "true")
        .with("can_receive_email", "true")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClient {
    #[serde(flatten)]
    pub details: ClientDetails,
    pub password: String,
}

impl FormModel for CreateClient {
    fn fields() -> Vec<FieldSpec> {
        client_fields(true)
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let details = read_client(&mut r);
        let password = values.get("password").to_string();
        check_password(&mut r, &password);
        r.finish(|| Some(Self { details: details?, password }))
    }

    fn initial_values() -> FormValues {
        client_defaults()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateClient {
    #[serde(flatten)]
    pub details: ClientDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FormModel for UpdateClient {
    fn fields() -> Vec<FieldSpec> {
        client_fields(false)
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let details = read_client(&mut r);
        let password = values.get("password").to_string();
        check_password(&mut r, &password);
        let password = (!password.is_empty()).then_some(password);
        r.finish(|| Some(Self { details: details?, password }))
    }

    fn initial_values() -> FormValues {
        client_defaults()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractForm {
    pub subject: String,
    pub client: ClientId,
    pub contract_type: Option<ContractTypeId>,
    pub contract_value: Decimal,
    pub currency: Currency,
    pub start_date: Date,
    pub end_date: Date,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub cell: Option<String>,
    pub office_phone_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub alternate_address: Option<String>,
    pub company_logo: Option<Image>,
}

impl FormModel for ContractForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("subject", "Subject", FieldKind::Text),
            FieldSpec::required("client", "Client", FieldKind::Lookup),
            FieldSpec::optional(
                "contract_type",
                "Contract type",
                FieldKind::Lookup,
            ),
            FieldSpec::required(
                "contract_value",
                "Contract value",
                FieldKind::Number,
            ),
            FieldSpec::required("currency", "Currency", select::<Currency>()),
            FieldSpec::required("start_date", "Start date", FieldKind::Date),
            FieldSpec::required("end_date", "End date", FieldKind::Date),
            FieldSpec::optional(
                "description",
                "Description",
                FieldKind::Markdown,
            ),
            FieldSpec::optional("notes", "Notes", FieldKind::TextArea),
            FieldSpec::optional("cell", "Cell", FieldKind::Text),
            FieldSpec::optional(
                "office_phone_number",
                "Office phone",
                FieldKind::Text,
            ),
            FieldSpec::optional("city", "City", FieldKind::Text),
            FieldSpec::optional("state", "State", FieldKind::Text),
            FieldSpec::optional("country", "Country", FieldKind::Text),
            FieldSpec::optional("postal_code", "Postal code", FieldKind::Text),
            FieldSpec::optional(
                "alternate_address",
                "Alternate address",
                FieldKind::TextArea,
            ),
            FieldSpec::optional("company_logo", "Company logo", FieldKind::File),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let subject = r.text("subject");
        let client = r.parse("client", "Please select a client");
        let contract_type =
            r.opt_parse("contract_type", "Please select a contract type");
        let contract_value = r.decimal("contract_value");
        let currency = r.choice("currency");
        let start_date = r.date("start_date");
        let end_date = r.date("end_date");
        r.ordered(
            start_date.as_ref(),
            end_date.as_ref(),
            "end_date",
            "End date must be after the start date",
        );
        let description = r.opt_text("description");
        let notes = r.opt_text("notes");
        let cell = r.opt_text("cell");
        let office_phone_number = r.opt_text("office_phone_number");
        let city = r.opt_text("city");
        let state = r.opt_text("state");
        let country = r.opt_text("country");
        let postal_code = r.opt_text("postal_code");
        let alternate_address = r.opt_text("alternate_address");
        let company_logo = r.image("company_logo");
        r.finish(|| {
            Some(Self {
                subject,
                client: client?,
                contract_type,
                contract_value: contract_value?,
                currency: currency?,
                start_date: start_date?,
                end_date: end_date?,
                description,
                notes,
                cell,
                office_phone_number,
                city,
                state,
                country,
                postal_code,
                alternate_address,
                company_logo,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("currency", Currency::USD.to_string())
    }
}

/// Creates one leave per selected date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLeave {
    pub employee: EmployeeId,
    pub leave_type: LeaveTypeId,
    pub status: LeaveStatus,
    pub dates: Vec<Date>,
    pub duration: LeaveDuration,
    pub reason: String,
}

impl FormModel for CreateLeave {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("employee", "Employee", FieldKind::Lookup),
            FieldSpec::required("leave_type", "Leave type", FieldKind::Lookup),
            FieldSpec::required("status", "Status", select::<LeaveStatus>()),
            FieldSpec::required("dates", "Dates", FieldKind::Dates),
            FieldSpec::required(
                "duration",
                "Duration",
                FieldKind::Select(vec![
                    LeaveDuration::Single,
                    LeaveDuration::HalfDay,
                ]
                .into_iter()
                .map(|d| {
                    crate::forms::SelectOption::new(d.to_string(), d.to_string())
                })
                .collect()),
            ),
            FieldSpec::required("reason", "Reason for absence", FieldKind::TextArea),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let employee = r.parse("employee", "Please select an employee");
        let leave_type = r.parse("leave_type", "Please select a leave type");
        let status = r.choice("status");
        let mut dates: Vec<Date> = r.list("dates");
        dates.sort();
        dates.dedup();
        let duration: Option<LeaveDuration> = r.choice("duration");
        let duration = match duration {
            Some(LeaveDuration::HalfDay) if dates.len() > 1 => {
                r.error("duration", "A half day leave covers a single date");
                None
            }
            Some(LeaveDuration::Single) if dates.len() > 1 => {
                Some(LeaveDuration::Multiple)
            }
            other => other,
        };
        let reason = r.text("reason");
        r.finish(|| {
            Some(Self {
                employee: employee?,
                leave_type: leave_type?,
                status: status?,
                dates,
                duration: duration?,
                reason,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new()
            .with("status", LeaveStatus::Pending.to_string())
            .with("duration", LeaveDuration::Single.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLeave {
    pub employee: EmployeeId,
    pub leave_type: LeaveTypeId,
    pub status: LeaveStatus,
    pub date: Date,
    pub duration: LeaveDuration,
    pub reason: String,
}

impl FormModel for UpdateLeave {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("employee", "Employee", FieldKind::Lookup),
            FieldSpec::required("leave_type", "Leave type", FieldKind::Lookup),
            FieldSpec::required("status", "Status", select::<LeaveStatus>()),
            FieldSpec::required("date", "Date", FieldKind::Date),
            FieldSpec::required(
                "duration",
                "Duration",
                select::<LeaveDuration>(),
            ),
            FieldSpec::required("reason", "Reason for absence", FieldKind::TextArea),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let employee = r.parse("employee", "Please select an employee");
        let leave_type = r.parse("leave_type", "Please select a leave type");
        let status = r.choice("status");
        let date = r.date("date");
        let duration = r.choice("duration");
        let reason = r.text("reason");
        r.finish(|| {
            Some(Self {
                employee: employee?,
                leave_type: leave_type?,
                status: status?,
                date: date?,
                duration: duration?,
                reason,
            })
        })
    }
}

/// Clock-in record for one employee and day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckAttendance {
    pub employee: EmployeeId,
    pub date: Date,
    pub clock_in_time: Time,
    pub clock_out_time: Time,
    pub late: bool,
    pub half_day: bool,
    pub working_from: String,
}

impl FormModel for CheckAttendance {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("employee", "Employee", FieldKind::Lookup),
            FieldSpec::required("date", "Date", FieldKind::Date),
            FieldSpec::required("clock_in_time", "Clock in", FieldKind::Time),
            FieldSpec::required("clock_out_time", "Clock out", FieldKind::Time),
            FieldSpec::optional("late", "Late", FieldKind::Checkbox),
            FieldSpec::optional("half_day", "Half day", FieldKind::Checkbox),
            FieldSpec::required("working_from", "Working from", FieldKind::Text),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let employee = r.parse("employee", "Please select an employee");
        let date = r.date("date");
        let clock_in_time = r.time("clock_in_time");
        let clock_out_time = r.time("clock_out_time");
        r.ordered(
            clock_in_time.as_ref(),
            clock_out_time.as_ref(),
            "clock_out_time",
            "Clock out must be after clock in",
        );
        let late = r.flag("late");
        let half_day = r.flag("half_day");
        let working_from = r.text("working_from");
        r.finish(|| {
            Some(Self {
                employee: employee?,
                date: date?,
                clock_in_time: clock_in_time?,
                clock_out_time: clock_out_time?,
                late,
                half_day,
                working_from,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new()
            .with("clock_in_time", "08:00")
            .with("clock_out_time", "17:00")
            .with("working_from", "Office")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayForm {
    pub date: Date,
    pub occasion: String,
}

impl FormModel for HolidayForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("date", "Date", FieldKind::Date),
            FieldSpec::required("occasion", "Occasion", FieldKind::Text),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let date = r.date("date");
        let occasion = r.text("occasion");
        r.finish(|| {
            Some(Self {
                date: date?,
                occasion,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectForm {
    pub name: String,
    pub client: Option<ClientId>,
    pub start_date: Date,
    pub deadline: Option<Date>,
    pub status: ProjectStatus,
    pub budget: Option<Decimal>,
    pub currency: Option<Currency>,
    pub summary: Option<String>,
    pub employees: Vec<EmployeeId>,
}

impl FormModel for ProjectForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::optional("client", "Client", FieldKind::Lookup),
            FieldSpec::required("start_date", "Start date", FieldKind::Date),
            FieldSpec::optional("deadline", "Deadline", FieldKind::Date),
            FieldSpec::required("status", "Status", select::<ProjectStatus>()),
            FieldSpec::optional("budget", "Budget", FieldKind::Number),
            FieldSpec::optional("currency", "Currency", select::<Currency>()),
            FieldSpec::optional("summary", "Summary", FieldKind::Markdown),
            FieldSpec::optional("employees", "Members", FieldKind::MultiLookup),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        let client = r.opt_parse("client", "Please select a client");
        let start_date = r.date("start_date");
        let deadline = r.opt_date("deadline");
        r.ordered(
            start_date.as_ref(),
            deadline.as_ref(),
            "deadline",
            "Deadline must be after the start date",
        );
        let status = r.choice("status");
        let budget = if values.is_blank("budget") {
            None
        } else {
            r.decimal("budget")
        };
        let currency = r.choice("currency");
        let summary = r.opt_text("summary");
        let employees = r.list("employees");
        r.finish(|| {
            Some(Self {
                name,
                client,
                start_date: start_date?,
                deadline,
                status: status?,
                budget,
                currency,
                summary,
                employees,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new()
            .with("status", ProjectStatus::NotStarted.to_string())
            .with("currency", Currency::USD.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneForm {
    pub project: ProjectId,
    pub title: String,
    pub cost: Decimal,
    pub add_to_budget: bool,
    pub status: bool,
    pub summary: Option<String>,
}

impl FormModel for MilestoneForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("project", "Project", FieldKind::Lookup),
            FieldSpec::required("title", "Title", FieldKind::Text),
            FieldSpec::required("cost", "Cost", FieldKind::Number),
            FieldSpec::optional(
                "add_to_budget",
                "Add cost to project budget",
                FieldKind::Checkbox,
            ),
            FieldSpec::optional("status", "Complete", FieldKind::Checkbox),
            FieldSpec::optional("summary", "Summary", FieldKind::TextArea),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let project = r.parse("project", "Please select a project");
        let title = r.text("title");
        let cost = r.decimal("cost");
        let add_to_budget = r.flag("add_to_budget");
        let status = r.flag("status");
        let summary = r.opt_text("summary");
        r.finish(|| {
            Some(Self {
                project: project?,
                title,
                cost: cost?,
                add_to_budget,
                status,
                summary,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("cost", "0")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskForm {
    pub name: String,
    pub project: Option<ProjectId>,
    pub milestone: Option<MilestoneId>,
    pub start_date: Date,
    pub deadline: Date,
    pub status: Option<StatusColumnId>,
    pub priority: TaskPriority,
    pub employees: Vec<EmployeeId>,
    pub description: Option<String>,
}

impl FormModel for TaskForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::optional("project", "Project", FieldKind::Lookup),
            FieldSpec::optional("milestone", "Milestone", FieldKind::Lookup),
            FieldSpec::required("start_date", "Start date", FieldKind::Date),
            FieldSpec::required("deadline", "Deadline", FieldKind::Date),
            FieldSpec::optional("status", "Status", FieldKind::Lookup),
            FieldSpec::required("priority", "Priority", select::<TaskPriority>()),
            FieldSpec::required(
                "employees",
                "Assigned to",
                FieldKind::MultiLookup,
            ),
            FieldSpec::optional(
                "description",
                "Description",
                FieldKind::Markdown,
            ),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        let project = r.opt_parse("project", "Please select a project");
        let milestone = r.opt_parse("milestone", "Please select a milestone");
        let start_date = r.date("start_date");
        let deadline = r.date("deadline");
        r.ordered(
            start_date.as_ref(),
            deadline.as_ref(),
            "deadline",
            "Deadline must be after the start date",
        );
        let status = r.opt_parse("status", "Please select a status");
        let priority = r.choice("priority");
        let employees = r.list("employees");
        let description = r.opt_text("description");
        r.finish(|| {
            Some(Self {
                name,
                project,
                milestone,
                start_date: start_date?,
                deadline: deadline?,
                status,
                priority: priority?,
                employees,
                description,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("priority", TaskPriority::Medium.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLogForm {
    pub project: ProjectId,
    pub task: TaskId,
    pub employee: EmployeeId,
    pub starts_on_date: Date,
    pub starts_on_time: Time,
    pub ends_on_date: Date,
    pub ends_on_time: Time,
    pub memo: String,
}

impl FormModel for TimeLogForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("project", "Project", FieldKind::Lookup),
            FieldSpec::required("task", "Task", FieldKind::Lookup),
            FieldSpec::required("employee", "Employee", FieldKind::Lookup),
            FieldSpec::required("starts_on_date", "Start date", FieldKind::Date),
            FieldSpec::required("starts_on_time", "Start time", FieldKind::Time),
            FieldSpec::required("ends_on_date", "End date", FieldKind::Date),
            FieldSpec::required("ends_on_time", "End time", FieldKind::Time),
            FieldSpec::required("memo", "Memo", FieldKind::TextArea),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let project = r.parse("project", "Please select a project");
        let task = r.parse("task", "Please select a task");
        let employee = r.parse("employee", "Please select an employee");
        let starts_on_date = r.date("starts_on_date");
        let starts_on_time = r.time("starts_on_time");
        let ends_on_date = r.date("ends_on_date");
        let ends_on_time = r.time("ends_on_time");
        starts_before_ends(
            &mut r,
            joined(starts_on_date, starts_on_time),
            joined(ends_on_date, ends_on_time),
            "ends_on_time",
        );
        let memo = r.text("memo");
        r.finish(|| {
            Some(Self {
                project: project?,
                task: task?,
                employee: employee?,
                starts_on_date: starts_on_date?,
                starts_on_time: starts_on_time?,
                ends_on_date: ends_on_date?,
                ends_on_time: ends_on_time?,
                memo,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplicationForm {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub jobs: JobId,
    pub location: Option<String>,
    pub status: JobApplicationStatus,
    pub source: Option<String>,
    pub skills: Vec<String>,
}

impl FormModel for JobApplicationForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::required("email", "Email", FieldKind::Email),
            FieldSpec::optional("mobile", "Mobile", FieldKind::Text),
            FieldSpec::required("jobs", "Job", FieldKind::Lookup),
            FieldSpec::optional("location", "Location", FieldKind::Text),
            FieldSpec::required(
                "status",
                "Status",
                select::<JobApplicationStatus>(),
            ),
            FieldSpec::optional("source", "Source", FieldKind::Text),
            FieldSpec::optional("skills", "Skills", FieldKind::Text),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        let email = r.email("email");
        let mobile = r.opt_text("mobile");
        let jobs = r.parse("jobs", "Please select a job");
        let location = r.opt_text("location");
        let status = r.choice("status");
        let source = r.opt_text("source");
        let skills = r.tags("skills");
        r.finish(|| {
            Some(Self {
                name,
                email,
                mobile,
                jobs: jobs?,
                location,
                status: status?,
                source,
                skills,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("status", JobApplicationStatus::Applied.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewForm {
    pub candidate: JobApplicationId,
    pub interviewer: Vec<EmployeeId>,
    pub date: Date,
    pub start_time: Time,
    pub status: InterviewStatus,
    pub comment: Option<String>,
}

impl FormModel for InterviewForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("candidate", "Candidate", FieldKind::Lookup),
            FieldSpec::required(
                "interviewer",
                "Interviewers",
                FieldKind::MultiLookup,
            ),
            FieldSpec::required("date", "Date", FieldKind::Date),
            FieldSpec::required("start_time", "Start time", FieldKind::Time),
            FieldSpec::required("status", "Status", select::<InterviewStatus>()),
            FieldSpec::optional("comment", "Comment", FieldKind::TextArea),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let candidate = r.parse("candidate", "Please select a candidate");
        let interviewer = r.list("interviewer");
        let date = r.date("date");
        let start_time = r.time("start_time");
        let status = r.choice("status");
        let comment = r.opt_text("comment");
        r.finish(|| {
            Some(Self {
                candidate: candidate?,
                interviewer,
                date: date?,
                start_time: start_time?,
                status: status?,
                comment,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("status", InterviewStatus::Pending.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeBoardForm {
    pub heading: String,
    pub notice_to: NoticeTo,
    pub details: String,
}

impl FormModel for NoticeBoardForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("heading", "Heading", FieldKind::Text),
            FieldSpec::required("notice_to", "Notice to", select::<NoticeTo>()),
            FieldSpec::required("details", "Details", FieldKind::Markdown),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let heading = r.text("heading");
        let notice_to = r.choice("notice_to");
        let details = r.text("details");
        r.finish(|| {
            Some(Self {
                heading,
                notice_to: notice_to?,
                details,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("notice_to", NoticeTo::Employees.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    pub name: String,
    #[serde(rename = "where")]
    pub location: String,
    pub color: String,
    pub starts_on_date: Date,
    pub starts_on_time: Time,
    pub ends_on_date: Date,
    pub ends_on_time: Time,
    pub description: Option<String>,
    pub employees: Vec<EmployeeId>,
    pub clients: Vec<ClientId>,
}

impl FormModel for EventForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::required("where", "Where", FieldKind::Text),
            FieldSpec::required("color", "Color", FieldKind::Text),
            FieldSpec::required("starts_on_date", "Starts on", FieldKind::Date),
            FieldSpec::required("starts_on_time", "Start time", FieldKind::Time),
            FieldSpec::required("ends_on_date", "Ends on", FieldKind::Date),
            FieldSpec::required("ends_on_time", "End time", FieldKind::Time),
            FieldSpec::optional(
                "description",
                "Description",
                FieldKind::Markdown,
            ),
            FieldSpec::optional("employees", "Employees", FieldKind::MultiLookup),
            FieldSpec::optional("clients", "Clients", FieldKind::MultiLookup),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let name = r.text("name");
        let location = r.text("where");
        let color = r.text("color");
        let starts_on_date = r.date("starts_on_date");
        let starts_on_time = r.time("starts_on_time");
        let ends_on_date = r.date("ends_on_date");
        let ends_on_time = r.time("ends_on_time");
        starts_before_ends(
            &mut r,
            joined(starts_on_date, starts_on_time),
            joined(ends_on_date, ends_on_time),
            "ends_on_time",
        );
        let description = r.opt_text("description");
        let employees = r.list("employees");
        let clients = r.list("clients");
        r.finish(|| {
            Some(Self {
                name,
                location,
                color,
                starts_on_date: starts_on_date?,
                starts_on_time: starts_on_time?,
                ends_on_date: ends_on_date?,
                ends_on_time: ends_on_time?,
                description,
                employees,
                clients,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new()
            .with("color", "#3182CE")
            .with("starts_on_time", "09:00")
            .with("ends_on_time", "10:00")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomForm {
    pub title: String,
    pub date: Date,
    pub start_time: Time,
    /// Minutes.
    pub duration: u32,
    pub description: Option<String>,
    pub employees: Vec<EmployeeId>,
}

impl FormModel for RoomForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("title", "Title", FieldKind::Text),
            FieldSpec::required("date", "Date", FieldKind::Date),
            FieldSpec::required("start_time", "Start time", FieldKind::Time),
            FieldSpec::required(
                "duration",
                "Duration (minutes)",
                FieldKind::Number,
            ),
            FieldSpec::optional(
                "description",
                "Description",
                FieldKind::TextArea,
            ),
            FieldSpec::optional("employees", "Members", FieldKind::MultiLookup),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let title = r.text("title");
        let date = r.date("date");
        let start_time = r.time("start_time");
        let duration: Option<u32> =
            r.parse("duration", "Please enter a whole number of minutes");
        if duration == Some(0) {
            r.error("duration", "Duration must be at least one minute");
        }
        let description = r.opt_text("description");
        let employees = r.list("employees");
        r.finish(|| {
            Some(Self {
                title,
                date: date?,
                start_time: start_time?,
                duration: duration?,
                description,
                employees,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("duration", "30")
    }
}

/// A reply in a contract's discussion thread.
///
/// Exactly one of `employee` and `client` names the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionForm {
    pub contract: ContractId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientId>,
    pub content: String,
}

impl FormModel for DiscussionForm {
    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("content", "Reply", FieldKind::Markdown)]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let contract = r.parse("contract", "Unknown contract");
        if contract.is_none() {
            r.error("content", "This discussion has no contract");
        }
        let employee = r.opt_parse("employee", "Unknown author");
        let client = r.opt_parse("client", "Unknown author");
        if employee.is_some() == client.is_some() {
            r.error("content", "A reply needs exactly one author");
        }
        let content = r.text("content");
        r.finish(|| {
            Some(Self {
                contract: contract?,
                employee,
                client,
                content,
            })
        })
    }
}

/// A new thread on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDiscussionRoomForm {
    pub project: ProjectId,
    pub title: String,
    pub category: Option<String>,
    pub description: String,
}

impl FormModel for ProjectDiscussionRoomForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("title", "Title", FieldKind::Text),
            FieldSpec::optional("category", "Category", FieldKind::Text),
            FieldSpec::required(
                "description",
                "Description",
                FieldKind::Markdown,
            ),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let project = r.parse("project", "Unknown project");
        if project.is_none() {
            r.error("title", "This discussion has no project");
        }
        let title = r.text("title");
        check_len(&mut r, "title", &title, NAME_MAX_LEN);
        let category = r.opt_text("category");
        let description = r.text("description");
        r.finish(|| {
            Some(Self {
                project: project?,
                title,
                category,
                description,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNoteForm {
    pub employee: EmployeeId,
    pub color: String,
    pub note: String,
}

impl FormModel for StickyNoteForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("color", "Color", FieldKind::Text),
            FieldSpec::required("note", "Note", FieldKind::Markdown),
        ]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let employee = r.parse("employee", "Unknown owner");
        if employee.is_none() {
            r.error("note", "Log in again to pin notes");
        }
        let color = r.text("color");
        let note = r.text("note");
        r.finish(|| {
            Some(Self {
                employee: employee?,
                color,
                note,
            })
        })
    }

    fn initial_values() -> FormValues {
        FormValues::new().with("color", "#FEEBC8")
    }
}

/// A file attached to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractFileForm {
    pub contract: ContractId,
    pub file: Image,
}

impl FormModel for ContractFileForm {
    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("file", "File", FieldKind::File)]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let contract = r.parse("contract", "Unknown contract");
        if contract.is_none() {
            r.error("file", "This file has no contract");
        }
        let file = r.image("file");
        r.finish(|| {
            Some(Self {
                contract: contract?,
                file: file?,
            })
        })
    }
}

/// A file attached to an interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFileForm {
    pub interview: InterviewId,
    pub file: Image,
}

impl FormModel for InterviewFileForm {
    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("file", "File", FieldKind::File)]
    }

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
        let mut r = FieldReader::new(values, &Self::fields());
        let interview = r.parse("interview", "Unknown interview");
        if interview.is_none() {
            r.error("file", "This file has no interview");
        }
        let file = r.image("file");
        r.finish(|| {
            Some(Self {
                interview: interview?,
                file: file?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::submit_form;
    use jiff::civil::{date, time};

    fn employee_values() -> FormValues {
        CreateEmployee::initial_values()
            .with("employee_id", "EMP-7")
            .with("name", "Jane Doe")
            .with("email", "jane@acme.io")
            .with("password", "s3cret!")
            .with("designation", "2")
            .with("department", "1")
            .with("joining_date", "2024-01-15")
            .with("hourly_rate", "42.50")
            .with("mobile", "555-0100")
            .with("skills", "rust, sql ,")
    }

    #[test]
    fn create_employee_from_form() {
        let employee = CreateEmployee::from_values(&employee_values()).unwrap();
        assert_eq!(employee.details.designation, DesignationId(2));
        assert_eq!(employee.details.hourly_rate, Decimal::new(4250, 2));
        assert_eq!(employee.details.skills, vec!["rust", "sql"]);
        assert_eq!(employee.details.gender, Gender::Male);
        assert!(employee.details.can_login);
        assert_eq!(employee.password, "s3cret!");

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["employee_id"], "EMP-7");
        assert_eq!(json["joining_date"], "2024-01-15");
        assert_eq!(json["password"], "s3cret!");
    }

    #[test]
    fn create_employee_reports_each_field() {
        let values = employee_values()
            .with("email", "jane")
            .with("password", "abc")
            .with("hourly_rate", "-3")
            .with("department", "");
        let errors = CreateEmployee::from_values(&values).unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("hourly_rate"), Some("Must not be negative"));
        assert_eq!(errors.get("department"), Some("Department is required"));
    }

    #[test]
    fn update_employee_keeps_password_when_blank() {
        let values = employee_values().with("password", "");
        let update = UpdateEmployee::from_values(&values).unwrap();
        assert_eq!(update.password, None);
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("password").is_none());
        assert!(CreateEmployee::from_values(&values).is_err());
    }

    #[test]
    fn contract_dates_must_be_ordered() {
        let values = ContractForm::initial_values()
            .with("subject", "Support")
            .with("client", "3")
            .with("contract_value", "1000")
            .with("start_date", "2024-06-01")
            .with("end_date", "2024-05-01");
        let errors = ContractForm::from_values(&values).unwrap_err();
        assert_eq!(
            errors.get("end_date"),
            Some("End date must be after the start date")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn leave_over_several_days() {
        let values = CreateLeave::initial_values()
            .with("employee", "4")
            .with("leave_type", "1")
            .with("dates", "2024-05-03,2024-05-02,2024-05-03")
            .with("reason", "Trip");
        let leave = CreateLeave::from_values(&values).unwrap();
        assert_eq!(leave.dates, vec![date(2024, 5, 2), date(2024, 5, 3)]);
        assert_eq!(leave.duration, LeaveDuration::Multiple);
        assert_eq!(leave.status, LeaveStatus::Pending);

        let half_day = values.with("duration", "Half Day");
        let errors = CreateLeave::from_values(&half_day).unwrap_err();
        assert!(errors.get("duration").is_some());
    }

    #[test]
    fn time_log_end_after_start() {
        let values = FormValues::new()
            .with("project", "1")
            .with("task", "2")
            .with("employee", "3")
            .with("starts_on_date", "2024-05-02")
            .with("starts_on_time", "09:00")
            .with("ends_on_date", "2024-05-02")
            .with("ends_on_time", "08:30")
            .with("memo", "Reviews");
        let errors = TimeLogForm::from_values(&values).unwrap_err();
        assert_eq!(errors.get("ends_on_time"), Some("End must be after start"));

        let values = values.with("ends_on_date", "2024-05-03");
        let log = TimeLogForm::from_values(&values).unwrap();
        assert_eq!(log.ends_on_time, time(8, 30, 0, 0));
    }

    #[test]
    fn invalid_choice_never_reaches_trigger() {
        let values = NoticeBoardForm::initial_values()
            .with("heading", "Office closed")
            .with("details", "**Monday**")
            .with("notice_to", "Everyone");
        let mut sent = Vec::new();
        let result = submit_form::<NoticeBoardForm>(&values, |n| sent.push(n));
        assert_eq!(
            result.unwrap_err().get("notice_to"),
            Some("Please select a valid option")
        );
        assert!(sent.is_empty());
    }

    #[test]
    fn event_serializes_where() {
        let values = EventForm::initial_values()
            .with("name", "Offsite")
            .with("where", "Lisbon")
            .with("starts_on_date", "2024-09-10")
            .with("ends_on_date", "2024-09-12")
            .with("employees", "1,2");
        let event = EventForm::from_values(&values).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["where"], "Lisbon");
        assert_eq!(json["employees"], serde_json::json!([1, 2]));
    }

    #[test]
    fn discussion_needs_one_author() {
        let values = FormValues::new()
            .with("contract", "5")
            .with("content", "Signed copy attached");
        assert!(DiscussionForm::from_values(&values).is_err());
        let reply =
            DiscussionForm::from_values(&values.with("client", "9")).unwrap();
        assert_eq!(reply.client, Some(ClientId(9)));
    }

    #[test]
    fn change_role_body() {
        let body = ChangeRole {
            employee_id: EmployeeId(3),
            role: Role::Manager,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"employeeId":3,"role":"Manager"}"#
        );
    }

    #[test]
    fn room_duration_must_be_positive() {
        let values = RoomForm::initial_values()
            .with("title", "Standup")
            .with("date", "2024-05-02")
            .with("start_time", "09:30")
            .with("duration", "0");
        let errors = RoomForm::from_values(&values).unwrap_err();
        assert_eq!(
            errors.get("duration"),
            Some("Duration must be at least one minute")
        );
    }

    #[test]
    fn project_thread_carries_its_project() {
        let values = FormValues::new()
            .with("title", "Launch checklist")
            .with("description", "What is *left*?");
        let errors = ProjectDiscussionRoomForm::from_values(&values).unwrap_err();
        assert_eq!(errors.get("title"), Some("This discussion has no project"));

        let room = ProjectDiscussionRoomForm::from_values(
            &values.with("project", "12").with("category", " "),
        )
        .unwrap();
        assert_eq!(room.project, ProjectId(12));
        assert_eq!(room.category, None);
    }

    #[test]
    fn attachment_needs_an_uploaded_file() {
        let values = FormValues::new()
            .with("interview", "4")
            .with("file", "not json");
        let errors = InterviewFileForm::from_values(&values).unwrap_err();
        assert_eq!(errors.get("file"), Some("Please upload the file again"));

        let uploaded = values.with(
            "file",
            r#"{"name":"cv.pdf","public_id":"hr/cv","url":"https://img.test/cv.pdf"}"#,
        );
        let attachment = InterviewFileForm::from_values(&uploaded).unwrap();
        assert_eq!(attachment.interview, InterviewId(4));
        assert_eq!(attachment.file.name, "cv.pdf");
    }
}
