pub mod mock;

use std::sync::Arc;

use anyhow::anyhow;
use jiff::civil::{Date, date, time};
use mock_api::store::{Clock, Store};
use mock_api::{Config, telemetry};
use payloads::requests::{
    ClientDetails, ContractForm, CreateClient, CreateEmployee, CreateLeave,
    EmployeeDetails, HolidayForm, LeaveTypeForm, LoginCredentials, NameForm,
    ProjectForm, TaskForm, TimeLogForm,
};
use payloads::responses::{
    Client, Contract, ContractType, Department, Designation, Employee,
    Holiday, Leave, LeaveType, Project, Task, TimeLog,
};
use payloads::{
    ClientId, Currency, EmployeeId, Gender, LeaveDuration, LeaveStatus,
    ProjectId, ProjectStatus, Resource, Salutation, TaskId, TaskPriority,
};
use reqwest::StatusCode;
use rust_decimal::dec;
use serde_json::json;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

/// "Now" for every test run.
pub const TEST_NOW: &str = "2025-01-01T00:00:00Z";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
    pub store: Arc<Store>,
}

/// Functions to populate test data
///
/// Using anyhow::Result lets us get a backtrace from when the error was first
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    /// The admin account every app starts with. Written straight into the
    /// store, since creating staff needs a logged in admin.
    fn seed_admin(&self) -> anyhow::Result<()> {
        let admin = admin_login_credentials();
        self.store.create(
            Employee::PATH,
            json!({
                "employee_id": "ADM-1",
                "name": "Ada Admin",
                "email": admin.email,
                "password": admin.password,
                "joining_date": "2020-01-06",
                "hourly_rate": "0",
                "role": "Admin",
            }),
        )?;
        Ok(())
    }

    pub async fn login_admin(&self) -> anyhow::Result<()> {
        self.client.login(&admin_login_credentials()).await?;
        Ok(())
    }

    /// Log out whoever is logged in and log in as `credentials`.
    pub async fn login_as(
        &self,
        credentials: &LoginCredentials,
    ) -> anyhow::Result<()> {
        self.client.logout().await?;
        self.client.login(credentials).await?;
        Ok(())
    }

    /// Create a record and hand back the single record the api returned.
    pub async fn create<R: Resource>(
        &self,
        form: &R::Create,
    ) -> anyhow::Result<R> {
        self.client
            .create::<R>(form)
            .await?
            .record
            .ok_or_else(|| anyhow!("no {} in the response", R::SINGULAR))
    }

    pub async fn create_department(
        &self,
        name: &str,
    ) -> anyhow::Result<Department> {
        self.create::<Department>(&NameForm { name: name.into() })
            .await
    }

    pub async fn create_designation(
        &self,
        name: &str,
    ) -> anyhow::Result<Designation> {
        self.create::<Designation>(&NameForm { name: name.into() })
            .await
    }

    /// An engineer in a fresh department, with password
    /// [`STAFF_PASSWORD`].
    pub async fn create_employee(
        &self,
        name: &str,
        email: &str,
    ) -> anyhow::Result<Employee> {
        let department = self.create_department("Engineering").await?;
        let designation = self.create_designation("Developer").await?;
        let form = employee_form(name, email, department.id, designation.id);
        self.create::<Employee>(&form).await
    }

    pub async fn create_client(&self, email: &str) -> anyhow::Result<Client> {
        self.create::<Client>(&client_form("Acme Corp", email)).await
    }

    pub async fn create_contract_type(
        &self,
        name: &str,
    ) -> anyhow::Result<ContractType> {
        self.create::<ContractType>(&NameForm { name: name.into() })
            .await
    }

    pub async fn create_contract(
        &self,
        client: ClientId,
    ) -> anyhow::Result<Contract> {
        let contract_type = self.create_contract_type("Retainer").await?;
        let mut form = contract_form(client);
        form.contract_type = Some(contract_type.id);
        self.create::<Contract>(&form).await
    }

    pub async fn create_leave_type(
        &self,
        name: &str,
    ) -> anyhow::Result<LeaveType> {
        self.create::<LeaveType>(&LeaveTypeForm {
            name: name.into(),
            color_code: "#16a34a".into(),
        })
        .await
    }

    /// A pending leave on each of `dates`. Several dates make several
    /// leaves.
    pub async fn create_leaves(
        &self,
        employee: EmployeeId,
        dates: Vec<Date>,
    ) -> anyhow::Result<Vec<Leave>> {
        let leave_type = self.create_leave_type("Annual").await?;
        let duration = if dates.len() > 1 {
            LeaveDuration::Multiple
        } else {
            LeaveDuration::Single
        };
        let form = CreateLeave {
            employee,
            leave_type: leave_type.id,
            status: LeaveStatus::Pending,
            dates,
            duration,
            reason: "Family visit".into(),
        };
        let response = self.client.create::<Leave>(&form).await?;
        Ok(match response.record {
            Some(leave) => vec![leave],
            None => response.records.unwrap_or_default(),
        })
    }

    pub async fn create_holiday(
        &self,
        on: Date,
        occasion: &str,
    ) -> anyhow::Result<Holiday> {
        self.create::<Holiday>(&HolidayForm {
            date: on,
            occasion: occasion.into(),
        })
        .await
    }

    pub async fn create_project(
        &self,
        client: Option<ClientId>,
        employees: Vec<EmployeeId>,
    ) -> anyhow::Result<Project> {
        let form = project_form("Website relaunch", client, employees);
        self.create::<Project>(&form).await
    }

    pub async fn create_task(
        &self,
        project: ProjectId,
        employees: Vec<EmployeeId>,
    ) -> anyhow::Result<Task> {
        let form = task_form("Design review", Some(project), employees);
        self.create::<Task>(&form).await
    }

    pub async fn create_time_log(
        &self,
        project: ProjectId,
        task: TaskId,
        employee: EmployeeId,
    ) -> anyhow::Result<TimeLog> {
        self.create::<TimeLog>(&time_log_form(project, task, employee))
            .await
    }
}

pub fn admin_login_credentials() -> LoginCredentials {
    LoginCredentials {
        email: "admin@staffdesk.test".into(),
        password: "admin123".into(),
    }
}

/// Password given to every employee and client created by the fixtures.
pub const STAFF_PASSWORD: &str = "welcome1";

pub fn login_credentials(email: &str) -> LoginCredentials {
    LoginCredentials {
        email: email.into(),
        password: STAFF_PASSWORD.into(),
    }
}

pub fn employee_form(
    name: &str,
    email: &str,
    department: payloads::DepartmentId,
    designation: payloads::DesignationId,
) -> CreateEmployee {
    CreateEmployee {
        details: EmployeeDetails {
            employee_id: format!("EMP-{}", email.len()),
            name: name.into(),
            email: email.into(),
            designation,
            department,
            joining_date: date(2024, 3, 1),
            hourly_rate: dec!(32.5),
            gender: Gender::Female,
            mobile: "+1 555 0100".into(),
            date_of_birth: Some(date(1990, 7, 14)),
            country: Some("Canada".into()),
            address: None,
            skills: vec!["rust".into(), "sql".into()],
            can_login: true,
            can_receive_email: true,
            avatar: None,
        },
        password: STAFF_PASSWORD.into(),
    }
}

pub fn client_form(name: &str, email: &str) -> CreateClient {
    CreateClient {
        details: ClientDetails {
            salutation: Salutation::Mr,
            name: name.into(),
            email: email.into(),
            mobile: "+1 555 0199".into(),
            gender: Gender::Male,
            country: Some("USA".into()),
            company_name: Some(name.into()),
            official_website: Some("https://acme.example".into()),
            gst_vat_number: None,
            office_phone_number: None,
            city: Some("Springfield".into()),
            state: None,
            postal_code: None,
            company_address: None,
            shipping_address: None,
            can_login: true,
            can_receive_email: false,
            avatar: None,
        },
        password: STAFF_PASSWORD.into(),
    }
}

pub fn contract_form(client: ClientId) -> ContractForm {
    ContractForm {
        subject: "Support retainer".into(),
        client,
        contract_type: None,
        contract_value: dec!(12000),
        currency: Currency::USD,
        start_date: date(2025, 1, 1),
        end_date: date(2025, 12, 31),
        description: Some("Monthly **support** hours".into()),
        notes: None,
        cell: None,
        office_phone_number: None,
        city: None,
        state: None,
        country: None,
        postal_code: None,
        alternate_address: None,
        company_logo: None,
    }
}

pub fn project_form(
    name: &str,
    client: Option<ClientId>,
    employees: Vec<EmployeeId>,
) -> ProjectForm {
    ProjectForm {
        name: name.into(),
        client,
        start_date: date(2025, 1, 6),
        deadline: Some(date(2025, 6, 30)),
        status: ProjectStatus::InProgress,
        budget: Some(dec!(50000)),
        currency: Some(Currency::USD),
        summary: None,
        employees,
    }
}

pub fn task_form(
    name: &str,
    project: Option<ProjectId>,
    employees: Vec<EmployeeId>,
) -> TaskForm {
    TaskForm {
        name: name.into(),
        project,
        milestone: None,
        start_date: date(2025, 1, 6),
        deadline: date(2025, 1, 17),
        status: None,
        priority: TaskPriority::High,
        employees,
        description: None,
    }
}

/// Two and a half hours on the morning of 2025-01-07.
pub fn time_log_form(
    project: ProjectId,
    task: TaskId,
    employee: EmployeeId,
) -> TimeLogForm {
    TimeLogForm {
        project,
        task,
        employee,
        starts_on_date: date(2025, 1, 7),
        starts_on_time: time(9, 0, 0, 0),
        ends_on_date: date(2025, 1, 7),
        ends_on_time: time(11, 30, 0, 0),
        memo: "Wireframes".into(),
    }
}

/// Start the mock api on `port` (0 for any free port) with a client that
/// keeps the session cookie.
pub async fn spawn_app_with_clock(port: u16, clock: Clock) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let store = Arc::new(Store::new(clock));
    let mut config = Config::local(port);

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let server = mock_api::build(&mut config, store.clone()).unwrap();
    tokio::spawn(server);

    let app = TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
        store,
    };
    app.seed_admin().unwrap();
    app
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let now = TEST_NOW.parse().unwrap();
    spawn_app_with_clock(port, Clock::Fixed(now)).await
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
