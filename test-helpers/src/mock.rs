//! A realistic company for the dev-server and for tests that want a
//! populated app.
//!
//! Everything is created through the api client as the admin, except the
//! job openings and notifications, which have no create endpoint.

use crate::{
    STAFF_PASSWORD, TestApp, admin_login_credentials, client_form,
    contract_form, employee_form, project_form, task_form, time_log_form,
};
use anyhow::Result;
use jiff::ToSpan;
use jiff::civil::{Date, time};
use jiff::tz::TimeZone;
use payloads::requests::{
    ChangeRole, CheckAttendance, DiscussionForm, EventForm, HolidayForm,
    InterviewForm, JobApplicationForm, LeaveTypeForm, MilestoneForm,
    NameForm, NoticeBoardForm, ProjectDiscussionRoomForm, RoomForm,
};
use payloads::responses::{
    Client, Contract, ContractType, Department, Designation, Discussion,
    Employee, Event, Holiday, Interview, JobApplication, LeaveType,
    Milestone, NoticeBoard, Project, ProjectDiscussionRoom, Room, Task,
};
use payloads::{
    InterviewStatus, JobApplicationStatus, JobId, NoticeTo, Role,
};
use rust_decimal::dec;
use serde_json::json;

pub struct DevDataset {
    pub manager: Employee,
    pub engineer: Employee,
    pub sales: Employee,
    pub acme: Client,
    pub globex: Client,
    pub contract: Contract,
    pub project: Project,
    pub tasks: Vec<Task>,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        app.login_admin().await?;
        let today = app.store.now().to_zoned(TimeZone::UTC).date();

        tracing::info!("🏢 Creating departments and staff");
        let engineering = app
            .create::<Department>(&NameForm { name: "Engineering".into() })
            .await?;
        let sales_department = app
            .create::<Department>(&NameForm { name: "Sales".into() })
            .await?;
        let developer = app
            .create::<Designation>(&NameForm { name: "Developer".into() })
            .await?;
        let account_manager = app
            .create::<Designation>(&NameForm {
                name: "Account Manager".into(),
            })
            .await?;

        let manager = app
            .create::<Employee>(&employee_form(
                "Maya Lin",
                "maya@staffdesk.test",
                engineering.id,
                developer.id,
            ))
            .await?;
        let manager = app
            .client
            .change_role(&ChangeRole {
                employee_id: manager.id,
                role: Role::Manager,
            })
            .await?
            .record
            .unwrap_or(manager);
        let engineer = app
            .create::<Employee>(&employee_form(
                "Eli Novak",
                "eli@staffdesk.test",
                engineering.id,
                developer.id,
            ))
            .await?;
        let sales = app
            .create::<Employee>(&employee_form(
                "Sam Ortiz",
                "sam@staffdesk.test",
                sales_department.id,
                account_manager.id,
            ))
            .await?;

        tracing::info!("🤝 Creating clients and contracts");
        let acme = app
            .create::<Client>(&client_form("Acme Corp", "ops@acme.test"))
            .await?;
        let globex = app
            .create::<Client>(&client_form("Globex", "hello@globex.test"))
            .await?;
        let retainer = app
            .create::<ContractType>(&NameForm { name: "Retainer".into() })
            .await?;
        let mut form = contract_form(acme.id);
        form.contract_type = Some(retainer.id);
        let contract = app.create::<Contract>(&form).await?;
        let mut form = contract_form(globex.id);
        form.subject = "Data migration".into();
        form.contract_value = dec!(4800);
        app.create::<Contract>(&form).await?;
        app.create::<Discussion>(&DiscussionForm {
            contract: contract.id,
            employee: Some(sales.id),
            client: None,
            content: "Sent over the **signed** copy.".into(),
        })
        .await?;

        tracing::info!("🌴 Creating leave and holidays");
        let annual = app
            .create::<LeaveType>(&LeaveTypeForm {
                name: "Annual".into(),
                color_code: "#16a34a".into(),
            })
            .await?;
        app.create::<LeaveType>(&LeaveTypeForm {
            name: "Sick".into(),
            color_code: "#dc2626".into(),
        })
        .await?;
        let next_week = today.checked_add(7.days())?;
        app.client
            .create::<payloads::responses::Leave>(
                &payloads::requests::CreateLeave {
                    employee: engineer.id,
                    leave_type: annual.id,
                    status: payloads::LeaveStatus::Pending,
                    dates: vec![next_week, next_week.checked_add(1.day())?],
                    duration: payloads::LeaveDuration::Multiple,
                    reason: "Moving house".into(),
                },
            )
            .await?;
        for (month, day, occasion) in
            [(1, 1, "New Year's Day"), (12, 25, "Christmas Day")]
        {
            app.create::<Holiday>(&HolidayForm {
                date: Date::new(today.year(), month, day)?,
                occasion: occasion.into(),
            })
            .await?;
        }

        tracing::info!("🕘 Checking attendance for this month");
        for employee in [&manager, &engineer, &sales] {
            for days_ago in 1..=3 {
                let date = today.checked_sub(days_ago.days())?;
                app.client
                    .check_attendance(&CheckAttendance {
                        employee: employee.id,
                        date,
                        clock_in_time: time(8, 30, 0, 0),
                        clock_out_time: time(17, 0, 0, 0),
                        late: days_ago == 2,
                        half_day: false,
                        working_from: "Office".into(),
                    })
                    .await?;
            }
        }

        tracing::info!("📋 Creating a project with tasks");
        let project = app
            .create::<Project>(&project_form(
                "Website relaunch",
                Some(acme.id),
                vec![manager.id, engineer.id],
            ))
            .await?;
        app.create::<Milestone>(&MilestoneForm {
            project: project.id,
            title: "Design sign-off".into(),
            cost: dec!(5000),
            add_to_budget: true,
            status: false,
            summary: None,
        })
        .await?;
        app.create::<ProjectDiscussionRoom>(&ProjectDiscussionRoomForm {
            project: project.id,
            title: "Launch checklist".into(),
            category: Some("Planning".into()),
            description: "What is *left* before the relaunch goes live?".into(),
        })
        .await?;
        let mut tasks = Vec::new();
        for name in ["Design review", "Content audit"] {
            tasks.push(
                app.create::<Task>(&task_form(
                    name,
                    Some(project.id),
                    vec![engineer.id],
                ))
                .await?,
            );
        }
        if let Some(task) = tasks.first() {
            app.create::<payloads::responses::TimeLog>(&time_log_form(
                project.id,
                task.id,
                engineer.id,
            ))
            .await?;
        }

        tracing::info!("🧑‍💼 Creating openings and candidates");
        let opening = app.store.create(
            "jobs",
            json!({"title": "Backend Engineer", "location": "Remote"}),
        )?;
        let job = opening
            .first()
            .and_then(|job| job["id"].as_i64())
            .map(JobId)
            .ok_or_else(|| anyhow::anyhow!("job opening was not created"))?;
        let candidate = app
            .create::<JobApplication>(&JobApplicationForm {
                name: "Priya Raman".into(),
                email: "priya@example.test".into(),
                mobile: None,
                jobs: job,
                location: Some("Remote".into()),
                status: JobApplicationStatus::Interview,
                source: Some("Referral".into()),
                skills: vec!["rust".into(), "postgres".into()],
            })
            .await?;
        app.create::<Interview>(&InterviewForm {
            candidate: candidate.id,
            interviewer: vec![manager.id],
            date: today.checked_add(2.days())?,
            start_time: time(14, 0, 0, 0),
            status: InterviewStatus::Pending,
            comment: None,
        })
        .await?;

        tracing::info!("📣 Posting notices, events and meetings");
        app.create::<NoticeBoard>(&NoticeBoardForm {
            heading: "Office closed on Friday".into(),
            notice_to: NoticeTo::Employees,
            details: "The office is closed for **maintenance**.".into(),
        })
        .await?;
        app.create::<NoticeBoard>(&NoticeBoardForm {
            heading: "New support hours".into(),
            notice_to: NoticeTo::Clients,
            details: "Support is now available 8am to 8pm.".into(),
        })
        .await?;
        let tomorrow = today.checked_add(1.day())?;
        app.create::<Event>(&EventForm {
            name: "Quarterly planning".into(),
            location: "Room 4".into(),
            color: "#2563eb".into(),
            starts_on_date: tomorrow,
            starts_on_time: time(10, 0, 0, 0),
            ends_on_date: tomorrow,
            ends_on_time: time(12, 0, 0, 0),
            description: None,
            employees: vec![manager.id, engineer.id, sales.id],
            clients: vec![],
        })
        .await?;
        app.create::<Room>(&RoomForm {
            title: "Daily standup".into(),
            date: tomorrow,
            start_time: time(9, 15, 0, 0),
            duration: 15,
            description: None,
            employees: vec![manager.id, engineer.id],
        })
        .await?;

        if let Some(admin) = app.client.current_user().await? {
            app.store.notify(
                admin.id,
                "Eli Novak asked for two days of leave",
                "/leaves",
            )?;
        }

        Ok(Self {
            manager,
            engineer,
            sales,
            acme,
            globex,
            contract,
            project,
            tasks,
        })
    }

    pub fn print_summary(&self) {
        let admin = admin_login_credentials();
        tracing::info!("🔑 Logins:");
        tracing::info!("   Admin:    {} / {}", admin.email, admin.password);
        for (label, email) in [
            ("Manager", &self.manager.email),
            ("Employee", &self.engineer.email),
            ("Employee", &self.sales.email),
            ("Client", &self.acme.email),
            ("Client", &self.globex.email),
        ] {
            tracing::info!("   {label:<9} {email} / {STAFF_PASSWORD}");
        }
        tracing::info!(
            "📁 Project \"{}\" with {} tasks, contract \"{}\"",
            self.project.name,
            self.tasks.len(),
            self.contract.subject
        );
    }
}
