use jiff::civil::date;
use payloads::query::{list_key, nested_key};
use payloads::requests::{
    ChangeRole, ContractFileForm, NameForm, ProjectDiscussionRoomForm,
    StickyNoteForm, UpdateEmployee,
};
use payloads::responses::{
    ContractFile, Department, Employee, Leave, ProjectDiscussionRoom,
    StickyNote, Task,
};
use payloads::{
    ClientError, ContractId, EmployeeId, Image, LeaveDuration, Resource, Role,
};
use reqwest::StatusCode;
use rust_decimal::dec;

use test_helpers::{assert_status_code, login_credentials, spawn_app};

#[tokio::test]
async fn employee_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;
    assert_eq!(employee.role, Role::Employee);
    assert_eq!(
        employee.department.as_ref().map(|d| d.name.as_str()),
        Some("Engineering")
    );

    let fetched = app.client.detail::<Employee>(employee.id).await?;
    assert_eq!(fetched, employee);

    let employees = app.client.list::<Employee>(Employee::PATH).await?;
    // the admin and Eli
    assert_eq!(employees.len(), 2);

    app.client.delete_one::<Employee>(employee.id).await?;
    let result = app.client.detail::<Employee>(employee.id).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn update_without_password_keeps_login() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;
    let department = app.create_department("Research").await?;
    let designation = app.create_designation("Scientist").await?;

    let mut details = test_helpers::employee_form(
        "Eli Novak",
        "eli@acme.test",
        department.id,
        designation.id,
    )
    .details;
    details.hourly_rate = dec!(40);
    let update = UpdateEmployee {
        details,
        password: None,
    };
    let response = app.client.update::<Employee>(employee.id, &update).await?;
    assert_eq!(response.message, "Employee updated successfully");
    let updated = response.record.expect("updated employee");
    assert_eq!(updated.hourly_rate, dec!(40));
    assert_eq!(updated.department.map(|d| d.id), Some(department.id));

    app.login_as(&login_credentials("eli@acme.test")).await?;

    Ok(())
}

#[tokio::test]
async fn duplicate_email_message_reaches_the_caller() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.create_employee("Eli Novak", "eli@acme.test").await?;

    let result = app.create_employee("Eli Again", "ELI@acme.test").await;
    let error = result.unwrap_err();
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::APIError(code, text)) => {
            assert_eq!(*code, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Email already exists");
        }
        _ => panic!("Expected APIError, got {error}"),
    }

    Ok(())
}

#[tokio::test]
async fn missing_record_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let result = app
        .client
        .update::<Department>(
            payloads::DepartmentId(404),
            &NameForm { name: "Ops".into() },
        )
        .await;
    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::NOT_FOUND);
            assert_eq!(
                text,
                "The department you are looking for does not exist"
            );
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn change_role_promotes_staff() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let employee = app.create_employee("Maya Lin", "maya@acme.test").await?;

    let response = app
        .client
        .change_role(&ChangeRole {
            employee_id: employee.id,
            role: Role::Manager,
        })
        .await?;
    assert_eq!(response.record.map(|e| e.role), Some(Role::Manager));

    app.login_as(&login_credentials("maya@acme.test")).await?;
    let current = app.client.current_user().await?.expect("logged in");
    assert_eq!(current.role, Role::Manager);

    // only admins may change roles
    let result = app
        .client
        .change_role(&ChangeRole {
            employee_id: employee.id,
            role: Role::Admin,
        })
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn contract_expands_type_and_gets_public_link() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let client = app.create_client("ops@acme.test").await?;

    let contract = app.create_contract(client.id).await?;
    assert_eq!(contract.client, client.id);
    assert_eq!(
        contract.contract_type.map(|t| t.name),
        Some("Retainer".to_string())
    );
    assert_eq!(contract.created_at, test_helpers::TEST_NOW.parse::<jiff::Timestamp>()?);

    let link = app.client.public_contract_link(contract.id).await?;
    assert_eq!(link.token.len(), 32);

    Ok(())
}

#[tokio::test]
async fn leave_over_several_days_is_split() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;

    let leaves = app
        .create_leaves(employee.id, vec![date(2025, 2, 3), date(2025, 2, 4)])
        .await?;
    assert_eq!(leaves.len(), 2);
    assert!(leaves.iter().all(|l| l.duration == LeaveDuration::Multiple));

    let key = list_key(
        true,
        Leave::PATH,
        &[("employee", Some(employee.id.to_string()))],
    )
    .expect("authenticated key");
    let listed = app.client.list::<Leave>(&key).await?;
    let dates: Vec<_> = listed.iter().map(|l| l.date).collect();
    assert_eq!(dates, vec![date(2025, 2, 3), date(2025, 2, 4)]);

    Ok(())
}

#[tokio::test]
async fn task_lands_in_first_column_and_notifies() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;
    let project = app.create_project(None, vec![employee.id]).await?;

    let task = app.create_task(project.id, vec![employee.id]).await?;
    assert_eq!(
        task.status.as_ref().map(|s| s.title.as_str()),
        Some("Incomplete")
    );
    let admin = app.client.current_user().await?.expect("logged in");
    assert_eq!(task.assign_by, Some(EmployeeId(admin.id)));

    let key = nested_key(true, "projects", Some(project.id), Task::PATH)
        .expect("authenticated key");
    let project_tasks = app.client.list::<Task>(&key).await?;
    assert_eq!(project_tasks, vec![task]);

    app.login_as(&login_credentials("eli@acme.test")).await?;
    let notifications = app.client.notifications_by_current_user().await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].content,
        "You have been assigned to Design review"
    );
    assert!(!notifications[0].read);

    app.client.delete_notification(notifications[0].id).await?;
    assert!(app.client.notifications_by_current_user().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn time_log_hours_come_from_the_backend() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;
    let project = app.create_project(None, vec![employee.id]).await?;
    let task = app.create_task(project.id, vec![employee.id]).await?;

    let log = app.create_time_log(project.id, task.id, employee.id).await?;
    assert_eq!(log.total_hours, dec!(2.5));

    Ok(())
}

#[tokio::test]
async fn lookup_endpoints() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let columns = app.client.status_columns().await?;
    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Incomplete", "To Do", "Doing", "Completed"]);

    // nothing is open until someone posts a job
    assert!(app.client.jobs().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn project_threads_list_under_their_project() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let admin = app.client.current_user().await?.expect("logged in");
    let launch = app.create_project(None, vec![]).await?;
    let other = app.create_project(None, vec![]).await?;

    let room = app
        .create::<ProjectDiscussionRoom>(&ProjectDiscussionRoomForm {
            project: launch.id,
            title: "Launch checklist".into(),
            category: Some("Planning".into()),
            description: "What is *left* before go-live?".into(),
        })
        .await?;
    assert_eq!(room.assigner, Some(EmployeeId(admin.id)));

    let key = nested_key(
        true,
        "projects",
        Some(launch.id),
        ProjectDiscussionRoom::PATH,
    )
    .expect("authenticated key");
    assert_eq!(app.client.list::<ProjectDiscussionRoom>(&key).await?, vec![room]);

    let key = nested_key(
        true,
        "projects",
        Some(other.id),
        ProjectDiscussionRoom::PATH,
    )
    .expect("authenticated key");
    assert!(app.client.list::<ProjectDiscussionRoom>(&key).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn sticky_notes_are_listed_per_owner() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let admin = app.client.current_user().await?.expect("logged in");
    let employee = app.create_employee("Eli Novak", "eli@acme.test").await?;

    let mine = app
        .create::<StickyNote>(&StickyNoteForm {
            employee: EmployeeId(admin.id),
            color: "#C6F6D5".into(),
            note: "Call the **auditor**".into(),
        })
        .await?;
    app.create::<StickyNote>(&StickyNoteForm {
        employee: employee.id,
        color: "#FEEBC8".into(),
        note: "Not mine".into(),
    })
    .await?;

    let key = list_key(
        true,
        StickyNote::PATH,
        &[("employee", Some(admin.id.to_string()))],
    )
    .expect("authenticated key");
    assert_eq!(app.client.list::<StickyNote>(&key).await?, vec![mine]);

    Ok(())
}

#[tokio::test]
async fn files_attach_to_an_existing_contract() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let client = app.create_client("buyer@globex.test").await?;
    let contract = app.create_contract(client.id).await?;
    let file = Image {
        name: "signed.pdf".into(),
        public_id: "staffdesk/signed".into(),
        url: "https://img.test/staffdesk/signed.pdf".into(),
    };

    let attached = app
        .create::<ContractFile>(&ContractFileForm {
            contract: contract.id,
            file: file.clone(),
        })
        .await?;
    assert_eq!(attached.file, file);

    let key = list_key(
        true,
        ContractFile::PATH,
        &[("contract", Some(contract.id.to_string()))],
    )
    .expect("authenticated key");
    assert_eq!(app.client.list::<ContractFile>(&key).await?, vec![attached]);

    let orphan = app
        .client
        .create::<ContractFile>(&ContractFileForm {
            contract: ContractId(9999),
            file,
        })
        .await;
    assert_status_code(orphan, StatusCode::BAD_REQUEST);

    Ok(())
}
