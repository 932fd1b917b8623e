use payloads::requests::{self, NameForm};
use payloads::responses::Department;
use payloads::{ClientError, Role};
use reqwest::StatusCode;

use test_helpers::{
    admin_login_credentials, assert_status_code, login_credentials, spawn_app,
};

#[tokio::test]
async fn login_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let body = requests::LoginCredentials {
        email: "admin@staffdesk.test".into(),
        password: "wrong-password".into(),
    };
    let result = app.client.login(&body).await;

    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::UNAUTHORIZED);
            assert_eq!(text, "Invalid email or password");
        }
        _ => {
            panic!("Expected APIError");
        }
    }

    // no session was started
    assert_eq!(app.client.current_user().await?, None);

    Ok(())
}

#[tokio::test]
async fn login_starts_session() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response = app.client.login(&admin_login_credentials()).await?;
    assert_eq!(response.message, "Logged in successfully");
    let user = response.record.expect("login returns the user");
    assert_eq!(user.role, Role::Admin);

    let current = app.client.current_user().await?.expect("logged in");
    assert_eq!(current.email, "admin@staffdesk.test");
    assert_eq!(current.id, user.id);

    Ok(())
}

#[tokio::test]
async fn logout_ends_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let message = app.client.logout().await?;
    assert_eq!(message, "Logged out successfully");
    assert_eq!(app.client.current_user().await?, None);

    // reads need a session too
    let result = app.client.list::<Department>("departments").await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn employee_logs_in_with_employee_role() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.create_employee("Eli Novak", "eli@acme.test").await?;

    app.login_as(&login_credentials("eli@acme.test")).await?;

    let current = app.client.current_user().await?.expect("logged in");
    assert_eq!(current.role, Role::Employee);
    assert_eq!(current.name, "Eli Novak");

    Ok(())
}

#[tokio::test]
async fn clients_cannot_change_records() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.create_client("ops@acme.test").await?;

    app.login_as(&login_credentials("ops@acme.test")).await?;
    assert_eq!(
        app.client.current_user().await?.map(|u| u.role),
        Some(Role::Client)
    );

    let result = app
        .client
        .create::<Department>(&NameForm { name: "Ops".into() })
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn accounts_without_login_rights_are_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let department = app.create_department("Sales").await?;
    let designation = app.create_designation("Account Manager").await?;
    let mut form = test_helpers::employee_form(
        "Sam Ortiz",
        "sam@acme.test",
        department.id,
        designation.id,
    );
    form.details.can_login = false;
    app.create::<payloads::responses::Employee>(&form).await?;

    app.client.logout().await?;
    match app.client.login(&login_credentials("sam@acme.test")).await {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::UNAUTHORIZED);
            assert_eq!(text, "This account is not allowed to log in");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}
