use payloads::csv_io::{export_csv, parse_import};
use payloads::responses::{Contract, Department, Holiday};
use payloads::{ClientError, Currency, Resource};
use rust_decimal::dec;
use reqwest::StatusCode;

use test_helpers::spawn_app;

#[tokio::test]
async fn delete_many_removes_every_listed_record() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let ops = app.create_department("Ops").await?;
    let sales = app.create_department("Sales").await?;
    let research = app.create_department("Research").await?;

    let response = app
        .client
        .delete_many::<Department>(&[ops.id, sales.id])
        .await?;
    assert_eq!(response.message, "2 departments deleted successfully");
    assert_eq!(response.into_records().len(), 2);

    let left = app.client.list::<Department>(Department::PATH).await?;
    assert_eq!(left, vec![research]);

    Ok(())
}

#[tokio::test]
async fn delete_many_with_unknown_id_deletes_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let ops = app.create_department("Ops").await?;

    let result = app
        .client
        .delete_many::<Department>(&[ops.id, payloads::DepartmentId(9999)])
        .await;
    test_helpers::assert_status_code(result, StatusCode::NOT_FOUND);

    let left = app.client.list::<Department>(Department::PATH).await?;
    assert_eq!(left, vec![ops]);

    Ok(())
}

#[tokio::test]
async fn holidays_import_from_csv() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let file = "date,occasion\n2025-05-01,Labour Day\n2025-12-25,Christmas Day\n";
    let rows = parse_import(file, Holiday::IMPORT_FIELDS)?;
    let response = app.client.import_csv::<Holiday>(&rows).await?;
    assert_eq!(response.message, "2 holidays imported successfully");

    let holidays = app.client.list::<Holiday>(Holiday::PATH).await?;
    let exported = export_csv(&holidays, Holiday::CSV_COLUMNS)?;
    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some("Id,Date,Occasion"));
    assert!(lines.next().is_some_and(|l| l.ends_with(",2025-05-01,Labour Day")));

    Ok(())
}

#[tokio::test]
async fn bad_import_row_rejects_the_file() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let file = "date,occasion\n2025-05-01,Labour Day\n25/12/2025,Christmas Day\n";
    let rows = parse_import(file, Holiday::IMPORT_FIELDS)?;
    match app.client.import_csv::<Holiday>(&rows).await {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Row 2: date must be a date (YYYY-MM-DD)");
        }
        _ => panic!("Expected APIError"),
    }

    // the good row was not kept either
    assert!(app.client.list::<Holiday>(Holiday::PATH).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn contracts_import_from_csv() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let client = app.create_client("buyer@globex.test").await?;
    let retainer = app.create_contract_type("Retainer").await?;

    let file = format!(
        "subject,client,contract_type,contract_value,currency,start_date,end_date,city,notes\n\
         Hosting,{client},{kind},1200.50,EUR,2025-01-01,2025-12-31,Porto,yearly\n\
         Audit,{client},,300,USD,2025-03-01,2025-03-31,,\n",
        client = client.id,
        kind = retainer.id,
    );
    let rows = parse_import(&file, Contract::IMPORT_FIELDS)?;
    let response = app.client.import_csv::<Contract>(&rows).await?;
    assert_eq!(response.message, "2 contracts imported successfully");

    let contracts = app.client.list::<Contract>(Contract::PATH).await?;
    assert_eq!(contracts.len(), 2);
    let hosting = &contracts[0];
    assert_eq!(hosting.client, client.id);
    assert_eq!(hosting.contract_value, dec!(1200.50));
    assert_eq!(hosting.currency, Currency::EUR);
    assert_eq!(
        hosting.contract_type.as_ref().map(|t| t.name.as_str()),
        Some("Retainer")
    );
    assert_eq!(hosting.city.as_deref(), Some("Porto"));
    assert_eq!(contracts[1].contract_type, None);

    Ok(())
}

#[tokio::test]
async fn contract_import_with_unknown_client_keeps_nothing() -> anyhow::Result<()>
{
    let app = spawn_app().await;
    app.login_admin().await?;

    let file = "subject,client,contract_value,currency,start_date,end_date\n\
                Hosting,9999,100,EUR,2025-01-01,2025-12-31\n";
    let rows = parse_import(file, Contract::IMPORT_FIELDS)?;
    match app.client.import_csv::<Contract>(&rows).await {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Row 1: Unknown client");
        }
        _ => panic!("Expected APIError"),
    }
    assert!(app.client.list::<Contract>(Contract::PATH).await?.is_empty());

    Ok(())
}
