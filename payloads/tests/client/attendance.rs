use jiff::civil::{date, time};
use payloads::query::list_key;
use payloads::requests::CheckAttendance;

use test_helpers::spawn_app;

fn check(
    employee: payloads::EmployeeId,
    on: jiff::civil::Date,
) -> CheckAttendance {
    CheckAttendance {
        employee,
        date: on,
        clock_in_time: time(8, 0, 0, 0),
        clock_out_time: time(17, 0, 0, 0),
        late: false,
        half_day: false,
        working_from: "Office".into(),
    }
}

#[tokio::test]
async fn attendance_is_queried_by_month_and_department() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let eli = app.create_employee("Eli Novak", "eli@acme.test").await?;
    let sam = app.create_employee("Sam Ortiz", "sam@acme.test").await?;

    let response = app
        .client
        .check_attendance(&check(eli.id, date(2025, 3, 3)))
        .await?;
    assert_eq!(response.code, 201);
    app.client
        .check_attendance(&check(eli.id, date(2025, 4, 1)))
        .await?;
    app.client
        .check_attendance(&check(sam.id, date(2025, 3, 4)))
        .await?;

    let eli_department = eli.department.map(|d| d.id.to_string());
    let key = list_key(
        true,
        "attendances",
        &[
            ("date", Some("2025-03-15".to_string())),
            ("department", eli_department),
        ],
    )
    .expect("authenticated key");
    let march = app.client.attendances(&key).await?;
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].employee, eli.id);
    assert_eq!(march[0].clock_in_time, time(8, 0, 0, 0));

    let key = list_key(
        true,
        "attendances",
        &[("employee", Some(sam.id.to_string()))],
    )
    .expect("authenticated key");
    assert_eq!(app.client.attendances(&key).await?.len(), 1);

    Ok(())
}
