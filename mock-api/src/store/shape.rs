//! Per-collection treatment of records on their way into the store.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime, Time};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::accounts::holder_role;
use super::{
    CollectionSpec, EMPLOYEES, Inner, JOBS, NOTIFICATIONS, STATUS_COLUMNS,
    StoreError, as_id,
};

type Record = Map<String, Value>;

/// Fields that must hold a `YYYY-MM-DD` date when present.
const DATE_FIELDS: &[&str] = &[
    "date",
    "joining_date",
    "date_of_birth",
    "start_date",
    "end_date",
    "deadline",
    "starts_on_date",
    "ends_on_date",
];

/// Split a create body into the records it stands for. A leave request
/// carries a list of dates and becomes one leave per date.
pub(super) fn split(
    spec: CollectionSpec,
    mut body: Record,
) -> Result<Vec<Record>, StoreError> {
    if spec.path != "leaves" {
        return Ok(vec![body]);
    }
    let Some(dates) = body.remove("dates") else {
        return Ok(vec![body]);
    };
    let dates = match dates {
        Value::Array(dates) if !dates.is_empty() => dates,
        _ => return Err(invalid("Pick at least one date")),
    };
    Ok(dates
        .into_iter()
        .map(|date| {
            let mut leave = body.clone();
            leave.insert("date".into(), date);
            leave
        })
        .collect())
}

pub(super) fn shape(
    inner: &mut Inner,
    spec: CollectionSpec,
    id: i64,
    record: &mut Record,
) -> Result<(), StoreError> {
    check_dates(record)?;
    match spec.path {
        "employees" => {
            require(record, &["employee_id", "name", "email", "joining_date"])?;
            default(record, "gender", "Male");
            default(record, "mobile", "");
            default(record, "hourly_rate", "0");
            default(record, "skills", Value::Array(Vec::new()));
            expand(inner, record, "department", "departments")?;
            expand(inner, record, "designation", "designations")?;
            account_holder(inner, spec, id, record)?;
        }
        "clients" => {
            require(record, &["name", "email"])?;
            default(record, "salutation", "Mr");
            default(record, "gender", "Male");
            default(record, "mobile", "");
            account_holder(inner, spec, id, record)?;
        }
        "contracts" => {
            require(
                record,
                &["subject", "client", "contract_value", "currency"],
            )?;
            require(record, &["start_date", "end_date"])?;
            reference(inner, record, "client", "clients")?;
            expand(inner, record, "contract_type", "contract-types")?;
        }
        "holidays" => require(record, &["date", "occasion"])?,
        "project-discussion-rooms" => {
            require(record, &["project", "title", "description"])?;
            reference(inner, record, "project", "projects")?;
        }
        "sticky-notes" => {
            require(record, &["employee", "note"])?;
            reference(inner, record, "employee", EMPLOYEES.path)?;
            default(record, "color", "#FEEBC8");
        }
        "contract-files" => {
            require(record, &["contract", "file"])?;
            reference(inner, record, "contract", "contracts")?;
        }
        "interview-files" => {
            require(record, &["interview", "file"])?;
            reference(inner, record, "interview", "interviews")?;
        }
        "tasks" => task_status(inner, record)?,
        "time-logs" => total_hours(record)?,
        "rooms" => {
            default(
                record,
                "link",
                format!("https://meet.jit.si/staffdesk-room-{id}"),
            );
        }
        "job-applications" => {
            let title = record
                .get("jobs")
                .and_then(as_id)
                .and_then(|job| inner.find(JOBS.path, job))
                .and_then(|job| job.get("title"))
                .cloned();
            if let Some(title) = title {
                record.insert("job_title".into(), title);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Side effects of a new record: assigned staff hear about their tasks.
pub(super) fn after_create(
    inner: &mut Inner,
    spec: CollectionSpec,
    record: &Value,
    now: Timestamp,
) -> Result<(), StoreError> {
    if spec.path != "tasks" {
        return Ok(());
    }
    let name = record.get("name").and_then(Value::as_str).unwrap_or("a task");
    let content = format!("You have been assigned to {name}");
    let assignees: Vec<i64> = record
        .get("employees")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(as_id).collect())
        .unwrap_or_default();
    for employee in assignees {
        notify(inner, employee, &content, "/tasks", now)?;
    }
    Ok(())
}

pub(super) fn notify(
    inner: &mut Inner,
    user_id: i64,
    content: &str,
    url: &str,
    now: Timestamp,
) -> Result<Value, StoreError> {
    let mut record = Record::new();
    record.insert("employee".into(), Value::from(user_id));
    record.insert("content".into(), content.into());
    record.insert("url".into(), url.into());
    record.insert("read".into(), Value::Bool(false));
    let id = inner.allocate();
    inner.save(NOTIFICATIONS, id, record, now)
}

fn invalid(message: impl Into<String>) -> StoreError {
    StoreError::Invalid(message.into())
}

fn text<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn require(record: &Record, fields: &[&str]) -> Result<(), StoreError> {
    for field in fields {
        let present = match record.get(*field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(invalid(format!("{field} is required")));
        }
    }
    Ok(())
}

fn default(record: &mut Record, field: &str, value: impl Into<Value>) {
    if record.get(field).is_none_or(Value::is_null) {
        record.insert(field.into(), value.into());
    }
}

fn check_dates(record: &Record) -> Result<(), StoreError> {
    for field in DATE_FIELDS {
        if let Some(value) = text(record, field) {
            value.parse::<Date>().map_err(|_| {
                invalid(format!("{field} must be a date (YYYY-MM-DD)"))
            })?;
        }
    }
    Ok(())
}

/// Replace the id in `field` with the record it names.
fn expand(
    inner: &Inner,
    record: &mut Record,
    field: &str,
    from: &str,
) -> Result<(), StoreError> {
    let Some(value) = record.get(field) else {
        return Ok(());
    };
    if value.is_null() || value.is_object() {
        return Ok(());
    }
    let target = as_id(value)
        .and_then(|id| inner.find(from, id))
        .cloned()
        .ok_or_else(|| invalid(format!("Unknown {field}")))?;
    record.insert(field.into(), target);
    Ok(())
}

/// Store the id in `field` as a number, after checking it names a record.
fn reference(
    inner: &Inner,
    record: &mut Record,
    field: &str,
    from: &str,
) -> Result<(), StoreError> {
    let Some(value) = record.get(field) else {
        return Ok(());
    };
    let id = as_id(value)
        .filter(|id| inner.find(from, *id).is_some())
        .ok_or_else(|| invalid(format!("Unknown {field}")))?;
    record.insert(field.into(), Value::from(id));
    Ok(())
}

fn account_holder(
    inner: &mut Inner,
    spec: CollectionSpec,
    id: i64,
    record: &mut Record,
) -> Result<(), StoreError> {
    let password = match record.remove("password") {
        Some(Value::String(p)) if !p.is_empty() => Some(p),
        _ => None,
    };
    let email = text(record, "email")
        .map(str::to_string)
        .ok_or_else(|| invalid("email is required"))?;
    if inner.email_taken(&email, id) {
        return Err(invalid("Email already exists"));
    }
    let role = holder_role(spec, record);
    if spec == EMPLOYEES {
        record.insert("role".into(), Value::String(role.to_string()));
    }
    default(record, "can_login", true);
    default(record, "can_receive_email", true);
    inner.upsert_account(spec, id, &email, password, role)
}

/// Put the task in its board column, the first column when none is given.
fn task_status(inner: &Inner, record: &mut Record) -> Result<(), StoreError> {
    if record.get("status").is_none_or(Value::is_null) {
        if let Some(first) = inner.records(STATUS_COLUMNS.path).next() {
            record.insert("status".into(), first.clone());
        }
        return Ok(());
    }
    expand(inner, record, "status", STATUS_COLUMNS.path)
}

fn total_hours(record: &mut Record) -> Result<(), StoreError> {
    let starts = date_time(record, "starts_on_date", "starts_on_time")?;
    let ends = date_time(record, "ends_on_date", "ends_on_time")?;
    let worked = ends.duration_since(starts).as_secs();
    if worked <= 0 {
        return Err(invalid("End must be after start"));
    }
    let hours = (Decimal::from(worked / 60) / Decimal::from(60))
        .round_dp(2)
        .normalize();
    record.insert("total_hours".into(), Value::String(hours.to_string()));
    Ok(())
}

fn date_time(
    record: &Record,
    date_field: &str,
    time_field: &str,
) -> Result<DateTime, StoreError> {
    let date: Date = text(record, date_field)
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| invalid(format!("{date_field} is required")))?;
    let time: Time = text(record, time_field)
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| invalid(format!("{time_field} is required")))?;
    Ok(date.to_datetime(time))
}

#[cfg(test)]
mod tests {
    use super::super::{Clock, Store};
    use serde_json::json;

    fn store() -> Store {
        Store::new(Clock::Fixed("2025-01-01T00:00:00Z".parse().unwrap()))
    }

    #[test]
    fn leave_with_several_dates_becomes_several_leaves() {
        let store = store();
        let created = store
            .create(
                "leaves",
                json!({
                    "employee": 1,
                    "leave_type": 2,
                    "status": "Pending",
                    "dates": ["2025-02-03", "2025-02-04"],
                    "duration": "Multiple",
                    "reason": "Trip",
                }),
            )
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[1]["date"], "2025-02-04");
        assert!(created[0].get("dates").is_none());
    }

    #[test]
    fn time_log_hours_are_computed() {
        let store = store();
        let created = store
            .create(
                "time-logs",
                json!({
                    "project": 1,
                    "task": 2,
                    "employee": 3,
                    "starts_on_date": "2025-02-03",
                    "starts_on_time": "09:00:00",
                    "ends_on_date": "2025-02-03",
                    "ends_on_time": "10:30:00",
                    "memo": "Review",
                }),
            )
            .unwrap();
        assert_eq!(created[0]["total_hours"], "1.5");
    }

    #[test]
    fn time_log_must_end_after_it_starts() {
        let store = store();
        let err = store
            .create(
                "time-logs",
                json!({
                    "starts_on_date": "2025-02-03",
                    "starts_on_time": "10:00",
                    "ends_on_date": "2025-02-03",
                    "ends_on_time": "09:00",
                }),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "End must be after start");
    }

    #[test]
    fn tasks_land_in_the_first_column_and_notify_assignees() {
        let store = store();
        let created = store
            .create(
                "tasks",
                json!({
                    "name": "Payroll",
                    "start_date": "2025-02-03",
                    "deadline": "2025-02-10",
                    "priority": "High",
                    "employees": [42],
                }),
            )
            .unwrap();
        assert_eq!(created[0]["status"]["title"], "Incomplete");
        let notifications = store.notifications_for(42).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["content"], "You have been assigned to Payroll");
    }

    #[test]
    fn rooms_get_a_meeting_link() {
        let store = store();
        let created = store
            .create("rooms", json!({"title": "Standup", "duration": 15}))
            .unwrap();
        let id = created[0]["id"].as_i64().unwrap();
        assert_eq!(
            created[0]["link"],
            format!("https://meet.jit.si/staffdesk-room-{id}")
        );
    }

    #[test]
    fn bad_dates_are_rejected() {
        let store = store();
        let err = store
            .create("holidays", json!({"date": "03/02/2025", "occasion": "x"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "date must be a date (YYYY-MM-DD)");
    }

    #[test]
    fn unknown_department_is_rejected() {
        let store = store();
        let err = store
            .create(
                "employees",
                json!({
                    "employee_id": "E-1",
                    "name": "Jane",
                    "email": "jane@acme.io",
                    "password": "secret1",
                    "joining_date": "2024-03-01",
                    "department": 999,
                }),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown department");
    }
}
