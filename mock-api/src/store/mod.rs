//! In-memory record store behind the mock api.
//!
//! Every collection is a map from id to the raw json record. Ids come from
//! one counter shared by all collections, so an account id names exactly one
//! employee or client record. Records are shaped on the way in (passwords
//! stripped, referenced ids expanded, derived fields filled) so reads return
//! what the real backend would.

mod accounts;
mod shape;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use jiff::Timestamp;
use payloads::Resource;
use payloads::responses::{
    Client, Contract, ContractFile, ContractType, Department, Designation,
    Discussion, Employee, Event, Holiday, Interview, InterviewFile,
    JobApplication, Leave, LeaveType, Milestone, NoticeBoard, Project,
    ProjectDiscussionRoom, Room, StickyNote, Task, TimeLog,
};
use serde_json::{Map, Value};

pub use accounts::Account;

/// Where "now" comes from when stamping records.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(Timestamp),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::System => Timestamp::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Path and envelope keys of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    pub path: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

const fn spec<R: Resource>() -> CollectionSpec {
    CollectionSpec {
        path: R::PATH,
        singular: R::SINGULAR,
        plural: R::PLURAL,
    }
}

pub const EMPLOYEES: CollectionSpec = spec::<Employee>();
pub const CLIENTS: CollectionSpec = spec::<Client>();
pub const ATTENDANCES: CollectionSpec = CollectionSpec {
    path: "attendances",
    singular: "attendance",
    plural: "attendances",
};
pub const NOTIFICATIONS: CollectionSpec = CollectionSpec {
    path: "notifications",
    singular: "notification",
    plural: "notifications",
};
pub const JOBS: CollectionSpec = CollectionSpec {
    path: "jobs",
    singular: "job",
    plural: "jobs",
};
pub const STATUS_COLUMNS: CollectionSpec = CollectionSpec {
    path: "status-columns",
    singular: "statusColumn",
    plural: "statusColumns",
};

pub const COLLECTIONS: &[CollectionSpec] = &[
    EMPLOYEES,
    CLIENTS,
    spec::<Contract>(),
    spec::<ContractType>(),
    spec::<Department>(),
    spec::<Designation>(),
    spec::<LeaveType>(),
    spec::<Leave>(),
    spec::<Holiday>(),
    spec::<Project>(),
    spec::<Milestone>(),
    spec::<Task>(),
    spec::<TimeLog>(),
    spec::<JobApplication>(),
    spec::<Interview>(),
    spec::<NoticeBoard>(),
    spec::<Event>(),
    spec::<Room>(),
    spec::<Discussion>(),
    spec::<ProjectDiscussionRoom>(),
    spec::<StickyNote>(),
    spec::<ContractFile>(),
    spec::<InterviewFile>(),
    ATTENDANCES,
    NOTIFICATIONS,
    JOBS,
    STATUS_COLUMNS,
];

pub fn collection(path: &str) -> Result<CollectionSpec, StoreError> {
    COLLECTIONS
        .iter()
        .copied()
        .find(|spec| spec.path == path)
        .ok_or_else(|| StoreError::UnknownCollection(path.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No such collection: {0}")]
    UnknownCollection(String),
    #[error("The {0} you are looking for does not exist")]
    NotFound(&'static str),
    #[error("{0}")]
    Invalid(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("This account is not allowed to log in")]
    LoginDisabled,
    #[error("Store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Default)]
struct Inner {
    next_id: i64,
    collections: HashMap<&'static str, BTreeMap<i64, Value>>,
    accounts: Vec<Account>,
}

impl Inner {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn table(&mut self, path: &'static str) -> &mut BTreeMap<i64, Value> {
        self.collections.entry(path).or_default()
    }

    fn find(&self, path: &str, id: i64) -> Option<&Value> {
        self.collections.get(path)?.get(&id)
    }

    fn records(&self, path: &str) -> impl Iterator<Item = &Value> {
        self.collections.get(path).into_iter().flat_map(|t| t.values())
    }

    /// Shape and store `record` under `id`, merging it over any existing
    /// record.
    fn save(
        &mut self,
        spec: CollectionSpec,
        id: i64,
        mut record: Map<String, Value>,
        now: Timestamp,
    ) -> Result<Value, StoreError> {
        let existing = self.find(spec.path, id).cloned();
        let created_at = existing
            .as_ref()
            .and_then(|e| e.get("created_at").cloned())
            .unwrap_or_else(|| Value::String(now.to_string()));
        if let Some(Value::Object(existing)) = existing {
            for (key, value) in existing {
                record.entry(key).or_insert(value);
            }
        }
        record.insert("id".into(), Value::from(id));
        record.insert("created_at".into(), created_at);
        record.insert("updated_at".into(), Value::String(now.to_string()));

        shape::shape(self, spec, id, &mut record)?;

        let record = Value::Object(record);
        self.table(spec.path).insert(id, record.clone());
        Ok(record)
    }

    fn create(
        &mut self,
        spec: CollectionSpec,
        body: Value,
        now: Timestamp,
    ) -> Result<Vec<Value>, StoreError> {
        let Value::Object(body) = body else {
            return Err(StoreError::Invalid(format!(
                "Expected a {} object",
                spec.singular
            )));
        };
        let mut created = Vec::new();
        for draft in shape::split(spec, body)? {
            let id = self.allocate();
            let record = self.save(spec, id, draft, now)?;
            shape::after_create(self, spec, &record, now)?;
            created.push(record);
        }
        Ok(created)
    }

    fn delete(
        &mut self,
        spec: CollectionSpec,
        id: i64,
    ) -> Result<Value, StoreError> {
        let removed = self
            .table(spec.path)
            .remove(&id)
            .ok_or(StoreError::NotFound(spec.singular))?;
        self.accounts.retain(|a| a.user_id != id);
        Ok(removed)
    }
}

pub struct Store {
    inner: Mutex<Inner>,
    clock: Clock,
}

impl Store {
    pub fn new(clock: Clock) -> Self {
        let store = Self {
            inner: Mutex::new(Inner::default()),
            clock,
        };
        store.seed_status_columns();
        store
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn inner(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    fn seed_status_columns(&self) {
        let Ok(mut inner) = self.inner() else { return };
        let now = self.clock.now();
        for (title, color) in [
            ("Incomplete", "#d21010"),
            ("To Do", "#f5c308"),
            ("Doing", "#00b5ff"),
            ("Completed", "#679c0d"),
        ] {
            let mut record = Map::new();
            record.insert("title".into(), title.into());
            record.insert("color".into(), color.into());
            let id = inner.allocate();
            if let Err(e) = inner.save(STATUS_COLUMNS, id, record, now) {
                tracing::warn!(title, error = %e, "could not seed status column");
            }
        }
    }

    /// Records of a collection matching every query parameter.
    pub fn list(
        &self,
        path: &str,
        query: &HashMap<String, String>,
    ) -> Result<Vec<Value>, StoreError> {
        let spec = collection(path)?;
        let inner = self.inner()?;
        Ok(inner
            .records(spec.path)
            .filter(|record| {
                query
                    .iter()
                    .all(|(name, value)| {
                        passes_query(&inner, spec, record, name, value)
                    })
            })
            .cloned()
            .collect())
    }

    pub fn get(&self, path: &str, id: i64) -> Result<Value, StoreError> {
        let spec = collection(path)?;
        self.inner()?
            .find(spec.path, id)
            .cloned()
            .ok_or(StoreError::NotFound(spec.singular))
    }

    /// Records of `child` that point at the `parent` record `id`.
    pub fn children(
        &self,
        parent: &str,
        id: i64,
        child: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let parent = collection(parent)?;
        let child = collection(child)?;
        let inner = self.inner()?;
        if inner.find(parent.path, id).is_none() {
            return Err(StoreError::NotFound(parent.singular));
        }
        Ok(inner
            .records(child.path)
            .filter(|record| {
                record
                    .get(parent.singular)
                    .is_some_and(|field| refers_to(field, id))
            })
            .cloned()
            .collect())
    }

    /// Create one record, or several when the body expands (a leave
    /// spanning multiple dates).
    pub fn create(
        &self,
        path: &str,
        body: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let spec = collection(path)?;
        let now = self.clock.now();
        self.inner()?.create(spec, body, now)
    }

    pub fn update(
        &self,
        path: &str,
        id: i64,
        body: Value,
    ) -> Result<Value, StoreError> {
        let spec = collection(path)?;
        let Value::Object(body) = body else {
            return Err(StoreError::Invalid(format!(
                "Expected a {} object",
                spec.singular
            )));
        };
        let now = self.clock.now();
        let mut inner = self.inner()?;
        if inner.find(spec.path, id).is_none() {
            return Err(StoreError::NotFound(spec.singular));
        }
        inner.save(spec, id, body, now)
    }

    pub fn delete(&self, path: &str, id: i64) -> Result<Value, StoreError> {
        let spec = collection(path)?;
        self.inner()?.delete(spec, id)
    }

    /// Delete every listed record, or none of them if one is missing.
    pub fn delete_many(
        &self,
        path: &str,
        ids: &[i64],
    ) -> Result<Vec<Value>, StoreError> {
        let spec = collection(path)?;
        let mut inner = self.inner()?;
        if ids.iter().any(|id| inner.find(spec.path, *id).is_none()) {
            return Err(StoreError::NotFound(spec.singular));
        }
        ids.iter().map(|id| inner.delete(spec, *id)).collect()
    }

    /// Create a record per imported row. A bad row rejects the whole file.
    pub fn import(
        &self,
        path: &str,
        rows: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let spec = collection(path)?;
        let now = self.clock.now();
        let mut inner = self.inner()?;
        let snapshot = inner.clone();
        let mut created = Vec::new();
        for (n, row) in rows.into_iter().enumerate() {
            match inner.create(spec, row, now) {
                Ok(records) => created.extend(records),
                Err(e) => {
                    *inner = snapshot;
                    return Err(StoreError::Invalid(format!(
                        "Row {}: {e}",
                        n + 1
                    )));
                }
            }
        }
        Ok(created)
    }

    /// Record a token that opens the contract outside the app.
    pub fn public_contract_link(
        &self,
        contract_id: i64,
        token: String,
    ) -> Result<String, StoreError> {
        let spec = collection(Contract::PATH)?;
        let mut inner = self.inner()?;
        let Some(Value::Object(contract)) =
            inner.table(spec.path).get_mut(&contract_id)
        else {
            return Err(StoreError::NotFound(spec.singular));
        };
        contract.insert("public_token".into(), Value::String(token.clone()));
        Ok(token)
    }

    pub fn notifications_for(
        &self,
        user_id: i64,
    ) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner()?;
        Ok(inner
            .records(NOTIFICATIONS.path)
            .filter(|n| n.get("employee").is_some_and(|e| refers_to(e, user_id)))
            .cloned()
            .collect())
    }

    /// Push a notification to one account.
    pub fn notify(
        &self,
        user_id: i64,
        content: &str,
        url: &str,
    ) -> Result<Value, StoreError> {
        let now = self.clock.now();
        let mut inner = self.inner()?;
        shape::notify(&mut inner, user_id, content, url, now)
    }
}

/// Whether a record passes one query parameter.
fn passes_query(
    inner: &Inner,
    spec: CollectionSpec,
    record: &Value,
    name: &str,
    value: &str,
) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    match (spec.path, name) {
        // attendance sheets are asked for by month
        ("attendances", "date") => record
            .get("date")
            .and_then(Value::as_str)
            .zip(value.get(..7))
            .is_some_and(|(date, month)| date.starts_with(month)),
        ("attendances", "department") => record
            .get("employee")
            .and_then(as_id)
            .and_then(|id| inner.find(EMPLOYEES.path, id))
            .and_then(|employee| employee.get("department"))
            .is_some_and(|department| {
                value.parse().is_ok_and(|id| refers_to(department, id))
            }),
        _ => record.get(name).is_some_and(|field| equals(field, value)),
    }
}

fn equals(field: &Value, value: &str) -> bool {
    match field {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        Value::Bool(b) => b.to_string() == value,
        Value::Array(items) => items.iter().any(|item| equals(item, value)),
        Value::Object(object) => {
            object.get("id").is_some_and(|id| equals(id, value))
        }
        Value::Null => false,
    }
}

/// Whether `field` names record `id`, as a bare id, an expanded object or a
/// list of either.
fn refers_to(field: &Value, id: i64) -> bool {
    match field {
        Value::Array(items) => items.iter().any(|item| refers_to(item, id)),
        Value::Object(object) => {
            object.get("id").and_then(as_id).is_some_and(|i| i == id)
        }
        other => as_id(other).is_some_and(|i| i == id),
    }
}

/// An id sent as a number or as numeric text (CSV imports send text).
fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Store {
        Store::new(Clock::Fixed("2025-01-01T00:00:00Z".parse().unwrap()))
    }

    #[test]
    fn ids_are_shared_across_collections() {
        let store = store();
        let a = store.create("departments", json!({"name": "Ops"})).unwrap();
        let b = store.create("holidays", json!({"date": "2025-01-01", "occasion": "New year"})).unwrap();
        assert_ne!(a[0]["id"], b[0]["id"]);
        assert_eq!(a[0]["created_at"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn update_merges_over_existing_fields() {
        let store = store();
        let created = store
            .create("leave-types", json!({"name": "Sick", "color_code": "#f00"}))
            .unwrap();
        let id = created[0]["id"].as_i64().unwrap();
        let updated = store
            .update("leave-types", id, json!({"name": "Sick leave"}))
            .unwrap();
        assert_eq!(updated["name"], "Sick leave");
        assert_eq!(updated["color_code"], "#f00");
    }

    #[test]
    fn delete_many_is_all_or_nothing() {
        let store = store();
        let created = store.create("departments", json!({"name": "Ops"})).unwrap();
        let id = created[0]["id"].as_i64().unwrap();
        let result = store.delete_many("departments", &[id, 9999]);
        assert!(matches!(result, Err(StoreError::NotFound("department"))));
        assert!(store.get("departments", id).is_ok());
    }

    #[test]
    fn query_filters_by_field() {
        let store = store();
        store.create("departments", json!({"name": "Ops"})).unwrap();
        store.create("departments", json!({"name": "Sales"})).unwrap();
        let query = HashMap::from([("name".to_string(), "Sales".to_string())]);
        let found = store.list("departments", &query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Sales");
    }

    #[test]
    fn unknown_collection_is_reported() {
        let store = store();
        assert!(matches!(
            store.list("payroll", &HashMap::new()),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    #[test]
    fn new_store_has_the_task_board_columns() {
        let columns = store().list("status-columns", &HashMap::new()).unwrap();
        let titles: Vec<_> = columns.iter().map(|c| c["title"].clone()).collect();
        assert_eq!(titles, ["Incomplete", "To Do", "Doing", "Completed"]);
    }

    #[test]
    fn bad_import_row_rolls_back() {
        let store = store();
        let rows = vec![
            json!({"date": "2025-05-01", "occasion": "Labour day"}),
            json!("not a row"),
        ];
        let err = store.import("holidays", rows).unwrap_err();
        assert!(err.to_string().starts_with("Row 2:"));
        assert!(store.list("holidays", &HashMap::new()).unwrap().is_empty());
    }
}
