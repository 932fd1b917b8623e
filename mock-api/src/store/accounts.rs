use payloads::Role;
use serde_json::{Map, Value};

use super::{CLIENTS, CollectionSpec, EMPLOYEES, Inner, Store, StoreError};

/// Login details of an employee or client record.
#[derive(Debug, Clone)]
pub struct Account {
    /// Id of the record the account belongs to.
    pub user_id: i64,
    pub collection: &'static str,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Inner {
    fn account(&self, user_id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.user_id == user_id)
    }

    pub(super) fn email_taken(&self, email: &str, except: i64) -> bool {
        self.accounts
            .iter()
            .any(|a| a.user_id != except && a.email.eq_ignore_ascii_case(email))
    }

    /// Keep the account of record `user_id` in step with the record. A new
    /// account needs a password; an existing one keeps its password unless a
    /// new one is given.
    pub(super) fn upsert_account(
        &mut self,
        spec: CollectionSpec,
        user_id: i64,
        email: &str,
        password: Option<String>,
        role: Role,
    ) -> Result<(), StoreError> {
        if let Some(account) =
            self.accounts.iter_mut().find(|a| a.user_id == user_id)
        {
            account.email = email.to_string();
            account.role = role;
            if let Some(password) = password {
                account.password = password;
            }
            return Ok(());
        }
        let password = password
            .ok_or_else(|| StoreError::Invalid("Password is required".into()))?;
        self.accounts.push(Account {
            user_id,
            collection: spec.path,
            email: email.to_string(),
            password,
            role,
        });
        Ok(())
    }

    fn current_user(&self, account: &Account) -> Result<Value, StoreError> {
        let record = self
            .find(account.collection, account.user_id)
            .ok_or(StoreError::NotFound("user"))?;
        let mut user = Map::new();
        user.insert("id".into(), Value::from(account.user_id));
        for field in ["name", "email", "avatar"] {
            user.insert(
                field.into(),
                record.get(field).cloned().unwrap_or(Value::Null),
            );
        }
        user.insert("role".into(), Value::String(account.role.to_string()));
        Ok(Value::Object(user))
    }
}

impl Store {
    /// Check credentials, returning the account and its user profile.
    pub fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, Value), StoreError> {
        let inner = self.inner()?;
        let account = inner
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
            .filter(|a| a.password == password)
            .ok_or(StoreError::InvalidCredentials)?;
        let can_login = inner
            .find(account.collection, account.user_id)
            .and_then(|r| r.get("can_login"))
            .and_then(Value::as_bool)
            .unwrap_or(true);
        if !can_login {
            return Err(StoreError::LoginDisabled);
        }
        let user = inner.current_user(account)?;
        Ok((account.clone(), user))
    }

    pub fn account(&self, user_id: i64) -> Result<Account, StoreError> {
        self.inner()?
            .account(user_id)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }

    pub fn current_user(&self, user_id: i64) -> Result<Value, StoreError> {
        let inner = self.inner()?;
        let account = inner
            .account(user_id)
            .ok_or(StoreError::InvalidCredentials)?;
        inner.current_user(account)
    }

    /// Give a staff account a new role.
    pub fn change_role(
        &self,
        employee_id: i64,
        role: Role,
    ) -> Result<Value, StoreError> {
        if role == Role::Client {
            return Err(StoreError::Invalid(
                "Staff can't be given the Client role".into(),
            ));
        }
        let mut inner = self.inner()?;
        let Some(Value::Object(employee)) =
            inner.table(EMPLOYEES.path).get_mut(&employee_id)
        else {
            return Err(StoreError::NotFound(EMPLOYEES.singular));
        };
        employee.insert("role".into(), Value::String(role.to_string()));
        let employee = Value::Object(employee.clone());
        if let Some(account) =
            inner.accounts.iter_mut().find(|a| a.user_id == employee_id)
        {
            account.role = role;
        }
        Ok(employee)
    }
}

/// Role of a new or updated account holder. Clients are always clients;
/// staff keep a role they were given and default to Employee.
pub(super) fn holder_role(spec: CollectionSpec, record: &Map<String, Value>) -> Role {
    if spec == CLIENTS {
        return Role::Client;
    }
    record
        .get("role")
        .and_then(|r| serde_json::from_value::<Role>(r.clone()).ok())
        .filter(|r| *r != Role::Client)
        .unwrap_or(Role::Employee)
}

#[cfg(test)]
mod tests {
    use super::super::Clock;
    use super::*;
    use serde_json::json;

    fn store() -> Store {
        Store::new(Clock::Fixed("2025-01-01T00:00:00Z".parse().unwrap()))
    }

    fn employee(email: &str) -> Value {
        json!({
            "employee_id": "E-1",
            "name": "Jane Doe",
            "email": email,
            "password": "secret1",
            "joining_date": "2024-03-01",
            "hourly_rate": "20",
            "gender": "Female",
            "mobile": "555",
        })
    }

    #[test]
    fn created_staff_can_log_in() {
        let store = store();
        store.create("employees", employee("jane@acme.io")).unwrap();
        let (account, user) = store.login("JANE@acme.io", "secret1").unwrap();
        assert_eq!(account.role, Role::Employee);
        assert_eq!(user["name"], "Jane Doe");
    }

    #[test]
    fn password_is_not_stored_on_the_record() {
        let store = store();
        let created = store.create("employees", employee("jane@acme.io")).unwrap();
        assert!(created[0].get("password").is_none());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let store = store();
        store.create("employees", employee("jane@acme.io")).unwrap();
        assert!(matches!(
            store.login("jane@acme.io", "nope"),
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = store();
        store.create("employees", employee("jane@acme.io")).unwrap();
        let err = store.create("clients", json!({
            "name": "Acme", "email": "jane@acme.io", "password": "secret1",
        }));
        assert_eq!(err.unwrap_err().to_string(), "Email already exists");
    }

    #[test]
    fn change_role_updates_account() {
        let store = store();
        let created = store.create("employees", employee("jane@acme.io")).unwrap();
        let id = created[0]["id"].as_i64().unwrap();
        let updated = store.change_role(id, Role::Manager).unwrap();
        assert_eq!(updated["role"], "Manager");
        assert_eq!(store.account(id).unwrap().role, Role::Manager);
    }
}
