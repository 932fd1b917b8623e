use crate::csv_io::ImportRow;
use crate::requests::{ChangeRole, CheckAttendance, LoginCredentials};
use crate::responses::{
    Attendance, CurrentUser, Employee, Envelope, Job, MutationResponse,
    Notification, PublicContractLink, StatusColumn,
};
use crate::{ContractId, NotificationId, Resource};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        tracing::debug!(method = method.as_str(), path, "api request");
        let request = self.inner_client.request(method, self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        self.request(reqwest::Method::GET, path).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        self.request(reqwest::Method::POST, path).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.request(reqwest::Method::DELETE, path).send().await
    }
}

/// Generic operations shared by every [`Resource`].
impl APIClient {
    /// Fetch a list. `key` is the resource path, optionally with a query
    /// string, as produced by [`crate::query::list_key`].
    pub async fn list<R: Resource>(
        &self,
        key: &str,
    ) -> Result<Vec<R>, ClientError> {
        let response = self.get(key).await?;
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take(R::PLURAL)?.unwrap_or_default())
    }

    pub async fn detail<R: Resource>(
        &self,
        id: R::Id,
    ) -> Result<R, ClientError> {
        let response = self.get(&R::detail_path(id)).await?;
        let mut envelope = ok_envelope(response).await?;
        envelope
            .take(R::SINGULAR)?
            .ok_or(ClientError::MissingRecord(R::SINGULAR))
    }

    pub async fn create<R: Resource>(
        &self,
        form: &R::Create,
    ) -> Result<MutationResponse<R>, ClientError> {
        let response = self.post(R::PATH, form).await?;
        ok_mutation(response, R::SINGULAR, R::PLURAL).await
    }

    pub async fn update<R: Resource>(
        &self,
        id: R::Id,
        form: &R::Update,
    ) -> Result<MutationResponse<R>, ClientError> {
        let response = self.put(&R::detail_path(id), form).await?;
        ok_mutation(response, R::SINGULAR, R::PLURAL).await
    }

    pub async fn delete_one<R: Resource>(
        &self,
        id: R::Id,
    ) -> Result<MutationResponse<R>, ClientError> {
        let response = self.delete(&R::detail_path(id)).await?;
        ok_mutation(response, R::SINGULAR, R::PLURAL).await
    }

    /// Delete several records in one call. The ids are sent under the
    /// resource's plural key.
    pub async fn delete_many<R: Resource>(
        &self,
        ids: &[R::Id],
    ) -> Result<MutationResponse<R>, ClientError> {
        let body = bulk_body(R::PLURAL, ids)?;
        let response =
            self.post(&format!("{}/delete-many", R::PATH), &body).await?;
        ok_mutation(response, R::SINGULAR, R::PLURAL).await
    }

    /// Bulk-create records from parsed CSV rows.
    pub async fn import_csv<R: Resource>(
        &self,
        rows: &[ImportRow],
    ) -> Result<MutationResponse<R>, ClientError> {
        let body = bulk_body(R::PLURAL, rows)?;
        let response = self.post(&format!("{}/csv", R::PATH), &body).await?;
        ok_mutation(response, R::SINGULAR, R::PLURAL).await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.get("health_check").await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::APIError(status, response.text().await?));
        }
        Ok(())
    }

    /// Log in. The backend sets the session cookie on success.
    pub async fn login(
        &self,
        details: &LoginCredentials,
    ) -> Result<MutationResponse<CurrentUser>, ClientError> {
        let response = self.post("auth/login", details).await?;
        ok_mutation(response, "user", "users").await
    }

    pub async fn logout(&self) -> Result<String, ClientError> {
        let response = self.empty_post("auth/logout").await?;
        Ok(ok_envelope(response).await?.message)
    }

    /// The logged in account, or `None` without a valid session.
    pub async fn current_user(
        &self,
    ) -> Result<Option<CurrentUser>, ClientError> {
        let response = self.get("auth/me").await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take("user")?)
    }

    pub async fn change_role(
        &self,
        details: &ChangeRole,
    ) -> Result<MutationResponse<Employee>, ClientError> {
        let response = self.put("employees/role", details).await?;
        ok_mutation(response, Employee::SINGULAR, Employee::PLURAL).await
    }

    /// Create a token that lets someone outside the app view and sign a
    /// contract.
    pub async fn public_contract_link(
        &self,
        contract_id: ContractId,
    ) -> Result<PublicContractLink, ClientError> {
        let response = self
            .empty_post(&format!("contracts/{contract_id}/public-link"))
            .await?;
        let mut envelope = ok_envelope(response).await?;
        let token: String = envelope
            .take("token")?
            .ok_or(ClientError::MissingRecord("token"))?;
        Ok(PublicContractLink { token })
    }

    pub async fn notifications_by_current_user(
        &self,
    ) -> Result<Vec<Notification>, ClientError> {
        let response = self.get("notifications/current-user").await?;
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take("notifications")?.unwrap_or_default())
    }

    pub async fn delete_notification(
        &self,
        id: NotificationId,
    ) -> Result<MutationResponse<Notification>, ClientError> {
        let response = self.delete(&format!("notifications/{id}")).await?;
        ok_mutation(response, "notification", "notifications").await
    }

    /// Attendance rows for a query built with [`crate::query::list_key`]
    /// on `attendances`.
    pub async fn attendances(
        &self,
        key: &str,
    ) -> Result<Vec<Attendance>, ClientError> {
        let response = self.get(key).await?;
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take("attendances")?.unwrap_or_default())
    }

    /// Board columns a task can be placed in.
    pub async fn status_columns(&self) -> Result<Vec<StatusColumn>, ClientError> {
        let response = self.get("status-columns").await?;
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take("statusColumns")?.unwrap_or_default())
    }

    /// Openings job applications can point at.
    pub async fn jobs(&self) -> Result<Vec<Job>, ClientError> {
        let response = self.get("jobs").await?;
        let mut envelope = ok_envelope(response).await?;
        Ok(envelope.take("jobs")?.unwrap_or_default())
    }

    pub async fn check_attendance(
        &self,
        details: &CheckAttendance,
    ) -> Result<MutationResponse<Attendance>, ClientError> {
        let response = self.post("attendances", details).await?;
        ok_mutation(response, "attendance", "attendances").await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// The request went through but the server sent nothing back.
    #[error("The server sent an empty response")]
    EmptyResponse,
    /// The envelope came back with `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("Unexpected response from the server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("The response did not include the {0}")]
    MissingRecord(&'static str),
}

fn bulk_body<T: Serialize>(
    key: &str,
    items: &[T],
) -> Result<Map<String, Value>, ClientError> {
    let mut body = Map::new();
    body.insert(key.to_string(), serde_json::to_value(items)?);
    Ok(body)
}

/// Read the response envelope, turning every kind of failure into a
/// [`ClientError`].
pub async fn ok_envelope(
    response: reqwest::Response,
) -> Result<Envelope, ClientError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        // error bodies are usually envelopes too; prefer their message
        let message = serde_json::from_str::<Envelope>(&text)
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or(text);
        tracing::warn!(%status, %message, "api request failed");
        return Err(ClientError::APIError(status, message));
    }
    if text.trim().is_empty() {
        tracing::warn!(%status, "api returned an empty body");
        return Err(ClientError::EmptyResponse);
    }
    let envelope: Envelope = serde_json::from_str(&text)?;
    if !envelope.success {
        tracing::warn!(message = %envelope.message, "api rejected request");
        return Err(ClientError::Rejected(envelope.message));
    }
    Ok(envelope)
}

/// Decode a write response whose payload sits under `singular` or
/// `plural`.
pub async fn ok_mutation<T: DeserializeOwned>(
    response: reqwest::Response,
    singular: &str,
    plural: &str,
) -> Result<MutationResponse<T>, ClientError> {
    let mut envelope = ok_envelope(response).await?;
    Ok(MutationResponse {
        code: envelope.code,
        record: envelope.take(singular)?,
        records: envelope.take(plural)?,
        message: envelope.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::Department;

    fn response(status: u16, body: &str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn empty_success_body_is_an_error() {
        let result = ok_envelope(response(200, "")).await;
        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_rejected() {
        let body = r#"{"code":200,"success":false,"message":"Quota reached"}"#;
        match ok_envelope(response(200, body)).await {
            Err(ClientError::Rejected(message)) => {
                assert_eq!(message, "Quota reached")
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_envelope_message_is_preferred() {
        let body = r#"{"code":404,"success":false,"message":"No such leave"}"#;
        match ok_envelope(response(404, body)).await {
            Err(ClientError::APIError(status, message)) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "No such leave");
            }
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_error_text_is_kept() {
        match ok_envelope(response(502, "Bad gateway")).await {
            Err(ClientError::APIError(_, message)) => {
                assert_eq!(message, "Bad gateway")
            }
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn mutation_reads_the_singular_key() {
        let body = r#"{
            "code": 201,
            "success": true,
            "message": "Department created successfully",
            "department": {"id": 4, "name": "Ops"}
        }"#;
        let mutation: MutationResponse<Department> =
            ok_mutation(response(201, body), "department", "departments")
                .await
                .unwrap();
        assert_eq!(mutation.code, 201);
        assert_eq!(mutation.record.unwrap().name, "Ops");
        assert!(mutation.records.is_none());
    }

    #[test]
    fn bulk_bodies_use_the_plural_key() {
        let body = bulk_body("leaveTypes", &[1, 2]).unwrap();
        assert_eq!(serde_json::Value::Object(body).to_string(), r#"{"leaveTypes":[1,2]}"#);
    }
}
