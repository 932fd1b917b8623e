pub mod auth;
pub mod collections;
pub mod special;

use actix_web::http::StatusCode;
use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};
use payloads::claims::{self, AUTH_COOKIE, Claims};
use payloads::responses::Envelope;
use serde_json::{Map, Value};

use crate::store::{Account, Store, StoreError};

/// Fixed routes come before the collection routes so their paths aren't
/// read as collection names or ids.
pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(auth::login)
        .service(auth::me)
        .service(auth::logout)
        .service(special::change_role)
        .service(special::public_contract_link)
        .service(special::current_user_notifications)
        .service(collections::delete_many)
        .service(collections::import_csv)
        .service(collections::list)
        .service(collections::create)
        .service(collections::detail)
        .service(collections::update)
        .service(collections::delete)
        .service(collections::children)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl APIError {
    /// Text for the envelope. Internal failures don't leak their cause.
    fn message(&self) -> String {
        match self {
            Self::AuthError(e) | Self::BadRequest(e) | Self::NotFound(e) => {
                e.to_string()
            }
            Self::UnexpectedError(_) => self.to_string(),
        }
    }
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let Self::UnexpectedError(e) = self {
            crate::telemetry::log_error(anyhow::anyhow!("{e:#}"));
        }
        let status = self.status_code();
        HttpResponse::build(status).json(Envelope {
            code: status.as_u16(),
            success: false,
            message: self.message(),
            payload: Map::new(),
        })
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownCollection(_) | StoreError::NotFound(_) => {
                APIError::NotFound(e.into())
            }
            StoreError::InvalidCredentials | StoreError::LoginDisabled => {
                APIError::AuthError(e.into())
            }
            StoreError::Invalid(_) => APIError::BadRequest(e.into()),
            StoreError::Poisoned => APIError::UnexpectedError(e.into()),
        }
    }
}

/// A successful envelope carrying `payload`.
fn respond<'a>(
    status: StatusCode,
    message: impl Into<String>,
    payload: impl IntoIterator<Item = (&'a str, Value)>,
) -> HttpResponse {
    HttpResponse::build(status).json(Envelope {
        code: status.as_u16(),
        success: true,
        message: message.into(),
        payload: payload
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    })
}

/// The account behind the session cookie.
fn get_account(
    request: &HttpRequest,
    store: &Store,
) -> Result<(Claims, Account), APIError> {
    let cookie = request.cookie(AUTH_COOKIE).ok_or_else(|| {
        APIError::AuthError(anyhow::anyhow!("You are not logged in"))
    })?;
    let claims = claims::decode_unverified(cookie.value())
        .map_err(|e| APIError::AuthError(e.into()))?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(claims.user_id));
    let account = store.account(claims.user_id)?;
    Ok((claims, account))
}
