use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jiff::ToSpan;
use payloads::claims::{AUTH_COOKIE, Claims};
use payloads::requests::LoginCredentials;

use crate::store::{Account, Store};

use super::{APIError, get_account, respond};

/// Sessions last a day.
const SESSION_HOURS: i64 = 24;

#[tracing::instrument(
    skip(credentials, store),
    fields(email = %credentials.email, user_id = tracing::field::Empty),
    ret
)]
#[post("/auth/login")]
pub async fn login(
    credentials: web::Json<LoginCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (account, user) =
        store.login(&credentials.email, &credentials.password)?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(account.user_id));
    let token = issue_token(&account, &store)?;
    let cookie = Cookie::build(AUTH_COOKIE, token.clone())
        .path("/")
        .same_site(SameSite::Lax)
        .finish();
    let mut response = respond(
        StatusCode::OK,
        "Logged in successfully",
        [("user", user), ("accessToken", token.into())],
    );
    response
        .add_cookie(&cookie)
        .map_err(|e| APIError::UnexpectedError(e.into()))?;
    Ok(response)
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[get("/auth/me")]
pub async fn me(
    request: HttpRequest,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (_, account) = get_account(&request, &store)?;
    let user = store.current_user(account.user_id)?;
    Ok(respond(StatusCode::OK, "", [("user", user)]))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[post("/auth/logout")]
pub async fn logout(
    request: HttpRequest,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    // to instrument the user_id, if there is one
    let _ = get_account(&request, &store);
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    let mut response = respond(
        StatusCode::OK,
        "Logged out successfully",
        std::iter::empty(),
    );
    response
        .add_cookie(&cookie)
        .map_err(|e| APIError::UnexpectedError(e.into()))?;
    Ok(response)
}

/// An unsigned token in JWT shape. Clients only ever read its payload.
fn issue_token(account: &Account, store: &Store) -> Result<String, APIError> {
    let expires = store
        .now()
        .checked_add(SESSION_HOURS.hours())
        .map_err(anyhow::Error::from)?;
    let claims = Claims {
        user_id: account.user_id,
        role: account.role,
        email: account.email.clone(),
        exp: Some(expires.as_second()),
    };
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&claims).map_err(anyhow::Error::from)?);
    Ok(format!("{header}.{payload}.unsigned"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Clock;
    use payloads::Role;
    use payloads::claims::decode_unverified;

    #[test]
    fn issued_tokens_carry_the_account() {
        let store = Store::new(Clock::Fixed("2025-01-01T00:00:00Z".parse().unwrap()));
        let account = Account {
            user_id: 5,
            collection: "employees",
            email: "boss@acme.io".into(),
            password: "secret1".into(),
            role: Role::Admin,
        };
        let token = issue_token(&account, &store).unwrap();
        let claims = decode_unverified(&token).unwrap();
        assert_eq!(claims.user_id, 5);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, Some(1_735_776_000));
    }
}
