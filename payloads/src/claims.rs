//! Reading claims out of the session token.
//!
//! The token is issued and verified by the backend; the client only peeks at
//! its payload to learn the role for page access. No signature check happens
//! here, so nothing read from a token may be trusted for anything but UI
//! decisions.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Name of the cookie the backend stores the session token in.
pub const AUTH_COOKIE: &str = "jwt-auth-cookie";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("Token is not a JWT")]
    Malformed,
    #[error("Token payload is not valid base64")]
    Encoding(#[from] base64::DecodeError),
    #[error("Token payload could not be read")]
    Payload(#[from] serde_json::Error),
}

/// Decode the payload segment of `token` without verifying it.
pub fn decode_unverified(token: &str) -> Result<Claims, ClaimsError> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Malformed);
    };
    // some issuers pad anyway
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn reads_role_claim() {
        let token = token_with(
            r#"{"userId":7,"role":"Employee","email":"e@acme.io","iat":1}"#,
        );
        let claims = decode_unverified(&token).unwrap();
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_unverified("not-a-token"),
            Err(ClaimsError::Malformed)
        ));
        assert!(matches!(
            decode_unverified("a.%%%.c"),
            Err(ClaimsError::Encoding(_))
        ));
        let unknown_role =
            token_with(r#"{"userId":1,"role":"Owner","email":"o@acme.io"}"#);
        assert!(matches!(
            decode_unverified(&unknown_role),
            Err(ClaimsError::Payload(_))
        ));
    }
}
