//! Bearer token payload decoding.
//!
//! Tokens are three dot-separated base64url segments; only the middle
//! (claims) segment is read. The signature is never checked: the API is the
//! trusted issuer and re-validates every authenticated call.

use super::{SessionError, SessionResult};
use crate::model::portfolio::RecordId;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Identity carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: RecordId,
    pub username: String,
}

/// Decodes the identity claims of `token`.
///
/// # Errors
/// - `SessionError::InvalidToken` when the token is not three segments,
///   the claims segment is not base64url, or the claims lack
///   `user_id`/`username`.
pub fn decode_identity(token: &str) -> SessionResult<Identity> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(SessionError::InvalidToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(claims.trim_end_matches('='))
        .map_err(|err| SessionError::InvalidToken(format!("claims are not base64url: {err}")))?;
    let identity: Identity = serde_json::from_slice(&bytes)
        .map_err(|err| SessionError::InvalidToken(format!("claims are malformed: {err}")))?;

    if identity.username.trim().is_empty() {
        return Err(SessionError::InvalidToken(
            "claims carry an empty username".to_string(),
        ));
    }
    Ok(identity)
}

#[cfg(test)]
pub(crate) fn fake_token(user_id: RecordId, username: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(
        format!(r#"{{"user_id":{user_id},"username":"{username}","exp":4102444800}}"#).as_bytes(),
    );
    format!("{header}.{claims}.signature")
}
