//! Unverified decoding of session JWT claims.
//!
//! The client only needs the expiry to decide whether a stored token is
//! still usable. Signatures are checked by the server, never here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

use super::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl TokenClaims {
    /// Decode the payload segment of a three-part `header.payload.signature`
    /// token.
    pub fn decode(token: &str) -> Result<Self, SessionError> {
        // Sent verbatim in the Authorization header
        if let Some(c) = token.chars().find(|c| !c.is_ascii_graphic()) {
            return Err(SessionError::Malformed(format!(
                "token contains invalid character {:?}",
                c
            )));
        }

        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(SessionError::Malformed(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1].trim_end_matches('='))
            .map_err(|e| SessionError::Malformed(format!("payload is not base64url: {}", e)))?;
        let payload: Value = serde_json::from_slice(&payload)
            .map_err(|e| SessionError::Malformed(format!("payload is not JSON: {}", e)))?;

        Self::from_payload(&payload)
    }

    fn from_payload(payload: &Value) -> Result<Self, SessionError> {
        let exp = payload
            .get("exp")
            .and_then(numeric_date)
            .ok_or_else(|| SessionError::Malformed("missing exp claim".to_string()))?;

        let text = |key: &str| payload.get(key).and_then(Value::as_str).map(String::from);

        Ok(Self {
            exp,
            iat: payload.get("iat").and_then(numeric_date),
            sub: payload.get("sub").and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            email: text("email"),
            role: text("role"),
        })
    }

    /// True when `exp` is at or before `now` (seconds since epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Seconds remaining before expiry, clamped at zero.
    pub fn seconds_until_expiry(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}

// NumericDate may legally carry a fractional part
fn numeric_date(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
}
