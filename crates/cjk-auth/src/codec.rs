//! Access token claim decoding.
//!
//! Claims are read without verifying the signature. The result is only used to
//! estimate expiry locally; the server remains the authority on validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};

/// Decoded claims segment of an access token.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Expiry as seconds since the epoch, when present and numeric.
    pub exp: Option<i64>,
    /// Every claim as parsed.
    pub raw: Map<String, Value>,
}

/// Decode the claims of `access`. Returns `None` on any malformed input.
pub fn decode(access: &str) -> Option<Claims> {
    let mut segments = access.split('.');
    let (_, payload, _) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let raw = match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(map) => map,
        _ => return None,
    };
    let exp = raw
        .get("exp")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(|v| v.floor() as i64);

    Some(Claims { exp, raw })
}

/// Whether `access` counts as expired at `now`, with `skew_secs` of margin.
///
/// Tokens without a readable `exp` claim are treated as valid.
pub fn is_expired_at(access: &str, skew_secs: i64, now: i64) -> bool {
    match decode(access).and_then(|c| c.exp) {
        Some(exp) => now >= exp.saturating_sub(skew_secs),
        None => false,
    }
}

/// [`is_expired_at`] against a clock.
pub fn is_expired_with(access: &str, skew_secs: i64, clock: &impl Clock) -> bool {
    is_expired_at(access, skew_secs, clock.now_unix())
}

/// [`is_expired_at`] against the wall clock.
pub fn is_expired(access: &str, skew_secs: i64) -> bool {
    is_expired_with(access, skew_secs, &SystemClock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(claims: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn decodes_exp_claim() {
        let claims = decode(&token(r#"{"exp":1700000000,"user_id":3}"#)).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.raw.get("user_id"), Some(&Value::from(3)));
    }

    #[test]
    fn fractional_exp_is_floored() {
        let claims = decode(&token(r#"{"exp":1700000000.9}"#)).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn padded_segment_is_accepted() {
        let padded = format!("h.{}==.s", URL_SAFE_NO_PAD.encode(r#"{"exp":5}"#));
        assert_eq!(decode(&padded).and_then(|c| c.exp), Some(5));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(decode("only.two").is_none());
        assert!(decode("a.b.c.d").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn rejects_non_object_claims() {
        assert!(decode(&token("[1,2,3]")).is_none());
        assert!(decode(&token("not json")).is_none());
    }

    #[test]
    fn missing_exp_is_not_expired() {
        assert!(!is_expired_at(&token(r#"{"sub":"x"}"#), 30, i64::MAX));
        assert!(!is_expired_at(&token(r#"{"exp":"soon"}"#), 30, i64::MAX));
    }

    #[test]
    fn boundary_is_inclusive() {
        let access = token(r#"{"exp":1000}"#);
        assert!(is_expired_at(&access, 30, 970));
        assert!(!is_expired_at(&access, 30, 969));
    }
}
