use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

/// Unsigned JWT-shaped token carrying `claims`.
pub fn mint_token_with_claims(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Access token expiring at `exp`. Distinct `exp` values give distinct tokens.
pub fn mint_access_token(exp: i64) -> String {
    mint_token_with_claims(&json!({ "token_type": "access", "exp": exp, "user_id": 1 }))
}

/// Body of a token endpoint response.
pub fn token_response(access: &str, refresh: Option<&str>) -> String {
    match refresh {
        Some(refresh) => json!({ "access": access, "refresh": refresh }).to_string(),
        None => json!({ "access": access }).to_string(),
    }
}

/// Member profile as `/api/members/me/` returns it.
pub fn member_json(staff: bool, superuser: bool) -> Value {
    json!({
        "id": 42,
        "username": "awa.diallo",
        "email": "awa@example.org",
        "first_name": "Awa",
        "last_name": "Diallo",
        "phone": "+221770000000",
        "quartier": "Medina",
        "date_naissance": "2001-04-12",
        "photo": null,
        "date_inscription": "2024-09-01T10:00:00Z",
        "is_active_member": true,
        "is_staff": staff,
        "is_superuser": superuser
    })
}
