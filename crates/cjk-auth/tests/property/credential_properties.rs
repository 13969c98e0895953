use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cjk_auth::codec::{decode, is_expired_at};
use cjk_auth::{FileTokenStore, MemoryTokenStore, TokenStore};
use cjk_core::models::CredentialPair;
use proptest::prelude::*;

fn token_with_exp(exp: i64) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.sig",
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#))
    )
}

proptest! {
    #[test]
    fn memory_store_round_trips(access in ".{0,64}", refresh in ".{0,64}") {
        let store = MemoryTokenStore::new();
        let pair = CredentialPair::new(access, refresh);
        store.save(&pair).unwrap();
        prop_assert_eq!(store.get(), Some(pair));
    }

    #[test]
    fn file_store_round_trips(access in ".{0,64}", refresh in ".{0,64}") {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path(), "cjk_auth_tokens");
        let pair = CredentialPair::new(access, refresh);
        store.save(&pair).unwrap();
        prop_assert_eq!(store.get(), Some(pair));
    }

    #[test]
    fn clear_leaves_nothing(access in "[a-z0-9.]{1,40}", refresh in "[a-z0-9.]{1,40}") {
        let dir = tempfile::tempdir().unwrap();
        let file = FileTokenStore::new(dir.path(), "k");
        let memory = MemoryTokenStore::new();
        let pair = CredentialPair::new(access, refresh);

        for store in [&file as &dyn TokenStore, &memory as &dyn TokenStore] {
            store.save(&pair).unwrap();
            store.clear().unwrap();
            prop_assert!(store.get().is_none());
        }
    }

    #[test]
    fn non_three_segment_strings_fail_open(s in "[^.]{0,40}(\\.[^.]{0,40})?", now in 0i64..4_000_000_000) {
        prop_assert!(decode(&s).is_none());
        prop_assert!(!is_expired_at(&s, 30, now));
    }

    #[test]
    fn malformed_claims_fail_open(head in "[A-Za-z0-9_-]{0,20}", body in "[!-~]{0,40}", now in 0i64..4_000_000_000) {
        let token = format!("{head}.{body}.sig");
        // Whatever happens, malformed claims never count as expired.
        if decode(&token).and_then(|c| c.exp).is_none() {
            prop_assert!(!is_expired_at(&token, 30, now));
        }
    }

    #[test]
    fn expiry_boundary_follows_skew(now in 0i64..4_000_000_000, skew in 0i64..3_600) {
        prop_assert!(is_expired_at(&token_with_exp(now + skew - 1), skew, now));
        prop_assert!(is_expired_at(&token_with_exp(now + skew), skew, now));
        prop_assert!(!is_expired_at(&token_with_exp(now + skew + 1), skew, now));
    }
}

#[test]
fn thirty_second_skew_boundary() {
    let now = 1_700_000_000;
    assert!(is_expired_at(&token_with_exp(now + 29), 30, now));
    assert!(!is_expired_at(&token_with_exp(now + 31), 30, now));
}
