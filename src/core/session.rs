//! Read-only access to the persisted session.
//!
//! The login flow owns writing these keys; everything here only reads.

use serde_json::Value;

use crate::config::{ACCESS_TOKEN_KEY, BUSINESS_UNIT_KEY, SESSION_USER_KEY};
use crate::core::envelope::normalize_or;
use crate::models::SessionUser;
use crate::utils::dom;

/// Source of the current access token.
pub trait TokenReader {
    /// Returns the access token, or `None` when no usable token is stored.
    fn access_token(&self) -> Option<String>;
}

/// Token reader backed by `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokens;

impl TokenReader for LocalStorageTokens {
    fn access_token(&self) -> Option<String> {
        read_key(ACCESS_TOKEN_KEY)
    }
}

/// Currently selected business unit, if any.
pub fn business_unit_id() -> Option<String> {
    read_key(BUSINESS_UNIT_KEY)
}

/// Cached user from the last login.
///
/// The value may have been stored either bare or still wrapped in its API
/// envelope; unreadable entries are treated as absent.
pub fn stored_user() -> Option<SessionUser> {
    let raw = read_key(SESSION_USER_KEY)?;
    let value: Value = serde_json::from_str(&raw).ok()?;
    normalize_or(value, None)
}

fn read_key(key: &str) -> Option<String> {
    dom::local_storage()
        .and_then(|s| s.get_item(key).ok().flatten())
        .filter(|v| !v.is_empty())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_reads_local_storage() {
        let storage = dom::local_storage().unwrap();
        storage.set_item(ACCESS_TOKEN_KEY, "").unwrap();
        assert_eq!(LocalStorageTokens.access_token(), None);

        storage.set_item(ACCESS_TOKEN_KEY, "tok").unwrap();
        assert_eq!(LocalStorageTokens.access_token(), Some("tok".to_string()));

        storage
            .set_item(SESSION_USER_KEY, r#"{"data":{"name":"Ana"},"success":true}"#)
            .unwrap();
        assert_eq!(stored_user().and_then(|u| u.name), Some("Ana".to_string()));

        storage.set_item(SESSION_USER_KEY, "not json").unwrap();
        assert_eq!(stored_user(), None);

        storage.remove_item(ACCESS_TOKEN_KEY).unwrap();
        storage.remove_item(SESSION_USER_KEY).unwrap();
    }
}
