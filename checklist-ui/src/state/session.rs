//! Browser Storage
//!
//! Thin wrapper over `window.localStorage`. The only thing persisted is the
//! bearer token; a browser without storage behaves as logged out.

/// Storage slot holding the bearer token
pub const TOKEN_KEY: &str = "token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn read_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn write_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if let Err(e) = storage.set_item(key, value) {
            web_sys::console::error_2(&format!("Failed to store {}", key).into(), &e);
        }
    }
}

pub fn delete_item(key: &str) {
    if let Some(storage) = local_storage() {
        if let Err(e) = storage.remove_item(key) {
            web_sys::console::error_2(&format!("Failed to remove {}", key).into(), &e);
        }
    }
}

pub fn read_token() -> Option<String> {
    read_item(TOKEN_KEY)
}

pub fn store_token(token: &str) {
    write_item(TOKEN_KEY, token);
}

pub fn clear_token() {
    delete_item(TOKEN_KEY);
}

/// Token presence check; validity is left to the backend
pub fn is_authenticated() -> bool {
    read_token().is_some()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_slot_roundtrip() {
        clear_token();
        assert!(!is_authenticated());

        store_token("abc");
        assert_eq!(read_token().as_deref(), Some("abc"));
        assert!(is_authenticated());

        clear_token();
        clear_token();
        assert_eq!(read_token(), None);
    }
}
