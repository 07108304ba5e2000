//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, nothing on native)
//! - Wall-clock time and round seeds

/// Read a string from LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn load_item(key: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|storage| storage.get_item(key).ok())
        .flatten()
}

/// Write a string to LocalStorage. Returns false when storage is unavailable.
#[cfg(target_arch = "wasm32")]
pub fn save_item(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => {
            log::warn!("LocalStorage unavailable, '{}' not saved", key);
            false
        }
    }
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_item(_key: &str, _value: &str) -> bool {
    // No-op for native
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new round
pub fn round_seed() -> u64 {
    now_ms() as u64
}
