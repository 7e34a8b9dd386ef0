/// Milliseconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Milliseconds since the UNIX epoch
#[cfg(target_arch = "wasm32")]
pub fn timestamp_millis() -> u64 {
    js_sys::Date::now() as u64
}
