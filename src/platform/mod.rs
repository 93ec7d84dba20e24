//! Platform abstraction layer
//!
//! Only time differs between browser and native: the simulation takes
//! milliseconds from a monotonic origin and never reads a clock itself.

/// Milliseconds since the first call in this process
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_millis() as u64
}

/// Milliseconds since page load (`performance.now()`)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() as u64)
        .unwrap_or_else(|| js_sys::Date::now() as u64)
}
