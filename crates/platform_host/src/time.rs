//! Time helpers shared across host contracts and apps.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Formats a unix millisecond timestamp as a UTC `HH:MM:SS` clock string.
pub fn clock_time_label(unix_ms: u64) -> String {
    let seconds_of_day = (unix_ms / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        seconds_of_day / 3600,
        (seconds_of_day / 60) % 60,
        seconds_of_day % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_label_wraps_at_midnight() {
        assert_eq!(clock_time_label(0), "00:00:00");
        assert_eq!(clock_time_label((13 * 3600 + 5 * 60 + 9) * 1000), "13:05:09");
        assert_eq!(clock_time_label(86_400_000 + 61_000), "00:01:01");
    }
}
