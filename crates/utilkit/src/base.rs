//! Byte-size formatting, sleeping and simple timing.

use std::time::{Duration, Instant};

const SIZE_UNITS: [&str; 8] = ["KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count in powers of 1000, rounded to a whole number.
///
/// # Examples
///
/// ```
/// use utilkit::base::bytes_to_size;
///
/// assert_eq!(bytes_to_size(0), "0");
/// assert_eq!(bytes_to_size(512), "512");
/// assert_eq!(bytes_to_size(1024), "1 KB");
/// assert_eq!(bytes_to_size(1536), "2 KB");
/// assert_eq!(bytes_to_size(1_000_000), "1 MB");
/// ```
pub fn bytes_to_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }
    let mut exponent = 0usize;
    let mut scale = 1u64;
    while exponent < SIZE_UNITS.len() {
        match scale.checked_mul(1000) {
            Some(next) if next <= bytes => {
                scale = next;
                exponent += 1;
            }
            _ => break,
        }
    }
    let value = (bytes as f64 / scale as f64).round();
    if exponent == 0 {
        format!("{value}")
    } else {
        format!("{value} {}", SIZE_UNITS[exponent - 1])
    }
}

/// Sleep for `ms` milliseconds.
pub async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Start a timer for [`perf_stop`].
pub fn perf_start() -> Instant {
    Instant::now()
}

/// Report the time elapsed since `start` as `"Function took X.XX seconds"`.
///
/// The message is also logged at `info` level.
pub fn perf_stop(start: Instant) -> String {
    let message = format!("Function took {:.2} seconds", start.elapsed().as_secs_f64());
    tracing::info!("{message}");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_size_units() {
        assert_eq!(bytes_to_size(999), "999");
        assert_eq!(bytes_to_size(1000), "1 KB");
        assert_eq!(bytes_to_size(1500), "2 KB");
        assert_eq!(bytes_to_size(2_500_000_000), "3 GB");
        assert_eq!(bytes_to_size(u64::MAX), "18 EB");
    }

    #[test]
    fn test_perf_stop_format() {
        let start = perf_start();
        let message = perf_stop(start);
        assert!(message.starts_with("Function took 0."));
        assert!(message.ends_with(" seconds"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_advances_clock() {
        let before = tokio::time::Instant::now();
        wait(1500).await;
        assert!(before.elapsed() >= Duration::from_millis(1500));
    }
}
