use chrono::{DateTime, Local};

/// Seconds between `since` and now, with microsecond precision.
pub fn elapsed_secs(since: DateTime<Local>) -> f64 {
    (Local::now() - since)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}

/// Similar to `info!` macro in tracing.
/// Prints `"{now:<30} : {message}"` to stdout.
/// Pass a starting time first and the runtime since then is printed on a second line.
/// ```
/// use banks_etl::info_time;
///
/// info_time!("extracted {} rows from {}", 10, "page");
/// let start = chrono::Local::now();
/// info_time!(start, "pipeline finished");
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        println!("{:<30} : {}", ::chrono::Local::now(), format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        println!(
            "{:<30} : {}\nRUNTIME: {} sec",
            ::chrono::Local::now(),
            format!($strfm, $($arg),*),
            $crate::elapsed_secs($time)
        );
    }};
}
