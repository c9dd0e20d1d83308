//! Ticking local-time display for the current city.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_secs(1);

/// `hh:mm AM` in the given UTC offset.
pub fn format_local(ts: DateTime<Utc>, offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or_else(|| Utc.fix());
    ts.with_timezone(&offset).format("%I:%M %p").to_string()
}

/// Clock line as displayed, e.g. `Local Time: 03:04 PM`.
pub fn local_time_label(now: DateTime<Utc>, offset_secs: i32) -> String {
    format!("Local Time: {}", format_local(now, offset_secs))
}

/// Format epoch seconds (sunrise, sunset) in the city's offset.
pub fn format_epoch_local(epoch_secs: i64, offset_secs: i32) -> String {
    let ts = DateTime::<Utc>::from_timestamp(epoch_secs, 0).unwrap_or_default();
    format_local(ts, offset_secs)
}

struct TickerGuard(Arc<AtomicUsize>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owner of the single repeating clock task.
///
/// Starting the clock aborts any ticker already running, so at most one is
/// alive once the runtime has dropped the aborted task.
#[derive(Debug, Default)]
pub struct LocalClock {
    handle: Option<JoinHandle<()>>,
    live: Arc<AtomicUsize>,
}

impl LocalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the local time for `offset_secs` now, then once per second.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, offset_secs: i32, sink: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.stop();

        self.live.fetch_add(1, Ordering::SeqCst);
        let guard = TickerGuard(Arc::clone(&self.live));

        self.handle = Some(tokio::spawn(async move {
            let _guard = guard;
            let mut interval = tokio::time::interval(TICK);
            loop {
                // The first tick completes immediately.
                interval.tick().await;
                sink(local_time_label(Utc::now(), offset_secs));
            }
        }));

        tracing::debug!(offset_secs, "local clock started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Number of ticker tasks not yet torn down by the runtime.
    pub fn active_tickers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl Drop for LocalClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[test]
    fn formats_with_city_offset() {
        let noon_utc = Utc.with_ymd_and_hms(2024, 1, 1, 12, 5, 0).unwrap();
        assert_eq!(local_time_label(noon_utc, 0), "Local Time: 12:05 PM");
        assert_eq!(local_time_label(noon_utc, 3 * 3600), "Local Time: 03:05 PM");
        assert_eq!(local_time_label(noon_utc, -5 * 3600), "Local Time: 07:05 AM");
        assert_eq!(local_time_label(noon_utc, 5 * 3600 + 1800), "Local Time: 05:35 PM");
    }

    #[test]
    fn formats_sunrise_epoch() {
        // 2024-01-01 08:06 UTC
        assert_eq!(format_epoch_local(1_704_096_360, 0), "08:06 AM");
        assert_eq!(format_epoch_local(1_704_096_360, 3600), "09:06 AM");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_local(ts, 999_999), "12:00 PM");
    }

    #[tokio::test]
    async fn start_publishes_immediately() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut clock = LocalClock::new();
        clock.start(0, move |text| sink.lock().unwrap().push(text));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen[0].starts_with("Local Time: "));
        assert!(clock.is_running());
    }

    #[tokio::test]
    async fn restarting_leaves_one_ticker() {
        let mut clock = LocalClock::new();
        clock.start(0, |_| {});
        clock.start(3600, |_| {});

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(clock.active_tickers(), 1);
        assert!(clock.is_running());
    }

    #[tokio::test]
    async fn stop_tears_down_the_ticker() {
        let mut clock = LocalClock::new();
        clock.start(0, |_| {});
        clock.stop();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(clock.active_tickers(), 0);
        assert!(!clock.is_running());
    }
}
