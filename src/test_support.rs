#![cfg(test)]

// Thread-local log capture for asserting on `log` output in unit tests.
// The process-wide logger is installed once; records only land in the sink of
// the thread that is currently capturing.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static TL_SINK: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        TL_SINK.with(|s| {
            if let Some(buf) = s.borrow_mut().as_mut() {
                buf.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Run `f` and return every record it logged on this thread.
pub fn capture_logs<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    f();
    TL_SINK.with(|s| s.borrow_mut().take().unwrap_or_default())
}

mod tests {
    use super::*;

    #[test]
    fn captures_only_current_thread() {
        let logs = capture_logs(|| {
            log::warn!("main-thread");
            std::thread::spawn(|| log::warn!("child-thread")).join().unwrap();
        });
        assert_eq!(logs, vec![(Level::Warn, "main-thread".to_string())]);
    }

    #[test]
    fn nothing_captured_outside_closure() {
        log::warn!("before");
        let logs = capture_logs(|| {});
        assert!(logs.is_empty());
    }
}
