use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{cell::RefCell, sync::Once};

///
/// CaptureLogger
///
/// Process-wide logger that records into a per-thread buffer, so parallel
/// tests only ever see their own records.
///

struct CaptureLogger;

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(buf) = captured.borrow_mut().as_mut() {
                buf.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its result with every record logged on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let out = f();
    let logs = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());

    (out, logs)
}

/// Number of records at exactly `level`.
pub fn count_level(logs: &[(Level, String)], level: Level) -> usize {
    logs.iter().filter(|(l, _)| *l == level).count()
}
