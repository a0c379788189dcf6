
// Imports
// -------
//
// ### Standard library
use std::cell::RefCell;
use std::sync::{Mutex, Once};
use std::time::SystemTime;

// ### Third-party
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};

// ### Local
use crate::formatting::safe_format;

// Data structures
// ---------------
//
/// One console severity stream. `Debug` and `Trace` records share the
/// catch-all `Log` channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Error,
    Warn,
    Info,
    Log,
}

impl Channel {
    fn from_level(level: Level) -> Self {
        match level {
            Level::Error => Self::Error,
            Level::Warn => Self::Warn,
            Level::Info => Self::Info,
            Level::Debug | Level::Trace => Self::Log,
        }
    }
}

/// A single intercepted console call.
#[derive(Clone, Debug)]
pub struct CapturedMessage {
    pub channel: Channel,
    /// All arguments of the call, flattened to one string.
    pub text: String,
    /// When the call was intercepted. Useful when diagnosing ordering.
    pub timestamp: SystemTime,
}

/// What an open monitoring window does with each intercepted record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
    /// Record the message; nothing reaches the pass-through sink.
    #[default]
    Swallow,
    /// Record the message, then forward it to the pass-through sink.
    Forward,
}

// The monitoring window owned by one test thread.
#[derive(Default)]
struct MonitorState {
    active: bool,
    mode: CaptureMode,
    captured: Vec<CapturedMessage>,
}

// Globals
// -------
//
// Monitoring state is kept per thread: the test runner gives every test its
// own thread, which keeps concurrently-running tests' windows separate.
thread_local! {
    static MONITOR_STATE: RefCell<MonitorState> = RefCell::new(MonitorState::default());
}

lazy_static! {
    // Where records go while no window is active on the logging thread (and,
    // in `Forward` mode, while one is). `None` selects the built-in stderr
    // writer.
    static ref FORWARD_SINK: Mutex<Option<Box<dyn Log>>> = Mutex::new(None);
}

// The global logger can only be installed once per process.
static INSTALL_INTERCEPTOR: Once = Once::new();

static INTERCEPTOR: ConsoleInterceptor = ConsoleInterceptor {};

// The interceptor
// ---------------
struct ConsoleInterceptor {}

impl Log for ConsoleInterceptor {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        // Capture all levels; filtering happens at query time.
        true
    }

    fn log(&self, record: &Record) {
        let (capture, forward) = MONITOR_STATE.with(|state| {
            let state = state.borrow();
            if state.active {
                (true, state.mode == CaptureMode::Forward)
            } else {
                (false, true)
            }
        });
        // Render outside the borrow: formatting runs arbitrary code under
        // test, which may itself log.
        if capture {
            let message = CapturedMessage {
                channel: Channel::from_level(record.level()),
                text: safe_format(record.args()),
                timestamp: SystemTime::now(),
            };
            MONITOR_STATE.with(|state| state.borrow_mut().captured.push(message));
        }
        if forward {
            forward_record(record);
        }
    }

    fn flush(&self) {}
}

fn forward_record(record: &Record) {
    match &*FORWARD_SINK.lock().unwrap() {
        Some(sink) => sink.log(record),
        // Match what an unmonitored test process prints.
        None => eprintln!("{}: {}", record.level(), safe_format(record.args())),
    }
}

// Lifecycle
// ---------
//
/// Open a monitoring window in the default `Swallow` mode.
pub fn start_console_monitoring() {
    start_console_monitoring_with(CaptureMode::default());
}

/// Open a monitoring window on the calling thread. While the window is open,
/// every `log` call made on this thread is recorded. A second call without an
/// intervening stop is a no-op: the window stays open and nothing already
/// captured is lost.
pub fn start_console_monitoring_with(mode: CaptureMode) {
    INSTALL_INTERCEPTOR.call_once(|| {
        // A competing global logger means nothing would ever be captured;
        // fail the test run immediately rather than asserting on thin air.
        log::set_logger(&INTERCEPTOR)
            .map(|()| log::set_max_level(LevelFilter::Trace))
            .unwrap();
    });
    MONITOR_STATE.with(|state| {
        let mut state = state.borrow_mut();
        if state.active {
            return;
        }
        // Discard leftovers from a window that was never stopped.
        state.captured.clear();
        state.active = true;
        state.mode = mode;
    });
}

/// Close the monitoring window. Records pass through to the sink again, as
/// they did before the window opened. Captured messages stay queryable until
/// the next start. Safe to call when no window is open.
pub fn stop_console_monitoring() {
    MONITOR_STATE.with(|state| {
        state.borrow_mut().active = false;
    });
}

/// Replace the pass-through sink that receives records while no window is
/// active. Suites that configure a real appender stack point this at it; the
/// default writes `LEVEL: message` lines to stderr.
pub fn set_forward_logger(sink: Box<dyn Log>) {
    *FORWARD_SINK.lock().unwrap() = Some(sink);
}

// Queries
// -------
//
/// Handle for querying the calling thread's capture log. Usable at any point
/// in the window lifecycle; before the first start, all collections are
/// empty.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleMonitor {}

pub fn get_console_monitor() -> ConsoleMonitor {
    ConsoleMonitor {}
}

impl ConsoleMonitor {
    /// Texts captured on the given channel, in call order.
    pub fn messages_for(&self, channel: Channel) -> Vec<String> {
        MONITOR_STATE.with(|state| {
            state
                .borrow()
                .captured
                .iter()
                .filter(|message| message.channel == channel)
                .map(|message| message.text.clone())
                .collect()
        })
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.messages_for(Channel::Error)
    }

    pub fn warn_messages(&self) -> Vec<String> {
        self.messages_for(Channel::Warn)
    }

    /// Every captured message, all channels interleaved in call order.
    pub fn all_messages(&self) -> Vec<CapturedMessage> {
        MONITOR_STATE.with(|state| state.borrow().captured.clone())
    }

    /// Empty the capture log without touching the window state.
    pub fn clear(&self) {
        MONITOR_STATE.with(|state| state.borrow_mut().captured.clear());
    }

    /// True while a monitoring window is open on this thread.
    pub fn is_active(&self) -> bool {
        MONITOR_STATE.with(|state| state.borrow().active)
    }
}

// Scoped monitoring
// -----------------
//
/// Keeps a monitoring window open for a lexical scope. Dropping the guard
/// stops monitoring, so a test that panics mid-window cannot leave the thread
/// capturing.
pub struct MonitoringWindow {
    monitor: ConsoleMonitor,
}

/// Open a window in `Swallow` mode, closed again when the guard drops.
pub fn monitor_console() -> MonitoringWindow {
    monitor_console_with(CaptureMode::default())
}

pub fn monitor_console_with(mode: CaptureMode) -> MonitoringWindow {
    start_console_monitoring_with(mode);
    MonitoringWindow {
        monitor: get_console_monitor(),
    }
}

impl MonitoringWindow {
    pub fn monitor(&self) -> ConsoleMonitor {
        self.monitor
    }
}

impl Drop for MonitoringWindow {
    fn drop(&mut self) {
        stop_console_monitoring();
    }
}
