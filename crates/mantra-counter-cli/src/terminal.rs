//! Terminal rendering of counter state and notifications.

use std::io::Write;
use std::time::Duration;

use mantra_counter::{Alert, CounterState, EditMode, Notifier};
use serde::Serialize;

/// Notifier that rings the terminal bell and prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn vibrate(&self, duration: Duration) {
        tracing::debug!(duration_ms = duration.as_millis() as u64, "bell");
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }

    fn alert(&self, alert: &Alert) {
        eprintln!("*** {} ***\n{}", alert.title, alert.message);
    }
}

/// Machine-readable view of the counter.
#[derive(Debug, Serialize)]
pub struct View {
    pub count: u64,
    pub target: u64,
    pub mode: EditMode,
}

impl From<CounterState> for View {
    fn from(state: CounterState) -> Self {
        Self {
            count: state.count(),
            target: state.target().get(),
            mode: state.mode(),
        }
    }
}

/// One-line human-readable view.
pub fn render(state: &CounterState) -> String {
    let line = format!("{} / Target: {}", state.count(), state.target());
    if state.is_editing() {
        format!("{}  (editing target)", line)
    } else {
        line
    }
}
