//! Notifier trait: the platform alert and vibration surface.

use std::time::Duration;

use mantra_counter_core::Alert;

/// Receives the user-facing side effects of counter operations.
///
/// Called synchronously from the operation that produced the effect.
/// Implementations should not block.
pub trait Notifier: Send + Sync {
    /// Buzz the device.
    fn vibrate(&self, duration: Duration);

    /// Show an acknowledgment prompt.
    fn alert(&self, alert: &Alert);
}

/// Notifier that only reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn vibrate(&self, duration: Duration) {
        tracing::info!(duration_ms = duration.as_millis() as u64, "vibrate");
    }

    fn alert(&self, alert: &Alert) {
        tracing::info!(kind = ?alert.kind, title = %alert.title, "{}", alert.message);
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn vibrate(&self, duration: Duration) {
        (**self).vibrate(duration)
    }

    fn alert(&self, alert: &Alert) {
        (**self).alert(alert)
    }
}
