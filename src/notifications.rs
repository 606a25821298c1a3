use notify_rust::Notification;
use tracing::warn;

/// One-shot user-facing interrupt carrying a reminder's text.
///
/// The scheduler shares its notifier with detached timer threads, hence the
/// Send + Sync bound.
pub trait Notifier: Send + Sync {
    fn alert(&self, text: &str);
}

/// Delivers reminders as desktop notifications
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn alert(&self, text: &str) {
        let result = Notification::new()
            .summary("Task Reminder")
            .body(text)
            .show();
        if let Err(err) = result {
            // Delivery is fire-and-forget; a failed alert is lost
            warn!(%err, "failed to deliver desktop notification");
        }
    }
}

/// Asks the user, once, whether local alerts may be delivered. The embedder
/// owns the actual prompt; alerts stay disabled until a gate grants them.
pub trait PermissionGate {
    fn request(&self) -> bool;
}

/// Gate for platforms where no explicit permission prompt exists
pub struct AlwaysAllow;

impl PermissionGate for AlwaysAllow {
    fn request(&self) -> bool {
        true
    }
}

/// Test notifier that records every delivered alert
#[cfg(test)]
pub struct RecordingNotifier {
    log: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            log: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn alert(&self, text: &str) {
        self.log.lock().unwrap().push(text.to_string());
    }
}
