//! Toast presentation state.

use std::sync::Mutex;

use tracing::debug;

use crate::capabilities::{Toast, ToastService};

/// Holds the one visible toast.
#[derive(Debug, Default)]
pub struct ToastCenter {
    current: Mutex<Option<Toast>>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToastService for ToastCenter {
    fn show(&self, toast: Toast) {
        debug!(style = ?toast.style, message = %toast.message, "Showing toast");
        *self.current.lock().expect("Toast mutex poisoned") = Some(toast);
    }

    fn dismiss(&self) {
        self.current.lock().expect("Toast mutex poisoned").take();
    }

    fn current(&self) -> Option<Toast> {
        self.current.lock().expect("Toast mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ToastStyle;

    #[test]
    fn test_new_toast_replaces_old() {
        let toasts = ToastCenter::new();
        toasts.show(Toast::new("Saved", ToastStyle::Success));
        toasts.show(Toast::new("Sync failed", ToastStyle::Error));

        assert_eq!(toasts.current().unwrap().message, "Sync failed");

        toasts.dismiss();
        assert!(toasts.current().is_none());
    }
}
