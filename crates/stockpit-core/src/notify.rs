// ── Notification gateway ──
//
// Uniform contract for surfacing success/error/confirmation, decoupled
// from any particular presentation. The gateway additionally owns the
// explicit "a blocking notice is active" signal that dialogs consult
// before honoring ambient close triggers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

/// Auto-dismiss interval for success notifications.
pub const SUCCESS_DISMISS: Duration = Duration::from_millis(2000);

/// Presentation seam for notifications.
///
/// Implementations render however they like (toast, console line,
/// prompt); the controllers only speak this contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Surface a success message that auto-dismisses after `auto_dismiss`.
    async fn notify_success(&self, message: &str, auto_dismiss: Duration);

    /// Surface an error. Error notices never auto-dismiss; the user must
    /// dismiss them explicitly (see [`NotificationGateway::acknowledge`]).
    async fn notify_error(&self, message: &str);

    /// Ask for explicit confirmation. Every non-affirmative path
    /// (cancel, dismissal) returns `false`.
    async fn confirm(&self, prompt: &str) -> bool;
}

struct GatewayInner {
    notifier: Arc<dyn Notifier>,
    blocking: watch::Sender<bool>,
}

/// Shared handle to the notification seam.
///
/// While an error notice is unresolved, `blocking_notice()` is `true`
/// and dialogs must refuse ambient close triggers; the notice takes
/// modal priority until [`acknowledge`](Self::acknowledge) clears it.
#[derive(Clone)]
pub struct NotificationGateway {
    inner: Arc<GatewayInner>,
}

impl NotificationGateway {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let (blocking, _) = watch::channel(false);
        Self {
            inner: Arc::new(GatewayInner { notifier, blocking }),
        }
    }

    pub async fn success(&self, message: &str) {
        self.inner
            .notifier
            .notify_success(message, SUCCESS_DISMISS)
            .await;
    }

    /// Surface an error and raise the blocking-notice signal.
    pub async fn error(&self, message: &str) {
        self.inner.blocking.send_replace(true);
        self.inner.notifier.notify_error(message).await;
    }

    pub async fn confirm(&self, prompt: &str) -> bool {
        self.inner.notifier.confirm(prompt).await
    }

    /// `true` while an unacknowledged error notice is visible.
    pub fn blocking_notice(&self) -> bool {
        *self.inner.blocking.borrow()
    }

    /// The user dismissed the error notice; ambient close triggers work
    /// again.
    pub fn acknowledge(&self) {
        self.inner.blocking.send_replace(false);
    }

    /// Observe the blocking-notice signal.
    pub fn subscribe_blocking(&self) -> watch::Receiver<bool> {
        self.inner.blocking.subscribe()
    }
}
