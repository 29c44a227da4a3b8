//! User-visible notifications: terminal output or freedesktop D-Bus popups.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use zbus::{Connection, proxy};

use crate::persist::PersistOutcome;

const APP_NAME: &str = "Paintbox";

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification.
    ///
    /// # Arguments
    /// * `app_name` - Application name
    /// * `replaces_id` - ID of notification to replace (0 for new)
    /// * `app_icon` - Icon name or path
    /// * `summary` - Notification title
    /// * `body` - Notification body text
    /// * `actions` - List of action identifiers and labels
    /// * `hints` - Additional metadata
    /// * `expire_timeout` - Timeout in milliseconds (-1 for default)
    ///
    /// # Returns
    /// Notification ID
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    fn icon(self) -> &'static str {
        match self {
            NotificationLevel::Success => "document-save",
            NotificationLevel::Error => "dialog-error",
        }
    }
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub summary: String,
    pub body: String,
}

impl Notification {
    pub fn success(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            summary: summary.into(),
            body: body.into(),
        }
    }

    pub fn error(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            summary: summary.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}", self.summary)
        } else {
            write!(f, "{}: {}", self.summary, self.body)
        }
    }
}

/// Builds the toast shown for a finished persist attempt.
///
/// Failures carry the message of the error that caused them.
pub fn toast_for(outcome: &PersistOutcome) -> Notification {
    match outcome {
        PersistOutcome::Saved(record) => Notification::success(
            "Painting saved",
            format!("Saved to your gallery as {}", record.id),
        ),
        PersistOutcome::Failed(message) => {
            Notification::error("Could not save painting", message.clone())
        }
    }
}

/// Presents notifications to the user.
pub trait Notifier {
    fn notify(&self, notification: &Notification);

    /// Blocks until every notification handed to [`Self::notify`] has been
    /// delivered or has failed.
    fn flush(&self) {}
}

/// Prints successes to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{notification}"),
            NotificationLevel::Error => eprintln!("{notification}"),
        }
    }
}

/// Delivers one notification to the desktop.
pub type NotificationSender =
    Arc<dyn Fn(Notification) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// Sends desktop notifications over D-Bus, echoing them to the terminal.
#[derive(Clone)]
pub struct DesktopNotifier {
    runtime: tokio::runtime::Handle,
    terminal: TerminalNotifier,
    sender: NotificationSender,
    /// Deliveries that may still be running.
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DesktopNotifier {
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_sender(
            runtime_handle,
            Arc::new(|notification: Notification| {
                async move {
                    send_notification(
                        &notification.summary,
                        &notification.body,
                        Some(notification.level.icon()),
                    )
                    .await
                }
                .boxed()
            }),
        )
    }

    /// Creates a notifier that delivers through `sender` instead of D-Bus.
    pub fn with_sender(runtime_handle: &tokio::runtime::Handle, sender: NotificationSender) -> Self {
        Self {
            runtime: runtime_handle.clone(),
            terminal: TerminalNotifier,
            sender,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        self.terminal.notify(notification);

        let delivery = (self.sender)(notification.clone());
        let handle = self.runtime.spawn(async move {
            if let Err(e) = delivery.await {
                log::warn!("Failed to send notification: {}", e);
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|task| !task.is_finished());
        pending.push(handle);
    }

    /// Must not be called from a task running on the notifier's runtime.
    fn flush(&self) {
        let tasks: Vec<JoinHandle<()>> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        if tasks.is_empty() {
            return;
        }

        log::debug!("Waiting for {} desktop notifications", tasks.len());
        for result in self.runtime.block_on(futures::future::join_all(tasks)) {
            if let Err(err) = result {
                log::warn!("Notification task ended abnormally: {}", err);
            }
        }
    }
}

/// Send a system notification.
///
/// # Arguments
/// * `summary` - Notification title
/// * `body` - Notification body text
/// * `icon` - Optional icon name (defaults to "image-x-generic")
pub async fn send_notification(
    summary: &str,
    body: &str,
    icon: Option<&str>,
) -> Result<(), String> {
    let connection = Connection::session()
        .await
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    let icon = icon.unwrap_or("image-x-generic");
    let hints = HashMap::new();

    proxy
        .notify(APP_NAME, 0, icon, summary, body, vec![], hints, 3000)
        .await
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}
