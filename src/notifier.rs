//! Desktop notifications for finished conversions.
//!
//! Delivery is best-effort: a missing notification daemon or helper binary
//! only produces a debug log line. The backend is picked once at startup by
//! [`select_notifier`]; platforms without one get [`NullNotifier`].

use std::fmt;
use std::process::{Command, Stdio};

use crate::constants::{ICON_FAILURE, ICON_SUCCESS};
use crate::logger::log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: &'static str,
}

impl Notification {
    /// The notification raised when a conversion ends
    pub fn conversion_result(success: bool) -> Self {
        if success {
            Self {
                title: "Success!".to_string(),
                body: "Image conversion was successful.".to_string(),
                icon: ICON_SUCCESS,
            }
        } else {
            Self {
                title: "Error!".to_string(),
                body: "An error occurred while converting image.".to_string(),
                icon: ICON_FAILURE,
            }
        }
    }
}

/// Something that can show a desktop notification
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Linux: hands the notification to the session daemon through `notify-send`
#[derive(Debug, Default)]
pub struct LibNotifyNotifier;

impl Notifier for LibNotifyNotifier {
    fn notify(&self, notification: &Notification) {
        let result = Command::new("notify-send")
            .arg("--icon")
            .arg(notification.icon)
            .arg(&notification.title)
            .arg(&notification.body)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match result {
            // notify-send returns immediately; reap it off the GUI thread
            Ok(mut child) => {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => log::debug!("notify-send unavailable: {}", e),
        }
    }
}

/// macOS: posts a user notification through AppleScript
#[derive(Debug, Default)]
pub struct MacOsNotifier;

impl MacOsNotifier {
    fn script(notification: &Notification) -> String {
        format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(&notification.body),
            escape_applescript(&notification.title)
        )
    }
}

impl Notifier for MacOsNotifier {
    fn notify(&self, notification: &Notification) {
        let result = Command::new("osascript")
            .arg("-e")
            .arg(Self::script(notification))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match result {
            Ok(mut child) => {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => log::debug!("osascript unavailable: {}", e),
        }
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Used where no notification backend exists
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: &Notification) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOS,
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOS => write!(f, "macOS"),
            Platform::Other => write!(f, "Unknown OS"),
        }
    }
}

pub fn detect_platform() -> Platform {
    if cfg!(target_os = "linux") {
        Platform::Linux
    } else if cfg!(target_os = "macos") {
        Platform::MacOS
    } else {
        Platform::Other
    }
}

/// Notifier for a given platform
pub fn notifier_for(platform: Platform) -> Box<dyn Notifier> {
    match platform {
        Platform::Linux => Box::new(LibNotifyNotifier),
        Platform::MacOS => Box::new(MacOsNotifier),
        Platform::Other => Box::new(NullNotifier),
    }
}

/// Notifier for the running platform
pub fn select_notifier() -> Box<dyn Notifier> {
    let platform = detect_platform();
    log::debug!("Using notification backend for {}", platform);
    notifier_for(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_notifications_pick_matching_icons() {
        let ok = Notification::conversion_result(true);
        assert_eq!(ok.title, "Success!");
        assert_eq!(ok.icon, "image-x-generic");

        let failed = Notification::conversion_result(false);
        assert_eq!(failed.title, "Error!");
        assert_eq!(failed.body, "An error occurred while converting image.");
        assert_eq!(failed.icon, "dialog-error");
    }

    #[test]
    fn applescript_quotes_are_escaped() {
        let notification = Notification {
            title: "say \"hi\"".to_string(),
            body: r"C:\out".to_string(),
            icon: ICON_SUCCESS,
        };
        assert_eq!(
            MacOsNotifier::script(&notification),
            r#"display notification "C:\\out" with title "say \"hi\"""#
        );
    }

    #[test]
    fn null_notifier_accepts_anything() {
        NullNotifier.notify(&Notification::conversion_result(false));
    }

    #[test]
    fn mock_notifier_sees_the_notification() {
        let mut mock = MockNotifier::new();
        mock.expect_notify()
            .withf(|n| n.icon == ICON_FAILURE)
            .times(1)
            .return_const(());
        let notifier: Box<dyn Notifier> = Box::new(mock);
        notifier.notify(&Notification::conversion_result(false));
    }
}
