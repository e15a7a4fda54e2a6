//! Terminal notification platform

use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;
use streakline_core::{NotificationPlatform, PlatformError};
use streakline_domain::{Notification, NotificationConfig, PlatformPermission};
use tracing::debug;

/// Prints notifications as lines on a writer (stdout by default)
pub struct TerminalPlatform {
    supported: bool,
    grant_on_request: bool,
    permission: Mutex<PlatformPermission>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalPlatform {
    pub fn new(config: &NotificationConfig) -> Self {
        Self::with_writer(config, Box::new(std::io::stdout()))
    }

    pub fn with_writer(config: &NotificationConfig, out: Box<dyn Write + Send>) -> Self {
        Self {
            supported: config.supported,
            grant_on_request: config.grant_on_request,
            permission: Mutex::new(config.permission),
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl NotificationPlatform for TerminalPlatform {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> PlatformPermission {
        *self.permission.lock()
    }

    async fn request_permission(&self) -> Result<PlatformPermission, PlatformError> {
        if !self.supported {
            return Err(PlatformError::Unsupported);
        }

        let answer = if self.grant_on_request {
            PlatformPermission::Granted
        } else {
            PlatformPermission::Denied
        };
        *self.permission.lock() = answer;
        debug!(%answer, "Terminal permission prompt answered");
        Ok(answer)
    }

    fn show(&self, notification: &Notification) -> Result<(), PlatformError> {
        if !self.supported {
            return Err(PlatformError::Unsupported);
        }
        if self.permission() != PlatformPermission::Granted {
            return Err(PlatformError::Display("notification permission not granted".into()));
        }

        let mut out = self.out.lock();
        writeln!(out, "[{}] {}", notification.title, notification.body)
            .and_then(|()| out.flush())
            .map_err(|e| PlatformError::Display(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use streakline_domain::HabitId;

    use super::*;

    /// Writer that keeps everything in a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    fn config(permission: PlatformPermission, grant_on_request: bool) -> NotificationConfig {
        NotificationConfig { permission, grant_on_request, ..NotificationConfig::default() }
    }

    #[test]
    fn test_show_writes_line() {
        let buffer = SharedBuffer::default();
        let platform = TerminalPlatform::with_writer(
            &config(PlatformPermission::Granted, true),
            Box::new(buffer.clone()),
        );

        platform.show(&Notification::reminder(HabitId(1), "Read")).unwrap();

        assert_eq!(buffer.contents(), "[Habit Reminder] Time to complete your habit: Read\n");
    }

    #[test]
    fn test_show_without_permission_fails() {
        let platform = TerminalPlatform::with_writer(
            &config(PlatformPermission::Default, true),
            Box::new(SharedBuffer::default()),
        );

        let err = platform.show(&Notification::missed(HabitId(1), "Read")).unwrap_err();
        assert!(matches!(err, PlatformError::Display(_)));
    }

    #[tokio::test]
    async fn test_request_permission_answers_from_config() {
        let granting = TerminalPlatform::with_writer(
            &config(PlatformPermission::Default, true),
            Box::new(SharedBuffer::default()),
        );
        assert_eq!(granting.request_permission().await, Ok(PlatformPermission::Granted));
        assert_eq!(granting.permission(), PlatformPermission::Granted);

        let refusing = TerminalPlatform::with_writer(
            &config(PlatformPermission::Default, false),
            Box::new(SharedBuffer::default()),
        );
        assert_eq!(refusing.request_permission().await, Ok(PlatformPermission::Denied));
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let platform = TerminalPlatform::with_writer(
            &NotificationConfig { supported: false, ..NotificationConfig::default() },
            Box::new(SharedBuffer::default()),
        );

        assert!(!platform.is_supported());
        assert_eq!(platform.request_permission().await, Err(PlatformError::Unsupported));
    }
}
