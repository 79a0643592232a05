//! Plugin context and user-facing notifications
//!
//! [`PluginContext`] is built once when the plugin initializes and passed to
//! whatever needs the plugin's name or version. Notifications are
//! fire-and-forget; rendering them as in-game dialogs is the host's job.

use std::fmt;

use crate::types::FormId;

/// Plugin version as declared to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl PluginVersion {
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Dotted version with the first `parts` components (clamped to 1..=4)
    pub fn to_string_parts(&self, parts: usize) -> String {
        [self.major, self.minor, self.patch, self.build]
            .iter()
            .take(parts.clamp(1, 4))
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_parts(4))
    }
}

/// Process-wide plugin identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginContext {
    pub name: String,
    pub version: PluginVersion,
}

impl PluginContext {
    pub fn new(name: impl Into<String>, version: PluginVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Messages shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    GeneralError,
    /// Initialization failed and the plugin is shutting down
    InitError,
    /// Editor ids were requested without powerofthree's Tweaks installed
    Po3Missing,
    IniCreated,
    FormTypeError(FormId),
    FormIdError(FormId),
    EditorIdError(String),
    /// An item's container went away between saves
    ProblemWithContainer(String),
    UninstallSuccessful,
    UninstallFailed,
    Custom(String),
}

impl Notification {
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Notification::IniCreated | Notification::UninstallSuccessful
        )
    }

    /// Message text, prefixed with the plugin name where the player needs it
    pub fn text(&self, ctx: &PluginContext) -> String {
        let name = &ctx.name;
        match self {
            Notification::GeneralError => {
                format!("{name}: Something went wrong. Please contact the mod author.")
            }
            Notification::InitError => {
                format!("{name}: The mod failed to initialize and will be terminated.")
            }
            Notification::Po3Missing => format!(
                "{name}: If you are trying to use Editor IDs, but you must have powerofthree's \
                 Tweaks installed. See mod page for further instructions."
            ),
            Notification::IniCreated => "INI created. Customize it to your liking.".to_string(),
            Notification::FormTypeError(id) => format!(
                "{name}: The form type of the item with FormID ({id:x}) is not supported. \
                 Please contact the mod author."
            ),
            Notification::FormIdError(id) => {
                format!("{name}: The ID ({id:x}) could not have been found.")
            }
            Notification::EditorIdError(id) => {
                format!("{name}: The ID ({id}) could not have been found.")
            }
            Notification::ProblemWithContainer(id) => format!(
                "{name}: Problem with one of the items with the form id ({id}). This is expected \
                 if you have changed the list of containers in the INI file between saves. \
                 Corresponding items will be returned to your inventory. You can suppress this \
                 message by changing the setting in your INI."
            ),
            Notification::UninstallSuccessful => {
                format!("{name}: Uninstall successful. You can now safely remove the mod.")
            }
            Notification::UninstallFailed => {
                format!("{name}: Uninstall failed. Please contact the mod author.")
            }
            Notification::Custom(msg) => format!("{name}: {msg}"),
        }
    }
}

/// Receives notifications for the player
pub trait Notifier {
    fn notify(&self, ctx: &PluginContext, notification: &Notification);
}

/// Writes notifications to the log instead of showing them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, ctx: &PluginContext, notification: &Notification) {
        let text = notification.text(ctx);
        if notification.is_error() {
            log::error!("{text}");
        } else {
            log::info!("{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ctx() -> PluginContext {
        PluginContext::new("Dynamic Forms", PluginVersion::new(1, 4, 2, 7))
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Notifier for Recorder {
        fn notify(&self, ctx: &PluginContext, notification: &Notification) {
            self.0.borrow_mut().push(notification.text(ctx));
        }
    }

    #[test]
    fn test_version_parts() {
        let version = PluginVersion::new(1, 4, 2, 7);
        assert_eq!(version.to_string_parts(1), "1");
        assert_eq!(version.to_string_parts(3), "1.4.2");
        assert_eq!(version.to_string_parts(9), "1.4.2.7");
        assert_eq!(version.to_string_parts(0), "1");
        assert_eq!(version.to_string(), "1.4.2.7");
    }

    #[test]
    fn test_form_ids_render_as_hex() {
        let text = Notification::FormIdError(0xFF00_0ABC).text(&ctx());
        assert_eq!(text, "Dynamic Forms: The ID (ff000abc) could not have been found.");
    }

    #[test]
    fn test_ini_created_has_no_prefix() {
        let note = Notification::IniCreated;
        assert!(!note.is_error());
        assert_eq!(note.text(&ctx()), "INI created. Customize it to your liking.");
    }

    #[test]
    fn test_custom_message() {
        let note = Notification::Custom("Load failed".to_string());
        assert!(note.is_error());
        assert_eq!(note.text(&ctx()), "Dynamic Forms: Load failed");
    }

    #[test]
    fn test_notifier_receives_text() {
        let recorder = Recorder::default();
        recorder.notify(&ctx(), &Notification::UninstallFailed);
        LogNotifier.notify(&ctx(), &Notification::UninstallSuccessful);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            ["Dynamic Forms: Uninstall failed. Please contact the mod author."]
        );
    }
}
