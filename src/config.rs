use crate::channel::Channel;
use crate::internal::scrub::ForbiddenField;
use std::fmt;
use std::sync::Arc;

/// Dependencies and settings used to construct a [`crate::Notifier`].
///
/// Channels are owned by whoever assembles the application. Any channel left as `None` is
/// replaced by a [`crate::channel::NullChannel`].
#[derive(Clone, Default)]
pub struct NotifierOptions {
    /// Channel to the relying party embedding this page in an iframe.
    pub iframe_channel: Option<Arc<dyn Channel>>,

    /// Broadcast channel reaching other tabs of the same browser profile.
    /// This is the only channel the notifier listens on.
    pub tab_channel: Option<Arc<dyn Channel>>,

    /// Channel to the browser or extension hosting the web view.
    pub web_channel: Option<Arc<dyn Channel>>,

    pub advanced: AdvancedOptions,
}

impl NotifierOptions {
    pub fn with_iframe_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.iframe_channel = Some(Arc::new(channel));
        self
    }

    pub fn with_tab_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.tab_channel = Some(Arc::new(channel));
        self
    }

    pub fn with_web_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.web_channel = Some(Arc::new(channel));
        self
    }

    pub fn with_advanced(mut self, advanced: AdvancedOptions) -> Self {
        self.advanced = advanced;
        self
    }
}

impl fmt::Debug for NotifierOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierOptions")
            .field("iframe_channel", &self.iframe_channel.is_some())
            .field("tab_channel", &self.tab_channel.is_some())
            .field("web_channel", &self.web_channel.is_some())
            .field("advanced", &self.advanced)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AdvancedOptions {
    /// Rules checked in addition to the built-in [`crate::FORBIDDEN_FIELDS`] table.
    /// They can only extend the table, never relax it.
    /// Defaults to no additional rules.
    pub additional_forbidden_fields: Vec<ForbiddenField>,

    /// Whether a panicking local listener is caught and logged, letting the remaining listeners
    /// run. When disabled, the panic unwinds into the caller of `trigger`.
    /// Defaults to `true`.
    pub isolate_panicking_listeners: bool,
}

impl Default for AdvancedOptions {
    fn default() -> Self {
        Self {
            additional_forbidden_fields: Vec::new(),
            isolate_panicking_listeners: true,
        }
    }
}
