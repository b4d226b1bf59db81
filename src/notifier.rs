use crate::channel::{Channel, ChannelHandler, NullChannel};
use crate::config::{AdvancedOptions, NotifierOptions};
use crate::error::NotifierError;
use crate::event::{is_internal, Command};
use crate::internal::registry::{Listener, ListenerId, ListenerRegistry};
use crate::internal::scrub;
use crate::payload::Payload;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// Account lifecycle notification bus shared by a page, its sibling tabs, an embedding relying
/// party and the hosting browser.
///
/// Cloning is cheap. All clones share the same listeners and channels.
///
/// - [`Notifier::trigger`] notifies local listeners only.
/// - [`Notifier::trigger_all`] notifies every channel and then the local listeners.
/// - [`Notifier::trigger_remote`] notifies the channels but never the local listeners.
///   `internal:` events only reach the tab channel.
///
/// Messages of any [`Command`] received on the tab channel are re-emitted locally.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

struct Inner {
    iframe_channel: Arc<dyn Channel>,
    tab_channel: Arc<dyn Channel>,
    web_channel: Arc<dyn Channel>,
    listeners: ListenerRegistry,
    advanced: AdvancedOptions,
}

impl Notifier {
    pub fn new(options: NotifierOptions) -> Self {
        let NotifierOptions {
            iframe_channel,
            tab_channel,
            web_channel,
            advanced,
        } = options;

        let null = || Arc::new(NullChannel) as Arc<dyn Channel>;
        let inner = Arc::new(Inner {
            iframe_channel: iframe_channel.unwrap_or_else(null),
            tab_channel: tab_channel.unwrap_or_else(null),
            web_channel: web_channel.unwrap_or_else(null),
            listeners: ListenerRegistry::default(),
            advanced,
        });

        // The tab channel lives as long as the notifier. Holding a strong reference in its
        // handlers would keep both alive forever.
        for command in Command::ALL {
            let weak = Arc::downgrade(&inner);
            inner
                .tab_channel
                .on(command.as_str(), re_emit_from_tab(weak, command));
        }
        tracing::trace!(
            commands = Command::ALL.len(),
            "Listening for commands from other tabs"
        );

        Self { inner }
    }

    /// Registers `listener` for local emissions of `event`.
    pub fn on(
        &self,
        event: impl AsRef<str>,
        listener: impl Fn(Option<&Payload>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner
            .listeners
            .add(event.as_ref(), Arc::new(listener), false)
    }

    /// Like [`Notifier::on`], but the listener is removed before its first invocation.
    pub fn once(
        &self,
        event: impl AsRef<str>,
        listener: impl Fn(Option<&Payload>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner
            .listeners
            .add(event.as_ref(), Arc::new(listener), true)
    }

    /// Removes a listener. Returns `false` if it was not registered for `event`.
    pub fn off(&self, event: impl AsRef<str>, id: ListenerId) -> bool {
        self.inner.listeners.remove(event.as_ref(), id)
    }

    /// Removes every listener of `event`, returning how many were removed.
    pub fn off_all(&self, event: impl AsRef<str>) -> usize {
        self.inner.listeners.clear(event.as_ref())
    }

    pub fn listener_count(&self, event: impl AsRef<str>) -> usize {
        self.inner.listeners.count(event.as_ref())
    }

    /// Synchronously notifies local listeners of `event`, in registration order.
    /// No channel is involved.
    pub fn trigger(&self, event: impl AsRef<str>, data: Option<&Payload>) {
        self.inner.emit(event.as_ref(), data);
    }

    /// Notifies the web, tab and iframe channel and then the local listeners.
    ///
    /// Undefined fields are stripped from what the channels receive. Local listeners receive
    /// `data` as given. No forbidden-field validation happens here.
    pub fn trigger_all(&self, event: impl AsRef<str>, data: Option<&Payload>) {
        let event = event.as_ref();
        let scrubbed = data.map(Payload::scrubbed);
        let scrubbed = scrubbed.as_ref();

        self.inner.send(&*self.inner.web_channel, "web", event, scrubbed);
        self.inner.send(&*self.inner.tab_channel, "tab", event, scrubbed);
        self.inner
            .send(&*self.inner.iframe_channel, "iframe", event, scrubbed);

        self.inner.emit(event, data);
    }

    /// Notifies other contexts but never the local listeners.
    ///
    /// The tab channel always receives the event. The web and iframe channel only receive
    /// events outside the `internal:` namespace. Every channel receives the same payload with
    /// undefined fields removed.
    ///
    /// # Errors
    /// Fails with [`NotifierError::ForbiddenField`] if `data` carries a truthy value in a field
    /// forbidden for `event`. Nothing is sent in that case.
    pub fn trigger_remote(
        &self,
        event: impl AsRef<str>,
        data: Option<&Payload>,
    ) -> Result<(), NotifierError> {
        let event = event.as_ref();
        if let Err(err) =
            scrub::validate(event, data, &self.inner.advanced.additional_forbidden_fields)
        {
            tracing::error!(event, %err, "Refusing to send sensitive data to other contexts");
            return Err(err);
        }

        let scrubbed = data.map(Payload::scrubbed);
        let scrubbed = scrubbed.as_ref();
        self.inner.send(&*self.inner.tab_channel, "tab", event, scrubbed);
        if !is_internal(event) {
            self.inner.send(&*self.inner.web_channel, "web", event, scrubbed);
            self.inner
                .send(&*self.inner.iframe_channel, "iframe", event, scrubbed);
        }
        Ok(())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NotifierOptions::default())
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("advanced", &self.inner.advanced)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn send(&self, channel: &dyn Channel, name: &'static str, event: &str, data: Option<&Payload>) {
        tracing::trace!(
            channel = name,
            event,
            fields = ?data.map(Payload::describe_keys),
            "Sending notification"
        );
        channel.send(event, data);
    }

    fn emit(&self, event: &str, data: Option<&Payload>) {
        let listeners = self.listeners.snapshot(event);
        if listeners.is_empty() {
            return;
        }
        for listener in listeners {
            self.invoke(event, &listener, data);
        }
    }

    fn invoke(&self, event: &str, listener: &Listener, data: Option<&Payload>) {
        if !self.advanced.isolate_panicking_listeners {
            listener(data);
            return;
        }
        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| listener(data))) {
            tracing::error!(
                event,
                reason = panic_message(&*panic),
                "Listener panicked. Continuing with remaining listeners."
            );
        }
    }
}

fn re_emit_from_tab(inner: Weak<Inner>, command: Command) -> ChannelHandler {
    Arc::new(move |data: Option<&Payload>| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        tracing::debug!(event = command.as_str(), "Received command from another tab");
        inner.emit(command.as_str(), data);
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
