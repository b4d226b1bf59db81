use crate::payload::Payload;
use std::sync::Arc;

pub mod memory;

/// Callback a channel invokes for an inbound message.
pub type ChannelHandler = Arc<dyn Fn(Option<&Payload>) + Send + Sync>;

/// A transport reaching one trust boundary: the embedding relying party (iframe channel),
/// other tabs of the same browser profile (tab channel) or the hosting browser (web channel).
///
/// Framing, origin checks and delivery are the implementation's concern. The notifier only
/// fires and forgets.
pub trait Channel: Send + Sync {
    /// Best-effort delivery of `event` to the remote end.
    fn send(&self, event: &str, data: Option<&Payload>);

    /// Registers `handler` for inbound messages named `event`.
    fn on(&self, event: &str, handler: ChannelHandler);
}

/// Used in place of every channel that was not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChannel;

impl Channel for NullChannel {
    fn send(&self, event: &str, _data: Option<&Payload>) {
        tracing::trace!(event, "Discarding message sent to null channel");
    }

    fn on(&self, _event: &str, _handler: ChannelHandler) {}
}
