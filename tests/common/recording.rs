use leptos_accounts_notifier::Payload;
use leptos_accounts_notifier::channel::{Channel, ChannelHandler};
use parking_lot::Mutex;
use std::sync::Arc;

/// A message as observed by a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub event: String,
    pub data: Option<Payload>,
}

impl Sent {
    pub fn new(event: &str, data: Option<Payload>) -> Self {
        Self {
            event: event.to_owned(),
            data,
        }
    }
}

#[derive(Default)]
struct State {
    sent: Vec<Sent>,
    handlers: Vec<(String, ChannelHandler)>,
}

/// Channel double remembering every send and every handler registration.
///
/// Cloning shares the recorded state, so one clone can be handed to the notifier while the
/// test keeps another for inspection.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    state: Arc<Mutex<State>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.state.lock().sent.clone()
    }

    pub fn send_count(&self) -> usize {
        self.state.lock().sent.len()
    }

    pub fn subscriptions(&self) -> Vec<String> {
        self.state
            .lock()
            .handlers
            .iter()
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Simulates an inbound message from the remote end.
    pub fn deliver(&self, event: &str, data: Option<&Payload>) {
        let handlers = self
            .state
            .lock()
            .handlers
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, handler)| Arc::clone(handler))
            .collect::<Vec<_>>();
        for handler in handlers {
            handler(data);
        }
    }
}

impl Channel for RecordingChannel {
    fn send(&self, event: &str, data: Option<&Payload>) {
        self.state.lock().sent.push(Sent::new(event, data.cloned()));
    }

    fn on(&self, event: &str, handler: ChannelHandler) {
        self.state.lock().handlers.push((event.to_owned(), handler));
    }
}

/// The three channels of a notifier under test.
#[derive(Clone, Default)]
pub struct Channels {
    pub iframe: RecordingChannel,
    pub tab: RecordingChannel,
    pub web: RecordingChannel,
}

impl Channels {
    pub fn options(&self) -> leptos_accounts_notifier::NotifierOptions {
        leptos_accounts_notifier::NotifierOptions::default()
            .with_iframe_channel(self.iframe.clone())
            .with_tab_channel(self.tab.clone())
            .with_web_channel(self.web.clone())
    }
}
