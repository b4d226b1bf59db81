//! Account lifecycle notifications across browsing contexts.
//!
//! A [`Notifier`] lets a page, its sibling tabs, a relying party embedding it in an iframe and
//! the browser hosting it observe the same stream of sign-in, sign-out, deletion, password reset
//! and profile change events. Passwords never leave the page through it, whichever call site
//! builds the payload.
//!
//! ```
//! use leptos::prelude::*;
//! use leptos_accounts_notifier::{channel::memory::MemoryHub, expect_notifier, use_notifier, Command, NotifierOptions, Payload};
//!
//! #[component]
//! pub fn App() -> impl IntoView {
//!     // In a browser, the tab channel would be backed by a `BroadcastChannel`.
//!     let hub = MemoryHub::new();
//!     let notifier = use_notifier(NotifierOptions::default().with_tab_channel(hub.channel()));
//!
//!     notifier.on(Command::SignedOut, |data| {
//!         leptos::logging::log!("Signed out elsewhere: {data:?}");
//!     });
//!
//!     view! { <SignOutButton/> }
//! }
//!
//! #[component]
//! pub fn SignOutButton() -> impl IntoView {
//!     let notifier = expect_notifier();
//!     let sign_out = move |_| {
//!         let data = Payload::new().with("uid", "f9c9b1a0");
//!         notifier.trigger_all(Command::SignedOut, Some(&data));
//!     };
//!
//!     view! { <button on:click=sign_out>"Sign out"</button> }
//! }
//! ```
//!

pub mod channel;
mod config;
mod error;
mod event;
mod hooks;
mod internal;
mod notifier;
mod payload;

// Library exports (additional to pub modules).
pub use config::*;
pub use error::NotifierError;
pub use event::*;
pub use hooks::*;
pub use internal::registry::{Listener, ListenerId};
pub use internal::scrub::{FORBIDDEN_FIELDS, ForbiddenField};
pub use notifier::Notifier;
pub use payload::{Field, Payload};
