use crate::config::NotifierOptions;
use crate::notifier::Notifier;
use leptos::context::{provide_context, use_context};
use leptos::prelude::expect_context;

/// Creates the notifier for this page and provides it as context.
///
/// Every component rendered below the caller can access the same instance through
/// [`expect_notifier`]. Call this once, close to the root of your application.
pub fn use_notifier(options: NotifierOptions) -> Notifier {
    tracing::trace!(?options, "Initializing notifier...");
    let notifier = Notifier::new(options);
    provide_notifier(notifier.clone());
    notifier
}

/// Provides an already constructed notifier as context.
pub fn provide_notifier(notifier: Notifier) {
    provide_context(notifier);
}

pub fn use_notifier_context() -> Option<Notifier> {
    use_context::<Notifier>()
}

/// Returns the notifier provided by [`use_notifier`] or [`provide_notifier`].
///
/// # Panics
/// Panics when no notifier was provided by any parent.
pub fn expect_notifier() -> Notifier {
    expect_context::<Notifier>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Payload;
    use assertr::prelude::*;
    use leptos::prelude::Owner;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn use_notifier_provides_the_instance() {
        let owner = Owner::new();
        owner.with(|| {
            let notifier = use_notifier(NotifierOptions::default());
            let seen = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&seen);
            notifier.on("verification.success", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

            // The context carries a clone sharing the same listeners.
            expect_notifier().trigger("verification.success", Some(&Payload::new()));

            assert_that(seen.load(Ordering::SeqCst)).is_equal_to(1);
        });
    }

    #[test]
    fn no_context_without_provider() {
        let owner = Owner::new();
        owner.with(|| {
            assert_that(use_notifier_context().is_none()).is_true();
        });
    }

    #[test]
    fn provide_notifier_is_visible_to_children() {
        let owner = Owner::new();
        owner.with(|| {
            provide_notifier(Notifier::default());
            let child = Owner::new();
            child.with(|| {
                assert_that(use_notifier_context().is_some()).is_true();
            });
        });
    }
}
