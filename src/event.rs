use std::fmt;

/// Prefix of events confined to the current browser profile.
///
/// Events carrying this prefix are only ever broadcast to other tabs, never to the embedding
/// relying party (iframe channel) or the hosting browser (web channel).
pub const INTERNAL_PREFIX: &str = "internal:";

/// Local-only event a view emits once an account verification completed.
pub const VERIFICATION_SUCCESS: &str = "verification.success";

/// Tells whether `event` lives in the `internal:` namespace.
pub fn is_internal(event: &str) -> bool {
    event.starts_with(INTERNAL_PREFIX)
}

/// Account lifecycle events other tabs may broadcast and which the notifier re-emits locally.
///
/// This set is closed. Only these names get a tab channel subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ChangePassword,
    CompleteResetPasswordTabOpen,
    Delete,
    ProfileChange,
    SignedIn,
    SignedOut,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::ChangePassword,
        Command::CompleteResetPasswordTabOpen,
        Command::Delete,
        Command::ProfileChange,
        Command::SignedIn,
        Command::SignedOut,
    ];

    /// The event name used on every channel.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::ChangePassword => "fxaccounts:change_password",
            Command::CompleteResetPasswordTabOpen => "fxaccounts:complete_reset_password_tab_open",
            Command::Delete => "fxaccounts:delete",
            Command::ProfileChange => "profile:change",
            Command::SignedIn => "internal:signed_in",
            Command::SignedOut => "fxaccounts:logout",
        }
    }

    pub fn from_name(event: &str) -> Option<Command> {
        Self::ALL.into_iter().find(|it| it.as_str() == event)
    }

    pub fn is_internal(&self) -> bool {
        is_internal(self.as_str())
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn internal_namespace_is_detected_by_prefix() {
        assert_that(is_internal("internal:signed_in")).is_true();
        assert_that(is_internal("internal:")).is_true();
        assert_that(is_internal("fxaccounts:logout")).is_false();
        assert_that(is_internal("profile:internal:change")).is_false();
    }

    #[test]
    fn command_names_are_unique() {
        let names = Command::ALL
            .iter()
            .map(Command::as_str)
            .collect::<HashSet<_>>();
        assert_that(names.len()).is_equal_to(Command::ALL.len());
    }

    #[test]
    fn from_name_resolves_every_command() {
        for command in Command::ALL {
            assert_that(Command::from_name(command.as_str())).is_equal_to(Some(command));
        }
        assert_that(Command::from_name("fxaccounts:unknown").is_none()).is_true();
        assert_that(Command::from_name(VERIFICATION_SUCCESS).is_none()).is_true();
    }

    #[test]
    fn only_signed_in_is_internal() {
        let internal = Command::ALL
            .into_iter()
            .filter(Command::is_internal)
            .collect::<Vec<_>>();
        assert_that(internal).is_equal_to(vec![Command::SignedIn]);
    }

    #[test]
    fn display_uses_wire_name() {
        assert_that(Command::SignedOut.to_string()).is_equal_to("fxaccounts:logout".to_owned());
    }
}
