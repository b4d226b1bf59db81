use crate::error::{ForbiddenFieldSnafu, NotifierError};
use crate::payload::Payload;
use std::borrow::Cow;

/// A field that must never leave the process together with a given event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForbiddenField {
    pub event: Cow<'static, str>,
    pub field: Cow<'static, str>,
}

impl ForbiddenField {
    pub const fn new(event: &'static str, field: &'static str) -> Self {
        Self {
            event: Cow::Borrowed(event),
            field: Cow::Borrowed(field),
        }
    }

    pub fn owned(event: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            event: Cow::Owned(event.into()),
            field: Cow::Owned(field.into()),
        }
    }

    fn is_violated_by(&self, event: &str, data: &Payload) -> bool {
        self.event == event
            && data
                .get(&self.field)
                .is_some_and(|value| value.is_truthy())
    }
}

/// Credential material that may never be broadcast with the listed events.
pub static FORBIDDEN_FIELDS: &[ForbiddenField] = &[
    ForbiddenField::new("fxaccounts:complete_reset_password_tab_open", "password"),
    ForbiddenField::new("fxaccounts:delete", "password"),
    ForbiddenField::new("profile:change", "password"),
    ForbiddenField::new("internal:signed_in", "password"),
    ForbiddenField::new("fxaccounts:logout", "password"),
];

/// Checks the caller-supplied payload against the built-in table and any `additional` rules.
///
/// Undefined values count as absent.
pub(crate) fn validate(
    event: &str,
    data: Option<&Payload>,
    additional: &[ForbiddenField],
) -> Result<(), NotifierError> {
    let Some(data) = data else {
        return Ok(());
    };

    match FORBIDDEN_FIELDS
        .iter()
        .chain(additional)
        .find(|rule| rule.is_violated_by(event, data))
    {
        Some(rule) => ForbiddenFieldSnafu {
            event,
            field: &*rule.field,
        }
        .fail(),
        None => Ok(()),
    }
}
