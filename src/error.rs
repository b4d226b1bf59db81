use snafu::Snafu;

/// Errors raised by the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum NotifierError {
    /// A caller tried to broadcast a sensitive field. This is a programming error at the call
    /// site and must be fixed there. Nothing was sent.
    #[snafu(display(
        "NotifierError: Refusing to send '{event}' carrying forbidden field '{field}'"
    ))]
    ForbiddenField { event: String, field: String },
}
