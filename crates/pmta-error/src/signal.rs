//! The error value carried out of a failed PowerMTA call

use crate::kind::ErrorKind;
use crate::origin::OriginTag;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A typed failure: origin tag, raw numeric code and message.
///
/// The code is not validated against [`ErrorKind`]. The service can report
/// codes this crate does not enumerate and those must survive unchanged, so
/// [`ErrorSignal::kind`] returns `None` for them instead of failing.
///
/// There are no setters; a signal is fixed once constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}: {message} (code {code})", .origin.class_name())]
pub struct ErrorSignal {
    origin: OriginTag,
    code: i64,
    message: String,
}

impl ErrorSignal {
    /// Build a signal from a raw code.
    pub fn new(origin: OriginTag, code: i64, message: impl Into<String>) -> Self {
        Self {
            origin,
            code,
            message: message.into(),
        }
    }

    /// Build a signal whose code is the declared code of `kind`.
    pub fn from_kind(origin: OriginTag, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(origin, kind.code(), message)
    }

    pub fn origin(&self) -> OriginTag {
        self.origin
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The declared kind for this code, if there is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }

    pub fn class_name(&self) -> &'static str {
        self.origin.class_name()
    }

    /// Whether a handler for `class` would catch this signal.
    pub fn is_instance_of(&self, class: OriginTag) -> bool {
        self.origin.is_a(class)
    }

    pub fn is_connection(&self) -> bool {
        self.origin == OriginTag::Connection
    }

    pub fn is_recipient(&self) -> bool {
        self.origin == OriginTag::Recipient
    }

    pub fn is_message(&self) -> bool {
        self.origin == OriginTag::Message
    }
}

impl From<ErrorKind> for ErrorSignal {
    /// A general signal with the kind's code and its constant name as message.
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(OriginTag::None, kind, kind.constant_name())
    }
}
