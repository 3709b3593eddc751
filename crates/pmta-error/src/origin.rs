//! Origin tags for contextual error subtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a failure happened.
///
/// `None` is the general error. The other three are the contextual subtypes
/// (connection, recipient, message body handling). Subtypes add no fields;
/// they only let a handler pick out the failures it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OriginTag {
    #[default]
    None,
    Connection,
    Recipient,
    Message,
}

impl OriginTag {
    pub const ALL: [OriginTag; 4] = [
        OriginTag::None,
        OriginTag::Connection,
        OriginTag::Recipient,
        OriginTag::Message,
    ];

    /// Class name the tag is registered under in a host runtime.
    pub const fn class_name(self) -> &'static str {
        match self {
            OriginTag::None => "PmtaError",
            OriginTag::Connection => "PmtaErrorConnection",
            OriginTag::Recipient => "PmtaErrorRecipient",
            OriginTag::Message => "PmtaErrorMessage",
        }
    }

    /// The tag this one specializes, if any.
    pub const fn parent(self) -> Option<OriginTag> {
        match self {
            OriginTag::None => None,
            _ => Some(OriginTag::None),
        }
    }

    /// Contextual subtypes are final.
    pub const fn is_sealed(self) -> bool {
        !matches!(self, OriginTag::None)
    }

    /// Whether a value tagged `self` satisfies a handler for `ancestor`.
    ///
    /// Every tag is an instance of itself and of the general error.
    pub fn is_a(self, ancestor: OriginTag) -> bool {
        self == ancestor || self.parent() == Some(ancestor)
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.class_name() == name)
    }
}

impl fmt::Display for OriginTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
