//! Error kinds surfaced by the PowerMTA submission API
//!
//! Each kind has a symbolic constant name and a numeric code. The codes are
//! published as constants on the general error class (see [`crate::taxonomy`]),
//! but they are advisory: an [`crate::ErrorSignal`] may carry any code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure category reported by the mail service or by the binding itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The service could not allocate memory
    OutOfMemory,
    /// Operation called in the wrong state (e.g. recipient added after submit)
    IllegalState,
    /// Invalid argument passed to the service
    IllegalArgument,
    /// Authentication or authorization failure
    Security,
    /// I/O failure talking to the service
    IO,
    /// The service rejected or failed the request
    Service,
    /// Malformed email address
    EmailAddress,
    /// The binding API was misused by the host
    HostApiMisuse,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::OutOfMemory,
        ErrorKind::IllegalState,
        ErrorKind::IllegalArgument,
        ErrorKind::Security,
        ErrorKind::IO,
        ErrorKind::Service,
        ErrorKind::EmailAddress,
        ErrorKind::HostApiMisuse,
    ];

    /// Numeric code as reported by the service.
    pub const fn code(self) -> i64 {
        match self {
            ErrorKind::OutOfMemory => 1,
            ErrorKind::IllegalState => 2,
            ErrorKind::IllegalArgument => 3,
            ErrorKind::Security => 4,
            ErrorKind::IO => 5,
            ErrorKind::Service => 6,
            ErrorKind::EmailAddress => 7,
            // Binding-level code, kept clear of the service range
            ErrorKind::HostApiMisuse => 1000,
        }
    }

    /// Symbolic constant name published on the general error class.
    ///
    /// `HOST_API` is the binding-level constant the PHP extension published
    /// as `PHP_API`.
    pub const fn constant_name(self) -> &'static str {
        match self {
            ErrorKind::OutOfMemory => "OUT_OF_MEMORY",
            ErrorKind::IllegalState => "ILLEGAL_STATE",
            ErrorKind::IllegalArgument => "ILLEGAL_ARGUMENT",
            ErrorKind::Security => "SECURITY",
            ErrorKind::IO => "IO",
            ErrorKind::Service => "SERVICE",
            ErrorKind::EmailAddress => "EMAIL_ADDRESS",
            ErrorKind::HostApiMisuse => "HOST_API",
        }
    }

    /// Look up the kind for a numeric code.
    ///
    /// Returns `None` for codes the binding does not enumerate. That is not
    /// an error: the service may emit codes newer than this table.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constant_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown error kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ErrorKind {
    type Err = ParseKindError;

    /// Accepts the constant name (`EMAIL_ADDRESS`) or the variant name
    /// (`EmailAddress`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| {
                k.constant_name().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", k).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
