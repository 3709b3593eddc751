//! PMTA Error
//!
//! Error taxonomy for the PowerMTA submission API, and the contract for
//! constructing and delivering error signals.
//!
//! # Model
//!
//! - [`ErrorKind`]: failure categories with their numeric codes
//! - [`OriginTag`]: general error, or a connection/recipient/message subtype
//! - [`ErrorSignal`]: origin + raw code + message, immutable once built
//!
//! # Delivery
//!
//! [`raise`] builds a signal and either returns it as `Err` (the caller
//! propagates with `?`) or stores it in an output slot and returns `Ok`.
//!
//! ```
//! use pmta_error::{raise, ErrorSignal, OriginTag};
//!
//! fn add_recipient(addr: &str) -> Result<(), ErrorSignal> {
//!     if !addr.contains('@') {
//!         raise(OriginTag::Recipient, 7, "invalid address", None)?;
//!     }
//!     Ok(())
//! }
//!
//! let err = add_recipient("nobody").unwrap_err();
//! assert!(err.is_recipient());
//! assert!(err.is_instance_of(OriginTag::None));
//! ```
//!
//! # Host runtimes
//!
//! [`host`] replays the taxonomy onto a scripting host's class system and
//! turns signals into host exception objects.

pub mod delivery;
pub mod host;
pub mod kind;
pub mod origin;
pub mod signal;
pub mod taxonomy;

pub use delivery::{deliver, raise, Delivery};
pub use host::{register, raise_in, Host, HostClasses};
pub use kind::{ErrorKind, ParseKindError};
pub use origin::OriginTag;
pub use signal::ErrorSignal;
pub use taxonomy::{RegistrationError, Taxonomy, TaxonomyBuilder};

/// Result of an operation that can fail with an [`ErrorSignal`].
pub type Result<T> = std::result::Result<T, ErrorSignal>;
