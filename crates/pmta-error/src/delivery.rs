//! Delivering an error signal to the caller
//!
//! A signal is either propagated (returned as `Err` for the caller to `?`
//! up to whatever handler matches its origin) or written into an output
//! slot the caller inspects after a normal return. The call site picks the
//! mode; construction of the signal itself never depends on it.

use crate::origin::OriginTag;
use crate::signal::ErrorSignal;

/// How a signal reaches the caller.
#[derive(Debug)]
pub enum Delivery<'a> {
    /// Return the signal as `Err`
    Propagate,
    /// Store the signal and return `Ok`
    Slot(&'a mut Option<ErrorSignal>),
}

impl<'a> From<Option<&'a mut Option<ErrorSignal>>> for Delivery<'a> {
    fn from(slot: Option<&'a mut Option<ErrorSignal>>) -> Self {
        match slot {
            Some(slot) => Delivery::Slot(slot),
            None => Delivery::Propagate,
        }
    }
}

/// Deliver an already constructed signal.
pub fn deliver(signal: ErrorSignal, delivery: Delivery<'_>) -> Result<(), ErrorSignal> {
    match delivery {
        Delivery::Propagate => {
            log::trace!("propagating {}", signal);
            Err(signal)
        }
        Delivery::Slot(slot) => {
            log::trace!("storing {} in output slot", signal);
            *slot = Some(signal);
            Ok(())
        }
    }
}

/// Construct a signal of `class` and deliver it.
///
/// Without a slot this returns `Err` carrying the new signal. With a slot the
/// signal is stored there, overwriting anything already present, and the
/// call returns `Ok(())`.
pub fn raise(
    class: OriginTag,
    code: i64,
    message: &str,
    slot: Option<&mut Option<ErrorSignal>>,
) -> Result<(), ErrorSignal> {
    deliver(ErrorSignal::new(class, code, message), slot.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ErrorKind;

    fn wrapped_operation() -> Result<u32, ErrorSignal> {
        raise(OriginTag::None, 5, "x", None)?;
        Ok(1)
    }

    #[test]
    fn test_raise_without_slot_unwinds() {
        let err = wrapped_operation().unwrap_err();
        assert_eq!(err.code(), 5);
        assert_eq!(err.message(), "x");
        assert!(err.is_instance_of(OriginTag::None));
    }

    #[test]
    fn test_raise_with_slot_returns_normally() {
        let mut slot = None;
        raise(OriginTag::Connection, 7, "y", Some(&mut slot)).unwrap();

        let signal = slot.expect("slot should be filled");
        assert_eq!(signal.code(), 7);
        assert_eq!(signal.message(), "y");
        assert_eq!(signal.origin(), OriginTag::Connection);
        assert!(signal.is_instance_of(OriginTag::None));
    }

    #[test]
    fn test_slot_is_overwritten() {
        let mut slot = Some(ErrorSignal::from(ErrorKind::IO));
        raise(OriginTag::Message, 3, "bad header", Some(&mut slot)).unwrap();
        assert_eq!(slot.unwrap().code(), 3);
    }

    #[test]
    fn test_handler_selects_by_origin() {
        fn submit() -> Result<(), ErrorSignal> {
            raise(OriginTag::Recipient, 7, "bad rcpt", None)
        }

        let handled = match submit() {
            Err(e) if e.is_connection() => "connection",
            Err(e) if e.is_recipient() => "recipient",
            Err(_) => "general",
            Ok(()) => "none",
        };
        assert_eq!(handled, "recipient");
    }

    #[test]
    fn test_deliver_prebuilt_signal() {
        let signal = ErrorSignal::from_kind(OriginTag::None, ErrorKind::Service, "down");
        assert_eq!(
            deliver(signal.clone(), Delivery::Propagate),
            Err(signal.clone())
        );

        let mut slot = None;
        assert!(deliver(signal.clone(), Delivery::Slot(&mut slot)).is_ok());
        assert_eq!(slot, Some(signal));
    }
}
