//! End-to-end integration test for the PMTA error taxonomy.
//!
//! Drives the public API the way a binding does, without a real mail
//! service or scripting host. Exercises:
//!
//! 1. Taxonomy constants read back from the general class
//! 2. Propagating and slot delivery through a wrapped submission client
//! 3. Unregistered service codes
//! 4. Registration on a host that enforces final classes
//!
//! Run with: cargo test --test e2e_integration

use pmta_error::host::{register, raise_in, Host};
use pmta_error::{raise, taxonomy, ErrorKind, ErrorSignal, OriginTag};
use std::collections::HashMap;

// ============================================================================
// A fake submission client that reports failures with raw service codes
// ============================================================================

struct Submission {
    recipients: Vec<String>,
    submitted: bool,
}

impl Submission {
    fn new() -> Self {
        Self {
            recipients: Vec::new(),
            submitted: false,
        }
    }

    fn add_recipient(&mut self, addr: &str) -> Result<(), ErrorSignal> {
        if self.submitted {
            raise(
                OriginTag::Recipient,
                ErrorKind::IllegalState.code(),
                "message already submitted",
                None,
            )?;
        }
        if !addr.contains('@') {
            raise(
                OriginTag::Recipient,
                ErrorKind::EmailAddress.code(),
                &format!("invalid address: {}", addr),
                None,
            )?;
        }
        self.recipients.push(addr.to_string());
        Ok(())
    }

    /// Submit, reporting failure through `error` instead of returning it.
    fn submit(&mut self, service_code: i64, error: &mut Option<ErrorSignal>) -> bool {
        if service_code != 0 {
            raise(
                OriginTag::Connection,
                service_code,
                "server rejected message",
                Some(error),
            )
            .expect("slot delivery returns Ok");
            return false;
        }
        self.submitted = true;
        true
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

#[test]
fn test_constants_stable_for_process_lifetime() {
    let first: Vec<i64> = ErrorKind::ALL
        .iter()
        .map(|k| taxonomy::global().constant(k.constant_name()).unwrap())
        .collect();

    let _ = raise(OriginTag::None, 1, "noise", None);

    let second: Vec<i64> = ErrorKind::ALL
        .iter()
        .map(|k| taxonomy::global().constant(k.constant_name()).unwrap())
        .collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2, 3, 4, 5, 6, 7, 1000]);
}

// ============================================================================
// Delivery through a wrapped client
// ============================================================================

#[test]
fn test_recipient_error_propagates_to_handler() {
    fn run(addrs: &[&str]) -> Result<usize, ErrorSignal> {
        let mut submission = Submission::new();
        for addr in addrs {
            submission.add_recipient(addr)?;
        }
        Ok(submission.recipients.len())
    }

    assert_eq!(run(&["a@example.com", "b@example.com"]), Ok(2));

    let err = run(&["a@example.com", "nobody"]).unwrap_err();
    assert!(err.is_recipient());
    assert!(err.is_instance_of(OriginTag::None));
    assert_eq!(err.kind(), Some(ErrorKind::EmailAddress));
    assert_eq!(err.message(), "invalid address: nobody");
}

#[test]
fn test_illegal_state_after_submit() {
    let mut submission = Submission::new();
    submission.add_recipient("a@example.com").unwrap();

    let mut error = None;
    assert!(submission.submit(0, &mut error));
    assert!(error.is_none());

    let err = submission.add_recipient("late@example.com").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::IllegalState));
}

#[test]
fn test_connection_error_written_to_slot() {
    let mut submission = Submission::new();
    let mut error = None;

    assert!(!submission.submit(ErrorKind::Service.code(), &mut error));
    let signal = error.expect("submit should report through the slot");
    assert!(signal.is_connection());
    assert_eq!(signal.code(), 6);
    assert_eq!(signal.kind(), Some(ErrorKind::Service));
}

#[test]
fn test_unregistered_service_code_survives() {
    let mut submission = Submission::new();
    let mut error = None;

    submission.submit(7331, &mut error);
    let signal = error.unwrap();
    assert_eq!(signal.code(), 7331);
    assert_eq!(signal.kind(), None);
    assert_eq!(taxonomy::global().name_for_code(7331), None);

    let json = serde_json::to_string(&signal).unwrap();
    assert!(json.contains("7331"));
}

// ============================================================================
// Host registration
// ============================================================================

/// A host that refuses to extend final classes, like a real runtime.
#[derive(Default)]
struct StrictHost {
    classes: Vec<(String, Option<usize>, bool)>,
    constants: HashMap<(usize, String), i64>,
}

#[derive(Debug)]
struct HostObject {
    class: usize,
    props: HashMap<String, String>,
}

#[derive(Debug)]
enum HostError {
    FinalParent(String),
    Thrown(HostObject),
    Binding(ErrorSignal),
}

impl StrictHost {
    fn is_instance(&self, object: &HostObject, class: &str) -> bool {
        let mut current = Some(object.class);
        while let Some(idx) = current {
            if self.classes[idx].0 == class {
                return true;
            }
            current = self.classes[idx].1;
        }
        false
    }
}

impl Host for StrictHost {
    type Class = usize;
    type Object = HostObject;
    type Error = HostError;

    fn base_exception_class(&self) -> Option<usize> {
        self.classes.iter().position(|c| c.0 == "RuntimeException")
    }

    fn declare_class(
        &mut self,
        name: &str,
        parent: Option<&usize>,
        sealed: bool,
    ) -> Result<usize, HostError> {
        if let Some(&p) = parent {
            if self.classes[p].2 {
                return Err(HostError::FinalParent(self.classes[p].0.clone()));
            }
        }
        self.classes.push((name.to_string(), parent.copied(), sealed));
        Ok(self.classes.len() - 1)
    }

    fn declare_class_constant(
        &mut self,
        class: &usize,
        name: &str,
        value: i64,
    ) -> Result<(), HostError> {
        self.constants.insert((*class, name.to_string()), value);
        Ok(())
    }

    fn create_instance(&mut self, class: &usize) -> Result<HostObject, HostError> {
        Ok(HostObject {
            class: *class,
            props: HashMap::new(),
        })
    }

    fn set_string_property(
        &mut self,
        object: &mut HostObject,
        name: &str,
        value: &str,
    ) -> Result<(), HostError> {
        object.props.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_int_property(
        &mut self,
        object: &mut HostObject,
        name: &str,
        value: i64,
    ) -> Result<(), HostError> {
        object.props.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn throw_as_control_signal(&mut self, object: HostObject) -> HostError {
        HostError::Thrown(object)
    }

    fn binding_error(&mut self, signal: ErrorSignal) -> HostError {
        HostError::Binding(signal)
    }
}

#[test]
fn test_host_registration_and_delivery() {
    let mut host = StrictHost::default();
    host.declare_class("Exception", None, false).unwrap();
    host.declare_class("RuntimeException", Some(&0), false).unwrap();

    let classes = register(&mut host).unwrap();
    let general = *classes.get(OriginTag::None).unwrap();

    // General error extends the host's runtime exception
    assert_eq!(host.classes[general].1, Some(1));
    for kind in ErrorKind::ALL {
        assert_eq!(
            host.constants.get(&(general, kind.constant_name().to_string())),
            Some(&kind.code())
        );
    }

    // Final subtypes cannot be extended on the host either
    let conn = *classes.get(OriginTag::Connection).unwrap();
    assert!(matches!(
        host.declare_class("MyConnError", Some(&conn), false),
        Err(HostError::FinalParent(ref name)) if name == "PmtaErrorConnection"
    ));
    assert!(host.declare_class("MyError", Some(&general), false).is_ok());

    // Thrown
    let signal = ErrorSignal::new(OriginTag::None, 5, "x");
    match raise_in(&mut host, &classes, &signal, None) {
        Err(HostError::Thrown(obj)) => {
            assert_eq!(obj.props["code"], "5");
            assert_eq!(obj.props["message"], "x");
            assert!(host.is_instance(&obj, "PmtaError"));
            assert!(host.is_instance(&obj, "Exception"));
        }
        other => panic!("expected thrown object, got {:?}", other),
    }

    // Slot
    let signal = ErrorSignal::new(OriginTag::Message, 3, "bad body");
    let mut slot = None;
    raise_in(&mut host, &classes, &signal, Some(&mut slot)).unwrap();
    let obj = slot.unwrap();
    assert!(host.is_instance(&obj, "PmtaErrorMessage"));
    assert!(host.is_instance(&obj, "PmtaError"));
    assert!(!host.is_instance(&obj, "PmtaErrorRecipient"));
}
