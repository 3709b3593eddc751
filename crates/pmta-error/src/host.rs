//! Boundary with a host runtime's object and exception system
//!
//! A scripting host exposes the error taxonomy as real classes. This module
//! replays the [`Taxonomy`] onto any host implementing [`Host`], and turns an
//! [`ErrorSignal`] into a host object that is either thrown or handed back
//! through an output slot.
//!
//! The host owns reflection, inheritance and object lifetime; nothing here
//! tries to model them.

use crate::kind::ErrorKind;
use crate::origin::OriginTag;
use crate::signal::ErrorSignal;
use crate::taxonomy::{self, Taxonomy};
use std::collections::HashMap;

/// Operations a host runtime provides for error classes.
pub trait Host {
    /// Handle to a registered class
    type Class: Clone;
    /// Handle to an object instance
    type Object;
    /// Host failure, including a thrown exception in flight
    type Error;

    /// The runtime-exception base the general error class should extend.
    ///
    /// `None` means the host's default exception base is used.
    fn base_exception_class(&self) -> Option<Self::Class>;

    fn declare_class(
        &mut self,
        name: &str,
        parent: Option<&Self::Class>,
        sealed: bool,
    ) -> Result<Self::Class, Self::Error>;

    fn declare_class_constant(
        &mut self,
        class: &Self::Class,
        name: &str,
        value: i64,
    ) -> Result<(), Self::Error>;

    fn create_instance(&mut self, class: &Self::Class) -> Result<Self::Object, Self::Error>;

    fn set_string_property(
        &mut self,
        object: &mut Self::Object,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn set_int_property(
        &mut self,
        object: &mut Self::Object,
        name: &str,
        value: i64,
    ) -> Result<(), Self::Error>;

    /// Start unwinding with `object`. The returned error is what the binding
    /// propagates back into the host.
    fn throw_as_control_signal(&mut self, object: Self::Object) -> Self::Error;

    /// Report a failure of the binding itself, when no error object can be
    /// built for it.
    fn binding_error(&mut self, signal: ErrorSignal) -> Self::Error;
}

/// Host class handles for each origin tag, as returned by [`register`].
#[derive(Debug, Clone)]
pub struct HostClasses<C> {
    classes: HashMap<OriginTag, C>,
}

impl<C> HostClasses<C> {
    /// Handle for an origin tag. Every tag is present after [`register`].
    pub fn get(&self, tag: OriginTag) -> Option<&C> {
        self.classes.get(&tag)
    }
}

/// Declare the global taxonomy on `host`.
///
/// Call once while the host is initializing its module; classes cannot be
/// redeclared.
pub fn register<H: Host>(host: &mut H) -> Result<HostClasses<H::Class>, H::Error> {
    register_taxonomy(host, taxonomy::global())
}

/// Declare an arbitrary taxonomy on `host`.
///
/// Classes are declared in table order; the table keeps parents before
/// children. A root class extends the host's exception base.
pub fn register_taxonomy<H: Host>(
    host: &mut H,
    taxonomy: &Taxonomy,
) -> Result<HostClasses<H::Class>, H::Error> {
    let base = host.base_exception_class();
    let mut declared: HashMap<&str, H::Class> = HashMap::new();

    // A built Taxonomy lists parents before children and only holds
    // constants on declared classes, so both lookups below always hit.
    for class in taxonomy.classes() {
        let parent = match class.parent.as_deref() {
            Some(name) => {
                debug_assert!(declared.contains_key(name), "parent {} not declared", name);
                declared.get(name).cloned()
            }
            None => base.clone(),
        };
        let handle = host.declare_class(&class.name, parent.as_ref(), class.sealed)?;
        declared.insert(class.name.as_str(), handle);
    }

    for constant in taxonomy.constants() {
        debug_assert!(declared.contains_key(constant.class.as_str()));
        if let Some(class) = declared.get(constant.class.as_str()) {
            host.declare_class_constant(class, &constant.name, constant.value)?;
        }
    }

    log::debug!(
        "Declared {} classes and {} constants on host",
        declared.len(),
        taxonomy.constants().len()
    );

    let classes = OriginTag::ALL
        .into_iter()
        .filter_map(|tag| declared.get(tag.class_name()).map(|c| (tag, c.clone())))
        .collect();
    Ok(HostClasses { classes })
}

/// Materialize `signal` as a host object and deliver it.
///
/// With no slot the object is thrown and the host's error is returned. With
/// a slot the object is stored and `Ok(())` is returned.
pub fn raise_in<H: Host>(
    host: &mut H,
    classes: &HostClasses<H::Class>,
    signal: &ErrorSignal,
    slot: Option<&mut Option<H::Object>>,
) -> Result<(), H::Error> {
    // Fall back to the general class if the tag's class was not registered
    let class = classes
        .get(signal.origin())
        .or_else(|| classes.get(OriginTag::None))
        .cloned();
    let Some(class) = class else {
        log::error!("No host class registered for {}", signal.class_name());
        return Err(host.binding_error(ErrorSignal::from_kind(
            OriginTag::None,
            ErrorKind::HostApiMisuse,
            format!("error class {} is not registered", signal.class_name()),
        )));
    };

    let mut object = host.create_instance(&class)?;
    host.set_string_property(&mut object, "message", signal.message())?;
    host.set_int_property(&mut object, "code", signal.code())?;

    match slot {
        Some(slot) => {
            *slot = Some(object);
            Ok(())
        }
        None => Err(host.throw_as_control_signal(object)),
    }
}
