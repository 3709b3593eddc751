//! Error class table and published constants
//!
//! The taxonomy is declared once: the general `PmtaError` class carrying one
//! integer constant per [`ErrorKind`], plus three sealed subclasses for the
//! connection, recipient and message contexts.
//!
//! [`TaxonomyBuilder`] is the declaration surface. It rejects duplicate
//! names, unknown parents, and subclasses of sealed classes. [`Taxonomy`] is
//! the frozen result and has no mutating methods; [`global`] holds the
//! process-wide instance.
//!
//! # Example
//!
//! ```
//! use pmta_error::taxonomy;
//!
//! let table = taxonomy::global();
//! assert_eq!(table.constant("EMAIL_ADDRESS"), Some(7));
//! assert!(table.is_subclass_of("PmtaErrorConnection", "PmtaError"));
//! ```

use crate::kind::ErrorKind;
use crate::origin::OriginTag;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from declaring classes or constants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Class already declared: {0}")]
    DuplicateClass(String),

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Cannot extend sealed class {parent} (declaring {name})")]
    SealedParent { name: String, parent: String },

    #[error("Constant {class}::{name} already declared")]
    DuplicateConstant { class: String, name: String },
}

/// A declared error class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    pub parent: Option<String>,
    pub sealed: bool,
}

/// An integer constant published on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub class: String,
    pub name: String,
    pub value: i64,
}

/// Mutable declaration surface, consumed by [`TaxonomyBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TaxonomyBuilder {
    classes: Vec<ClassInfo>,
    constants: Vec<Constant>,
}

impl TaxonomyBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding the PowerMTA taxonomy.
    pub fn standard() -> Self {
        let general = OriginTag::None.class_name();
        let mut builder = Self::new();

        builder.classes.push(ClassInfo {
            name: general.to_string(),
            parent: None,
            sealed: false,
        });
        for kind in ErrorKind::ALL {
            builder.constants.push(Constant {
                class: general.to_string(),
                name: kind.constant_name().to_string(),
                value: kind.code(),
            });
        }
        for tag in [OriginTag::Connection, OriginTag::Recipient, OriginTag::Message] {
            builder.classes.push(ClassInfo {
                name: tag.class_name().to_string(),
                parent: Some(general.to_string()),
                sealed: tag.is_sealed(),
            });
        }

        builder
    }

    /// Declare a class, optionally extending an already declared one.
    pub fn declare_class(
        &mut self,
        name: &str,
        parent: Option<&str>,
        sealed: bool,
    ) -> Result<&mut Self, RegistrationError> {
        if self.find(name).is_some() {
            return Err(RegistrationError::DuplicateClass(name.to_string()));
        }

        if let Some(parent_name) = parent {
            let parent = self
                .find(parent_name)
                .ok_or_else(|| RegistrationError::UnknownClass(parent_name.to_string()))?;
            if parent.sealed {
                return Err(RegistrationError::SealedParent {
                    name: name.to_string(),
                    parent: parent_name.to_string(),
                });
            }
        }

        self.classes.push(ClassInfo {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            sealed,
        });
        Ok(self)
    }

    /// Publish an integer constant on a declared class.
    pub fn declare_constant(
        &mut self,
        class: &str,
        name: &str,
        value: i64,
    ) -> Result<&mut Self, RegistrationError> {
        if self.find(class).is_none() {
            return Err(RegistrationError::UnknownClass(class.to_string()));
        }
        if self
            .constants
            .iter()
            .any(|c| c.class == class && c.name == name)
        {
            return Err(RegistrationError::DuplicateConstant {
                class: class.to_string(),
                name: name.to_string(),
            });
        }

        self.constants.push(Constant {
            class: class.to_string(),
            name: name.to_string(),
            value,
        });
        Ok(self)
    }

    /// Freeze the declarations.
    pub fn build(self) -> Taxonomy {
        Taxonomy {
            classes: self.classes,
            constants: self.constants,
        }
    }

    fn find(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// Frozen class table and constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    classes: Vec<ClassInfo>,
    constants: Vec<Constant>,
}

impl Taxonomy {
    /// Constant on the general error class.
    pub fn constant(&self, name: &str) -> Option<i64> {
        self.class_constant(OriginTag::None.class_name(), name)
    }

    /// Constant on a specific class. Constants are not inherited here:
    /// subclasses inherit them in the host, but the table records where
    /// each one was declared.
    pub fn class_constant(&self, class: &str, name: &str) -> Option<i64> {
        self.constants
            .iter()
            .find(|c| c.class == class && c.name == name)
            .map(|c| c.value)
    }

    /// All constants, in declaration order.
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// All classes, parents before children.
    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    pub fn class_for(&self, tag: OriginTag) -> Option<&ClassInfo> {
        self.class(tag.class_name())
    }

    /// Whether `child` is `ancestor` or extends it, directly or indirectly.
    pub fn is_subclass_of(&self, child: &str, ancestor: &str) -> bool {
        let mut current = self.class(child);
        while let Some(class) = current {
            if class.name == ancestor {
                return true;
            }
            current = class.parent.as_deref().and_then(|p| self.class(p));
        }
        false
    }

    /// Code → constant name on the general class, for reporting.
    pub fn name_for_code(&self, code: i64) -> Option<&str> {
        let general = OriginTag::None.class_name();
        self.constants
            .iter()
            .find(|c| c.class == general && c.value == code)
            .map(|c| c.name.as_str())
    }
}

/// The process-wide taxonomy, built on first access and never modified.
pub fn global() -> &'static Taxonomy {
    static TAXONOMY: OnceLock<Taxonomy> = OnceLock::new();
    TAXONOMY.get_or_init(|| {
        let taxonomy = TaxonomyBuilder::standard().build();
        log::debug!(
            "Registered {} error classes and {} constants",
            taxonomy.classes.len(),
            taxonomy.constants.len()
        );
        taxonomy
    })
}
