//! Rendering taxonomy queries as text or JSON

use anyhow::{Context, Result};
use pmta_error::{ErrorKind, Taxonomy};
use serde::Serialize;
use std::fmt::Write;

/// What is known about a code or constant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub code: i64,
    pub name: Option<String>,
    pub kind: Option<ErrorKind>,
    pub registered: bool,
}

/// Resolve a numeric code or a constant name.
///
/// Unknown numeric codes resolve to an unregistered description; the service
/// may report codes the table does not list. Unknown names are an error.
pub fn describe(taxonomy: &Taxonomy, query: &str) -> Result<Description> {
    let query = query.trim();
    let code = match query.parse::<i64>() {
        Ok(code) => code,
        Err(_) => {
            let kind = query.parse::<ErrorKind>().context("Not a code or constant name")?;
            kind.code()
        }
    };

    let name = taxonomy.name_for_code(code).map(str::to_string);
    Ok(Description {
        code,
        registered: name.is_some(),
        name,
        kind: ErrorKind::from_code(code),
    })
}

pub fn render_constants(taxonomy: &Taxonomy, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(taxonomy.constants())?);
    }
    let mut out = String::new();
    for c in taxonomy.constants() {
        writeln!(out, "{}::{:<18} {:>5}", c.class, c.name, c.value)?;
    }
    Ok(out)
}

pub fn render_classes(taxonomy: &Taxonomy, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(taxonomy.classes())?);
    }
    let mut out = String::new();
    for c in taxonomy.classes() {
        let parent = c.parent.as_deref().unwrap_or("-");
        let sealed = if c.sealed { " (final)" } else { "" };
        writeln!(out, "{:<20} extends {}{}", c.name, parent, sealed)?;
    }
    Ok(out)
}

pub fn render_description(desc: &Description, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(desc)?);
    }
    Ok(match (&desc.name, desc.kind) {
        (Some(name), Some(kind)) => format!("{}: {} ({:?})\n", desc.code, name, kind),
        (Some(name), None) => format!("{}: {}\n", desc.code, name),
        _ => format!("{}: unregistered code\n", desc.code),
    })
}
