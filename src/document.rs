//! Document loading
//!
//! Reads schema and instance documents fully into memory. A schema file may
//! also be a descriptor that points at the real schema:
//!
//! ```json
//! { "schema_path": "boundary_object.json" }
//! { "schema": { "type": "object", "required": ["probe"] } }
//! ```
//!
//! `schema_path` is resolved against the descriptor's directory and wins over
//! an inline `schema`.

use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SchemaError};

/// Where an instance document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `-` means standard input
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }

    /// Read and parse the whole document
    pub fn read_json(&self) -> Result<Value> {
        match self {
            Source::File(path) => load_json(path),
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(serde_json::from_str(&buf)?)
            }
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Parse a JSON file
pub fn load_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a schema document, unwrapping a descriptor when asked to
pub fn load_schema(path: &Path, descriptor: bool) -> Result<Value> {
    let document = load_json(path)?;
    if !descriptor {
        return Ok(document);
    }
    unwrap_descriptor(document, path)
}

/// Extract the schema a descriptor refers to
pub fn unwrap_descriptor(mut document: Value, descriptor_path: &Path) -> Result<Value> {
    if let Some(schema_path) = document.get("schema_path") {
        let schema_path = schema_path.as_str().ok_or_else(|| {
            SchemaError::InvalidDescriptor(format!(
                "{}: schema_path must be a string",
                descriptor_path.display()
            ))
        })?;
        let resolved = resolve_relative(descriptor_path, Path::new(schema_path));
        debug!(descriptor = %descriptor_path.display(), schema = %resolved.display(), "loading schema referenced by descriptor");
        return load_json(&resolved);
    }

    match document.get_mut("schema").map(Value::take) {
        Some(inline) => Ok(inline),
        None => Err(SchemaError::InvalidDescriptor(format!(
            "{} missing 'schema' or 'schema_path' field",
            descriptor_path.display()
        ))),
    }
}

fn resolve_relative(base_file: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match base_file.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}
