//! Diagnostics
//!
//! Ordered, append-only collection of instance violations. Items keep the
//! order in which the validator discovered them, and that order is part of
//! the output contract.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Violation Kinds
// =============================================================================

/// What kind of rule an instance broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    TypeMismatch,
    ConstMismatch,
    EnumMismatch,
    MissingRequired,
    AdditionalProperty,
    /// Object keywords applied to a non-object
    NotAnObject,
    /// Array keywords applied to a non-array
    NotAnArray,
    DuplicateItem,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "type-mismatch",
            Self::ConstMismatch => "const-mismatch",
            Self::EnumMismatch => "enum-mismatch",
            Self::MissingRequired => "missing-required",
            Self::AdditionalProperty => "additional-property",
            Self::NotAnObject => "not-an-object",
            Self::NotAnArray => "not-an-array",
            Self::DuplicateItem => "duplicate-item",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Instance Paths
// =============================================================================

/// Location of a value inside the instance, rooted at `$`.
///
/// Object members append `.key`, array elements append `[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstancePath(String);

impl InstancePath {
    pub fn root() -> Self {
        Self("$".to_string())
    }

    pub fn property(&self, key: &str) -> Self {
        Self(format!("{}.{}", self.0, key))
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstancePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single violation at one instance position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: InstancePath,
    pub kind: ViolationKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: InstancePath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Violations found by one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, item: Diagnostic) {
        self.items.push(item);
    }

    /// Append a violation at `path`
    pub fn record(&mut self, path: &InstancePath, kind: ViolationKind, message: impl Into<String>) {
        self.push(Diagnostic::new(path.clone(), kind, message));
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Diagnostics reported at exactly `path`
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.items.iter().filter(move |d| d.path.as_str() == path)
    }

    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    /// One `<path>: <message>` line per diagnostic
    pub fn format_all(&self) -> String {
        let mut output = String::new();
        for item in &self.items {
            output.push_str(&format!("{}\n", item));
        }
        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_all())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
