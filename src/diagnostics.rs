//! Names dropped during a generation run.
//!
//! Dropping is never an error. Each drop is recorded here so callers and tests
//! can see exactly what was left out, and logged at debug level.

use serde::{Deserialize, Serialize};

/// Why a candidate name did not make it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The sanitizer could not turn the name into an identifier.
    Unsanitizable,
    /// A field with the same name already exists in the class.
    Duplicate,
    /// A directory or bundle mapped to a class that already exists and was merged into it.
    MergedClass,
    /// A symlinked directory; its contents are not walked.
    LinkedDirectory,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Unsanitizable => "unsanitizable",
            SkipReason::Duplicate => "duplicate",
            SkipReason::MergedClass => "merged class",
            SkipReason::LinkedDirectory => "linked directory",
        }
    }
}

/// One dropped name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedName {
    /// Dotted class path the name was destined for, e.g. `R.style`.
    pub scope: String,
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub skipped: Vec<SkippedName>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(&mut self, scope: &str, name: &str, reason: SkipReason) {
        tracing::debug!(scope, name, reason = reason.as_str(), "Name skipped");
        self.skipped.push(SkippedName {
            scope: scope.to_string(),
            name: name.to_string(),
            reason,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
