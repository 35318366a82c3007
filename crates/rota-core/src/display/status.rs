//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Severity of an operation feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Wrapper type for displaying operation confirmation messages.
///
/// This provides consistent formatting for operations that require
/// user confirmation or status updates. Warnings exist for operations
/// that succeed but leave the schedule in a state worth flagging, such
/// as an edit whose future occurrence set came out empty.
pub struct OperationStatus {
    pub message: String,
    pub severity: Severity,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            severity: Severity::Success,
        }
    }

    /// Create a new warning status.
    pub fn warning(message: String) -> Self {
        Self {
            message,
            severity: Severity::Warning,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Success => "Success:",
            Severity::Warning => "Warning:",
            Severity::Error => "Error:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
