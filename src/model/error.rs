//! Error taxonomy for registry and controller operations.
//!
//! Validation *findings* are never errors: rules return structured
//! [`crate::validation::ValidationReport`] data so callers can render the
//! issue list. [`LayoutError`] covers only the genuinely exceptional
//! conditions that abort an operation outright — unknown ids on
//! destructive calls, immutable-layout violations, malformed import
//! payloads, and error-severity validation results gating an apply or
//! import. No operation partially mutates state on failure, and errors
//! never reach the transition planner or animator: by the time a plan
//! executes, the target layout is already known-valid.

use thiserror::Error;

use crate::model::identifiers::LayoutId;
use crate::model::layout::LayoutKind;
use crate::validation::ValidationIssue;

/// Failure modes for registry and controller operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// An unknown id was passed to a get/edit/delete/export call.
    #[error("Layout not found: {id}")]
    NotFound {
        /// The id that missed the registry.
        id: LayoutId,
    },

    /// Applying or importing a layout was rejected because validation
    /// reported error-severity issues. The operation is rejected in full;
    /// registry and controller state are left untouched.
    #[error("Layout rejected by validation: {} error-severity issue(s)", issues.len())]
    Validation {
        /// The error-severity issues that caused the rejection.
        issues: Vec<ValidationIssue>,
    },

    /// An edit or delete was attempted on a non-custom layout.
    ///
    /// Deletes fail outright; edits are redirected to an implicit
    /// duplicate-then-edit by the registry instead of surfacing this.
    #[error("Layout '{id}' is {kind} and cannot be modified")]
    ImmutableLayout {
        /// The immutable layout's id.
        id: LayoutId,
        /// Its kind (built-in or template).
        kind: LayoutKind,
    },

    /// An import payload was missing required fields or carried an
    /// unsupported snapshot version.
    #[error("Malformed layout snapshot: {reason}")]
    MalformedSnapshot {
        /// Why the payload was rejected.
        reason: String,
    },
}

impl LayoutError {
    /// Shorthand for [`LayoutError::NotFound`].
    pub fn not_found(id: &LayoutId) -> Self {
        Self::NotFound { id: id.clone() }
    }

    /// Shorthand for [`LayoutError::MalformedSnapshot`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let err = LayoutError::not_found(&LayoutId::new("missing").unwrap());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn immutable_layout_names_id_and_kind() {
        let err = LayoutError::ImmutableLayout {
            id: LayoutId::new("spotlight").unwrap(),
            kind: LayoutKind::BuiltIn,
        };
        let msg = err.to_string();
        assert!(msg.contains("spotlight"));
        assert!(msg.contains("built-in"));
    }

    #[test]
    fn validation_reports_issue_count() {
        let err = LayoutError::Validation { issues: vec![] };
        assert!(err.to_string().contains("0 error-severity issue(s)"));
    }

    #[test]
    fn malformed_snapshot_carries_reason() {
        let err = LayoutError::malformed("missing field `layout`");
        assert!(err.to_string().contains("missing field `layout`"));
    }
}
