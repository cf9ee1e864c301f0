//! Pluggable layout validation.
//!
//! The engine is a registered list of independent rules, each a pure
//! check over a [`LayoutDefinition`] and the component catalog. Rules are
//! evaluated in registration order and aggregated into a
//! [`ValidationReport`]; results are always returned as data, never
//! thrown, so callers can render the issue list to the user.
//!
//! A panicking rule must not abort the remaining rules: the engine
//! isolates each rule with `catch_unwind` and records the failure as an
//! error-severity issue.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::model::{ComponentCatalog, ComponentKey, LayoutDefinition};

pub mod rules;

/// How severe a validation finding is.
///
/// Errors gate applying or importing a layout; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding; the layout may still be applied.
    Warning,
    /// Blocking finding; apply/import is rejected.
    Error,
}

/// One finding from one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Id of the rule that produced the finding.
    pub rule: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// The component the finding concerns, when it concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentKey>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Build an issue for a specific component.
    pub fn component(
        rule: &str,
        severity: Severity,
        component: &ComponentKey,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            component: Some(component.clone()),
            message: message.into(),
        }
    }

    /// Build a layout-wide issue.
    pub fn layout(rule: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            component: None,
            message: message.into(),
        }
    }
}

/// Result of a single rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Whether the rule found nothing.
    pub valid: bool,
    /// The findings, possibly empty.
    pub issues: Vec<ValidationIssue>,
}

impl RuleOutcome {
    /// Outcome with no findings.
    pub fn pass() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Outcome from a list of findings (empty list passes).
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Check function signature shared by all rules.
pub type RuleCheck =
    Box<dyn Fn(&LayoutDefinition, &ComponentCatalog) -> RuleOutcome + Send + Sync>;

/// One registered rule: an id plus an independent check predicate.
///
/// Rules are deliberately *not* a class hierarchy; a rule is its check
/// function, and the engine treats every rule identically.
pub struct ValidationRule {
    id: &'static str,
    check: RuleCheck,
}

impl ValidationRule {
    /// Register a rule under `id`.
    pub fn new(
        id: &'static str,
        check: impl Fn(&LayoutDefinition, &ComponentCatalog) -> RuleOutcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            check: Box::new(check),
        }
    }

    /// The rule's id, used in findings and failure reports.
    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl std::fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRule")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Aggregated result of evaluating every registered rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the layout may be applied (no error-severity issues).
    pub valid: bool,
    /// Whether any error-severity issue was found.
    pub has_errors: bool,
    /// Whether any warning-severity issue was found.
    pub has_warnings: bool,
    /// Every finding from every rule, in rule registration order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Aggregate a flat issue list into a report.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let has_errors = issues.iter().any(|i| i.severity == Severity::Error);
        let has_warnings = issues.iter().any(|i| i.severity == Severity::Warning);
        Self {
            valid: !has_errors,
            has_errors,
            has_warnings,
            issues,
        }
    }

    /// Only the error-severity issues, cloned for rejection payloads.
    pub fn errors(&self) -> Vec<ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .cloned()
            .collect()
    }
}

/// Stateless engine over a registered rule list.
#[derive(Debug)]
pub struct ValidationEngine {
    rules: Vec<ValidationRule>,
}

impl ValidationEngine {
    /// An engine with no rules (everything passes).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// An engine preloaded with the canonical rule set.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::empty();
        for rule in rules::default_rules() {
            engine.register(rule);
        }
        engine
    }

    /// Append a rule; later registrations run after earlier ones.
    pub fn register(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule against `layout` and aggregate the findings.
    ///
    /// A rule that panics is recorded as an error-severity issue under
    /// its own id and the remaining rules still run.
    pub fn validate(
        &self,
        layout: &LayoutDefinition,
        catalog: &ComponentCatalog,
    ) -> ValidationReport {
        let mut issues = Vec::new();
        for rule in &self.rules {
            match catch_unwind(AssertUnwindSafe(|| (rule.check)(layout, catalog))) {
                Ok(outcome) => issues.extend(outcome.issues),
                Err(panic) => {
                    let detail = panic_message(panic.as_ref());
                    tracing::error!(rule = rule.id(), detail, "validation rule panicked");
                    issues.push(ValidationIssue::layout(
                        rule.id(),
                        Severity::Error,
                        format!("rule failed to evaluate: {detail}"),
                    ));
                }
            }
        }
        ValidationReport::from_issues(issues)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
