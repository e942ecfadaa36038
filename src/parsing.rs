use kube::core::DynamicObject;
use serde_json::Value;

use crate::errors::ParseWarning;
use crate::types::{ConstraintInstance, Violation};

/// A successfully parsed constraint plus any non-fatal problems found in
/// its status. The caller decides how to surface the warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConstraint {
    pub instance: ConstraintInstance,
    pub warnings: Vec<ParseWarning>,
}

/// Convert one listed constraint document into a typed instance.
///
/// Metadata is structurally guaranteed by the API server apart from the
/// name, which is the only per-document fatal condition. Everything under
/// `spec` and `status` is navigated defensively: a constraint that has
/// never been evaluated carries no status at all.
pub fn parse_constraint(
    doc: &DynamicObject,
    fallback_kind: &str,
) -> Result<ParsedConstraint, ParseWarning> {
    let name = doc.metadata.name.clone().ok_or(ParseWarning::MissingName)?;
    let namespace = doc.metadata.namespace.clone();
    let kind = doc
        .types
        .as_ref()
        .map(|t| t.kind.clone())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| fallback_kind.to_string());

    let enforcement_action = doc
        .data
        .pointer("/spec/enforcementAction")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut warnings = Vec::new();

    let total_violations = match doc.data.pointer("/status/totalViolations") {
        None | Some(Value::Null) => 0,
        Some(raw) => match parse_total_violations(raw) {
            Some(n) => n,
            None => {
                warnings.push(ParseWarning::BadTotalViolations(raw.to_string()));
                0
            }
        },
    };

    // With no recorded violations the list may be absent or empty; skip it.
    let violations = if total_violations > 0 {
        parse_violation_list(doc.data.pointer("/status/violations"), &mut warnings)
    } else {
        Vec::new()
    };

    Ok(ParsedConstraint {
        instance: ConstraintInstance {
            kind,
            name,
            namespace,
            enforcement_action,
            total_violations,
            violations,
        },
        warnings,
    })
}

/// Gatekeeper serializes the total as a JSON number (historically a float).
/// Anything non-numeric or negative is rejected.
fn parse_total_violations(raw: &Value) -> Option<u64> {
    let n = raw.as_f64()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n as u64)
}

fn parse_violation_list(raw: Option<&Value>, warnings: &mut Vec<ParseWarning>) -> Vec<Violation> {
    let entries = match raw.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut violations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Violation>(entry.clone()) {
            Ok(v) => violations.push(v),
            Err(err) => warnings.push(ParseWarning::MalformedViolation {
                index,
                reason: err.to_string(),
            }),
        }
    }
    violations
}
