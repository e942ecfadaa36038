use std::collections::HashSet;
use tracing::debug;

use crate::types::{ConstraintInstance, MetricFamily, MetricSample, Snapshot};

/// Build the metric snapshot for one cycle's constraint instances.
pub fn synthesize(constraints: &[ConstraintInstance]) -> Snapshot {
    let mut samples = violation_samples(constraints);
    samples.extend(information_samples(constraints));
    Snapshot { samples }
}

/// One sample per distinct violation, value fixed at 1.
///
/// The full label tuple is the identity of a violation: redundant reports
/// of the same breach within a cycle collapse to a single sample instead
/// of summing.
pub fn violation_samples(constraints: &[ConstraintInstance]) -> Vec<MetricSample> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut samples = Vec::new();

    for constraint in constraints {
        for violation in &constraint.violations {
            let label_values = vec![
                constraint.kind.clone(),
                constraint.name.clone(),
                violation.kind.clone(),
                violation.name.clone(),
                violation.namespace.clone().unwrap_or_default(),
                violation.message.clone(),
                violation.enforcement_action.clone(),
            ];
            if !seen.insert(label_values.clone()) {
                debug!(
                    "Found duplicate violation for {}/{}, dropping",
                    constraint.kind, constraint.name
                );
                continue;
            }
            samples.push(MetricSample {
                family: MetricFamily::ConstraintViolation,
                label_values,
                value: 1.0,
            });
        }
    }
    samples
}

/// One summary sample per constraint instance, value = total violations.
pub fn information_samples(constraints: &[ConstraintInstance]) -> Vec<MetricSample> {
    constraints
        .iter()
        .map(|constraint| MetricSample {
            family: MetricFamily::ConstraintInformation,
            label_values: vec![
                constraint.kind.clone(),
                constraint.name.clone(),
                constraint.enforcement_action.clone(),
                constraint.total_violations.to_string(),
            ],
            value: constraint.total_violations as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Violation;

    fn violation(kind: &str, name: &str, namespace: Option<&str>, message: &str) -> Violation {
        Violation {
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            message: message.to_string(),
            enforcement_action: "deny".to_string(),
        }
    }

    fn constraint(name: &str, violations: Vec<Violation>) -> ConstraintInstance {
        ConstraintInstance {
            kind: "K8sRequiredLabels".to_string(),
            name: name.to_string(),
            namespace: None,
            enforcement_action: "deny".to_string(),
            total_violations: violations.len() as u64,
            violations,
        }
    }

    #[test]
    fn test_duplicate_violations_collapse() {
        let c = constraint(
            "must-have-owner",
            vec![
                violation("Pod", "p1", Some("default"), "missing label"),
                violation("Pod", "p1", Some("default"), "missing label"),
            ],
        );

        let samples = violation_samples(&[c]);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, 1.0);
        assert_eq!(
            samples[0].label_values,
            vec![
                "K8sRequiredLabels",
                "must-have-owner",
                "Pod",
                "p1",
                "default",
                "missing label",
                "deny",
            ]
        );
    }

    #[test]
    fn test_same_violation_under_different_constraints_is_kept() {
        // The constraint identity is part of the dedup key
        let a = constraint(
            "must-have-owner",
            vec![violation("Pod", "p1", Some("default"), "missing label")],
        );
        let b = constraint(
            "must-have-team",
            vec![violation("Pod", "p1", Some("default"), "missing label")],
        );

        let samples = violation_samples(&[a, b]);
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_differing_message_is_distinct() {
        let c = constraint(
            "must-have-owner",
            vec![
                violation("Pod", "p1", Some("default"), "missing label owner"),
                violation("Pod", "p1", Some("default"), "missing label team"),
            ],
        );

        assert_eq!(violation_samples(&[c]).len(), 2);
    }

    #[test]
    fn test_no_violations_no_samples() {
        let c = constraint("clean", Vec::new());
        assert!(violation_samples(&[c]).is_empty());
    }

    #[test]
    fn test_missing_namespace_becomes_empty_label() {
        let c = constraint(
            "must-have-owner",
            vec![violation("Namespace", "staging", None, "missing label")],
        );

        let samples = violation_samples(&[c]);
        assert_eq!(samples[0].label_values[4], "");
    }

    #[test]
    fn test_information_sample_per_instance() {
        let mut c = constraint("must-have-owner", Vec::new());
        c.total_violations = 7;

        let samples = information_samples(&[c]);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].family, MetricFamily::ConstraintInformation);
        assert_eq!(
            samples[0].label_values,
            vec!["K8sRequiredLabels", "must-have-owner", "deny", "7"]
        );
        assert_eq!(samples[0].value, 7.0);
    }

    #[test]
    fn test_synthesize_combines_both_families() {
        let c = constraint(
            "must-have-owner",
            vec![violation("Pod", "p1", Some("default"), "missing label")],
        );

        let snapshot = synthesize(&[c]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot
            .samples
            .iter()
            .any(|s| s.family == MetricFamily::ConstraintViolation));
        assert!(snapshot
            .samples
            .iter()
            .any(|s| s.family == MetricFamily::ConstraintInformation));
    }

    #[test]
    fn test_synthesize_empty_input() {
        assert!(synthesize(&[]).is_empty());
    }
}
