use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_address: SocketAddr,
    pub metrics_path: String,
    pub in_cluster: bool,
    pub poll_interval: Duration,
    pub cycle_timeout: Duration,
}

/// A constraint resource type discovered under the Gatekeeper constraints
/// API group. Re-resolved on every poll cycle so kinds added or removed
/// from the cluster are picked up without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintKind {
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Plural resource name as registered with the API server. Carried so
    /// list calls address the discovered resource instead of guessing a
    /// pluralization.
    pub plural: String,
}

/// One entry of a constraint's status.violations list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Violation {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub message: String,
    #[serde(default, rename = "enforcementAction")]
    pub enforcement_action: String,
}

/// A typed constraint instance assembled from one listed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintInstance {
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub enforcement_action: String,
    pub total_violations: u64,
    pub violations: Vec<Violation>,
}

/// The exported metric families. Names are relative to the
/// `opa_scorecard` namespace prefix applied at exposition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFamily {
    ConstraintViolation,
    ConstraintInformation,
}

impl MetricFamily {
    pub fn name(&self) -> &'static str {
        match self {
            MetricFamily::ConstraintViolation => "constraint_violations",
            MetricFamily::ConstraintInformation => "constraint_information",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetricFamily::ConstraintViolation => "OPA violations for all constraints",
            MetricFamily::ConstraintInformation => "Some general information of all constraints",
        }
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        match self {
            MetricFamily::ConstraintViolation => &[
                "kind",
                "name",
                "violating_kind",
                "violating_name",
                "violating_namespace",
                "violation_msg",
                "violation_enforcement",
            ],
            MetricFamily::ConstraintInformation => {
                &["kind", "name", "enforcementAction", "totalViolations"]
            }
        }
    }
}

/// An immutable (family, label values, value) triple. Label values are
/// ordered to match the family's label names.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub family: MetricFamily,
    pub label_values: Vec<String>,
    pub value: f64,
}

/// One poll cycle's full metric output. Built entirely off to the side and
/// never mutated after publication; sample order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub samples: Vec<MetricSample>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
