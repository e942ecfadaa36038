use kube::Client;
use tracing::{info, warn};

use crate::errors::CycleError;
use crate::kubernetes::{list_constraint_instances, resolve_constraint_kinds};
use crate::parsing::parse_constraint;
use crate::types::{ConstraintInstance, ConstraintKind};

/// Collector structure that walks every discovered constraint kind and
/// produces the typed instances for one poll cycle.
pub struct ConstraintCollector<'a> {
    client: &'a Client,
}

impl<'a> ConstraintCollector<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Resolve the constraint catalog and collect all instances.
    pub async fn collect(&self) -> Result<Vec<ConstraintInstance>, CycleError> {
        let kinds = resolve_constraint_kinds(self.client).await?;
        info!("Discovered {} listable constraint kinds", kinds.len());
        self.collect_kinds(&kinds).await
    }

    /// Collect all instances of the given kinds. The first list failure
    /// aborts the whole batch; partial results are never published.
    pub async fn collect_kinds(
        &self,
        kinds: &[ConstraintKind],
    ) -> Result<Vec<ConstraintInstance>, CycleError> {
        let mut instances = Vec::new();
        for kind in kinds {
            let docs = list_constraint_instances(self.client, kind).await?;
            info!("Listed {} instances of {}", docs.len(), kind.kind);
            for doc in &docs {
                match parse_constraint(doc, &kind.kind) {
                    Ok(parsed) => {
                        for warning in &parsed.warnings {
                            warn!(
                                "Constraint {}/{}: {}",
                                parsed.instance.kind, parsed.instance.name, warning
                            );
                        }
                        instances.push(parsed.instance);
                    }
                    Err(warning) => {
                        warn!("Skipping {} document: {}", kind.kind, warning);
                    }
                }
            }
        }
        Ok(instances)
    }
}
