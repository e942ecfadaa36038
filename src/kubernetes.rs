use anyhow::Result;
use kube::api::{Api, DynamicObject, ListParams};
use kube::config::KubeConfigOptions;
use kube::core::ApiResource;
use kube::discovery::{self, verbs};
use kube::Client;
use tracing::info;

use crate::errors::CycleError;
use crate::types::ConstraintKind;

pub const CONSTRAINTS_GROUP: &str = "constraints.gatekeeper.sh";
pub const CONSTRAINTS_VERSION: &str = "v1beta1";

/// Build a client from in-cluster service-account credentials or from the
/// local kubeconfig's current context.
pub async fn create_client(in_cluster: bool) -> Result<Client> {
    let config = if in_cluster {
        info!("Using in-cluster K8S client");
        kube::Config::incluster()?
    } else {
        kube::Config::from_kubeconfig(&KubeConfigOptions::default()).await?
    };
    Ok(Client::try_from(config)?)
}

/// Discover the constraint kinds currently registered under the Gatekeeper
/// constraints group, keeping only those that support the list verb.
///
/// A cluster without Gatekeeper installed answers discovery with 404; that
/// is an empty catalog, not a failure.
pub async fn resolve_constraint_kinds(
    client: &Client,
) -> Result<Vec<ConstraintKind>, CycleError> {
    let group = match discovery::group(client, CONSTRAINTS_GROUP).await {
        Ok(group) => group,
        Err(kube::Error::Api(resp)) if resp.code == 404 => return Ok(Vec::new()),
        Err(err) => return Err(CycleError::Discovery(err)),
    };

    let mut kinds = Vec::new();
    for (resource, capabilities) in group.versioned_resources(CONSTRAINTS_VERSION) {
        if !capabilities.supports_operation(verbs::LIST) {
            continue;
        }
        kinds.push(ConstraintKind {
            group: resource.group.clone(),
            version: resource.version.clone(),
            kind: resource.kind.clone(),
            plural: resource.plural.clone(),
        });
    }
    Ok(kinds)
}

/// Cluster-wide list of every instance of one constraint kind.
pub async fn list_constraint_instances(
    client: &Client,
    kind: &ConstraintKind,
) -> Result<Vec<DynamicObject>, CycleError> {
    let api: Api<DynamicObject> = Api::all_with(client.clone(), &api_resource(kind));
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| CycleError::Fetch {
            kind: kind.kind.clone(),
            source,
        })?;
    Ok(list.items)
}

fn api_resource(kind: &ConstraintKind) -> ApiResource {
    ApiResource {
        group: kind.group.clone(),
        version: kind.version.clone(),
        api_version: format!("{}/{}", kind.group, kind.version),
        kind: kind.kind.clone(),
        plural: kind.plural.clone(),
    }
}
