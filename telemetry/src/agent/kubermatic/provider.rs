//! Cloud provider detection on datacenter and cluster cloud specs

use crate::agent::AgentError;
use crate::cluster::kubermatic::ProviderBlocks;

/// Provider blocks recognised on datacenter and cluster cloud specs
pub const CLOUD_PROVIDERS: &[&str] = &[
    "digitalocean",
    "bringyourown",
    "edge",
    "aws",
    "azure",
    "openstack",
    "packet",
    "hetzner",
    "vsphere",
    "fake",
    "gcp",
    "kubevirt",
    "alibaba",
    "anexia",
    "nutanix",
    "vmwareclouddirector",
];

/// Name of the single provider block set on `blocks`
///
/// Returns `None` when no block is set. `describe` names the object in the
/// error returned when more than one block is set.
pub fn cloud_provider_name(
    blocks: &ProviderBlocks,
    describe: impl FnOnce() -> String,
) -> Result<Option<&'static str>, AgentError> {
    let providers: Vec<&'static str> = CLOUD_PROVIDERS
        .iter()
        .copied()
        .filter(|provider| blocks.block(provider).is_some())
        .collect();

    match providers.as_slice() {
        [] => Ok(None),
        [provider] => Ok(Some(*provider)),
        _ => Err(AgentError::MultipleProviders {
            object: describe(),
            providers,
        }),
    }
}

/// Region of a datacenter for providers that have one
pub fn datacenter_region(blocks: &ProviderBlocks, provider: &str) -> Option<String> {
    let field = match provider {
        "digitalocean" | "aws" | "openstack" | "gcp" | "alibaba" => "region",
        "azure" | "hetzner" => "location",
        "vsphere" => "datacenter",
        "anexia" => "locationID",
        _ => return None,
    };

    blocks
        .block(provider)?
        .get(field)?
        .as_str()
        .filter(|region| !region.is_empty())
        .map(str::to_string)
}
