//! Dynamic subscription discovery.
//!
//! Deployments that describe their sensing hardware in a module registry
//! can derive the recorder's channel set from the declared module outputs
//! instead of listing variables statically. Resolution is a pure function
//! over registry snapshots, so it is testable without a bus.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use eco_bus::filtered_channel;
use eco_core::{Variable, VariableCatalog};

/// One sensing module instance from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmwareModule {
    pub id: String,
    /// Key into the module-type registry.
    #[serde(rename = "type")]
    pub module_type: String,
}

/// Declared capabilities of a module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleType {
    pub outputs: Vec<ModuleOutput>,
}

/// One declared output of a module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutput {
    pub name: String,
    pub variable: Variable,
}

/// A resolved (channel, variable) pair the recorder should subscribe to.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub channel: String,
    pub variable: Variable,
}

/// Map declared module outputs to recorder subscriptions.
///
/// Modules referencing an unregistered type, and outputs referencing a
/// variable missing from the catalog, are skipped with a warning: partial
/// coverage is acceptable, total silence is not.
pub fn resolve_subscriptions(
    modules: &[FirmwareModule],
    module_types: &HashMap<String, ModuleType>,
    catalog: &VariableCatalog,
) -> Vec<Subscription> {
    let mut subscriptions = Vec::new();
    for module in modules {
        let Some(module_type) = module_types.get(&module.module_type) else {
            tracing::warn!(
                module = %module.id,
                module_type = %module.module_type,
                "module references unregistered type, skipping"
            );
            continue;
        };
        for output in &module_type.outputs {
            if !catalog.contains(&output.variable) {
                tracing::warn!(
                    module = %module.id,
                    output = %output.name,
                    variable = %output.variable,
                    "output references unknown variable, skipping"
                );
                continue;
            }
            subscriptions.push(Subscription {
                channel: filtered_channel(&module.id, &output.name),
                variable: output.variable.clone(),
            });
        }
    }
    subscriptions
}
