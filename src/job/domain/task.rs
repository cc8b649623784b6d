//! Task definitions as read from the queue.
//!
//! Only the fields that drive job reporting are modelled; everything else in
//! the upstream definition is ignored on decode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable definition of a unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Routing keys attached to the task, in declaration order.
    #[serde(default)]
    pub routes: Vec<String>,
    /// Human-facing metadata supplied by the task creator.
    pub metadata: TaskMetadata,
    /// Free-form extra section; only the `treeherder` entry is read.
    #[serde(default)]
    pub extra: TaskExtra,
}

impl TaskDefinition {
    /// Creates a definition with the given metadata and no routes.
    #[must_use]
    pub fn new(metadata: TaskMetadata) -> Self {
        Self {
            routes: Vec::new(),
            metadata,
            extra: TaskExtra::default(),
        }
    }

    /// Appends a routing key.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.routes.push(route.into());
        self
    }

    /// Sets the reporting section of the extra block.
    #[must_use]
    pub fn with_treeherder(mut self, treeherder: TreeherderExtra) -> Self {
        self.extra.treeherder = Some(treeherder);
        self
    }

    /// Returns the reporting section, or defaults when the task has none.
    #[must_use]
    pub fn treeherder(&self) -> TreeherderExtra {
        self.extra.treeherder.clone().unwrap_or_default()
    }
}

/// Creator-supplied task metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Short task name.
    pub name: String,
    /// Longer description shown as the job summary.
    #[serde(default)]
    pub description: String,
    /// Owner contact, usually an email address.
    pub owner: String,
    /// Link to the source that defined the task.
    #[serde(default)]
    pub source: String,
}

impl TaskMetadata {
    /// Creates metadata with a name and owner.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner: owner.into(),
            source: String::new(),
        }
    }
}

/// Extra block attached to a task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExtra {
    /// Display and classification hints for the reporting backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treeherder: Option<TreeherderExtra>,
}

/// Display and classification hints for the reporting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeherderExtra {
    /// Job symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Group symbol, if the job belongs to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_symbol: Option<String>,
    /// Group name, if the job belongs to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Job kind (`build`, `test`, `other`).
    #[serde(default = "default_job_kind")]
    pub job_kind: String,
    /// Visibility tier.
    #[serde(default = "default_tier")]
    pub tier: u8,
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Platform the job ran on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachinePlatform>,
    /// Build collections (`opt`, `debug`, ...) flagged `true`.
    #[serde(default)]
    pub collection: BTreeMap<String, bool>,
}

impl Default for TreeherderExtra {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            group_symbol: None,
            group_name: None,
            job_kind: default_job_kind(),
            tier: default_tier(),
            product_name: None,
            machine: None,
            collection: BTreeMap::new(),
        }
    }
}

impl TreeherderExtra {
    /// Returns the enabled collection names in sorted order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.collection
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Platform description of the machine a job ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePlatform {
    /// Platform name.
    pub platform: String,
    /// Operating system, defaults to `-`.
    #[serde(default = "default_unknown")]
    pub os: String,
    /// CPU architecture, defaults to `-`.
    #[serde(default = "default_unknown")]
    pub architecture: String,
}

fn default_symbol() -> String {
    "?".to_owned()
}

fn default_job_kind() -> String {
    "other".to_owned()
}

const fn default_tier() -> u8 {
    1
}

fn default_unknown() -> String {
    "-".to_owned()
}
