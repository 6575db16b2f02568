//! Functions for loading scene settings.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A structure containing configuration data of a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Number of spatial entities to reserve storage for.
    pub capacity: usize,
    /// Skips the whole subtree below a child when neither the child nor its parent
    /// were updated, instead of walking it to find changed descendants. Faster, but
    /// a changed node below an unchanged pair waits until an ancestor changes.
    pub prune_clean_subtrees: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams {
            capacity: 128,
            prune_clean_subtrees: false,
        }
    }
}

impl SceneParams {
    /// Reads params from json. Missing fields take their default values.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<Self> {
        let params: SceneParams = serde_json::from_str(json.as_ref())?;
        Ok(params)
    }
}
