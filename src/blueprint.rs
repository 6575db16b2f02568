//! Blueprints are templates from which entity hierarchies are instantiated.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::spatial::transform::Transform;

impl_handle!(BlueprintHandle);

/// A single entity of a `Blueprint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintNode {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    /// Index of the parent node, which must come before this node.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Registers the instantiated entity as scene root.
    #[serde(default)]
    pub root: bool,
}

/// A blueprint stores a hierarchy of entities complete with their local transforms.
/// The first node is the top of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub nodes: Vec<BlueprintNode>,
}

impl Blueprint {
    /// Parses a blueprint from json, and validates it.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<Self> {
        let blueprint: Blueprint = serde_json::from_str(json.as_ref())?;
        blueprint.validate()?;
        Ok(blueprint)
    }

    /// Checks that the nodes describe a single tree topologically sorted from its top.
    pub fn validate(&self) -> Result<()> {
        let first = self
            .nodes
            .first()
            .ok_or_else(|| Error::BlueprintMalformed("no nodes".into()))?;

        if first.parent.is_some() {
            return Err(Error::BlueprintMalformed(format!(
                "the first node `{}` has a parent",
                first.name
            )));
        }

        for (i, v) in self.nodes.iter().enumerate().skip(1) {
            match v.parent {
                Some(parent) if parent < i => {}
                Some(parent) => {
                    return Err(Error::BlueprintMalformed(format!(
                        "node `{}` refers parent {} which does not come before it",
                        v.name, parent
                    )));
                }
                None => {
                    return Err(Error::BlueprintMalformed(format!(
                        "node `{}` has no parent",
                        v.name
                    )));
                }
            }

            if v.root {
                return Err(Error::BlueprintMalformed(format!(
                    "node `{}` has a parent and can not be a scene root",
                    v.name
                )));
            }
        }

        Ok(())
    }
}
