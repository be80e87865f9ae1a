//! Validated resource set, flattened for runtime lookup.

use crate::config::resources;
use crate::config::types::ResourceDef;
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ResourceRegistry {
    resources: Vec<Arc<ResourceDef>>,
    by_path: HashMap<String, Arc<ResourceDef>>,
}

/// Validate definitions and build the registry.
pub fn resolve(resources: Vec<ResourceDef>) -> Result<ResourceRegistry, ConfigError> {
    validate(&resources)?;
    let resources: Vec<Arc<ResourceDef>> = resources.into_iter().map(Arc::new).collect();
    let by_path = resources
        .iter()
        .map(|r| (r.path_segment.clone(), r.clone()))
        .collect();
    Ok(ResourceRegistry { resources, by_path })
}

impl ResourceRegistry {
    pub fn builtin() -> Result<Self, ConfigError> {
        resolve(resources::builtin())
    }

    pub fn by_path(&self, path: &str) -> Option<&Arc<ResourceDef>> {
        self.by_path.get(path)
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<ResourceDef>> {
        self.resources.iter()
    }

    /// Resources exposed through the templated CRUD routes.
    pub fn crud_resources(&self) -> impl Iterator<Item = &Arc<ResourceDef>> {
        self.resources.iter().filter(|r| r.crud_routes)
    }

    pub fn collections(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.collection.clone()).collect()
    }
}
