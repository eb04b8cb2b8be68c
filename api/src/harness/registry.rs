//! Model registry
//!
//! Holds exactly one [`Model`] per [`Entity`] and resolves models by entity
//! or by the module path/binding the application imports them under.

use crate::domain::entities::Entity;
use crate::harness::defaults;
use crate::harness::model::Model;

pub struct ModelRegistry {
    models: [Model; Entity::COUNT],
}

impl ModelRegistry {
    /// One model per entity, configured with its defaults
    pub fn with_defaults() -> Self {
        Self {
            models: Entity::ALL.map(defaults::model_for),
        }
    }

    pub fn get(&self, entity: Entity) -> &Model {
        &self.models[entity.index()]
    }

    /// Resolve a model by module path or binding name
    pub fn resolve(&self, name: &str) -> Option<&Model> {
        name.parse::<Entity>().ok().map(|entity| self.get(entity))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// Clear the call history of every operation of every model
    pub fn clear_calls(&self) {
        for model in &self.models {
            model.ops().clear_calls();
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.models.iter()).finish()
    }
}
