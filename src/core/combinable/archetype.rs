//=========================================================================
// Archetypes
//=========================================================================
//
// Data-driven combinable definitions loaded from JSON.
//
// Document shape:
//   {
//     "iron":  { "tag": "Metal" },
//     "forge": { "combine_with_tag": "Metal",
//                "settings": { "result_template": "Ingot" } }
//   }
//
// Definitions are validated once at load time; instantiation only binds
// an object id.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{Combinable, CombineSettings, ConfigError, ObjectId, Recipe};

//=== CombinableDef =======================================================

/// Authoring-time description of a combinable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinableDef {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub is_initial: bool,
    pub settings: CombineSettings,
}

impl Default for CombinableDef {
    fn default() -> Self {
        Self {
            recipe: Recipe::default(),
            is_initial: true,
            settings: CombineSettings::default(),
        }
    }
}

impl CombinableDef {
    /// Binds the definition to a live object.
    pub fn instantiate(&self, id: ObjectId) -> Combinable {
        Combinable {
            recipe: self.recipe.clone(),
            settings: self.settings.clone(),
            is_initial: self.is_initial,
            ..Combinable::new(id)
        }
    }
}

//=== Archetypes ==========================================================

/// Named set of validated [`CombinableDef`]s.
#[derive(Debug, Clone, Default)]
pub struct Archetypes {
    defs: BTreeMap<String, CombinableDef>,
}

impl Archetypes {
    /// Parses and validates an archetype document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let defs: BTreeMap<String, CombinableDef> = serde_json::from_str(json)?;

        for (name, def) in &defs {
            def.settings.validate().map_err(|e| ConfigError::Archetype {
                name: name.clone(),
                source: Box::new(e),
            })?;
        }

        Ok(Self { defs })
    }

    /// Adds or replaces a definition after validating it.
    pub fn insert(&mut self, name: impl Into<String>, def: CombinableDef) -> Result<(), ConfigError> {
        let name = name.into();
        def.settings.validate().map_err(|e| ConfigError::Archetype {
            name: name.clone(),
            source: Box::new(e),
        })?;
        self.defs.insert(name, def);
        Ok(())
    }

    /// Creates a combinable for `id` from the named archetype.
    pub fn instantiate(&self, name: &str, id: ObjectId) -> Result<Combinable, ConfigError> {
        self.defs
            .get(name)
            .map(|def| def.instantiate(id))
            .ok_or_else(|| ConfigError::UnknownArchetype(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&CombinableDef> {
        self.defs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
