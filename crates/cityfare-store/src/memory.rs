//! Process-lifetime in-memory recipe store.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::backend::{validate_content, RecipeBackend, StoreError};
use crate::recipe::Recipe;

/// In-memory recipe storage.
///
/// City lists preserve insertion order. The id counter is store-wide and
/// never reset, so ids stay unique and strictly increasing across cities.
/// The mutex keeps both invariants intact under multi-threaded dispatch.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    recipes: HashMap<String, Vec<Recipe>>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            recipes: HashMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryRecipeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recipes across all cities.
    pub fn count(&self) -> usize {
        self.inner.lock().recipes.values().map(Vec::len).sum()
    }
}

impl RecipeBackend for MemoryRecipeStore {
    fn list(&self, city_id: &str) -> Vec<Recipe> {
        self.inner
            .lock()
            .recipes
            .get(city_id)
            .cloned()
            .unwrap_or_default()
    }

    fn add(&self, city_id: &str, content: &str) -> Result<Recipe, StoreError> {
        let content = validate_content(content)?.to_string();

        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let recipe = Recipe { id, content };
        inner
            .recipes
            .entry(city_id.to_string())
            .or_default()
            .push(recipe.clone());

        tracing::debug!("Stored recipe {} for city {}", id, city_id);
        Ok(recipe)
    }

    fn delete(&self, city_id: &str, recipe_id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let recipes = inner
            .recipes
            .get_mut(city_id)
            .ok_or_else(|| StoreError::not_found(city_id, recipe_id))?;

        let index = recipes
            .iter()
            .position(|recipe| recipe.id == recipe_id)
            .ok_or_else(|| StoreError::not_found(city_id, recipe_id))?;
        recipes.remove(index);

        tracing::debug!("Deleted recipe {} for city {}", recipe_id, city_id);
        Ok(())
    }
}
