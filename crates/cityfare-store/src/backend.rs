//! Recipe storage backend trait, validation rules, and error types.
//!
//! The trait abstracts over storage implementations so the in-memory store
//! can be swapped for a persistent backend without touching the handlers.

use thiserror::Error;

use crate::recipe::Recipe;

/// Minimum recipe content length, measured after trimming.
pub const MIN_CONTENT_LENGTH: usize = 10;

/// Maximum recipe content length, measured after trimming.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Content validation failures for recipe creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Recipe content is required")]
    ContentRequired,

    #[error("Recipe content is too short (minimum 10 characters)")]
    ContentTooShort,

    #[error("Recipe content is too long (maximum 2000 characters)")]
    ContentTooLong,
}

/// Errors that can occur during recipe store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Content failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The city has no recorded recipes, or no recipe with this id.
    #[error("Recipe {recipe_id} not found for city \"{city_id}\"")]
    RecipeNotFound { city_id: String, recipe_id: i64 },
}

impl StoreError {
    /// Create a not found error.
    pub fn not_found(city_id: impl Into<String>, recipe_id: i64) -> Self {
        Self::RecipeNotFound {
            city_id: city_id.into(),
            recipe_id,
        }
    }
}

/// Validate recipe content, returning the trimmed slice to store.
///
/// Checks run in a fixed order: presence, then minimum length, then maximum
/// length. Length is counted in Unicode scalar values after trimming.
///
/// # Errors
/// Returns `ValidationError::ContentRequired` if content is empty or
/// whitespace-only, `ContentTooShort` below `MIN_CONTENT_LENGTH`, and
/// `ContentTooLong` above `MAX_CONTENT_LENGTH`.
pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::ContentRequired);
    }

    let length = trimmed.chars().count();
    if length < MIN_CONTENT_LENGTH {
        return Err(ValidationError::ContentTooShort);
    }
    if length > MAX_CONTENT_LENGTH {
        return Err(ValidationError::ContentTooLong);
    }

    Ok(trimmed)
}

/// Trait for recipe storage backends.
///
/// Implementations are shared across request handlers, so methods take
/// `&self` and implementations handle their own synchronization.
pub trait RecipeBackend: Send + Sync {
    /// List a city's recipes in insertion order.
    ///
    /// Never fails; a city with no recorded recipes yields an empty list.
    fn list(&self, city_id: &str) -> Vec<Recipe>;

    /// Create a new recipe for a city.
    ///
    /// Content is trimmed before storage; the id comes from the store-wide
    /// counter. The city's list is created on first insert.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` if content fails `validate_content`.
    fn add(&self, city_id: &str, content: &str) -> Result<Recipe, StoreError>;

    /// Delete one recipe from a city's list, preserving the order of the
    /// remainder.
    ///
    /// # Errors
    /// Returns `StoreError::RecipeNotFound` if the city has no recorded
    /// recipes or no recipe in its list has the given id.
    fn delete(&self, city_id: &str, recipe_id: i64) -> Result<(), StoreError>;
}
