//! In-memory recipe storage for cityfare.
//!
//! Recipes are user-contributed free-text entries keyed by city identifier.
//! The store lives for the lifetime of the process; nothing is persisted.

pub mod backend;
pub mod memory;
pub mod recipe;

pub use backend::{
    validate_content, RecipeBackend, StoreError, ValidationError, MAX_CONTENT_LENGTH,
    MIN_CONTENT_LENGTH,
};
pub use memory::MemoryRecipeStore;
pub use recipe::Recipe;
