use serde::{Deserialize, Serialize};

/// A single user-contributed recipe tied to one city.
///
/// Ids come from a single store-wide counter, so they are unique across all
/// cities, not just within one city's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_recipe_serialization() {
        let recipe = Recipe {
            id: 1,
            content: "Add cream and butter".to_string(),
        };

        let json = serde_json::to_string(&recipe).unwrap();
        assert_eq!(json, r#"{"id":1,"content":"Add cream and butter"}"#);
    }

    #[test]
    fn test_recipe_deserialization() {
        let recipe: Recipe = serde_json::from_str(r#"{"id":7,"content":"Slow-roast the leeks"}"#).unwrap();
        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.content, "Slow-roast the leeks");
    }
}
