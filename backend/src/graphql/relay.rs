//! Relay global object identification
//!
//! A global ID is standard base64 of `<TypeName>:<id>`.

use async_graphql::ID;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use super::errors::ApiError;

pub const INGREDIENT_TYPE: &str = "IngredientType";
pub const RECIPE_TYPE: &str = "RecipeType";

/// Encode a type name and row id as a global ID
pub fn to_global_id(type_name: &str, id: i64) -> ID {
    ID(BASE64.encode(format!("{}:{}", type_name, id)))
}

/// Split a global ID into its type name and raw id. `None` when it does not decode.
///
/// A decoded value without `:` has an empty type name and is all id.
pub fn from_global_id(global_id: &str) -> Option<(String, String)> {
    let decoded = BASE64.decode(global_id).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    match decoded.split_once(':') {
        Some((type_name, id)) => Some((type_name.to_string(), id.to_string())),
        None => Some((String::new(), decoded)),
    }
}

/// Decode a global ID that must name `expected`, returning the row id.
///
/// `label` prefixes the error message, e.g. "Recipe ID" or "Second Ingredient ID".
pub fn decode_id(global_id: &str, expected: &'static str, label: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::InvalidId {
        label: label.to_string(),
    };

    let (type_name, raw_id) = from_global_id(global_id).ok_or_else(invalid)?;
    if raw_id.is_empty() {
        return Err(invalid());
    }
    if type_name != expected {
        return Err(ApiError::WrongNodeType {
            label: label.to_string(),
            expected,
            actual: type_name,
        });
    }

    raw_id.parse::<i64>().map_err(|_| invalid())
}

/// Label for the `position`th (1-based) element of an ID list
pub fn ordinal_label(position: usize, label: &str) -> String {
    const ORDINALS: [&str; 10] = [
        "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth",
        "Tenth",
    ];

    match position.checked_sub(1).and_then(|i| ORDINALS.get(i)) {
        Some(word) => format!("{} {}", word, label),
        None => format!("{}th {}", position, label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encoding() {
        assert_eq!(to_global_id(INGREDIENT_TYPE, 1).0, "SW5ncmVkaWVudFR5cGU6MQ==");
        assert_eq!(
            from_global_id("UmVjaXBlVHlwZTo0Mg=="),
            Some(("RecipeType".to_string(), "42".to_string()))
        );
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_id("not base64!", RECIPE_TYPE, "Recipe ID"),
            Err(ApiError::InvalidId { .. })
        ));

        let ingredient = to_global_id(INGREDIENT_TYPE, 3);
        let err = decode_id(&ingredient, RECIPE_TYPE, "Recipe ID").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid node type for Recipe ID. Expected 'RecipeType', got 'IngredientType'."
        );

        let no_id = BASE64.encode("RecipeType:");
        assert_eq!(
            decode_id(&no_id, RECIPE_TYPE, "Recipe ID").unwrap_err().to_string(),
            "Recipe ID is invalid."
        );

        let no_separator = BASE64.encode("42");
        assert_eq!(from_global_id(&no_separator), Some((String::new(), "42".to_string())));
        assert_eq!(
            decode_id(&no_separator, RECIPE_TYPE, "Recipe ID").unwrap_err().to_string(),
            "Invalid node type for Recipe ID. Expected 'RecipeType', got ''."
        );
        assert_eq!(
            decode_id("", RECIPE_TYPE, "Recipe ID").unwrap_err().to_string(),
            "Recipe ID is invalid."
        );

        let not_numeric = BASE64.encode("RecipeType:abc");
        assert!(matches!(
            decode_id(&not_numeric, RECIPE_TYPE, "Recipe ID"),
            Err(ApiError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_ordinal_label() {
        assert_eq!(ordinal_label(1, "Ingredient ID"), "First Ingredient ID");
        assert_eq!(ordinal_label(10, "Ingredient ID"), "Tenth Ingredient ID");
        assert_eq!(ordinal_label(11, "Ingredient ID"), "11th Ingredient ID");
    }
}
