use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Server-assigned identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub i64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecipeId)
    }
}

/// The fixed nutrient keys. Iteration order is kcal, protein, carbs, fat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Nutrient {
    Kcal,
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Kcal => "kcal",
            _ => "g",
        }
    }
}

/// One value per fixed nutrient key.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientMap<T> {
    pub kcal: T,
    pub protein: T,
    pub carbs: T,
    pub fat: T,
}

impl<T> NutrientMap<T> {
    pub fn get(&self, key: Nutrient) -> &T {
        match key {
            Nutrient::Kcal => &self.kcal,
            Nutrient::Protein => &self.protein,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fat => &self.fat,
        }
    }

    pub fn get_mut(&mut self, key: Nutrient) -> &mut T {
        match key {
            Nutrient::Kcal => &mut self.kcal,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
        }
    }

    /// Iterate in the fixed key order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &T)> + '_ {
        Nutrient::iter().map(move |key| (key, self.get(key)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Nutrient, &T) -> U) -> NutrientMap<U> {
        NutrientMap {
            kcal: f(Nutrient::Kcal, &self.kcal),
            protein: f(Nutrient::Protein, &self.protein),
            carbs: f(Nutrient::Carbs, &self.carbs),
            fat: f(Nutrient::Fat, &self.fat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Amount for the recipe's stored serving count. `None` means "to taste".
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit: String,
}

impl Ingredient {
    /// The row appended by "add ingredient" in the editor.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            amount: Some(1.0),
            unit: String::new(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn one() -> u32 {
    1
}

/// The structured part of a recipe. Amounts and nutrient totals are relative to `servings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeContent {
    #[serde(default = "one")]
    pub servings: u32,
    /// Minutes
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    /// Whole-recipe totals, not per serving
    #[serde(default)]
    pub nutrients: NutrientMap<f64>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64 encoded image, as stored by the server
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    pub content: RecipeContent,
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("image", &self.image.len())
            .field("content", &self.content)
            .finish()
    }
}

impl Recipe {
    /// Decode the stored image into raw bytes.
    pub fn image_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(self.image.trim())
    }

    /// Render the image as a data URL, or `None` if the recipe has no image.
    pub fn image_data_url(&self) -> Option<String> {
        if self.image.is_empty() {
            None
        } else {
            Some(format!("data:image/png;base64,{}", self.image))
        }
    }
}

/// The body of an update request. Only built from a draft that passed validation.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct RecipeUpdate {
    pub title: String,
    pub content: RecipeContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub image: String,
}

impl fmt::Debug for RecipeUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeUpdate")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("url", &self.url)
            .field("image", &self.image.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_recipe() -> Recipe {
        Recipe {
            id: RecipeId(7),
            title: "Pancakes".into(),
            url: Some("https://example.com/pancakes".into()),
            image: "aGVsbG8=".into(),
            content: RecipeContent {
                servings: 2,
                cooking_time: 25,
                ingredients: vec![
                    Ingredient {
                        name: "Flour".into(),
                        amount: Some(100.0),
                        unit: "g".into(),
                    },
                    Ingredient {
                        name: "Milk".into(),
                        amount: Some(250.0),
                        unit: "ml".into(),
                    },
                    Ingredient {
                        name: "Salt".into(),
                        amount: None,
                        unit: String::new(),
                    },
                ],
                steps: vec!["Mix everything".into(), "Fry in a pan".into()],
                nutrients: NutrientMap {
                    kcal: 900.0,
                    protein: 31.0,
                    carbs: 120.0,
                    fat: 25.5,
                },
                tags: ["breakfast".to_string(), "sweet".to_string()].into(),
            },
        }
    }

    #[test]
    fn deserializes_server_json() {
        let json = r#"{
            "id": 3,
            "owner_id": 1,
            "title": "Soup",
            "url": "https://example.com",
            "image": null,
            "content": {
                "cooking_time": 40,
                "ingredients": [{"name": "Water", "amount": null, "unit": null}],
                "steps": ["Boil"]
            }
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, RecipeId(3));
        assert_eq!(recipe.content.servings, 1);
        assert_eq!(recipe.content.ingredients[0].unit, "");
        assert_eq!(recipe.content.ingredients[0].amount, None);
        assert_eq!(recipe.content.nutrients, NutrientMap::default());
        assert!(recipe.content.tags.is_empty());
        assert!(recipe.image.is_empty());
        assert_eq!(recipe.image_data_url(), None);
    }

    #[test]
    fn nutrients_serialize_with_fixed_keys() {
        let value = serde_json::to_value(sample_recipe().content.nutrients).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kcal": 900.0, "protein": 31.0, "carbs": 120.0, "fat": 25.5})
        );
    }

    #[test]
    fn nutrient_keys_parse_and_iterate_in_fixed_order() {
        assert_eq!("KCAL".parse::<Nutrient>().unwrap(), Nutrient::Kcal);
        assert!("sugar".parse::<Nutrient>().is_err());
        let keys: Vec<_> = Nutrient::iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["kcal", "protein", "carbs", "fat"]);
    }

    #[test]
    fn image_decodes_from_base64() {
        let recipe = sample_recipe();
        assert_eq!(recipe.image_bytes().unwrap(), b"hello");
        assert_eq!(
            recipe.image_data_url().as_deref(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }

    #[test]
    fn debug_hides_image_body() {
        let debug = format!("{:?}", sample_recipe());
        assert!(debug.contains("image: 8"));
        assert!(!debug.contains("aGVsbG8="));
    }
}
