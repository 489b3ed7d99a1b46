//! Wardrobe catalog: the read-only clothing data the generator browses.
//!
//! The catalog is supplied by the server (JSON) before the outfit browser
//! initializes and is never mutated by the client. The browser references
//! items by index into the per-category lists; it never copies them.

use std::fmt;

use serde::Deserialize;

/// The three fixed clothing slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Footwear,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tops, Category::Bottoms, Category::Footwear];

    /// Category key as the server spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Footwear => "footwear",
        }
    }

    /// Human-readable label for UI headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::Footwear => "Footwear",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Tops => 0,
            Category::Bottoms => 1,
            Category::Footwear => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of clothing. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub color: Option<String>,
    /// User-uploaded items are marked custom by the server.
    #[serde(default)]
    pub custom: bool,
    pub image_path: String,
}

impl ClothingItem {
    /// Case-insensitive color match. Items without a color never match.
    pub fn has_color(&self, color: &str) -> bool {
        self.color
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(color))
    }
}

/// Per-category clothing lists, as served by `GET /api/wardrobe`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub tops: Vec<ClothingItem>,
    #[serde(default)]
    pub bottoms: Vec<ClothingItem>,
    #[serde(default)]
    pub footwear: Vec<ClothingItem>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn items(&self, category: Category) -> &[ClothingItem] {
        match category {
            Category::Tops => &self.tops,
            Category::Bottoms => &self.bottoms,
            Category::Footwear => &self.footwear,
        }
    }

    /// Distinct colors available in a category, in first-seen order.
    ///
    /// Deduplicated case-insensitively (first spelling wins); items without
    /// a color, or with an empty color string, contribute nothing.
    pub fn colors(&self, category: Category) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in self.items(category) {
            let Some(color) = item.color.as_deref() else {
                continue;
            };
            if color.is_empty() {
                continue;
            }
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(color)) {
                seen.push(color.to_string());
            }
        }
        seen
    }

    pub fn total_items(&self) -> usize {
        self.tops.len() + self.bottoms.len() + self.footwear.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: Category, color: Option<&str>) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            category,
            color: color.map(str::to_string),
            custom: false,
            image_path: format!("static/images/{}.png", id),
        }
    }

    #[test]
    fn parses_server_wardrobe_json() {
        let json = r#"
        {
            "tops": [
                {"id": "t1", "category": "tops", "color": "Red", "image_path": "static/images/t1.png"},
                {"id": "t2", "category": "tops", "custom": true, "image_path": "static/images/uploads/t2.png"}
            ],
            "bottoms": [
                {"id": "b1", "category": "bottoms", "color": "blue", "image_path": "static/images/b1.png"}
            ],
            "footwear": []
        }
        "#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.tops.len(), 2);
        assert_eq!(catalog.bottoms.len(), 1);
        assert!(catalog.footwear.is_empty());
        assert_eq!(catalog.total_items(), 3);

        assert_eq!(catalog.tops[0].color.as_deref(), Some("Red"));
        assert!(catalog.tops[1].custom);
        assert!(catalog.tops[1].color.is_none());
    }

    #[test]
    fn missing_category_key_defaults_to_empty() {
        let catalog = Catalog::from_json(r#"{"tops": []}"#).unwrap();
        assert!(catalog.bottoms.is_empty());
        assert!(catalog.footwear.is_empty());
    }

    #[test]
    fn colors_first_seen_order_case_insensitive() {
        let catalog = Catalog {
            tops: vec![
                item("t1", Category::Tops, Some("Red")),
                item("t2", Category::Tops, Some("blue")),
                item("t3", Category::Tops, Some("RED")),
                item("t4", Category::Tops, None),
                item("t5", Category::Tops, Some("")),
                item("t6", Category::Tops, Some("green")),
            ],
            ..Default::default()
        };

        assert_eq!(catalog.colors(Category::Tops), vec!["Red", "blue", "green"]);
        assert!(catalog.colors(Category::Bottoms).is_empty());
    }

    #[test]
    fn color_matching_ignores_case() {
        let red = item("t1", Category::Tops, Some("Red"));
        assert!(red.has_color("red"));
        assert!(red.has_color("RED"));
        assert!(!red.has_color("blue"));
        assert!(!item("t2", Category::Tops, None).has_color("red"));
    }
}
