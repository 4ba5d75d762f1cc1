use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Stable unique identifier for a tile. Assigned once at catalog definition
/// and never reused.
pub type TileId = String;

/// Presentation color tokens carried through the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub bg1: String,
    pub bg2: String,
    pub fg: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub border: Option<String>,
}

impl Brand {
    pub fn new(bg1: &str, bg2: &str, fg: &str) -> Self {
        Self {
            bg1: bg1.to_string(),
            bg2: bg2.to_string(),
            fg: fg.to_string(),
            border: None,
        }
    }

    pub fn with_border(mut self, border: &str) -> Self {
        self.border = Some(border.to_string());
        self
    }
}

/// The unit of layout: a placeable rectangle measured in grid units.
///
/// `label`, `brand`, and `icon` are display payload the engine never
/// interprets. `width` and `height` are what the packer consumes; resize
/// clamps them to 1..=4 and 1..=3 respectively, but catalog values are taken
/// as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub label: String,
    pub brand: Brand,
    pub icon: String,
    pub width: u16,
    pub height: u16,
}

impl Tile {
    pub fn new(id: &str, label: &str, brand: Brand, icon: &str, width: u16, height: u16) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            brand,
            icon: icon.to_string(),
            width,
            height,
        }
    }
}

/// Validate the initializer precondition: a non-empty catalog with unique
/// ids and positive dimensions. Checked once at load, never at runtime.
pub fn validate(catalog: &[Tile]) -> Result<()> {
    if catalog.is_empty() {
        return Err(GridError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    for tile in catalog {
        if !seen.insert(tile.id.as_str()) {
            return Err(GridError::DuplicateTile(tile.id.clone()));
        }
        if tile.width == 0 || tile.height == 0 {
            return Err(GridError::InvalidDimensions {
                id: tile.id.clone(),
                width: tile.width,
                height: tile.height,
            });
        }
    }
    Ok(())
}

/// Deserialize a catalog from a JSON array and validate it.
pub fn from_json_str(json: &str) -> Result<Vec<Tile>> {
    let catalog: Vec<Tile> = serde_json::from_str(json)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// The built-in tech-stack showcase catalog, authored pre-packed for a
/// six-column grid.
pub fn default_catalog() -> Vec<Tile> {
    vec![
        Tile::new(
            "js",
            "JavaScript",
            Brand::new("#f7df1e", "#f0c600", "#111827"),
            "javascript",
            2,
            2,
        ),
        Tile::new(
            "react",
            "React",
            Brand::new("#61dafb", "#00bcd4", "#0b1021"),
            "react",
            2,
            2,
        ),
        Tile::new(
            "next",
            "Next.js",
            Brand::new("#111111", "#2a2a2a", "#ffffff").with_border("#ffffff33"),
            "nextdotjs",
            2,
            2,
        ),
        Tile::new(
            "ts",
            "TypeScript",
            Brand::new("#3178c6", "#1f6fbf", "#ffffff"),
            "typescript",
            2,
            2,
        ),
        Tile::new(
            "py",
            "Python",
            Brand::new("#3776ab", "#ffd343", "#0b1021"),
            "python",
            2,
            1,
        ),
        Tile::new(
            "tail",
            "Tailwind CSS",
            Brand::new("#38bdf8", "#06b6d4", "#0b1021"),
            "tailwindcss",
            2,
            1,
        ),
        Tile::new(
            "figma",
            "Figma",
            Brand::new("#FF3737", "#874FFF", "#ffffff"),
            "figma",
            1,
            2,
        ),
        Tile::new(
            "fb",
            "Firebase",
            Brand::new("#f5820d", "#fcca3f", "#0b1021"),
            "firebase",
            2,
            1,
        ),
        Tile::new(
            "sup",
            "Supabase",
            Brand::new("#3ecf8e", "#249d6f", "#0b1021"),
            "supabase",
            2,
            1,
        ),
        Tile::new(
            "gh",
            "GitHub",
            Brand::new("#24292e", "#3b434a", "#ffffff"),
            "github",
            2,
            1,
        ),
        Tile::new(
            "agile",
            "Agile/Scrum",
            Brand::new("#0052cc", "#2b6cb0", "#ffffff"),
            "jira",
            1,
            1,
        ),
        Tile::new(
            "sb",
            "Storybook",
            Brand::new("#ff4785", "#ff71a1", "#ffffff"),
            "storybook",
            1,
            1,
        ),
        Tile::new(
            "html",
            "HTML5",
            Brand::new("#e34f26", "#ef652a", "#ffffff"),
            "html5",
            1,
            1,
        ),
        Tile::new(
            "css",
            "CSS3",
            Brand::new("#264de4", "#2965f1", "#ffffff"),
            "css3",
            1,
            1,
        ),
        Tile::new(
            "rn",
            "React Native",
            Brand::new("#61dafb", "#00bcd4", "#0b1021"),
            "reactos",
            1,
            1,
        ),
        Tile::new(
            "flask",
            "Flask",
            Brand::new("#0b0b0b", "#222222", "#ffffff"),
            "flask",
            1,
            1,
        ),
        Tile::new(
            "form",
            "Formspree",
            Brand::new("#ff4f57", "#ff6b72", "#ffffff"),
            "formspree",
            3,
            1,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 17);
        validate(&catalog).unwrap();
    }

    #[test]
    fn empty_catalog_rejected() {
        let err = validate(&[]).unwrap_err();
        assert!(matches!(err, GridError::EmptyCatalog));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let catalog = vec![
            Tile::new("a", "A", Brand::new("#000", "#000", "#fff"), "a", 1, 1),
            Tile::new("a", "A2", Brand::new("#000", "#000", "#fff"), "a", 1, 1),
        ];
        let err = validate(&catalog).unwrap_err();
        assert!(matches!(err, GridError::DuplicateTile(id) if id == "a"));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let catalog = vec![Tile::new(
            "a",
            "A",
            Brand::new("#000", "#000", "#fff"),
            "a",
            0,
            1,
        )];
        let err = validate(&catalog).unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidDimensions { width: 0, .. }
        ));
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = default_catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = from_json_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn malformed_json_surfaces_parse_error() {
        let err = from_json_str("[{\"id\": \"js\"").unwrap_err();
        assert!(matches!(err, GridError::CatalogParse(_)));
    }
}
