/// Catalog file loading.
///
/// Accepts `{"songs": [...]}` (or `{"items": [...]}`) and a bare JSON array
/// of item records.
use pairrank_core::{Catalog, Item};
use serde::Deserialize;
use std::path::Path;

use crate::bail;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped {
        #[serde(alias = "items")]
        songs: Vec<Item>,
    },
    Bare(Vec<Item>),
}

/// Parse catalog JSON. Duplicate names are an error.
pub fn parse_catalog(content: &str) -> Result<Catalog, String> {
    let file: CatalogFile = serde_json::from_str(content.trim())
        .map_err(|e| format!("not a catalog (expected {{\"songs\": [...]}} or an array of items): {e}"))?;
    let items = match file {
        CatalogFile::Wrapped { songs } => songs,
        CatalogFile::Bare(items) => items,
    };
    Catalog::new(items).map_err(|e| e.to_string())
}

pub fn load_catalog(path: &Path) -> Catalog {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read catalog {}: {e}", path.display())));
    let catalog = parse_catalog(&content)
        .unwrap_or_else(|e| bail(format!("Failed to load catalog {}: {e}", path.display())));
    tracing::info!(items = catalog.len(), path = %path.display(), "catalog loaded");
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairrank_core::Category;

    #[test]
    fn test_parse_wrapped_catalog() {
        let json = r#"{"songs": [
            {"name": "Arcadia", "artist": "Goose", "category": "original", "times_played": 120},
            {"name": "Shakedown Street", "artist": "Grateful Dead", "category": "cover", "times_played": 40}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Shakedown Street").map(|i| i.category), Some(Category::Cover));
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"name": "Arcadia", "artist": "Goose", "category": "side_project"}]"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.get("Arcadia").map(|i| i.times_played), Some(0));
    }

    #[test]
    fn test_parse_items_alias() {
        let json = r#"{"items": [{"name": "Arcadia", "artist": "Goose", "category": "original"}]}"#;
        assert_eq!(parse_catalog(json).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"[
            {"name": "Arcadia", "artist": "Goose", "category": "original"},
            {"name": "Arcadia", "artist": "Goose", "category": "original"}
        ]"#;
        assert!(parse_catalog(json).unwrap_err().contains("Arcadia"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"[{"name": "Arcadia", "artist": "Goose", "category": "remix"}]"#;
        assert!(parse_catalog(json).is_err());
    }
}
