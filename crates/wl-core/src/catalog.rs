//! Spectrum-pair datasets grouped into categories.
//!
//! A catalog is loaded once at startup and never changes afterwards. Three
//! document shapes are accepted:
//!
//! - `{"categories": {"Name": [["a", "b"], ...], ...}}`
//! - `{"spectrum_pairs": [["a", "b"], ...]}`
//! - `[["a", "b"], ...]`
//!
//! Category order follows the document. A synthetic [`ALL_CATEGORY`] holding
//! every pair is always appended last.

use std::path::Path;

use serde_json::Value;

use crate::error::{WlError, WlResult};
use crate::spectrum::SpectrumPair;

/// Name of the synthetic category that unions every other category.
pub const ALL_CATEGORY: &str = "All";

const BUILTIN_DATASET: &str = include_str!("../data/spectrum-pairs.json");

/// A named, non-empty group of spectrum pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    pairs: Vec<SpectrumPair>,
}

impl Category {
    /// Category name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pairs in dataset order.
    pub fn pairs(&self) -> &[SpectrumPair] {
        &self.pairs
    }
}

/// Every category available for a session, plus the synthetic "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// The dataset bundled with the crate.
    pub fn builtin() -> WlResult<Self> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> WlResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            categories = catalog.len(),
            pairs = catalog.total_pairs(),
            "loaded spectrum catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str) -> WlResult<Self> {
        let doc: Value = serde_json::from_str(text)?;
        match doc {
            Value::Array(items) => Self::from_pairs(parse_pairs(ALL_CATEGORY, items)?),
            Value::Object(mut map) => {
                if let Some(categories) = map.remove("categories") {
                    let Value::Object(categories) = categories else {
                        return Err(WlError::UnrecognizedShape);
                    };
                    let mut parsed = Vec::with_capacity(categories.len());
                    for (name, value) in categories {
                        let Value::Array(items) = value else {
                            return Err(WlError::NotAList(name));
                        };
                        let pairs = parse_pairs(&name, items)?;
                        parsed.push((name, pairs));
                    }
                    Self::from_categories(parsed)
                } else if let Some(pairs) = map.remove("spectrum_pairs") {
                    let Value::Array(items) = pairs else {
                        return Err(WlError::NotAList("spectrum_pairs".to_string()));
                    };
                    Self::from_pairs(parse_pairs(ALL_CATEGORY, items)?)
                } else {
                    Err(WlError::UnrecognizedShape)
                }
            }
            _ => Err(WlError::UnrecognizedShape),
        }
    }

    /// Build a catalog from named categories, appending "All".
    pub fn from_categories<I, S>(categories: I) -> WlResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<SpectrumPair>)>,
        S: Into<String>,
    {
        let mut built = Vec::new();
        let mut all = Vec::new();
        for (name, pairs) in categories {
            let name = name.into();
            if name == ALL_CATEGORY {
                return Err(WlError::ReservedCategory(name));
            }
            if pairs.is_empty() {
                return Err(WlError::EmptyCategory(name));
            }
            for (index, pair) in pairs.iter().enumerate() {
                validate_pair(&name, index, pair)?;
            }
            all.extend(pairs.iter().cloned());
            built.push(Category { name, pairs });
        }
        if all.is_empty() {
            return Err(WlError::EmptyDataset);
        }
        built.push(Category {
            name: ALL_CATEGORY.to_string(),
            pairs: all,
        });
        Ok(Self { categories: built })
    }

    /// Build an uncategorised catalog; only "All" is offered.
    pub fn from_pairs(pairs: Vec<SpectrumPair>) -> WlResult<Self> {
        if pairs.is_empty() {
            return Err(WlError::EmptyDataset);
        }
        for (index, pair) in pairs.iter().enumerate() {
            validate_pair(ALL_CATEGORY, index, pair)?;
        }
        Ok(Self {
            categories: vec![Category {
                name: ALL_CATEGORY.to_string(),
                pairs,
            }],
        })
    }

    /// All categories in menu order, "All" last.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Pairs for a category, if it exists.
    pub fn pairs(&self, name: &str) -> Option<&[SpectrumPair]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.pairs.as_slice())
    }

    /// Whether a category with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs(name).is_some()
    }

    /// Number of categories, including "All".
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false; a catalog holds at least "All".
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of distinct dataset entries (the size of "All").
    pub fn total_pairs(&self) -> usize {
        self.pairs(ALL_CATEGORY).map_or(0, <[SpectrumPair]>::len)
    }
}

fn parse_pairs(category: &str, items: Vec<Value>) -> WlResult<Vec<SpectrumPair>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<SpectrumPair>(item).map_err(|e| WlError::Malformed {
                category: category.to_string(),
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn validate_pair(category: &str, index: usize, pair: &SpectrumPair) -> WlResult<()> {
    if pair.left.trim().is_empty() || pair.right.trim().is_empty() {
        return Err(WlError::Malformed {
            category: category.to_string(),
            index,
            reason: "labels must not be blank".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorized_document() {
        let catalog = Catalog::from_json_str(
            r#"{"categories": {
                "Temperature": [["Hot", "Cold"], ["Warm", "Cool"]],
                "Sound": [["Quiet", "Loud"]]
            }}"#,
        )
        .unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, ["Temperature", "Sound", "All"]);
        assert_eq!(catalog.pairs("Sound").unwrap().len(), 1);
        assert_eq!(catalog.total_pairs(), 3);
        assert_eq!(
            catalog.pairs(ALL_CATEGORY).unwrap()[2],
            SpectrumPair::new("Quiet", "Loud")
        );
    }

    #[test]
    fn flat_document() {
        let catalog =
            Catalog::from_json_str(r#"{"spectrum_pairs": [["Hot", "Cold"], ["Soft", "Hard"]]}"#)
                .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(ALL_CATEGORY));
        assert_eq!(catalog.total_pairs(), 2);
    }

    #[test]
    fn bare_array_document() {
        let catalog = Catalog::from_json_str(r#"[["Hot", "Cold"]]"#).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["All"]);
    }

    #[test]
    fn builtin_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 1);
        assert_eq!(catalog.names().last(), Some(ALL_CATEGORY));
        let sum: usize = catalog
            .categories()
            .iter()
            .filter(|c| c.name() != ALL_CATEGORY)
            .map(|c| c.pairs().len())
            .sum();
        assert_eq!(sum, catalog.total_pairs());
    }

    #[test]
    fn malformed_pair_reports_location() {
        let err = Catalog::from_json_str(r#"{"categories": {"A": [["x", "y"], ["only one"]]}}"#)
            .unwrap_err();
        match err {
            WlError::Malformed {
                category, index, ..
            } => {
                assert_eq!(category, "A");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_label_rejected() {
        let err = Catalog::from_json_str(r#"[["Hot", "  "]]"#).unwrap_err();
        assert!(matches!(err, WlError::Malformed { index: 0, .. }));
    }

    #[test]
    fn empty_category_rejected() {
        let err = Catalog::from_json_str(r#"{"categories": {"A": []}}"#).unwrap_err();
        assert!(matches!(err, WlError::EmptyCategory(name) if name == "A"));
    }

    #[test]
    fn empty_dataset_rejected() {
        assert!(matches!(
            Catalog::from_json_str(r#"{"categories": {}}"#),
            Err(WlError::EmptyDataset)
        ));
        assert!(matches!(
            Catalog::from_json_str("[]"),
            Err(WlError::EmptyDataset)
        ));
    }

    #[test]
    fn reserved_name_rejected() {
        let err = Catalog::from_json_str(r#"{"categories": {"All": [["a", "b"]]}}"#).unwrap_err();
        assert!(matches!(err, WlError::ReservedCategory(_)));
    }

    #[test]
    fn wrong_shapes_rejected() {
        assert!(matches!(
            Catalog::from_json_str(r#"{"pairs": []}"#),
            Err(WlError::UnrecognizedShape)
        ));
        assert!(matches!(
            Catalog::from_json_str("42"),
            Err(WlError::UnrecognizedShape)
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"categories": {"A": "nope"}}"#),
            Err(WlError::NotAList(_))
        ));
        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(WlError::Parse(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        let err = Catalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, WlError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pairs.json");
        std::fs::write(&path, r#"{"spectrum_pairs": [["Hot", "Cold"]]}"#).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.total_pairs(), 1);
    }
}
