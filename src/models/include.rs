use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An association a detail fetch may load alongside its root row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Association {
    Nation,
    Region,
    Categories,
    Subcategories,
    Instructions,
    Aliases,
    Images,
    Ingredients,
    Nations,
}

impl Association {
    pub const ALL: [Association; 9] = [
        Association::Nation,
        Association::Region,
        Association::Categories,
        Association::Subcategories,
        Association::Instructions,
        Association::Aliases,
        Association::Images,
        Association::Ingredients,
        Association::Nations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Association::Nation => "nation",
            Association::Region => "region",
            Association::Categories => "categories",
            Association::Subcategories => "subcategories",
            Association::Instructions => "instructions",
            Association::Aliases => "aliases",
            Association::Images => "images",
            Association::Ingredients => "ingredients",
            Association::Nations => "nations",
        }
    }
}

impl FromStr for Association {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Association::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| AppError::BadRequest {
                message: format!("Unknown include '{}'", s.trim()),
            })
    }
}

/// Declarative set of associations to load, e.g. parsed from `?include=nation,images`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSpec(BTreeSet<Association>);

impl IncludeSpec {
    pub fn new(associations: impl IntoIterator<Item = Association>) -> Self {
        Self(associations.into_iter().collect())
    }

    pub fn contains(&self, association: Association) -> bool {
        self.0.contains(&association)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Association> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Association> for IncludeSpec {
    fn from_iter<I: IntoIterator<Item = Association>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl FromStr for IncludeSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for IncludeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|a| a.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_include_list() {
        let spec: IncludeSpec = "images, Nation,,instructions".parse().unwrap();
        assert!(spec.contains(Association::Images));
        assert!(spec.contains(Association::Nation));
        assert!(spec.contains(Association::Instructions));
        assert!(!spec.contains(Association::Aliases));
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let a: IncludeSpec = "aliases,images,aliases".parse().unwrap();
        let b: IncludeSpec = "images,aliases".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "aliases,images");
    }

    #[test]
    fn test_unknown_include_is_bad_request() {
        let err = "images,steps".parse::<IncludeSpec>().unwrap_err();
        match err {
            AppError::BadRequest { message } => assert!(message.contains("steps")),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_string_is_empty_spec() {
        assert!("".parse::<IncludeSpec>().unwrap().is_empty());
    }
}
