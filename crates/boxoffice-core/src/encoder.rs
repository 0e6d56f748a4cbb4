//! One-hot feature encoding
//!
//! Builds the fixed-order numeric vector the regression model was trained
//! on: the four base columns followed by one indicator column per genre,
//! actor and director.
//!
//! A selection that is not a member of its enumeration leaves every column of
//! its group at zero. The request still goes through; the mismatch is logged
//! and reported via [`FeatureVector::unmatched`].

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, CategoryGroup, BASE_COLUMNS};

/// Raw model inputs after validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieFeatures {
    pub budget: f64,
    pub popularity: f64,
    pub runtime: f64,
    pub release_year: f64,
    pub genre: String,
    pub actor: String,
    pub director: String,
}

/// A categorical selection that matched no indicator column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedSelection {
    pub group: CategoryGroup,
    pub value: String,
}

/// Encoded model input
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Arc<[String]>,
    values: Vec<f64>,
    unmatched: Vec<UnmatchedSelection>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i).copied())
    }

    /// (column, value) pairs in model order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Selections that were silently dropped during encoding
    pub fn unmatched(&self) -> &[UnmatchedSelection] {
        &self.unmatched
    }
}

/// Encoder bound to a catalog's column layout
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    catalog: Catalog,
    columns: Arc<[String]>,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl FeatureEncoder {
    pub fn new(catalog: Catalog) -> Self {
        let columns: Vec<String> = BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(catalog.groups().into_iter().flat_map(|e| e.columns()))
            .collect();

        Self {
            catalog,
            columns: columns.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ordered column names the model expects
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Encode validated inputs into the model's column layout
    pub fn encode(&self, features: &MovieFeatures) -> FeatureVector {
        let mut values = vec![0.0; self.columns.len()];
        values[0] = features.budget;
        values[1] = features.popularity;
        values[2] = features.runtime;
        values[3] = features.release_year;

        let mut unmatched = Vec::new();
        let mut offset = BASE_COLUMNS.len();

        let selections = [
            features.genre.as_str(),
            features.actor.as_str(),
            features.director.as_str(),
        ];
        for (enumeration, selection) in self.catalog.groups().into_iter().zip(selections) {
            match enumeration.position(selection) {
                Some(i) => values[offset + i] = 1.0,
                None => {
                    tracing::warn!(
                        group = %enumeration.group,
                        value = selection,
                        "selection not in enumeration, indicator columns left at 0"
                    );
                    unmatched.push(UnmatchedSelection {
                        group: enumeration.group,
                        value: selection.to_string(),
                    });
                }
            }
            offset += enumeration.len();
        }

        FeatureVector {
            columns: Arc::clone(&self.columns),
            values,
            unmatched,
        }
    }
}
