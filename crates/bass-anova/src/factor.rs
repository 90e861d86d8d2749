//! Categorical factors

use bass_core::{CategoryLabel, Error, Result};
use std::collections::BTreeSet;

/// A categorical predictor: its sorted levels and the level index of every
/// observation
///
/// The first level is the reference level of the treatment coding.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    name: String,
    levels: Vec<CategoryLabel>,
    codes: Vec<usize>,
}

impl Factor {
    /// Encode one label per observation
    pub fn encode(name: impl Into<String>, labels: &[CategoryLabel]) -> Result<Self> {
        let name = name.into();
        if labels.is_empty() {
            return Err(Error::InvalidInput(format!(
                "factor '{name}' has no observations"
            )));
        }

        let levels: Vec<CategoryLabel> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let codes = labels
            .iter()
            .map(|l| levels.binary_search(l).unwrap_or_default())
            .collect();

        Ok(Self { name, levels, codes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[CategoryLabel] {
        &self.levels
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn n_obs(&self) -> usize {
        self.codes.len()
    }

    /// Number of dummy columns under treatment coding
    pub fn n_contrasts(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn reference_level(&self) -> &CategoryLabel {
        &self.levels[0]
    }
}
