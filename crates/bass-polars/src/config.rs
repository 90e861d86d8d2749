//! Dashboard configuration
//!
//! Which columns are offered as analysis variables, which as grouping
//! variables (and under what label), and the help text shown for a selected
//! variable. The defaults describe the BASS dataset; a JSON file with the
//! same shape overrides them.

use crate::{Error, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A column offered for grouping, with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingOption {
    pub column: String,
    pub label: String,
}

impl GroupingOption {
    pub fn new(column: &str, label: &str) -> Self {
        Self {
            column: column.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Analysis variables start with this prefix
    pub variable_prefix: String,
    /// Columns containing any of these fragments (case-insensitive) are skipped
    pub excluded_fragments: Vec<String>,
    pub grouping_options: Vec<GroupingOption>,
    /// Column holding the assessment version, used as the first grouping
    pub version_column: String,
    pub default_variable: Option<String>,
    /// Column used by the overall summary table
    pub summary_group_by: String,
    /// Default x variable of the scatterplot
    pub default_scatter_x: Option<String>,
    pub variable_descriptions: BTreeMap<String, String>,
    pub default_description: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let mut variable_descriptions = BTreeMap::new();
        variable_descriptions.insert(
            "bass_inclusion_total".to_string(),
            "Inclusion criterion in BASS: whether the child's speech is understandable \
             (understanding, clarity to other people, concerns about the child's speech)."
                .to_string(),
        );
        variable_descriptions.insert(
            "bass_phonemes_total".to_string(),
            "Phoneme recognition in BASS: total ability to pronounce phonemes such as \
             b, p, m, n, d, h and w, and the more complex ch, sh, kw, th, v, s, r, l, z and f."
                .to_string(),
        );
        variable_descriptions.insert(
            "bass_subtotal".to_string(),
            "Overall sum of BASS performance across multiple domains.".to_string(),
        );

        Self {
            variable_prefix: "bass".to_string(),
            excluded_fragments: vec!["text".to_string()],
            grouping_options: vec![
                GroupingOption::new("quest", "Questionnaire (age)"),
                GroupingOption::new("gender_c", "Gender"),
                GroupingOption::new("income_c", "Family income"),
                GroupingOption::new("momed_c", "Mother's Education Level"),
                GroupingOption::new("dat_year", "Year of the assessment"),
            ],
            version_column: "version".to_string(),
            default_variable: Some("bass_subtotal".to_string()),
            summary_group_by: "quest".to_string(),
            default_scatter_x: Some("bass_subtotal".to_string()),
            variable_descriptions,
            default_description: "Select a variable to see more information.".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether `column` is offered as an analysis variable
    pub fn is_analysis_variable(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        column.starts_with(&self.variable_prefix)
            && !self
                .excluded_fragments
                .iter()
                .any(|f| lower.contains(&f.to_lowercase()))
    }

    /// Analysis variables of `df`, in column order
    pub fn analysis_variables(&self, df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .map(|c| c.to_string())
            .filter(|c| self.is_analysis_variable(c))
            .collect()
    }

    /// The variable selected when nothing else is
    pub fn default_variable(&self, df: &DataFrame) -> Result<String> {
        let variables = self.analysis_variables(df);
        if let Some(d) = &self.default_variable {
            if variables.contains(d) {
                return Ok(d.clone());
            }
        }
        variables.into_iter().next().ok_or_else(|| {
            Error::InvalidInput(format!(
                "no column starts with '{}'",
                self.variable_prefix
            ))
        })
    }

    /// Display label of a grouping column, the column name when unknown
    pub fn grouping_label<'a>(&'a self, column: &'a str) -> &'a str {
        if column == self.version_column {
            return "BASS version";
        }
        self.grouping_options
            .iter()
            .find(|o| o.column == column)
            .map(|o| o.label.as_str())
            .unwrap_or(column)
    }

    /// Help text for a variable
    pub fn describe_variable(&self, column: &str) -> &str {
        self.variable_descriptions
            .get(column)
            .map(String::as_str)
            .unwrap_or(&self.default_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df![
            "id" => [1, 2],
            "bass_subtotal" => [10.0, 12.0],
            "bass_phonemes_total" => [3.0, 4.0],
            "bass_open_Text" => ["a", "b"],
            "quest" => ["30", "36"],
        ]
        .unwrap()
    }

    #[test]
    fn test_analysis_variables_filter() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.analysis_variables(&frame()),
            vec!["bass_subtotal".to_string(), "bass_phonemes_total".to_string()]
        );
    }

    #[test]
    fn test_default_variable_falls_back_to_first() {
        let mut config = DashboardConfig::default();
        assert_eq!(config.default_variable(&frame()).unwrap(), "bass_subtotal");

        config.default_variable = Some("bass_missing".to_string());
        assert_eq!(config.default_variable(&frame()).unwrap(), "bass_subtotal");

        config.variable_prefix = "zzz".to_string();
        assert!(config.default_variable(&frame()).is_err());
    }

    #[test]
    fn test_labels_and_descriptions() {
        let config = DashboardConfig::default();
        assert_eq!(config.grouping_label("momed_c"), "Mother's Education Level");
        assert_eq!(config.grouping_label("version"), "BASS version");
        assert_eq!(config.grouping_label("other"), "other");
        assert!(config.describe_variable("bass_subtotal").starts_with("Overall sum"));
        assert_eq!(
            config.describe_variable("unknown"),
            "Select a variable to see more information."
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "variable_prefix": "item" }"#).unwrap();
        assert_eq!(config.variable_prefix, "item");
        assert_eq!(config.summary_group_by, "quest");

        let round: DashboardConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(round, config);
    }
}
