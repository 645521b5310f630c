//! Report presentation settings.

use crate::error::{GridviewError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Page chrome and labelling for generated reports. Every field has a
/// default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Heading shown on every page unless the workbook or caller supplies one.
    pub title: String,
    pub stylesheet: Option<String>,
    pub scripts: Vec<String>,
    pub attribution_text: String,
    pub attribution_url: Option<String>,
    /// `strftime`-style format of the generation timestamp.
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: "Spreadsheet".to_string(),
            stylesheet: Some("application.css".to_string()),
            scripts: vec!["jquery.min.js".to_string(), "application.js".to_string()],
            attribution_text: "gridview".to_string(),
            attribution_url: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ReportConfig {
    /// Reject settings that would only fail once a page is being written.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(GridviewError::Config(format!(
                "invalid timestamp_format {:?}",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}
