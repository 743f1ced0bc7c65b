pub mod builder;

use crate::ModelError;

use serde::{Deserialize, Serialize};

/// Metadata of a paper entering keyword curation.
///
/// Field names follow the importer service's paper record, so a record
/// returned by import or search can be deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperData {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(alias = "abstract")]
    pub summary: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl PaperData {
    /// Check the fields extraction needs: title, abstract and authors.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] naming the first missing or malformed field.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::validation("Paper title cannot be empty"));
        }

        if self.summary.trim().is_empty() {
            return Err(ModelError::validation("Paper abstract cannot be empty"));
        }

        if self.authors.is_empty() {
            return Err(ModelError::validation("Paper must have at least one author"));
        }

        if self.authors.iter().any(|author| author.trim().is_empty()) {
            return Err(ModelError::validation("Author names cannot be empty"));
        }

        if let Some(ref url) = self.pdf_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ModelError::validation(format!("Invalid PDF URL format: {url}")));
        }

        Ok(())
    }

    /// Identifier used in logs; falls back to the title when the record has no id.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            &self.title
        } else {
            &self.id
        }
    }
}
