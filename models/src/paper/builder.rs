use crate::{ErrorLocation, ModelError, PaperData};

use std::panic::Location;

/// Builder for creating validated PaperData instances.
#[derive(Debug, Default)]
pub struct PaperDataBuilder {
    id: Option<String>,
    title: Option<String>,
    authors: Vec<String>,
    summary: Option<String>,
    pdf_url: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

impl PaperDataBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_authors<I, A>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.authors.extend(authors.into_iter().map(Into::into));
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_pdf_url(mut self, url: impl Into<String>) -> Self {
        self.pdf_url = Some(url.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = Some(updated.into());
        self
    }

    /// Build the PaperData with validation.
    #[track_caller]
    pub fn build(self) -> Result<PaperData, ModelError> {
        let title = self.title.ok_or_else(|| ModelError::Validation {
            message: String::from("Paper title is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let summary = self.summary.ok_or_else(|| ModelError::Validation {
            message: String::from("Paper abstract is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let paper = PaperData {
            id: self.id.unwrap_or_default(),
            title,
            authors: self.authors,
            summary,
            pdf_url: self.pdf_url,
            published: self.published,
            updated: self.updated,
        };

        paper.validate()?;

        Ok(paper)
    }
}
