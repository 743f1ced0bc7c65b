pub(crate) mod wire;

use crate::config::ServiceConfig;
use crate::error::{CoreError, KeywordServiceError};
use crate::service::KeywordService;

use wire::{DomainsResponse, ExtractRequest, ExtractResponse, ValidateRequest, ValidateResponse};

use common::{ErrorLocation, HttpStatusCode};
use models::{DomainListing, ExtractionResult, Keyword, PaperData, ValidationReport};

use std::panic::Location;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const KEYWORDS_EXTRACT_ENDPOINT: &str = "keywords/extract";
const KEYWORDS_VALIDATE_ENDPOINT: &str = "keywords/validate";
const KEYWORDS_DOMAINS_ENDPOINT: &str = "keywords/domains";

/// HTTP client for the importer service's keyword endpoints.
#[derive(Clone)]
pub struct ImporterClient {
    base_url: Url,
    client: Client,
}

impl ImporterClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url_str: &str) -> Result<Self, KeywordServiceError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    /// Create a client whose requests fail after `timeout`.
    ///
    /// A trailing `/` is appended to the base URL when missing so endpoint
    /// paths join under it (`http://host/api` + `keywords/extract` resolves
    /// to `http://host/api/keywords/extract`).
    pub fn with_timeout(base_url_str: &str, timeout: Duration) -> Result<Self, KeywordServiceError> {
        let base_url = if base_url_str.ends_with('/') {
            Url::parse(base_url_str)?
        } else {
            Url::parse(&format!("{base_url_str}/"))?
        };

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Create a client from the `service` section of the app config.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, CoreError> {
        let timeout = config.request_timeout()?;

        Ok(Self::with_timeout(&config.base_url, timeout)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Reject non-2xx responses, then parse the body as `T`.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, KeywordServiceError> {
        let status = response.status();

        if !status.is_success() {
            return Err(KeywordServiceError::Server {
                status_code: HttpStatusCode::from(status.as_u16()),
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: T = serde_json::from_slice(&bytes)?;

        Ok(parsed)
    }
}

impl KeywordService for ImporterClient {
    async fn extract_keywords(
        &self,
        paper: &PaperData,
    ) -> Result<ExtractionResult, KeywordServiceError> {
        let url = self.base_url.join(KEYWORDS_EXTRACT_ENDPOINT)?;
        let body = ExtractRequest {
            paper_data: paper.into(),
        };

        debug!("POST {url} for paper '{}'", paper.display_id());

        let response = self.client.post(url).json(&body).send().await?;
        let parsed: ExtractResponse = Self::read_json(response).await?;

        ExtractionResult::try_from(parsed)
    }

    async fn validate_keywords(
        &self,
        keywords: &[Keyword],
    ) -> Result<ValidationReport, KeywordServiceError> {
        let url = self.base_url.join(KEYWORDS_VALIDATE_ENDPOINT)?;
        let body = ValidateRequest::from(keywords);

        debug!("POST {url} with {} keywords", keywords.len());

        let response = self.client.post(url).json(&body).send().await?;
        let parsed: ValidateResponse = Self::read_json(response).await?;

        Ok(parsed.into())
    }

    async fn available_domains(&self) -> Result<DomainListing, KeywordServiceError> {
        let url = self.base_url.join(KEYWORDS_DOMAINS_ENDPOINT)?;

        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let parsed: DomainsResponse = Self::read_json(response).await?;

        Ok(parsed.into())
    }
}
