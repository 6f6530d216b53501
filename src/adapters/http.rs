use crate::domain::model::{CategoryDetail, CategorySummary};
use crate::domain::ports::{ConfigProvider, TriviaSource};
use crate::utils::error::DataServiceError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

type ServiceResult<T> = std::result::Result<T, DataServiceError>;

/// 以 reqwest 存取 trivia API (`categories` 與 `category` 兩個端點)
#[derive(Debug, Clone)]
pub struct HttpTriviaSource {
    base_url: Url,
    client: Client,
}

impl HttpTriviaSource {
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        // Url::join 會取代最後一段路徑，所以基底必須以 '/' 結尾
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> ServiceResult<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: (&str, String)) -> ServiceResult<Url> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().append_pair(query.0, &query.1);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ServiceResult<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(DataServiceError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| DataServiceError::Malformed {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl TriviaSource for HttpTriviaSource {
    async fn fetch_categories(&self, count: usize) -> ServiceResult<Vec<CategorySummary>> {
        let url = self.endpoint("categories", ("count", count.to_string()))?;
        let categories: Vec<CategorySummary> = self.get_json(url).await?;
        tracing::debug!("Fetched {} candidate categories", categories.len());
        Ok(categories)
    }

    async fn fetch_category(&self, id: u64) -> ServiceResult<CategoryDetail> {
        let url = self.endpoint("category", ("id", id.to_string()))?;
        let detail: CategoryDetail = self.get_json(url).await?;
        tracing::debug!(
            "Fetched category {} '{}' with {} clues",
            detail.id,
            detail.title,
            detail.clues.len()
        );
        Ok(detail)
    }
}
