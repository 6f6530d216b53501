use crate::domain::model::{CategoryDetail, CategorySummary};
use crate::utils::error::DataServiceError;
use async_trait::async_trait;
use std::time::Duration;

/// 題庫來源 (遠端 trivia API 或測試替身)
#[async_trait]
pub trait TriviaSource: Send + Sync {
    async fn fetch_categories(
        &self,
        count: usize,
    ) -> std::result::Result<Vec<CategorySummary>, DataServiceError>;

    async fn fetch_category(&self, id: u64) -> std::result::Result<CategoryDetail, DataServiceError>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn category_count(&self) -> usize;
    fn clues_per_category(&self) -> usize;
    fn category_pool_size(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn seed(&self) -> Option<u64>;
}
