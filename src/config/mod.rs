#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{Result, TriviaError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://rithm-jeopardy.herokuapp.com/api/";
pub const DEFAULT_CATEGORY_COUNT: usize = 6;
pub const DEFAULT_CLUES_PER_CATEGORY: usize = 5;
/// 資料服務單次最多回傳 100 個分類
pub const MAX_CATEGORY_POOL_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 合併預設值、設定檔與命令列後的最終設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub api_base_url: String,
    pub categories: usize,
    pub clues_per_category: usize,
    pub category_pool_size: usize,
    pub request_timeout_seconds: u64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORY_COUNT,
            clues_per_category: DEFAULT_CLUES_PER_CATEGORY,
            category_pool_size: MAX_CATEGORY_POOL_SIZE,
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            seed: None,
        }
    }
}

impl ConfigProvider for GameConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn category_count(&self) -> usize {
        self.categories
    }

    fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    fn category_pool_size(&self) -> usize {
        self.category_pool_size
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_positive_number("categories", self.categories, 1)?;
        validation::validate_positive_number("clues_per_category", self.clues_per_category, 1)?;
        validation::validate_range(
            "category_pool_size",
            self.category_pool_size,
            1,
            MAX_CATEGORY_POOL_SIZE,
        )?;
        validation::validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 300)?;

        if self.category_pool_size < self.categories {
            return Err(TriviaError::ConfigValidationError {
                field: "category_pool_size".to_string(),
                message: format!(
                    "pool of {} cannot supply {} distinct categories",
                    self.category_pool_size, self.categories
                ),
            });
        }

        Ok(())
    }
}
