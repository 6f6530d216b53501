use crate::config::GameConfig;
use crate::utils::error::{Result, TriviaError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔內容；所有欄位皆可省略，省略時沿用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    pub categories: Option<usize>,
    pub clues_per_category: Option<usize>,
    pub category_pool_size: Option<usize>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TriviaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TriviaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRIVIA_API_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TriviaError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將設定檔中有填寫的欄位覆蓋到 `config`
    pub fn apply_to(&self, config: &mut GameConfig) {
        if let Some(base_url) = &self.source.base_url {
            config.api_base_url = base_url.clone();
        }
        if let Some(timeout) = self.source.timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
        if let Some(categories) = self.board.categories {
            config.categories = categories;
        }
        if let Some(clues) = self.board.clues_per_category {
            config.clues_per_category = clues;
        }
        if let Some(pool) = self.board.category_pool_size {
            config.category_pool_size = pool;
        }
        if let Some(seed) = self.board.seed {
            config.seed = Some(seed);
        }
    }

    pub fn into_game_config(self) -> GameConfig {
        let mut config = GameConfig::default();
        self.apply_to(&mut config);
        config
    }
}
