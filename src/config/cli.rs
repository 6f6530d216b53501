use crate::config::toml_config::TomlConfig;
use crate::config::GameConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "trivia-board")]
#[command(about = "Play a trivia board game in the terminal")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the trivia data service
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Number of categories on the board
    #[arg(long)]
    pub categories: Option<usize>,

    /// Number of clues per category
    #[arg(long)]
    pub clues_per_category: Option<usize>,

    /// How many candidate categories to request before sampling
    #[arg(long)]
    pub category_pool_size: Option<usize>,

    /// Seed for reproducible boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 預設值 <- 設定檔 <- 命令列
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.into_game_config()
            }
            None => GameConfig::default(),
        };

        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(categories) = self.categories {
            config.categories = categories;
        }
        if let Some(clues) = self.clues_per_category {
            config.clues_per_category = clues;
        }
        if let Some(pool) = self.category_pool_size {
            config.category_pool_size = pool;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.request_timeout_seconds = timeout;
        }

        Ok(config)
    }
}
