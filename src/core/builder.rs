use crate::core::sampling::{distinct_ids, sample_without_replacement};
use crate::core::{Board, Category, Clue, ConfigProvider, TriviaSource};
use crate::utils::error::{Result, TriviaError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// 從題庫來源抽出分類與題目，組成一個全新的棋盤
pub struct BoardBuilder<S: TriviaSource, C: ConfigProvider> {
    source: S,
    config: C,
    rng: StdRng,
}

impl<S: TriviaSource, C: ConfigProvider> BoardBuilder<S, C> {
    pub fn new(source: S, config: C) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            source,
            config,
            rng,
        }
    }

    /// 每次呼叫都重新向來源取資料，不做任何快取。
    /// 分類細節依抽樣順序逐一請求，不並行。
    pub async fn build_board(&mut self) -> Result<Board> {
        let started = Instant::now();
        let category_count = self.config.category_count();
        let clue_count = self.config.clues_per_category();

        tracing::info!(
            "🎲 Building board: {} categories x {} clues",
            category_count,
            clue_count
        );

        let summaries = self
            .source
            .fetch_categories(self.config.category_pool_size())
            .await?;
        let pool = distinct_ids(&summaries);
        tracing::debug!(
            "Category pool: {} entries, {} distinct ids",
            summaries.len(),
            pool.len()
        );

        let picked = sample_without_replacement(pool, category_count, &mut self.rng).map_err(
            |short| TriviaError::InsufficientCategories {
                available: short.available,
                required: short.required,
            },
        )?;

        let mut categories = Vec::with_capacity(picked.len());
        for id in picked {
            let detail = self.source.fetch_category(id).await?;
            let title = detail.title;

            let clues = sample_without_replacement(detail.clues, clue_count, &mut self.rng)
                .map_err(|short| TriviaError::InsufficientClues {
                    category: title.clone(),
                    available: short.available,
                    required: short.required,
                })?;

            tracing::debug!("Sampled {} clues from '{}'", clues.len(), title);
            categories.push(Category {
                id,
                title,
                clues: clues.into_iter().map(Clue::from).collect(),
            });
        }

        tracing::info!(
            "✅ Board ready with {} categories in {:?}",
            categories.len(),
            started.elapsed()
        );
        Ok(Board::new(categories))
    }
}
