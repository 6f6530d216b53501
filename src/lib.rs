pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpTriviaSource;
pub use app::TerminalGame;
pub use config::GameConfig;
pub use crate::core::{builder::BoardBuilder, session::GameSession};
pub use domain::model::{Board, Category, Clue, RevealResult, RevealState, TileAddress};
pub use utils::error::{DataServiceError, Result, TriviaError};
