pub mod builder;
pub mod sampling;
pub mod session;
pub mod view;

pub use crate::domain::model::{
    Board, Category, Clue, RevealResult, RevealState, TileAddress,
};
pub use crate::domain::ports::{ConfigProvider, TriviaSource};
pub use crate::utils::error::Result;
