use crate::domain::model::{Board, RevealResult, RevealState, TileAddress};
use serde::Serialize;

/// 尚未揭曉的格子顯示的文字
pub const HIDDEN_TILE_LABEL: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub address: TileAddress,
    pub label: String,
    pub interactive: bool,
}

/// 棋盤畫面：標題列為分類，每一列是同一個題號
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TileView>>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let (_, row_count) = board.dimensions();
        let headers = board.category_titles().map(str::to_string).collect();

        let rows = (0..row_count)
            .map(|clue_index| {
                board
                    .categories()
                    .iter()
                    .enumerate()
                    .filter_map(|(category_index, category)| {
                        let clue = category.clues.get(clue_index)?;
                        Some(TileView {
                            address: TileAddress::new(category_index, clue_index),
                            label: clue
                                .visible_text()
                                .unwrap_or(HIDDEN_TILE_LABEL)
                                .to_string(),
                            interactive: !clue.reveal_state().is_terminal(),
                        })
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn tile(&self, address: TileAddress) -> Option<&TileView> {
        self.rows
            .get(address.clue)
            .and_then(|row| row.get(address.category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileUpdate {
    pub address: TileAddress,
    pub text: String,
    pub interactive: bool,
}

impl TileUpdate {
    /// `state` 為推進之後的狀態；NoOp 不需要更新畫面
    pub fn from_result(
        address: TileAddress,
        result: RevealResult,
        state: RevealState,
    ) -> Option<Self> {
        match result {
            RevealResult::ShowText(text) => Some(Self {
                address,
                text,
                interactive: !state.is_terminal(),
            }),
            RevealResult::NoOp => None,
        }
    }
}

/// 開始/重新開始按鈕與讀取指示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub label: &'static str,
    pub enabled: bool,
    pub loading: bool,
}
