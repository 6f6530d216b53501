use crate::utils::error::{Result, TriviaError};
use serde::{Deserialize, Deserializer, Serialize};

/// 單一題目格的揭曉進度，只能依序前進
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    QuestionShown,
    AnswerShown,
}

impl RevealState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RevealState::AnswerShown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealResult {
    ShowText(String),
    NoOp,
}

/// 棋盤座標：第幾個分類、該分類中的第幾題 (皆從 0 開始)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAddress {
    pub category: usize,
    pub clue: usize,
}

impl TileAddress {
    pub fn new(category: usize, clue: usize) -> Self {
        Self { category, clue }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    reveal_state: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal_state: RevealState::Hidden,
        }
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    /// 目前格子上應顯示的文字，尚未揭曉時為 None
    pub fn visible_text(&self) -> Option<&str> {
        match self.reveal_state {
            RevealState::Hidden => None,
            RevealState::QuestionShown => Some(&self.question),
            RevealState::AnswerShown => Some(&self.answer),
        }
    }

    /// Hidden -> QuestionShown -> AnswerShown; AnswerShown is terminal.
    pub fn advance(&mut self) -> RevealResult {
        match self.reveal_state {
            RevealState::Hidden => {
                self.reveal_state = RevealState::QuestionShown;
                RevealResult::ShowText(self.question.clone())
            }
            RevealState::QuestionShown => {
                self.reveal_state = RevealState::AnswerShown;
                RevealResult::ShowText(self.answer.clone())
            }
            RevealState::AnswerShown => RevealResult::NoOp,
        }
    }
}

impl From<ClueData> for Clue {
    fn from(data: ClueData) -> Self {
        Clue::new(data.question, data.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub title: String,
    pub clues: Vec<Clue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_titles(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.title.as_str())
    }

    /// (分類數, 每個分類中最多的題數)
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self
            .categories
            .iter()
            .map(|c| c.clues.len())
            .max()
            .unwrap_or(0);
        (self.categories.len(), rows)
    }

    pub fn clue(&self, address: TileAddress) -> Option<&Clue> {
        self.categories
            .get(address.category)
            .and_then(|c| c.clues.get(address.clue))
    }

    pub fn is_complete(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|c| c.clues.iter())
            .all(|clue| clue.reveal_state().is_terminal())
    }

    pub fn advance(&mut self, category_index: usize, clue_index: usize) -> Result<RevealResult> {
        let clue = self
            .categories
            .get_mut(category_index)
            .and_then(|c| c.clues.get_mut(clue_index))
            .ok_or(TriviaError::IndexOutOfRange {
                category: category_index,
                clue: clue_index,
            })?;
        Ok(clue.advance())
    }
}

/// `GET categories?count=n` 回傳陣列中的一筆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
    pub title: String,
}

/// `GET category?id=n` 的回應內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: u64,
    pub title: String,
    pub clues: Vec<ClueData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueData {
    pub question: String,
    #[serde(deserialize_with = "text_or_number")]
    pub answer: String,
}

// 部分題目的答案是純數字
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::new(vec![
            Category {
                id: 1,
                title: "Math".to_string(),
                clues: vec![Clue::new("2+2", "4"), Clue::new("1+1", "2")],
            },
            Category {
                id: 2,
                title: "Literature".to_string(),
                clues: vec![Clue::new("Hamlet Author", "Shakespeare")],
            },
        ])
    }

    #[test]
    fn test_clue_reveal_sequence() {
        let mut clue = Clue::new("2+2", "4");
        assert_eq!(clue.reveal_state(), RevealState::Hidden);
        assert_eq!(clue.visible_text(), None);

        assert_eq!(clue.advance(), RevealResult::ShowText("2+2".to_string()));
        assert_eq!(clue.reveal_state(), RevealState::QuestionShown);
        assert_eq!(clue.visible_text(), Some("2+2"));

        assert_eq!(clue.advance(), RevealResult::ShowText("4".to_string()));
        assert_eq!(clue.reveal_state(), RevealState::AnswerShown);

        assert_eq!(clue.advance(), RevealResult::NoOp);
        assert_eq!(clue.reveal_state(), RevealState::AnswerShown);
    }

    #[test]
    fn test_answer_shown_is_idempotent() {
        let mut clue = Clue::new("Q", "A");
        clue.advance();
        clue.advance();
        let snapshot = clue.clone();
        for _ in 0..10 {
            assert_eq!(clue.advance(), RevealResult::NoOp);
        }
        assert_eq!(clue, snapshot);
    }

    #[test]
    fn test_board_advance_targets_single_tile() {
        let mut board = sample_board();
        let result = board.advance(0, 1).unwrap();
        assert_eq!(result, RevealResult::ShowText("1+1".to_string()));

        assert_eq!(
            board.clue(TileAddress::new(0, 1)).unwrap().reveal_state(),
            RevealState::QuestionShown
        );
        assert_eq!(
            board.clue(TileAddress::new(0, 0)).unwrap().reveal_state(),
            RevealState::Hidden
        );
        assert_eq!(
            board.clue(TileAddress::new(1, 0)).unwrap().reveal_state(),
            RevealState::Hidden
        );
    }

    #[test]
    fn test_board_advance_out_of_range_does_not_mutate() {
        let mut board = sample_board();
        let before = board.clone();

        for (category, clue) in [(2, 0), (1, 1), (0, 2), (usize::MAX, 0)] {
            match board.advance(category, clue) {
                Err(TriviaError::IndexOutOfRange {
                    category: c,
                    clue: q,
                }) => {
                    assert_eq!((c, q), (category, clue));
                }
                other => panic!("expected IndexOutOfRange, got {:?}", other),
            }
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_board_dimensions_and_completion() {
        let mut board = sample_board();
        assert_eq!(board.dimensions(), (2, 2));
        assert_eq!(
            board.category_titles().collect::<Vec<_>>(),
            vec!["Math", "Literature"]
        );
        assert!(!board.is_complete());

        for (category, clue) in [(0, 0), (0, 1), (1, 0)] {
            board.advance(category, clue).unwrap();
            board.advance(category, clue).unwrap();
        }
        assert!(board.is_complete());
    }

    #[test]
    fn test_category_detail_accepts_numeric_answers_and_extra_fields() {
        let json = serde_json::json!({
            "id": 3,
            "title": "Math",
            "clues_count": 2,
            "clues": [
                {"id": 11, "question": "2+2", "answer": 4, "value": 200},
                {"id": 12, "question": "Square root of 9", "answer": "3"}
            ]
        });

        let detail: CategoryDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.clues[0].answer, "4");
        assert_eq!(detail.clues[1].answer, "3");
    }

    #[test]
    fn test_category_detail_rejects_missing_fields() {
        let json = serde_json::json!({
            "id": 3,
            "title": "Math",
            "clues": [{"question": "2+2"}]
        });
        assert!(serde_json::from_value::<CategoryDetail>(json).is_err());

        let json = serde_json::json!({"id": 3, "title": "Math", "clues": [{"question": "Q", "answer": null}]});
        assert!(serde_json::from_value::<CategoryDetail>(json).is_err());
    }
}
