use crate::core::builder::BoardBuilder;
use crate::core::view::{BoardView, ControlView, TileUpdate};
use crate::core::{Board, ConfigProvider, RevealResult, TileAddress, TriviaSource};
use crate::utils::error::{Result, TriviaError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BuildStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// 進行中建置的憑證；只有最新一次 `begin_build` 發出的憑證能完成建置
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a build ticket must be passed to complete_build"]
pub struct BuildTicket {
    generation: u64,
}

struct PendingBuild<'a> {
    session: Option<&'a mut GameSession>,
    ticket: Option<BuildTicket>,
}

impl<'a> PendingBuild<'a> {
    fn finish(mut self, result: Result<Board>) -> Result<&'a Board> {
        match (self.session.take(), self.ticket.take()) {
            (Some(session), Some(ticket)) => session.complete_build(ticket, result),
            _ => Err(TriviaError::StaleBuild),
        }
    }
}

impl Drop for PendingBuild<'_> {
    fn drop(&mut self) {
        if let (Some(session), Some(ticket)) = (self.session.take(), self.ticket.take()) {
            let _ = session.abandon_build(ticket);
        }
    }
}

/// 一局遊戲的狀態擁有者。
///
/// 棋盤只會在建置完全成功後整個替換；建置失敗時保留前一個棋盤，
/// 狀態轉為 `Failed`，可以再次開始。同一時間只允許一個建置。
#[derive(Debug, Default)]
pub struct GameSession {
    board: Option<Board>,
    status: BuildStatus,
    generation: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn status(&self) -> &BuildStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == BuildStatus::Loading
    }

    pub fn begin_build(&mut self) -> Result<BuildTicket> {
        if self.is_loading() {
            tracing::warn!("Start requested while a board is still loading");
            return Err(TriviaError::BuildInProgress);
        }

        self.generation += 1;
        self.status = BuildStatus::Loading;
        tracing::debug!("Build {} started", self.generation);
        Ok(BuildTicket {
            generation: self.generation,
        })
    }

    pub fn complete_build(&mut self, ticket: BuildTicket, result: Result<Board>) -> Result<&Board> {
        if !self.is_loading() || ticket.generation != self.generation {
            return Err(TriviaError::StaleBuild);
        }

        match result {
            Ok(board) => {
                self.status = BuildStatus::Ready;
                Ok(&*self.board.insert(board))
            }
            Err(e) => {
                tracing::warn!("Build {} failed: {}", ticket.generation, e);
                self.status = BuildStatus::Failed(e.user_friendly_message());
                Err(e)
            }
        }
    }

    /// 放棄進行中的建置 (例如呼叫端取消了 future)，保留原棋盤並允許重試
    pub fn abandon_build(&mut self, ticket: BuildTicket) -> Result<()> {
        if !self.is_loading() || ticket.generation != self.generation {
            return Err(TriviaError::StaleBuild);
        }

        tracing::warn!("Build {} was cancelled", ticket.generation);
        self.status = BuildStatus::Failed("Loading the board was cancelled".to_string());
        Ok(())
    }

    /// future 在完成前被丟棄時，由 `PendingBuild` 負責放棄該次建置
    pub async fn start<S, C>(&mut self, builder: &mut BoardBuilder<S, C>) -> Result<&Board>
    where
        S: TriviaSource,
        C: ConfigProvider,
    {
        let ticket = self.begin_build()?;
        let pending = PendingBuild {
            session: Some(self),
            ticket: Some(ticket),
        };
        let result = builder.build_board().await;
        pending.finish(result)
    }

    pub fn advance(&mut self, category_index: usize, clue_index: usize) -> Result<RevealResult> {
        match self.board.as_mut() {
            Some(board) => board.advance(category_index, clue_index),
            None => Err(TriviaError::IndexOutOfRange {
                category: category_index,
                clue: clue_index,
            }),
        }
    }

    /// 推進一格並回傳畫面需要的更新，NoOp 時回傳 None
    pub fn reveal(&mut self, address: TileAddress) -> Result<Option<TileUpdate>> {
        let result = self.advance(address.category, address.clue)?;
        let state = self
            .board
            .as_ref()
            .and_then(|board| board.clue(address))
            .map(|clue| clue.reveal_state())
            .unwrap_or_default();

        Ok(TileUpdate::from_result(address, result, state))
    }

    pub fn board_view(&self) -> Option<BoardView> {
        self.board.as_ref().map(BoardView::from_board)
    }

    pub fn control(&self) -> ControlView {
        match self.status {
            BuildStatus::Idle => ControlView {
                label: "Start",
                enabled: true,
                loading: false,
            },
            BuildStatus::Loading => ControlView {
                label: "Loading...",
                enabled: false,
                loading: true,
            },
            BuildStatus::Ready => ControlView {
                label: "Restart",
                enabled: true,
                loading: false,
            },
            BuildStatus::Failed(_) => ControlView {
                label: "Retry",
                enabled: true,
                loading: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::test_support::{MockConfig, MockSource};
    use crate::domain::model::{Category, CategoryDetail, CategorySummary, Clue, RevealState};
    use crate::utils::error::DataServiceError;
    use std::time::Duration;

    fn one_tile_board(question: &str, answer: &str) -> Board {
        Board::new(vec![Category {
            id: 1,
            title: "Math".to_string(),
            clues: vec![Clue::new(question, answer)],
        }])
    }

    #[test]
    fn test_second_begin_while_loading_is_rejected() {
        let mut session = GameSession::new();
        assert_eq!(session.control().label, "Start");

        let ticket = session.begin_build().unwrap();
        assert!(session.control().loading);
        assert!(!session.control().enabled);
        assert!(matches!(
            session.begin_build(),
            Err(TriviaError::BuildInProgress)
        ));

        session
            .complete_build(ticket, Ok(one_tile_board("2+2", "4")))
            .unwrap();
        assert_eq!(session.status(), &BuildStatus::Ready);
        assert_eq!(session.control().label, "Restart");
    }

    #[test]
    fn test_failed_build_keeps_prior_board_and_is_retryable() {
        let mut session = GameSession::new();
        let ticket = session.begin_build().unwrap();
        session
            .complete_build(ticket, Ok(one_tile_board("2+2", "4")))
            .unwrap();
        session.advance(0, 0).unwrap();

        let ticket = session.begin_build().unwrap();
        let err = session
            .complete_build(
                ticket,
                Err(TriviaError::InsufficientCategories {
                    available: 2,
                    required: 6,
                }),
            )
            .unwrap_err();
        assert!(matches!(err, TriviaError::InsufficientCategories { .. }));

        assert!(matches!(session.status(), BuildStatus::Failed(_)));
        let control = session.control();
        assert_eq!(control.label, "Retry");
        assert!(control.enabled);
        assert!(!control.loading);

        let clue = session.board().unwrap().clue(TileAddress::new(0, 0)).unwrap();
        assert_eq!(clue.question, "2+2");
        assert_eq!(clue.reveal_state(), RevealState::QuestionShown);

        assert!(session.begin_build().is_ok());
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let mut session = GameSession::new();
        let ticket = session.begin_build().unwrap();
        session
            .complete_build(ticket, Ok(one_tile_board("Q", "A")))
            .unwrap();

        let forged = BuildTicket { generation: 1 };
        assert!(matches!(
            session.complete_build(forged, Ok(one_tile_board("X", "Y"))),
            Err(TriviaError::StaleBuild)
        ));
        assert_eq!(session.board().unwrap().categories()[0].clues[0].question, "Q");
    }

    #[test]
    fn test_reveal_scenario() {
        let mut session = GameSession::new();
        let ticket = session.begin_build().unwrap();
        session
            .complete_build(ticket, Ok(one_tile_board("2+2", "4")))
            .unwrap();
        let address = TileAddress::new(0, 0);

        let update = session.reveal(address).unwrap().unwrap();
        assert_eq!(update.text, "2+2");
        assert!(update.interactive);

        let update = session.reveal(address).unwrap().unwrap();
        assert_eq!(update.text, "4");
        assert!(!update.interactive);

        assert_eq!(session.reveal(address).unwrap(), None);
        assert_eq!(session.advance(0, 0).unwrap(), RevealResult::NoOp);
    }

    #[test]
    fn test_reveal_without_board_is_out_of_range() {
        let mut session = GameSession::new();
        assert!(matches!(
            session.reveal(TileAddress::new(0, 0)),
            Err(TriviaError::IndexOutOfRange {
                category: 0,
                clue: 0
            })
        ));
    }

    #[tokio::test]
    async fn test_restart_replaces_board_wholesale() {
        let mut session = GameSession::new();
        let mut builder = BoardBuilder::new(MockSource::with_pool(30, 5), MockConfig::new(6, 5));

        session.start(&mut builder).await.unwrap();
        session.advance(0, 0).unwrap();
        session.advance(0, 0).unwrap();
        let first = session.board().unwrap().clone();

        session.start(&mut builder).await.unwrap();
        let second = session.board().unwrap();

        assert_ne!(&first, second);
        assert!(second
            .categories()
            .iter()
            .flat_map(|c| c.clues.iter())
            .all(|clue| clue.reveal_state() == RevealState::Hidden));
        assert_eq!(session.control().label, "Restart");
    }

    #[tokio::test]
    async fn test_start_failure_leaves_session_retryable() {
        let mut session = GameSession::new();
        let mut builder = BoardBuilder::new(MockSource::with_pool(3, 5), MockConfig::new(6, 5));

        assert!(session.start(&mut builder).await.is_err());
        assert!(session.board().is_none());
        assert_eq!(session.control().label, "Retry");
        assert!(!session.is_loading());
    }

    /// 先睡一段時間才回應的題庫
    struct SlowSource {
        inner: MockSource,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl TriviaSource for SlowSource {
        async fn fetch_categories(
            &self,
            count: usize,
        ) -> std::result::Result<Vec<CategorySummary>, DataServiceError> {
            tokio::time::sleep(self.delay).await;
            self.inner.fetch_categories(count).await
        }

        async fn fetch_category(
            &self,
            id: u64,
        ) -> std::result::Result<CategoryDetail, DataServiceError> {
            self.inner.fetch_category(id).await
        }
    }

    #[tokio::test]
    async fn test_cancelled_start_does_not_block_next_build() {
        let mut session = GameSession::new();
        let mut slow = BoardBuilder::new(
            SlowSource {
                inner: MockSource::with_pool(10, 5),
                delay: Duration::from_secs(5),
            },
            MockConfig::new(6, 5),
        );

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), session.start(&mut slow)).await;
        assert!(outcome.is_err());

        assert!(!session.is_loading());
        assert!(matches!(session.status(), BuildStatus::Failed(_)));
        let control = session.control();
        assert_eq!(control.label, "Retry");
        assert!(control.enabled);

        let mut builder = BoardBuilder::new(MockSource::with_pool(10, 5), MockConfig::new(6, 5));
        session.start(&mut builder).await.unwrap();
        assert_eq!(session.status(), &BuildStatus::Ready);
        assert_eq!(session.board().unwrap().categories().len(), 6);
    }

    #[tokio::test]
    async fn test_cancelled_restart_keeps_previous_board() {
        let mut session = GameSession::new();
        let mut builder = BoardBuilder::new(MockSource::with_pool(10, 5), MockConfig::new(6, 5));
        session.start(&mut builder).await.unwrap();
        let before = session.board().unwrap().clone();

        let mut slow = BoardBuilder::new(
            SlowSource {
                inner: MockSource::with_pool(10, 5),
                delay: Duration::from_secs(5),
            },
            MockConfig::new(6, 5),
        );
        let outcome =
            tokio::time::timeout(Duration::from_millis(20), session.start(&mut slow)).await;
        assert!(outcome.is_err());

        assert_eq!(session.board(), Some(&before));
        assert_eq!(session.control().label, "Retry");
    }

    #[test]
    fn test_abandon_with_stale_ticket_changes_nothing() {
        let mut session = GameSession::new();
        let first = session.begin_build().unwrap();
        session
            .complete_build(first, Ok(one_tile_board("Q", "A")))
            .unwrap();

        let _current = session.begin_build().unwrap();
        let forged = BuildTicket { generation: 1 };
        assert!(matches!(
            session.abandon_build(forged),
            Err(TriviaError::StaleBuild)
        ));
        assert!(session.is_loading());
    }

    #[test]
    fn test_abandon_current_build_allows_retry() {
        let mut session = GameSession::new();
        let ticket = session.begin_build().unwrap();
        session.abandon_build(ticket).unwrap();

        assert_eq!(session.control().label, "Retry");
        assert!(session.begin_build().is_ok());
    }
}
