use crate::core::builder::BoardBuilder;
use crate::core::session::GameSession;
use crate::core::view::{BoardView, TileUpdate};
use crate::core::{ConfigProvider, TileAddress, TriviaSource};
use crate::utils::error::{Result, TriviaError};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const CELL_WIDTH: usize = 18;

pub const HELP_TEXT: &str = "\
Commands:
  start | restart      build a new board
  <category> <clue>    reveal a tile, e.g. '2 3' (also: reveal 2 3)
  board                show the board again
  help                 show this help
  quit                 leave the game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reveal(TileAddress),
    Board,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = TriviaError;

    fn from_str(input: &str) -> Result<Self> {
        let lowered = input.trim().to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        match words.as_slice() {
            ["start" | "restart" | "retry" | "s"] => Ok(Command::Start),
            ["board" | "b"] => Ok(Command::Board),
            ["help" | "h" | "?"] => Ok(Command::Help),
            ["quit" | "exit" | "q"] => Ok(Command::Quit),
            ["reveal" | "r", category, clue] | [category, clue] => {
                Ok(Command::Reveal(parse_address(input, category, clue)?))
            }
            _ => Err(TriviaError::InvalidCommand {
                input: input.trim().to_string(),
                reason: "unknown command".to_string(),
            }),
        }
    }
}

// 玩家輸入從 1 開始編號
fn parse_address(input: &str, category: &str, clue: &str) -> Result<TileAddress> {
    let parse = |word: &str| -> Result<usize> {
        match word.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(TriviaError::InvalidCommand {
                input: input.trim().to_string(),
                reason: format!("'{}' is not a tile number (tiles start at 1)", word),
            }),
        }
    };
    Ok(TileAddress::new(parse(category)?, parse(clue)?))
}

fn fit(text: &str, width: usize) -> String {
    let flattened: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= width {
        return format!("{:<width$}", flattened, width = width);
    }
    let truncated: String = flattened.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", truncated)
}

/// 把棋盤畫成文字表格；已完成的格子以中括號標示
pub fn render_board(view: &BoardView) -> String {
    let mut output = String::new();

    output.push_str("    ");
    for (index, header) in view.headers.iter().enumerate() {
        let title = format!("{} {}", index + 1, header);
        output.push_str(&format!("| {} ", fit(&title, CELL_WIDTH)));
    }
    output.push_str("|\n");
    output.push_str(&"-".repeat(4 + view.headers.len() * (CELL_WIDTH + 3) + 1));
    output.push('\n');

    for (row_index, row) in view.rows.iter().enumerate() {
        output.push_str(&format!("{:>3} ", row_index + 1));
        for tile in row {
            let label = if tile.interactive {
                tile.label.clone()
            } else {
                format!("[{}]", tile.label)
            };
            output.push_str(&format!("| {} ", fit(&label, CELL_WIDTH)));
        }
        output.push_str("|\n");
    }

    output
}

/// 終端機版的遊戲迴圈：讀取指令、更新 session、輸出畫面
pub struct TerminalGame<S: TriviaSource, C: ConfigProvider, W: Write> {
    session: GameSession,
    builder: BoardBuilder<S, C>,
    out: W,
}

impl<S: TriviaSource, C: ConfigProvider, W: Write> TerminalGame<S, C, W> {
    pub fn new(builder: BoardBuilder<S, C>, out: W) -> Self {
        Self {
            session: GameSession::new(),
            builder,
            out,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "Welcome to Trivia Board!")?;
        writeln!(self.out, "{}", HELP_TEXT)?;
        self.prompt()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                self.prompt()?;
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command).await?,
                Err(e) => self.report(&e)?,
            }
            self.prompt()?;
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    /// 遊戲層級的錯誤只顯示給玩家，IO 錯誤才往外傳
    pub async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start => self.start().await,
            Command::Reveal(address) => self.reveal(address),
            Command::Board => self.show_board(),
            Command::Help => {
                writeln!(self.out, "{}", HELP_TEXT)?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    async fn start(&mut self) -> Result<()> {
        let control = self.session.control();
        if !control.enabled {
            return self.report(&TriviaError::BuildInProgress);
        }

        writeln!(self.out, "⏳ Loading a new board...")?;
        self.out.flush()?;

        let outcome = self.session.start(&mut self.builder).await.map(|_| ());
        match outcome {
            Ok(()) => self.show_board(),
            Err(e) if e.is_retryable() => {
                tracing::warn!("⚠️ Board build failed, can be retried: {}", e);
                self.report(&e)?;
                writeln!(self.out, "🔁 Type 'retry' to try building the board again.")?;
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Board build failed: {}", e);
                self.report(&e)
            }
        }
    }

    fn reveal(&mut self, address: TileAddress) -> Result<()> {
        match self.session.reveal(address) {
            Ok(Some(update)) => self.print_update(&update),
            Ok(None) => {
                writeln!(self.out, "That tile is already fully revealed.")?;
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn print_update(&mut self, update: &TileUpdate) -> Result<()> {
        let title = self
            .session
            .board()
            .and_then(|board| board.categories().get(update.address.category))
            .map(|category| category.title.clone())
            .unwrap_or_default();

        if update.interactive {
            writeln!(
                self.out,
                "❓ {} #{}: {}",
                title,
                update.address.clue + 1,
                update.text
            )?;
        } else {
            writeln!(
                self.out,
                "✅ {} #{}: {}",
                title,
                update.address.clue + 1,
                update.text
            )?;
        }

        if self.session.board().is_some_and(|board| board.is_complete()) {
            writeln!(
                self.out,
                "🎉 Every clue has been revealed! Type 'restart' for a new board."
            )?;
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        match self.session.board_view() {
            Some(view) => write!(self.out, "{}", render_board(&view))?,
            None => writeln!(self.out, "No board yet. Type 'start' to begin.")?,
        }
        Ok(())
    }

    fn report(&mut self, error: &TriviaError) -> Result<()> {
        tracing::debug!("Reporting error to player: {:?}", error);
        let message = match error {
            // 顯示給玩家時換回從 1 開始的編號
            TriviaError::IndexOutOfRange { category, clue } => TriviaError::IndexOutOfRange {
                category: category + 1,
                clue: clue + 1,
            }
            .user_friendly_message(),
            other => other.user_friendly_message(),
        };
        writeln!(self.out, "❌ {}", message)?;
        writeln!(self.out, "💡 {}", error.recovery_suggestion())?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "[{}] > ", self.session.control().label)?;
        self.out.flush()?;
        Ok(())
    }
}
