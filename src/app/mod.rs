pub mod terminal;

pub use terminal::{render_board, Command, TerminalGame};
