use clap::Parser;
use tokio::io::BufReader;
use trivia_board::utils::error::ErrorSeverity;
use trivia_board::utils::{logger, validation::Validate};
use trivia_board::{BoardBuilder, CliConfig, HttpTriviaSource, TerminalGame, TriviaError};

fn exit_with(e: &TriviaError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting trivia-board");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let source = match HttpTriviaSource::from_config(&config) {
        Ok(source) => source,
        Err(e) => exit_with(&TriviaError::from(e)),
    };

    let builder = BoardBuilder::new(source, config);
    let mut game = TerminalGame::new(builder, std::io::stdout());

    if let Err(e) = game.run(BufReader::new(tokio::io::stdin())).await {
        exit_with(&e);
    }

    Ok(())
}
