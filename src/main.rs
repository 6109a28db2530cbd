use clap::Parser;
use firestore_conn::utils::logger;
use firestore_conn::{CliConfig, Outcome, Session, StatusReporter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting firestore-conn");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let session_config = match config.resolve() {
        Ok(session_config) => session_config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    let session = Session::new(session_config);
    let mut reporter = StatusReporter::stdout();

    match session.run(&mut reporter).await {
        Ok(Outcome::Failed(e)) => {
            // 文件操作的錯誤已經輸出，不影響結束碼
            tracing::debug!("Document operation failed: {:?}", e);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("❌ Connection failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            // 憑證或設定問題 => 2，其他（網路、授權）=> 1
            let exit_code = if e.is_user_error() { 2 } else { 1 };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
