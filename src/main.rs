use clap::Parser;
use nur::Engine;
use nur::core::config::{self, CliOverrides, NurConfig};
use nur::core::model::TranslationLang;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "nur",
    version,
    about = "Read the Quran and Hadith with AI insight and isnad study"
)]
struct Args {
    /// AI engine for insights (overrides config and NUR_ENGINE)
    #[arg(short, long, value_enum)]
    engine: Option<Engine>,

    /// Translation language
    #[arg(short, long, value_enum)]
    lang: Option<TranslationLang>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to nur.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("nur.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}; continuing with defaults");
        NurConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            engine: args.engine,
            language: args.lang,
        },
    );

    log::info!(
        "Nur starting up with engine {:?}, language {:?}",
        resolved.engine,
        resolved.language
    );

    nur::tui::run(resolved)
}
