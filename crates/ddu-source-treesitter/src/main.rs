use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use futures::StreamExt;
use tracing::{error, info};

use ddu_source_treesitter::{
    Context, DefinitionSource, LuaTreesitterHost, ReplayHost, Source, SourceSettings, item::to_json_lines, logging,
};

/// Replay recorded host answers through the treesitter source and print the
/// resulting picker items as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "ddu-source-treesitter", version, about)]
struct Args {
    /// JSON fixture with the recorded plugin, parser and definitions answers.
    #[arg(long)]
    fixture: PathBuf,

    /// Buffer the picker context points at.
    #[arg(long, default_value_t = 1)]
    buf_nr: u64,

    /// Settings file (TOML, or JSON with a `.json` extension).
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match args.settings.as_deref().map(SourceSettings::load).transpose() {
        Ok(settings) => settings.unwrap_or_default(),
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        },
    };

    let mut logging_settings = settings.logging.clone();
    if let Some(log_file) = &args.log_file {
        logging_settings.file = Some(log_file.clone());
    }
    logging::init(&logging_settings, args.verbose);

    info!("Starting ddu-source-treesitter v{}", env!("CARGO_PKG_VERSION"));
    if let Some(log_file) = &logging_settings.file {
        info!("Log file: {}", log_file.display());
    }

    match run(&args.fixture, args.buf_nr, settings).await {
        Ok(count) => {
            info!("Emitted {count} items for buffer {}", args.buf_nr);
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}

async fn run(
    fixture: &Path,
    buf_nr: u64,
    settings: SourceSettings,
) -> Result<usize, Box<dyn std::error::Error>> {
    let runtime = ReplayHost::load(fixture).await?;
    let source = DefinitionSource::new(LuaTreesitterHost::with_settings(runtime, settings.host));

    let mut batches = source.gather(Context::new(buf_nr));
    let mut stdout = std::io::stdout().lock();
    let mut count = 0;
    while let Some(batch) = batches.next().await {
        let items = batch?;
        count += items.len();
        stdout.write_all(to_json_lines(&items)?.as_bytes())?;
    }
    stdout.flush()?;

    Ok(count)
}
