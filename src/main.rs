//! Command-line access to a workspace's resolved translations.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use locale_fallback::Localizer;
use locale_fallback::config::{
    ConfigError,
    ConfigManager,
};
use locale_fallback::locale::{
    LocaleError,
    LocaleSet,
};
use tracing_subscriber::EnvFilter;

/// Resolve translation keys with fallback to a secondary locale.
#[derive(Debug, Parser)]
#[command(name = "locale-fallback", version, about)]
struct Cli {
    /// Workspace root containing the translation files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Override `primaryLocale` from the settings file
    #[arg(long)]
    primary: Option<String>,

    /// Override `fallbackLocale` from the settings file
    #[arg(long)]
    fallback: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Print the resolved value of each key path
    Get {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List key paths the primary locale leaves to the fallback
    Missing,
    /// Print the fully merged translation tree as JSON
    Merge,
    /// List the locales found in the workspace
    Locales,
}

/// Errors surfaced by the command line
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Placeholder printed for paths that resolve to nothing
const MISSING_MARKER: &str = "<missing>";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let guard = init_tracing(cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            // ログがファイルに向いているときも利用者には見せる
            if guard.is_some() {
                let _ = writeln!(std::io::stderr(), "Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Sets up the subscriber; the returned guard flushes the log file on drop.
fn init_tracing(log_file: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("locale_fallback=info"));

    if let Some(path) = log_file
        && let Some(file_name) = path.file_name()
    {
        let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
        return Some(guard);
    }

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    None
}

/// Loads settings, applies overrides and runs the subcommand.
async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::load(&cli.root)?;
    config_manager.override_locales(cli.primary, cli.fallback)?;
    let settings = config_manager.settings();

    match cli.command {
        Command::Get { paths } => {
            let localizer = Localizer::from_settings(&cli.root, settings).await?;
            let mut out = std::io::stdout().lock();
            for path in &paths {
                let resolved = localizer.resolve_path(path);
                match (resolved.as_str(), resolved.to_value()) {
                    (Some(text), _) => writeln!(out, "{text}")?,
                    (None, Some(value)) => writeln!(out, "{}", serde_json::to_string(&value)?)?,
                    (None, None) => writeln!(out, "{MISSING_MARKER}")?,
                }
            }
        }
        Command::Missing => {
            let localizer = Localizer::from_settings(&cli.root, settings).await?;
            let mut out = std::io::stdout().lock();
            for key in localizer.missing_keys() {
                writeln!(out, "{key}")?;
            }
        }
        Command::Merge => {
            let localizer = Localizer::from_settings(&cli.root, settings).await?;
            let merged = serde_json::to_string_pretty(&localizer.materialize())?;
            writeln!(std::io::stdout().lock(), "{merged}")?;
        }
        Command::Locales => {
            // ロケールの組が揃っていなくても一覧は出せる
            let locales = LocaleSet::load(&cli.root, settings).await?;
            let mut out = std::io::stdout().lock();
            for locale in locales.locales() {
                writeln!(out, "{locale}")?;
            }
        }
    }

    Ok(())
}
