use clap::{Parser, Subcommand};
use coach_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "AI coach feedback for completed workouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the coaching endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Override the request deadline in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt text for a session file
    Format {
        /// Session JSON exported from the workout app
        session: PathBuf,
    },

    /// Ask the coach for feedback on a session file
    Feedback {
        /// Session JSON exported from the workout app
        session: PathBuf,

        /// Dry run - print the prompt without calling the coach
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the coaching service is up
    Health,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        coach_core::logging::init_with_level("debug");
    } else {
        coach_core::logging::init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Formatting never touches the service, so only the other commands read config
    match &cli.command {
        Commands::Format { session } => cmd_format(session),
        Commands::Feedback { session, dry_run } => cmd_feedback(session, *dry_run, &cli).await,
        Commands::Health => cmd_health(&effective_config(&cli)?).await,
        Commands::Config => cmd_config(&effective_config(&cli)?),
    }
}

/// Config file, then command-line overrides
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.coach.endpoint = endpoint.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.coach.timeout_ms = timeout_ms;
    }
    config.coach.validate()?;
    tracing::debug!("Effective coach config: {:?}", config.coach);
    Ok(config)
}

fn cmd_format(path: &Path) -> Result<()> {
    let session = load_session(path)?;
    println!("{}", format_session(&session));
    Ok(())
}

async fn cmd_feedback(path: &Path, dry_run: bool, cli: &Cli) -> Result<()> {
    let session = load_session(path)?;

    if dry_run {
        println!("{}", format_session(&session));
        println!("\n[Dry run - not contacting the coach]");
        return Ok(());
    }

    let config = effective_config(cli)?;
    let client = FeedbackClient::new(&config.coach)?;
    eprintln!("AI Coach is analyzing your workout...");
    let feedback = client.feedback_for_session(&session).await?;

    println!("{}", feedback);
    Ok(())
}

async fn cmd_health(config: &Config) -> Result<()> {
    let client = FeedbackClient::new(&config.coach)?;
    let health = client.check_health().await?;

    let status = health.status.as_deref().unwrap_or("unknown");
    match health.message.as_deref() {
        Some(message) => println!("{}: {}", status, message),
        None => println!("{}", status),
    }

    if !health.is_healthy() {
        return Err(Error::Other(format!("Coach reported status {:?}", status)));
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
