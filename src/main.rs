mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spinlog::layer::AnimationAwareLayer;
use spinlog::{global, Settings, TermColor};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spinlog", version, about = "Animation-aware console logging")]
struct Cli {
    /// Application name, used as the logger name and log file prefix
    #[arg(long, global = true, default_value = "spinlog")]
    app_name: String,

    /// Log at info level instead of debug
    #[arg(long, global = true)]
    quiet: bool,

    /// Force console timestamps on or off (default: CONSOLE_SHOW_TIMESTAMP)
    #[arg(long, global = true)]
    timestamps: Option<bool>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through every log level, colored output and animation style
    Demo,
    /// List the registered animation styles
    Styles,
    /// Run a single spinner for a while, then stop it
    Spin {
        /// Text shown next to the spinner
        #[arg(long, default_value = "Working")]
        message: String,
        /// Animation style key
        #[arg(long)]
        style: Option<String>,
        /// Spinner color
        #[arg(long)]
        color: Option<TermColor>,
        /// How long to spin
        #[arg(long, default_value_t = 2.0)]
        seconds: f64,
        /// Report failure instead of success when stopping
        #[arg(long)]
        fail: bool,
        /// Message printed when the spinner stops
        #[arg(long = "final")]
        final_message: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings are resolved once here and shared with the global handle.
    let settings = Settings::load()?;
    let _ = global::set_settings(settings.clone());

    let log = global::initialize(&cli.app_name, !cli.quiet, cli.timestamps);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(AnimationAwareLayer::new(log.clone()))
        .init();

    let result = match cli.command {
        Command::Demo => cli::demo::demo(&log),
        Command::Styles => cli::styles::styles(&log),
        Command::Spin {
            message,
            style,
            color,
            seconds,
            fail,
            final_message,
        } => cli::spin::spin(
            &log,
            cli::spin::SpinArgs {
                message,
                style,
                color,
                seconds,
                success: !fail,
                final_message,
            },
        ),
    };

    log.shutdown();
    result
}
