use std::time::Duration;

use anyhow::{Context, Result};

use spinlog::{LoggerHandle, TermColor};

pub struct SpinArgs {
    pub message: String,
    pub style: Option<String>,
    pub color: Option<TermColor>,
    pub seconds: f64,
    pub success: bool,
    pub final_message: Option<String>,
}

/// Convert `--seconds` to a `Duration`, rejecting negative, non-finite and
/// out-of-range values.
fn spin_duration(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--seconds must be a non-negative number of seconds, got {seconds}"))
}

/// Run one spinner for `seconds`, then stop it.
pub fn spin(log: &LoggerHandle, args: SpinArgs) -> Result<()> {
    // Validated before the spinner starts so a bad value never leaves it running.
    let duration = spin_duration(args.seconds)?;

    let defaults = &log.settings().animation;
    let style = args.style.as_deref().unwrap_or(&defaults.style);
    let color = args.color.unwrap_or(defaults.color);

    log.start_animation_with(&args.message, style, color);
    std::thread::sleep(duration);
    log.stop_animation(args.success, args.final_message.as_deref());
    Ok(())
}
