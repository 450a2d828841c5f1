use anyhow::Result;

use spinlog::style;
use spinlog::LoggerHandle;

/// Print every registered animation style with its frames.
pub fn styles(log: &LoggerHandle) -> Result<()> {
    log.text("Animation Styles");
    log.text(&"=".repeat(40));
    for s in style::all() {
        let default = if s.key == style::DEFAULT_STYLE {
            " (default)"
        } else {
            ""
        };
        log.text(&format!("  {:<28} {}{default}", s.key, s.frames.join(" ")));
    }
    Ok(())
}
