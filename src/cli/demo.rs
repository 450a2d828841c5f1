//! CLI `demo` command: a guided tour of log levels, colored output and spinners.

use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;

use spinlog::{style, Level, LoggerHandle, TermColor};

fn pause(ms: u64) {
    sleep(Duration::from_millis(ms));
}

/// Run the demo against `log`, reconfiguring it along the way.
pub fn demo(log: &LoggerHandle) -> Result<()> {
    let app_name = log.name();

    log.info("=============== spinlog demo ===============");
    log.debug("logger initialized");
    match log.log_file() {
        Some(path) => log.info(format!("file logging enabled, writing to {}", path.display())),
        None => log.warning("file logging is disabled"),
    }

    log.info("1. levels");
    log.info("an INFO line: green tag, plain body");
    log.warning("a WARNING line: yellow tag");
    log.error("an ERROR line: red tag");
    log.debug("a DEBUG line: the whole line is grey, timestamp included");
    log.critical("a CRITICAL line: untagged color");

    log.info("2. colored and raw output");
    log.info_with_color("info_with_color defaults to green", None, false);
    log.info_with_color("but any color works", Some(TermColor::Magenta), false);
    log.warning_with_color("warning_with_color in blue", Some(TermColor::Blue), false);
    log.error_with_color("a green ERROR?", Some(TermColor::Green), false);
    log.highlight("highlighted output (blue body)");
    log.text("text() writes a raw line: no tag, no timestamp");
    tracing::info!(source = "tracing", "tracing events go through the same handle");

    log.info("3. animations");
    log.start_animation("default style and color");
    pause(1500);
    log.stop_animation(true, Some("default animation finished"));

    for (key, color) in [
        ("spinner", TermColor::White),
        ("arrows", TermColor::Yellow),
        ("moon", TermColor::LightBlue),
        ("heartbeat", TermColor::Red),
    ] {
        log.start_animation_with(&format!("{key} style"), key, color);
        pause(1200);
        log.stop_animation(true, Some(format!("{key} done").as_str()));
    }

    let message = format!("{} carries its own color", TermColor::Magenta.paint("this message"));
    log.start_animation_with(&message, "dots", TermColor::Yellow);
    pause(1500);
    log.stop_animation(true, Some("nested colors done"));

    log.info("4. logging while a spinner runs");
    log.start_animation_with("orange dots", "dots", TermColor::Orange);
    log.info("the spinner steps aside for this line");
    pause(800);
    log.warning("and for this WARNING");
    pause(800);
    log.debug("a DEBUG line, then a simulated failure");
    pause(800);
    log.stop_animation(false, Some("orange task failed"));

    log.start_animation("no final message");
    log.start_animation("second start is ignored");
    pause(1000);
    log.stop_animation(true, None);
    log.info("stopped without a final message");

    log.info("5. reconfigure without console timestamps");
    log.configure(&format!("{app_name}-plain"), true, Some(false));
    log.info("no timestamp on this line");
    log.debug("nor on this one");

    log.info("6. reconfigure with timestamps");
    log.configure(&app_name, true, Some(true));
    log.info("timestamps are back");
    log.log_with_trace(Level::Debug, "a DEBUG line with a backtrace");

    let keys: Vec<_> = style::names().collect();
    log.info(format!("available styles: {}", keys.join(", ")));
    log.info("=============== demo complete ===============");
    Ok(())
}
