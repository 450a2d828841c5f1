mod helpers;

use std::time::{Duration, Instant};

use helpers::{captured_handle, console_settings, Capture};
use spinlog::animation::{render_frame, Animator, StartOutcome, StopOutcome};
use spinlog::{ansi, style, TermColor};

#[test]
fn log_line_erases_spinner_first() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", true, Some(false));

    log.start_animation("Loading");
    let width = log.animation_state().visible_width;
    // "Loading" + " " + braille glyph (2) + " "
    assert_eq!(width, 11);

    log.info("hello");
    log.stop_animation(true, None);

    let text = out.text();
    let expected = format!("\r{}\r\x1b[92m[INFO]: \x1b[0mhello\n", " ".repeat(width));
    assert!(text.contains(&expected), "missing erase before log line: {text:?}");

    // After the last carriage return, the row holds only the log line.
    let row = text.lines().find(|l| l.contains("hello")).unwrap();
    let visible = row.rsplit('\r').next().unwrap();
    assert_eq!(visible, "\x1b[92m[INFO]: \x1b[0mhello");
    for glyph in style::lookup("braille").frames {
        assert!(!visible.contains(glyph));
    }
}

#[test]
fn erase_covers_at_least_the_drawn_width() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", false, Some(false));

    log.start_animation_with("任务A处理中", "moon", TermColor::Cyan);
    std::thread::sleep(Duration::from_millis(50));
    let drawn = ansi::visible_width(&render_frame("任务A处理中", "🌑", TermColor::Cyan));
    assert_eq!(log.animation_state().visible_width, drawn);

    log.warning("careful");
    log.stop_animation(true, None);

    let text = out.text();
    let needle = format!("\r{}\r\x1b[93m[WARNING]", " ".repeat(drawn));
    assert!(text.contains(&needle));
}

#[test]
fn second_start_does_not_spawn() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", true, Some(false));

    log.start_animation("first");
    log.start_animation_with("second", "spinner", TermColor::Red);
    assert_eq!(log.spawned_animations(), 1);
    log.stop_animation(true, None);

    assert!(out
        .text()
        .contains("[DEBUG]: Animation already running, not starting another one."));
    assert!(!out.text().contains("second"));
}

#[test]
fn idle_stop_prints_one_line_without_waiting() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", false, Some(false));

    let started = Instant::now();
    log.stop_animation(true, Some("all done"));
    assert!(started.elapsed() < Duration::from_millis(500));

    assert_eq!(
        out.text(),
        "\x1b[92m[INFO]: \x1b[0m\x1b[92m✔\x1b[0m all done\n"
    );
}

#[test]
fn stop_then_final_message() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", false, Some(false));

    log.start_animation_with("Working", "spinner", TermColor::White);
    std::thread::sleep(Duration::from_millis(60));
    log.stop_animation(false, Some("gave up"));

    assert!(!log.animation_state().active);
    let text = out.text();
    // "Working - " is 10 columns
    let clear_at = text
        .rfind(&format!("\r{}\r", " ".repeat(10)))
        .expect("line was cleared");
    let final_at = text.find("gave up").unwrap();
    assert!(clear_at < final_at);
    assert!(text.ends_with("\x1b[91m[ERROR]: \x1b[0m\x1b[91m✖\x1b[0m gave up\n"));
}

#[test]
fn unknown_style_uses_braille() {
    let (log, out, _) = captured_handle(console_settings());
    log.configure("T", false, Some(false));

    log.start_animation_with("x", "no-such-style", TermColor::White);
    std::thread::sleep(Duration::from_millis(30));
    log.stop_animation(true, None);

    assert!(out.text().contains(&render_frame("x", "⢿", TermColor::White)));
}

#[test]
fn frames_cycle_in_order() {
    let out = Capture::default();
    let anim = Animator::new(out.console(), Duration::from_millis(5), Duration::from_secs(2));
    let heartbeat = style::lookup("heartbeat");
    anim.start("beat", heartbeat, TermColor::Red).unwrap();
    std::thread::sleep(Duration::from_millis(60));
    anim.stop();

    let frames: Vec<String> = out
        .text()
        .split('\r')
        .filter(|s| s.contains("beat"))
        .map(|s| s.to_string())
        .collect();
    assert!(frames.len() >= 3, "expected several frames, got {frames:?}");
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame, &render_frame("beat", heartbeat.frame(i), TermColor::Red));
    }
}

#[test]
fn stuck_task_is_abandoned_and_cannot_clobber_successor() {
    let out = Capture::slow(Duration::from_millis(150));
    let anim = Animator::new(out.console(), Duration::from_millis(5), Duration::from_millis(20));
    let style = style::lookup("spinner");

    anim.start("stuck", style, TermColor::White).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(anim.stop(), StopOutcome::TimedOut);
    assert!(!anim.is_active());

    assert_eq!(
        anim.start("fresh", style, TermColor::White).unwrap(),
        StartOutcome::Started
    );
    // Give the abandoned task time to finish its write and exit.
    std::thread::sleep(Duration::from_millis(400));
    assert!(anim.is_active());
    assert_eq!(anim.spawned_tasks(), 2);
}
