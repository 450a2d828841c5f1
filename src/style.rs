//! Animation style registry.
//!
//! Each [`AnimationStyle`] is a fixed, cyclic list of glyphs. Styles are looked up
//! by key with [`lookup`]; unknown keys quietly fall back to [`DEFAULT_STYLE`].

use crate::ansi;

/// Key of the style used when none (or an unknown one) is requested.
pub const DEFAULT_STYLE: &str = "braille";

/// A named cyclic sequence of animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStyle {
    pub key: &'static str,
    pub frames: &'static [&'static str],
}

impl AnimationStyle {
    /// Frame at position `tick`, wrapping around the sequence.
    pub fn frame(&self, tick: usize) -> &'static str {
        self.frames[tick % self.frames.len()]
    }

    /// Display width of a frame.
    pub fn frame_width(&self, tick: usize) -> usize {
        ansi::visible_width(self.frame(tick))
    }

    /// Endless iterator over the frames, starting from the first.
    pub fn cycle(&self) -> impl Iterator<Item = &'static str> {
        self.frames.iter().copied().cycle()
    }
}

static STYLES: &[AnimationStyle] = &[
    AnimationStyle {
        key: "braille",
        frames: &["⢿", "⣻", "⣽", "⣾", "⣷", "⣯", "⣟", "⡿"],
    },
    AnimationStyle {
        key: "spinner",
        frames: &["-", "\\", "|", "/"],
    },
    AnimationStyle {
        key: "dots",
        frames: &[".  ", ".. ", "...", " ..", "  .", "   "],
    },
    AnimationStyle {
        key: "arrows",
        frames: &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
    },
    AnimationStyle {
        key: "moon",
        frames: &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"],
    },
    AnimationStyle {
        key: "clock",
        frames: &[
            "🕛", "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚",
        ],
    },
    AnimationStyle {
        key: "directional_arrows_unicode",
        frames: &[
            "⬆\u{fe0f}", "↗\u{fe0f}", "➡\u{fe0f}", "↘\u{fe0f}", "⬇\u{fe0f}", "↙\u{fe0f}",
            "⬅\u{fe0f}", "↖\u{fe0f}",
        ],
    },
    AnimationStyle {
        key: "traffic_lights",
        frames: &["🔴", "🟡", "🟢"],
    },
    AnimationStyle {
        key: "growth_emoji",
        frames: &["🌱", "🌿", "🌳"],
    },
    AnimationStyle {
        key: "weather_icons",
        frames: &["☀\u{fe0f}", "☁\u{fe0f}", "🌧\u{fe0f}", "⚡\u{fe0f}"],
    },
    AnimationStyle {
        key: "heartbeat",
        frames: &["♡", "♥"],
    },
];

/// All registered styles, in registry order.
pub fn all() -> &'static [AnimationStyle] {
    STYLES
}

/// Registered style keys.
pub fn names() -> impl Iterator<Item = &'static str> {
    STYLES.iter().map(|s| s.key)
}

/// Exact lookup; `None` for unknown keys.
pub fn get(key: &str) -> Option<&'static AnimationStyle> {
    STYLES.iter().find(|s| s.key == key)
}

/// Lookup with fallback to the default style.
pub fn lookup(key: &str) -> &'static AnimationStyle {
    get(key).unwrap_or(&STYLES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_first() {
        assert_eq!(STYLES[0].key, DEFAULT_STYLE);
    }

    #[test]
    fn every_style_has_frames() {
        for style in all() {
            assert!(!style.frames.is_empty(), "{} has no frames", style.key);
        }
        assert_eq!(names().count(), 11);
    }

    #[test]
    fn frames_cycle_back_to_start() {
        let spinner = lookup("spinner");
        let seen: Vec<_> = (0..6).map(|t| spinner.frame(t)).collect();
        assert_eq!(seen, vec!["-", "\\", "|", "/", "-", "\\"]);

        let cycled: Vec<_> = spinner.cycle().take(5).collect();
        assert_eq!(cycled[4], spinner.frames[0]);
    }

    #[test]
    fn unknown_key_falls_back() {
        assert!(get("nope").is_none());
        assert_eq!(lookup("nope").key, "braille");
    }

    #[test]
    fn frame_widths() {
        assert_eq!(lookup("spinner").frame_width(0), 1);
        assert_eq!(lookup("dots").frame_width(2), 3);
        assert_eq!(lookup("braille").frame_width(7), 2);
        // base glyph + variation selector, both non-ASCII
        assert_eq!(lookup("weather_icons").frame_width(0), 4);
    }
}
