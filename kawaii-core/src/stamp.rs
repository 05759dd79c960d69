//! The sticker palette offered by the editor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub name: &'static str,
    pub glyph: &'static str,
}

pub const STAMPS: &[Stamp] = &[
    Stamp { name: "heart", glyph: "💖" },
    Stamp { name: "star", glyph: "⭐" },
    Stamp { name: "ribbon", glyph: "🎀" },
    Stamp { name: "cake", glyph: "🎂" },
    Stamp { name: "flower", glyph: "🌸" },
    Stamp { name: "music", glyph: "🎵" },
    Stamp { name: "book", glyph: "📚" },
    Stamp { name: "plane", glyph: "🛫" },
    Stamp { name: "party", glyph: "🎉" },
];

/// Look a stamp up by name (any case) or by its glyph.
pub fn resolve(input: &str) -> Option<&'static Stamp> {
    let input = input.trim();
    STAMPS
        .iter()
        .find(|s| s.glyph == input || s.name.eq_ignore_ascii_case(input))
}
