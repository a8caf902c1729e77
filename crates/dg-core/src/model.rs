//! Document element model.
//!
//! A document layout is a flat, ordered collection of [`Element`] values —
//! insertion order is z-order (later elements render on top). Every element
//! carries the full text-styling record even when its kind ignores parts of
//! it (a line renders as a colored rule, an image renders its source); this
//! keeps property mutation uniform across kinds. Per-kind creation defaults
//! live in one lookup table, [`kind_defaults`].

use crate::id::ElementId;
use serde::{Deserialize, Serialize};

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional. This is the format the host's color
    /// picker produces.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                let a = hex_val(bytes[6])? << 4 | hex_val(bytes[7])?;
                Some(Self { r, g, b, a })
            }
            _ => None,
        }
    }

    /// Emit as the shortest valid hex string (`#RRGGBB`, or `#RRGGBBAA`
    /// when the alpha channel is not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

// ─── Text styling ────────────────────────────────────────────────────────

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Italic toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Underline toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

/// Numeric font weights on the CSS scale.
pub const WEIGHT_NORMAL: u16 = 400;
pub const WEIGHT_SEMIBOLD: u16 = 600;
pub const WEIGHT_BOLD: u16 = 700;

/// The full text-styling record carried by every element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: WEIGHT_NORMAL,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Left,
            color: Color::BLACK,
        }
    }
}

// ─── Position ────────────────────────────────────────────────────────────

/// Canvas-local position. Both coordinates are kept non-negative by the
/// editor; there is no upper bound (elements may sit past the visible
/// canvas edge).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates to zero from below.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

// ─── Element kinds & defaults ────────────────────────────────────────────

/// The placeable element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Title,
    Paragraph,
    Heading1,
    Heading2,
    Line,
    Image,
    Emoji,
}

impl ElementKind {
    /// Whether the property panel offers text formatting (weight, style,
    /// alignment, size, content) for this kind. Lines and images render
    /// no text.
    pub const fn supports_text_styling(self) -> bool {
        !matches!(self, ElementKind::Line | ElementKind::Image)
    }

    /// Whether the element color is meaningful. Lines use it for the rule
    /// stroke; only images ignore it entirely.
    pub const fn supports_color(self) -> bool {
        !matches!(self, ElementKind::Image)
    }
}

/// Default emoji glyph for freshly added emoji elements.
pub const DEFAULT_EMOJI: &str = "😀";

/// Glyphs offered by the host's emoji picker.
pub const EMOJI_PALETTE: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "😂", "🙂", "😉", "😊", "😍", "🤩",
    "🤔", "😎", "🥳", "😇", "😴", "😢", "😡", "🤓", "👍", "👏", "🙌", "🎉",
    "⭐", "✨", "❤️", "✅", "📌", "📝",
];

/// Source assigned to image elements before the user uploads anything.
pub const PLACEHOLDER_IMAGE: &str = "assets/upload-placeholder.png";

/// Default content of a line element — the editor renders lines as a 2px
/// rule, but the glyph keeps text-only exports legible.
pub const LINE_GLYPH: &str = "____________________";

/// The per-kind creation defaults, produced by [`kind_defaults`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    pub content: &'static str,
    pub font_size: f32,
    pub font_weight: u16,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub image_source: Option<&'static str>,
}

/// The single lookup table for kind-specific creation defaults. Keeping
/// the whole defaulting policy in one place makes it testable in
/// isolation and keeps `Element::new` branch-free.
pub fn kind_defaults(kind: ElementKind) -> KindDefaults {
    let base = KindDefaults {
        content: "",
        font_size: 16.0,
        font_weight: WEIGHT_NORMAL,
        width: None,
        height: None,
        image_source: None,
    };
    match kind {
        ElementKind::Text => KindDefaults {
            content: "New text",
            ..base
        },
        ElementKind::Title => KindDefaults {
            content: "New title",
            font_size: 24.0,
            font_weight: WEIGHT_BOLD,
            ..base
        },
        ElementKind::Heading1 => KindDefaults {
            content: "H1 Title",
            font_size: 24.0,
            font_weight: WEIGHT_BOLD,
            ..base
        },
        ElementKind::Heading2 => KindDefaults {
            content: "H2 Title",
            font_size: 20.0,
            font_weight: WEIGHT_SEMIBOLD,
            ..base
        },
        ElementKind::Paragraph => KindDefaults {
            content: "New paragraph",
            ..base
        },
        ElementKind::Line => KindDefaults {
            content: LINE_GLYPH,
            width: Some(200.0),
            ..base
        },
        ElementKind::Image => KindDefaults {
            width: Some(150.0),
            height: Some(100.0),
            image_source: Some(PLACEHOLDER_IMAGE),
            ..base
        },
        ElementKind::Emoji => KindDefaults {
            content: DEFAULT_EMOJI,
            font_size: 32.0,
            ..base
        },
    }
}

// ─── Element ─────────────────────────────────────────────────────────────

/// Where newly added elements land on the canvas.
pub const DEFAULT_POSITION: Position = Position::new(100.0, 100.0);

/// A single placeable, styleable unit on the canvas.
///
/// `content` may embed `{{field}}` tokens that the generation engine
/// substitutes per person (see [`crate::fields`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub content: String,
    pub position: Position,
    #[serde(flatten)]
    pub style: TextStyle,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub image_source: Option<String>,
}

impl Element {
    /// Create an element of `kind` at the default spot, with the defaults
    /// from [`kind_defaults`] applied.
    pub fn new(kind: ElementKind) -> Self {
        let d = kind_defaults(kind);
        Self {
            id: ElementId::fresh(),
            kind,
            content: d.content.to_string(),
            position: DEFAULT_POSITION,
            style: TextStyle {
                font_size: d.font_size,
                font_weight: d.font_weight,
                ..TextStyle::default()
            },
            width: d.width,
            height: d.height,
            image_source: d.image_source.map(str::to_string),
        }
    }

    /// Same as [`Element::new`] but placed at an explicit position.
    pub fn new_at(kind: ElementKind, x: f32, y: f32) -> Self {
        let mut el = Self::new(kind);
        el.position = Position::new(x, y).clamped();
        el
    }
}
