use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MemeError, MemeResult};

/// Caption font size in pixels, constrained to `[FontSize::MIN, FontSize::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const MIN: u32 = 12;
    pub const MAX: u32 = 72;
    pub const DEFAULT: FontSize = FontSize(42);

    pub fn new(px: u32) -> MemeResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&px) {
            return Err(MemeError::config(format!(
                "font size must be in [{}, {}] px, got {px}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(px))
    }

    pub fn px(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for FontSize {
    type Error = MemeError;

    fn try_from(px: u32) -> MemeResult<Self> {
        Self::new(px)
    }
}

impl From<FontSize> for u32 {
    fn from(v: FontSize) -> Self {
        v.0
    }
}

/// The fixed set of caption fonts offered to users.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Impact,
    Arial,
    ComicSansMs,
    Helvetica,
    TimesNewRoman,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Impact,
        FontFamily::Arial,
        FontFamily::ComicSansMs,
        FontFamily::Helvetica,
        FontFamily::TimesNewRoman,
    ];

    /// CSS family name, as typed into a font stack.
    pub fn name(self) -> &'static str {
        match self {
            Self::Impact => "Impact",
            Self::Arial => "Arial",
            Self::ComicSansMs => "Comic Sans MS",
            Self::Helvetica => "Helvetica",
            Self::TimesNewRoman => "Times New Roman",
        }
    }

    /// Short label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::ComicSansMs => "Comic Sans",
            other => other.name(),
        }
    }

    /// Lowercase name with spaces, dashes and underscores removed (`"comicsansms"`).
    pub fn normalized_name(self) -> String {
        normalize_family_key(self.name())
    }
}

pub(crate) fn normalize_family_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        let key = normalize_family_key(s.trim());
        Self::ALL
            .into_iter()
            .find(|f| f.normalized_name() == key || normalize_family_key(f.label()) == key)
            .ok_or_else(|| MemeError::config(format!("unknown font family \"{s}\"")))
    }
}

impl TryFrom<String> for FontFamily {
    type Error = MemeError;

    fn try_from(s: String) -> MemeResult<Self> {
        s.parse()
    }
}

impl From<FontFamily> for String {
    fn from(f: FontFamily) -> Self {
        f.name().to_owned()
    }
}

/// Horizontal anchor shared by the top and bottom captions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for TextAlign {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(MemeError::config(format!(
                "text align must be left, center or right, got \"{s}\""
            ))),
        }
    }
}

/// Opaque caption fill color.
///
/// Both the color picker and the free-text hex field write to this one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const WHITE: TextColor = TextColor::rgb(255, 255, 255);
    pub const BLACK: TextColor = TextColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the `#` is optional, hex digits are case-insensitive).
    pub fn from_hex(s: &str) -> MemeResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> MemeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| MemeError::config(format!("invalid hex byte \"{pair}\"")))
        }

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MemeError::config(format!("invalid hex color \"{s}\"")));
        }
        match digits.len() {
            6 => Ok(Self::rgb(
                hex_byte(&digits[0..2])?,
                hex_byte(&digits[2..4])?,
                hex_byte(&digits[4..6])?,
            )),
            3 => {
                let nibble = |i: usize| -> MemeResult<u8> {
                    let v = hex_byte(&digits[i..i + 1])?;
                    Ok(v * 17)
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(MemeError::config(format!(
                "hex color must be #RRGGBB or #RGB, got \"{s}\""
            ))),
        }
    }

    /// Lowercase `#rrggbb`, the form a color input reports.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for TextColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for TextColor {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for TextColor {
    type Error = MemeError;

    fn try_from(s: String) -> MemeResult<Self> {
        Self::from_hex(&s)
    }
}

impl From<TextColor> for String {
    fn from(c: TextColor) -> Self {
        c.to_hex()
    }
}

/// Appearance of both captions. Independent of the image content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleConfig {
    pub font_size: FontSize,
    pub font_family: FontFamily,
    pub text_color: TextColor,
    pub text_align: TextAlign,
}

/// Top and bottom caption strings. An empty string is not drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CaptionText {
    pub top_text: String,
    pub bottom_text: String,
}

impl CaptionText {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top_text: top.into(),
            bottom_text: bottom.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top_text.is_empty() && self.bottom_text.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/model.rs"]
mod tests;
