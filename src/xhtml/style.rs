//! Inline `style` and `class` attribute parsing.
//!
//! Only a handful of declarations are understood; everything else is
//! ignored. Values that look like a known declaration but fail to parse are
//! reported as [`AttributeError`] to the caller, which logs and drops them.
use crate::common::unit::{percent_of, px_to_twips};
use fast_float2::parse_partial;
use thiserror::Error;

/// Highlight colour applied by `class="marker"`.
pub const MARKER_HIGHLIGHT: &str = "yellow";

/// Recoverable problems with a single attribute value.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum AttributeError {
    #[error("invalid number: {0:?}")]
    Number(String),
    #[error("unsupported length unit in {0:?}")]
    Unit(String),
    #[error("invalid colour: {0:?}")]
    Color(String),
}

/// Character formatting carried by a node or an open formatting tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Lowercase hex RGB without the leading `#`
    pub color: Option<String>,
    pub highlight: Option<String>,
}

impl RunFormat {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::default()
        }
    }

    pub fn strike() -> Self {
        Self {
            strike: true,
            ..Self::default()
        }
    }

    /// No formatting at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `inner` on top of `self`.
    ///
    /// Flags accumulate; colours set by `inner` replace ours.
    pub fn apply(&mut self, inner: &RunFormat) {
        self.bold |= inner.bold;
        self.italic |= inner.italic;
        self.underline |= inner.underline;
        self.strike |= inner.strike;
        if inner.color.is_some() {
            self.color.clone_from(&inner.color);
        }
        if inner.highlight.is_some() {
            self.highlight.clone_from(&inner.highlight);
        }
    }
}

/// A CSS length in one of the two units the mapper understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Parse `100px`, `50%`, or a bare number (pixels).
    pub(crate) fn parse(value: &str) -> Result<Self, AttributeError> {
        let value = value.trim();
        let (number, consumed) = parse_partial::<f64, _>(value)
            .map_err(|_| AttributeError::Number(value.to_string()))?;
        if !number.is_finite() || number < 0.0 {
            return Err(AttributeError::Number(value.to_string()));
        }
        match value[consumed..].trim() {
            "" | "px" => Ok(Length::Px(number)),
            "%" => Ok(Length::Percent(number)),
            _ => Err(AttributeError::Unit(value.to_string())),
        }
    }

    /// Resolve to twips; percentages are taken of `whole`.
    pub fn to_twips(self, whole: u32) -> u32 {
        match self {
            Length::Px(px) => px_to_twips(px),
            Length::Percent(pct) => percent_of(whole, pct),
        }
    }
}

/// Declarations understood in a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDecl {
    pub format: RunFormat,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

/// Parse a `style` attribute.
///
/// Declarations are split on `;`. A malformed value only loses its own
/// declaration, with a warning.
pub fn parse_style(style: &str) -> StyleDecl {
    let mut decl = StyleDecl::default();
    for declaration in style.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        if let Err(err) = apply_declaration(&mut decl, &key, &value) {
            log::warn!("dropping style declaration `{}`: {}", declaration.trim(), err);
        }
    }
    decl
}

fn apply_declaration(decl: &mut StyleDecl, key: &str, value: &str) -> Result<(), AttributeError> {
    match key {
        "font-style" => match value {
            "italic" => decl.format.italic = true,
            "strong" | "bold" => decl.format.bold = true,
            _ => {},
        },
        "font-weight" => {
            if value == "bold" {
                decl.format.bold = true;
            }
        },
        "text-decoration" => {
            for part in value.split_whitespace() {
                match part {
                    "underline" => decl.format.underline = true,
                    "line-through" => decl.format.strike = true,
                    _ => {},
                }
            }
        },
        "color" => decl.format.color = Some(parse_color(value)?),
        "width" => decl.width = Some(Length::parse(value)?),
        "height" => decl.height = Some(Length::parse(value)?),
        _ => {},
    }
    Ok(())
}

/// Normalize `#rgb` / `#rrggbb` to six lowercase hex digits.
pub(crate) fn parse_color(value: &str) -> Result<String, AttributeError> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AttributeError::Color(value.to_string()));
    }
    match hex.len() {
        3 => Ok(hex
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>()
            .to_ascii_lowercase()),
        6 => Ok(hex.to_ascii_lowercase()),
        _ => Err(AttributeError::Color(value.to_string())),
    }
}

/// Does a `class` attribute request highlighting?
pub fn has_marker_class(class: &str) -> bool {
    class
        .split_whitespace()
        .any(|name| name.eq_ignore_ascii_case("marker"))
}

/// Parse a positive integer attribute such as `colspan`.
pub(crate) fn parse_count(value: &str) -> Result<u32, AttributeError> {
    let value = value.trim();
    atoi_simd::parse::<u32>(value.as_bytes())
        .map_err(|_| AttributeError::Number(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_declarations() {
        let decl = parse_style("font-style: italic; FONT-WEIGHT:bold;color:#ABC;text-decoration: underline line-through");
        assert!(decl.format.italic);
        assert!(decl.format.bold);
        assert!(decl.format.underline);
        assert!(decl.format.strike);
        assert_eq!(decl.format.color.as_deref(), Some("aabbcc"));
    }

    #[test]
    fn test_font_style_strong_means_bold() {
        assert!(parse_style("font-style:strong").format.bold);
    }

    #[test]
    fn test_lengths() {
        let decl = parse_style("width: 120px; height:50%");
        assert_eq!(decl.width, Some(Length::Px(120.0)));
        assert_eq!(decl.height, Some(Length::Percent(50.0)));
        assert_eq!(Length::parse("40").unwrap(), Length::Px(40.0));
        assert_eq!(Length::Percent(50.0).to_twips(9000), 4500);
        assert_eq!(Length::Px(100.0).to_twips(0), 1557);
    }

    #[test]
    fn test_bad_values_are_dropped() {
        let decl = parse_style("width: 3em; height: wide; color: #12; font-weight: bold");
        assert_eq!(decl.width, None);
        assert_eq!(decl.height, None);
        assert_eq!(decl.format.color, None);
        assert!(decl.format.bold);

        assert!(matches!(Length::parse("2cm"), Err(AttributeError::Unit(_))));
        assert!(matches!(parse_count("two"), Err(AttributeError::Number(_))));
        assert_eq!(parse_count(" 3 "), Ok(3));
    }

    #[test]
    fn test_apply_overwrites_colours() {
        let mut outer = RunFormat {
            bold: true,
            color: Some("ff0000".to_string()),
            ..RunFormat::default()
        };
        outer.apply(&RunFormat {
            color: Some("00ff00".to_string()),
            ..RunFormat::italic()
        });
        assert!(outer.bold && outer.italic);
        assert_eq!(outer.color.as_deref(), Some("00ff00"));
    }

    #[test]
    fn test_marker_class() {
        assert!(has_marker_class("note Marker"));
        assert!(!has_marker_class("markers"));
    }
}
