//! Shared formatting types for the DOCX writer.

/// Underline styles for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderlineStyle {
    Single,
    Double,
    Dotted,
    Dashed,
    Wave,
}

impl UnderlineStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dotted => "dotted",
            Self::Dashed => "dash",
            Self::Wave => "wave",
        }
    }
}

/// Border styles for tables and paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBorderStyle {
    None,
    Single,
    Thick,
    Double,
    Dotted,
    Dashed,
}

impl TableBorderStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
        }
    }
}

/// Picture formats Word can embed.
///
/// The discriminants are the stable picture type codes Word tooling uses,
/// so they double as the numeric type id of an embedded picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFormat {
    Emf = 2,
    Wmf = 3,
    Pict = 4,
    Jpeg = 5,
    Png = 6,
    Dib = 7,
    Gif = 8,
    Tiff = 9,
    Eps = 10,
    Bmp = 11,
    Wpg = 12,
}

static EXTENSIONS: phf::Map<&'static str, ImageFormat> = phf::phf_map! {
    "emf" => ImageFormat::Emf,
    "wmf" => ImageFormat::Wmf,
    "pict" => ImageFormat::Pict,
    "jpg" => ImageFormat::Jpeg,
    "jpeg" => ImageFormat::Jpeg,
    "png" => ImageFormat::Png,
    "dib" => ImageFormat::Dib,
    "gif" => ImageFormat::Gif,
    "tiff" => ImageFormat::Tiff,
    "eps" => ImageFormat::Eps,
    "bmp" => ImageFormat::Bmp,
    "wpg" => ImageFormat::Wpg,
};

impl ImageFormat {
    /// Look up a format by file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.bytes().any(|b| b.is_ascii_uppercase()) {
            EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied()
        } else {
            EXTENSIONS.get(ext).copied()
        }
    }

    /// Stable numeric picture type code.
    #[inline]
    pub fn type_code(self) -> u8 {
        self as u8
    }

    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Emf => "emf",
            Self::Wmf => "wmf",
            Self::Pict => "pict",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Dib => "dib",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::Eps => "eps",
            Self::Bmp => "bmp",
            Self::Wpg => "wpg",
        }
    }

    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Emf => "image/x-emf",
            Self::Wmf => "image/x-wmf",
            Self::Pict => "image/pict",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Dib => "image/dib",
            Self::Gif => "image/gif",
            Self::Tiff => "image/tiff",
            Self::Eps => "image/x-eps",
            Self::Bmp => "image/bmp",
            Self::Wpg => "image/x-wpg",
        }
    }
}
