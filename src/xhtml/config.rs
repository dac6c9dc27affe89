/// Configuration types for XHTML conversion.
///
/// This module defines the options that control page setup, how inline
/// content is matched to open elements, and where images are loaded from.
use crate::ooxml::docx::writer::{PageOrientation, SectionProperties};
use serde::Deserialize;
use std::path::PathBuf;

/// How text and inline formatting find the element they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Resolve against the stack of currently open elements.
    ///
    /// Tables, rows and cells act as barriers, and formatting tags apply
    /// exactly to the characters between their open and close tags.
    #[default]
    Scoped,
    /// Scan every element created so far, newest first.
    ///
    /// Formatting tags switch a flag on the element they find and the flag
    /// stays on until that element is done, so `<p>a <b>b</b> c</p>` renders
    /// `c` in bold too.
    LogScan,
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: 1440,
            right: 1440,
            bottom: 1440,
            left: 1440,
        }
    }
}

/// Configuration options for XHTML to DOCX conversion.
///
/// # Examples
///
/// ```rust
/// use longan::xhtml::{ConversionOptions, Resolution};
/// use longan::ooxml::docx::writer::PageOrientation;
///
/// // Create with defaults
/// let options = ConversionOptions::default();
/// assert_eq!(options.page_width, 11906);
///
/// // Or customize
/// let options = ConversionOptions::new()
///     .with_orientation(PageOrientation::Landscape)
///     .with_page_size(16838, 11906)
///     .with_resolution(Resolution::LogScan);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Page orientation written to the section
    pub orientation: PageOrientation,
    /// Page height in twips
    pub page_height: u32,
    /// Page width in twips
    pub page_width: u32,
    /// Page margins in twips
    pub margins: PageMargins,
    /// Never touch the local file system for images
    pub web_based_processing: bool,
    /// Inline content resolution strategy
    pub resolution: Resolution,
    /// Directory relative image paths are resolved against
    pub image_base_dir: Option<PathBuf>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            orientation: PageOrientation::Portrait,
            page_height: 16383,
            page_width: 11906,
            margins: PageMargins::default(),
            web_based_processing: false,
            resolution: Resolution::default(),
            image_base_dir: None,
        }
    }
}

impl ConversionOptions {
    /// Create a new `ConversionOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page orientation.
    ///
    /// Width and height are written as given; a landscape page is expected
    /// to be declared with its long edge as the width.
    #[inline]
    pub fn with_orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the page size in twips.
    #[inline]
    pub fn with_page_size(mut self, width: u32, height: u32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    #[inline]
    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Set whether images are fetched from the local file system.
    ///
    /// When enabled every image is embedded as an empty placeholder.
    #[inline]
    pub fn with_web_based_processing(mut self, web: bool) -> Self {
        self.web_based_processing = web;
        self
    }

    #[inline]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the directory relative image `src` paths are resolved against.
    #[inline]
    pub fn with_image_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_base_dir = Some(dir.into());
        self
    }

    /// Section properties for the converted document.
    pub fn page_setup(&self) -> SectionProperties {
        SectionProperties {
            page_width: self.page_width,
            page_height: self.page_height,
            orientation: self.orientation,
            margin_top: self.margins.top,
            margin_bottom: self.margins.bottom,
            margin_left: self.margins.left,
            margin_right: self.margins.right,
            ..SectionProperties::default()
        }
    }
}
