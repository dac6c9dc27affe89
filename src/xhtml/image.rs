//! Resolving `img` sources into embeddable pictures.
use crate::common::error::{Error, Result};
use crate::common::unit::{percent_of, px_to_emu_96, twip_to_emu};
use crate::ooxml::docx::format::ImageFormat;
use base64::Engine;
use std::path::{Path, PathBuf};

use super::backend::Picture;
use super::config::ConversionOptions;
use super::style::Length;

const FILE_SCHEME: &str = "file://";
const DATA_SCHEME: &str = "data:";

/// Requested display size of a picture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PictureSize {
    pub width: Option<Length>,
    pub height: Option<Length>,
}

/// Load the picture an `img` tag points at.
///
/// The extension (or the `data:` media type) must be one Word can embed;
/// anything else aborts the conversion. A file that cannot be read, and
/// every file in web-based mode, becomes an empty placeholder.
pub fn load_picture(
    src: &str,
    size: PictureSize,
    content_width: u32,
    options: &ConversionOptions,
) -> Result<Picture> {
    let src = src.trim();
    let (format, name, data) = if let Some(data_uri) = strip_prefix_ignore_case(src, DATA_SCHEME) {
        decode_data_uri(data_uri)?
    } else {
        let path = strip_prefix_ignore_case(src, FILE_SCHEME).unwrap_or(src);
        let format = format_of(path)?;
        let name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("image.{}", format.extension()));
        (format, name, read_local(path, options))
    };

    Ok(Picture {
        data,
        format,
        name,
        width_emu: size.width.map(|len| to_emu(len, content_width)),
        height_emu: size.height.map(|len| to_emu(len, content_width)),
    })
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    value
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &value[prefix.len()..])
}

fn format_of(path: &str) -> Result<ImageFormat> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| Error::UnsupportedConstruct(format!("unsupported image type: {}", path)))
}

fn read_local(path: &str, options: &ConversionOptions) -> Vec<u8> {
    if options.web_based_processing {
        return Vec::new();
    }
    let resolved = resolve_path(path, options.image_base_dir.as_deref());
    match std::fs::read(&resolved) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!(
                "image {} could not be read ({}); embedding a placeholder",
                resolved.display(),
                err
            );
            Vec::new()
        },
    }
}

fn resolve_path(path: &str, base: Option<&Path>) -> PathBuf {
    let path = Path::new(path);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// `data:image/png;base64,....`
fn decode_data_uri(uri: &str) -> Result<(ImageFormat, String, Vec<u8>)> {
    let (meta, payload) = uri
        .split_once(',')
        .ok_or_else(|| Error::UnsupportedConstruct("malformed data URI".to_string()))?;
    let mut params = meta.split(';');
    let media_type = params.next().unwrap_or_default();
    let subtype = media_type
        .strip_prefix("image/")
        .map(|sub| sub.trim_start_matches("x-"))
        .unwrap_or_default();
    let format = ImageFormat::from_extension(subtype).ok_or_else(|| {
        Error::UnsupportedConstruct(format!("unsupported image type: {}", media_type))
    })?;
    if !params.any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(Error::UnsupportedConstruct(
            "data URI images must be base64 encoded".to_string(),
        ));
    }

    let data = match base64::engine::general_purpose::STANDARD.decode(payload.trim()) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("data URI image could not be decoded ({}); embedding a placeholder", err);
            Vec::new()
        },
    };
    Ok((format, format!("image.{}", format.extension()), data))
}

fn to_emu(length: Length, content_width: u32) -> i64 {
    match length {
        Length::Px(px) => px_to_emu_96(px.round() as u32),
        Length::Percent(pct) => twip_to_emu(i64::from(percent_of(content_width, pct))),
    }
}
