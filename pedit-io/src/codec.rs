//! Bridge between `PixelGrid` and the raster codecs of the `image` crate

use std::path::Path;

use image::error::{LimitError, LimitErrorKind, ParameterError, ParameterErrorKind};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader, RgbaImage};
use pedit_core::{ColorMode, PixelGrid};

use crate::error::{ImageError, Result};

/// What the enabled codecs can do with one format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSupport {
    pub format: ImageFormat,
    pub extensions: &'static [&'static str],
    pub read: bool,
    pub write: bool,
}

/// Formats with at least one enabled direction
pub fn supported_formats() -> Vec<FormatSupport> {
    ImageFormat::all()
        .map(|format| FormatSupport {
            format,
            extensions: format.extensions_str(),
            read: format.reading_enabled(),
            write: format.writing_enabled(),
        })
        .filter(|support| support.read || support.write)
        .collect()
}

/// Decode a file into a grid, sniffing the format from its content
pub fn decode(path: &Path) -> Result<(PixelGrid, Option<ImageFormat>)> {
    let decode_err = |source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    let format = reader.format();
    let dynamic = reader.decode().map_err(decode_err)?;

    let (width, height) = (dynamic.width(), dynamic.height());
    if width == 0 || height == 0 {
        return Err(decode_err(image::ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        ))));
    }

    let mode = color_mode(dynamic.color());
    let grid = PixelGrid::from_rgba_raw(width, height, dynamic.into_rgba8().into_raw(), mode)?;
    Ok((grid, format))
}

/// Encode `grid` to `path` in the format its extension names
pub fn encode(grid: &PixelGrid, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    let encode_err = |source| ImageError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let (width, height) = grid.dimensions();
    let rgba = RgbaImage::from_raw(width, height, grid.to_rgba_raw()).ok_or_else(|| {
        encode_err(image::ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )))
    })?;

    let dynamic = fit_to_format(with_mode(DynamicImage::ImageRgba8(rgba), grid.mode()), format);
    dynamic.save_with_format(path, format).map_err(encode_err)
}

/// Output format implied by the file extension
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| ImageError::UnsupportedFormat(path.to_path_buf()))
}

fn color_mode(color: ColorType) -> ColorMode {
    match (color.has_color(), color.has_alpha()) {
        (false, false) => ColorMode::Grayscale,
        (false, true) => ColorMode::GrayscaleAlpha,
        (true, false) => ColorMode::Rgb,
        (true, true) => ColorMode::Rgba,
    }
}

fn with_mode(rgba: DynamicImage, mode: ColorMode) -> DynamicImage {
    match mode {
        ColorMode::Grayscale => DynamicImage::ImageLuma8(rgba.into_luma8()),
        ColorMode::GrayscaleAlpha => DynamicImage::ImageLumaA8(rgba.into_luma_alpha8()),
        ColorMode::Rgb => DynamicImage::ImageRgb8(rgba.into_rgb8()),
        ColorMode::Rgba => rgba,
    }
}

/// JPEG has no alpha channel and the GIF encoder only takes colour input
fn fit_to_format(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    match (format, image) {
        (ImageFormat::Jpeg, DynamicImage::ImageLumaA8(gray)) => {
            DynamicImage::ImageLuma8(DynamicImage::ImageLumaA8(gray).into_luma8())
        }
        (ImageFormat::Jpeg, DynamicImage::ImageRgba8(rgba)) => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).into_rgb8())
        }
        (ImageFormat::Gif, image @ DynamicImage::ImageLuma8(_)) => {
            DynamicImage::ImageRgb8(image.into_rgb8())
        }
        (ImageFormat::Gif, image @ DynamicImage::ImageLumaA8(_)) => {
            DynamicImage::ImageRgba8(image.into_rgba8())
        }
        (_, image) => image,
    }
}
