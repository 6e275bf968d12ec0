use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba as ImgRgba, RgbaImage};
use pedit_io::{ColorMode, ErrorKind, FlipAxis, ImageEditor, Rect, Rgba};
use tempfile::TempDir;

/// 6x4 RGB gradient with a distinct value at every pixel
fn write_gradient(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let img = RgbImage::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 200]));
    img.save(&path).unwrap();
    path
}

fn write_solid(dir: &TempDir, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(width, height, Rgb(color)).save(&path).unwrap();
    path
}

fn open(path: &Path) -> ImageEditor {
    ImageEditor::open(path).unwrap()
}

#[test]
fn test_load_reports_dimensions_and_mode() {
    let dir = TempDir::new().unwrap();
    let editor = open(&write_gradient(&dir, "gradient.png"));

    let buffer = editor.buffer();
    assert!(editor.is_loaded());
    assert_eq!(buffer.dimensions(), (6, 4));
    assert_eq!(buffer.color_mode(), ColorMode::Rgb);
    assert_eq!(buffer.format(), Some(image::ImageFormat::Png));
    assert_eq!(buffer.pixel_at(2, 3).unwrap(), Rgba::rgb(80, 180, 200));
    assert_eq!(buffer.current(), buffer.original());
}

#[test]
fn test_load_keeps_gray_and_alpha_modes() {
    let dir = TempDir::new().unwrap();

    let gray_path = dir.path().join("gray.png");
    GrayImage::from_pixel(3, 3, Luma([77])).save(&gray_path).unwrap();
    let editor = open(&gray_path);
    assert_eq!(editor.buffer().color_mode(), ColorMode::Grayscale);
    assert_eq!(editor.buffer().pixel_at(1, 1).unwrap(), Rgba::gray(77));

    let alpha_path = dir.path().join("alpha.png");
    RgbaImage::from_pixel(2, 2, ImgRgba([10, 20, 30, 40])).save(&alpha_path).unwrap();
    let editor = open(&alpha_path);
    assert_eq!(editor.buffer().color_mode(), ColorMode::Rgba);
    assert_eq!(editor.buffer().pixel_at(0, 1).unwrap(), Rgba::new(10, 20, 30, 40));
}

#[test]
fn test_revert_restores_loaded_state() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_gradient(&dir, "gradient.png"));
    let loaded = editor.buffer().current().clone();

    editor.rotate(90.0).unwrap();
    editor.crop(Rect::new(0, 1, 3, 4)).unwrap();
    editor.to_sepia().unwrap();
    editor.set_contrast(120).unwrap();
    editor.flip(FlipAxis::Horizontal).unwrap();
    assert_ne!(editor.buffer().current(), &loaded);
    assert_eq!(editor.buffer().original(), &loaded);

    editor.revert().unwrap();
    assert_eq!(editor.buffer().current(), &loaded);
}

#[test]
fn test_orientation_identities() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_gradient(&dir, "gradient.png"));
    let loaded = editor.buffer().current().clone();

    editor.flip(FlipAxis::Horizontal).unwrap();
    editor.flip(FlipAxis::Horizontal).unwrap();
    assert_eq!(editor.buffer().current(), &loaded);

    editor.rotate(90.0).unwrap();
    editor.rotate(-90.0).unwrap();
    assert_eq!(editor.buffer().current(), &loaded);

    for _ in 0..4 {
        editor.rotate(90.0).unwrap();
    }
    assert_eq!(editor.buffer().current(), &loaded);
}

#[test]
fn test_crop_out_of_bounds_keeps_current() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_gradient(&dir, "gradient.png"));
    editor.set_brightness(12).unwrap();
    let before = editor.buffer().current().clone();

    let err = editor.crop(Rect::new(4, 2, 5, 5)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(editor.buffer().current(), &before);
}

#[test]
fn test_failed_load_keeps_previous_image() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_gradient(&dir, "gradient.png"));
    editor.to_grayscale().unwrap();
    let current = editor.buffer().current().clone();
    let original = editor.buffer().original().clone();

    let err = editor.load(dir.path().join("missing.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let garbage = dir.path().join("garbage.png");
    std::fs::write(&garbage, b"definitely not a png").unwrap();
    let err = editor.load(&garbage).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    assert_eq!(editor.buffer().current(), &current);
    assert_eq!(editor.buffer().original(), &original);
    assert!(editor.buffer().source().unwrap().ends_with("gradient.png"));
}

#[test]
fn test_red_square_brightness() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_solid(&dir, "red.png", 4, 4, [255, 0, 0]));

    let err = editor.set_brightness(-300).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    editor.set_brightness(-255).unwrap();

    let out = dir.path().join("black.png");
    editor.save(&out).unwrap();
    let saved = image::open(&out).unwrap().into_rgb8();
    assert!(saved.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn test_sepia_on_white_and_black() {
    let dir = TempDir::new().unwrap();
    let mut white = open(&write_solid(&dir, "white.png", 2, 2, [255, 255, 255]));
    white.to_sepia().unwrap();
    assert_eq!(white.buffer().pixel_at(1, 1).unwrap(), Rgba::rgb(255, 255, 238));

    let mut black = open(&write_solid(&dir, "black.png", 2, 2, [0, 0, 0]));
    black.to_sepia().unwrap();
    assert_eq!(black.buffer().pixel_at(0, 0).unwrap(), Rgba::BLACK);
}

#[test]
fn test_save_lossless_formats_round_trip() {
    let dir = TempDir::new().unwrap();
    let editor = open(&write_gradient(&dir, "gradient.png"));

    for name in ["copy.png", "copy.bmp"] {
        let out = dir.path().join(name);
        editor.save(&out).unwrap();
        let reloaded = open(&out);
        assert_eq!(reloaded.buffer().dimensions(), (6, 4), "{name}");
        assert_eq!(
            reloaded.buffer().pixel_at(5, 3).unwrap(),
            editor.buffer().pixel_at(5, 3).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn test_save_lossy_formats() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_solid(&dir, "solid.png", 8, 8, [120, 60, 30]));
    editor.buffer_mut().set_pixel(0, 0, Rgba::new(1, 2, 3, 128)).unwrap();

    for name in ["out.jpg", "out.gif"] {
        let out = dir.path().join(name);
        editor.save(&out).unwrap();
        assert_eq!(open(&out).buffer().dimensions(), (8, 8), "{name}");
    }
}

#[test]
fn test_save_grayscale_writes_gray_file() {
    let dir = TempDir::new().unwrap();
    let mut editor = open(&write_gradient(&dir, "gradient.png"));
    editor.to_grayscale().unwrap();

    let out = dir.path().join("gray.png");
    editor.save(&out).unwrap();
    let reloaded = open(&out);
    assert_eq!(reloaded.buffer().color_mode(), ColorMode::Grayscale);
    assert_eq!(reloaded.buffer().current(), editor.buffer().current());
}

#[test]
fn test_save_errors() {
    let dir = TempDir::new().unwrap();

    let err = ImageEditor::new().save(dir.path().join("empty.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyImage);

    let editor = open(&write_gradient(&dir, "gradient.png"));
    let err = editor.save(dir.path().join("image.unknown")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encode);

    let err = editor.save(dir.path().join("no-such-dir").join("out.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encode);
}
