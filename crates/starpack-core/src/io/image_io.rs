use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::{Result, StarpackError};
use crate::frame::{ColorFrame, Frame};

/// Save a ColorFrame as 16-bit RGB TIFF.
pub fn save_color_tiff(color: &ColorFrame, path: &Path) -> Result<()> {
    let h = color.height();
    let w = color.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w * 3);
    for row in 0..h {
        for col in 0..w {
            for channel in color.channels() {
                pixels.push((channel.data[[row, col]].clamp(0.0, 1.0) * 65535.0) as u16);
            }
        }
    }

    let img = image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or(StarpackError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        })?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    let h = color.height();
    let w = color.width();

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let r = (color.red.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let g = (color.green.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let b = (color.blue.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a ColorFrame, choosing format from file extension.
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => save_color_png(color, path),
        _ => save_color_tiff(color, path),
    }
}

/// Save an 8-bit diagnostic raster (star map renderings) as PNG.
pub fn save_rgb_image(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Decode any supported image file into a ColorFrame.
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?.to_rgb32f();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(StarpackError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let mut red = Array2::<f32>::zeros((h as usize, w as usize));
    let mut green = Array2::<f32>::zeros((h as usize, w as usize));
    let mut blue = Array2::<f32>::zeros((h as usize, w as usize));
    for (col, row, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let idx = [row as usize, col as usize];
        red[idx] = r.clamp(0.0, 1.0);
        green[idx] = g.clamp(0.0, 1.0);
        blue[idx] = b.clamp(0.0, 1.0);
    }

    Ok(ColorFrame {
        red: Frame::new(red),
        green: Frame::new(green),
        blue: Frame::new(blue),
    })
}

/// Decode every file concurrently. Fails if any file fails to decode or if
/// the frames do not all share the first frame's dimensions.
pub fn load_color_images(paths: &[PathBuf]) -> Result<Vec<ColorFrame>> {
    if paths.is_empty() {
        return Err(StarpackError::EmptySequence);
    }

    let frames: Vec<ColorFrame> = paths
        .par_iter()
        .map(|path| {
            let frame = load_color_image(path)?;
            debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Loaded image");
            Ok(frame)
        })
        .collect::<Result<_>>()?;

    let expected = frames[0].dim();
    if let Some(odd) = frames.iter().find(|f| f.dim() != expected) {
        return Err(StarpackError::DimensionMismatch {
            expected,
            actual: odd.dim(),
        });
    }
    Ok(frames)
}

/// Expand the given paths into image files. Directories are walked
/// recursively and contribute files with a known image extension, sorted
/// by path; plain files are kept as given.
pub fn collect_image_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if has_image_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
