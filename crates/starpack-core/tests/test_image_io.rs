mod common;

use std::path::PathBuf;

use starpack_core::error::StarpackError;
use starpack_core::io::image_io::{
    collect_image_files, load_color_image, load_color_images, save_color_image, save_color_png,
    save_color_tiff, save_rgb_image,
};
use starpack_core::starmap::{Bounds, Star, StarMap};

use common::{flat_frame, star_frame};

#[test]
fn test_save_load_roundtrip_tiff() {
    let mut frame = flat_frame(4, 4, [0.0, 0.5, 1.0]);
    frame.red.data[[2, 3]] = 0.25;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.tiff");

    save_color_tiff(&frame, &path).unwrap();
    let loaded = load_color_image(&path).unwrap();

    assert_eq!(loaded.width(), 4);
    assert_eq!(loaded.height(), 4);
    assert!((loaded.red.data[[0, 0]] - 0.0).abs() < 1e-4);
    assert!((loaded.red.data[[2, 3]] - 0.25).abs() < 1e-3);
    assert!((loaded.green.data[[1, 1]] - 0.5).abs() < 1e-3);
    assert!((loaded.blue.data[[3, 0]] - 1.0).abs() < 1e-4);
}

#[test]
fn test_save_load_roundtrip_png() {
    let frame = star_frame(10, 6, &[(4, 2, 0)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");

    save_color_png(&frame, &path).unwrap();
    let loaded = load_color_image(&path).unwrap();
    assert_eq!(loaded.dim(), (6, 10));
    assert_eq!(loaded.red.data[[2, 4]], 1.0);
    assert_eq!(loaded.green.data[[0, 0]], 0.0);
}

#[test]
fn test_save_color_image_picks_format_from_extension() {
    let frame = flat_frame(3, 3, [0.5; 3]);
    let dir = tempfile::tempdir().unwrap();

    let png = dir.path().join("out.png");
    save_color_image(&frame, &png).unwrap();
    assert_eq!(
        image::ImageFormat::from_path(&png).unwrap(),
        image::ImageFormat::Png
    );
    assert!(png.exists());

    let tiff = dir.path().join("out.tif");
    save_color_image(&frame, &tiff).unwrap();
    let reopened = image::open(&tiff).unwrap();
    assert_eq!(reopened.color(), image::ColorType::Rgb16);
}

#[test]
fn test_save_rendering() {
    let map = StarMap::new(Bounds::from_dimensions(16, 8), vec![Star::new(4.0, 4.0, 2.0)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.png");
    save_rgb_image(&map.render().unwrap(), &path).unwrap();

    let loaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(loaded.dimensions(), (16, 8));
    assert_eq!(loaded.get_pixel(4, 4).0, [0, 0, 0]);
}

#[test]
fn test_load_missing_file() {
    let result = load_color_image(&PathBuf::from("/nonexistent/frame.png"));
    assert!(result.is_err());
}

#[test]
fn test_load_many_checks_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    save_color_png(&flat_frame(4, 4, [0.1; 3]), &a).unwrap();
    save_color_png(&flat_frame(5, 4, [0.1; 3]), &b).unwrap();

    assert_eq!(load_color_images(&[a.clone(), a.clone()]).unwrap().len(), 2);
    assert!(matches!(
        load_color_images(&[a, b]),
        Err(StarpackError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        load_color_images(&[]),
        Err(StarpackError::EmptySequence)
    ));
}

#[test]
fn test_collect_image_files_walks_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("night2");
    std::fs::create_dir(&nested).unwrap();
    for name in ["b.JPG", "a.png", "notes.txt"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    std::fs::write(nested.join("c.tiff"), b"").unwrap();
    let single = dir.path().join("single.jpeg");
    std::fs::write(&single, b"").unwrap();

    let files = collect_image_files(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["a.png", "b.JPG", "night2/c.tiff", "single.jpeg"]
    );

    // Plain files are passed through
    let explicit = collect_image_files(&[single.clone()]).unwrap();
    assert_eq!(explicit, vec![single]);
}

#[test]
fn test_save_color_image_extension_is_case_insensitive() {
    let frame = flat_frame(3, 3, [0.5; 3]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("OUT.PNG");
    save_color_image(&frame, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}
