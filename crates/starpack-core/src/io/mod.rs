pub mod image_io;

pub use image_io::{
    collect_image_files, load_color_image, load_color_images, save_color_image, save_rgb_image,
};
