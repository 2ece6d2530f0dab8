pub mod image;

pub use self::image::{case_line, image_bytes_to_intensities, image_to_intensities};
