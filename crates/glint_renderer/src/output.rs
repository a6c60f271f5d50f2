//! Writing rendered images.
//!
//! Plain PPM is written directly; every other format goes through the
//! `image` crate, picked by file extension.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::renderer::color_to_rgb;
use crate::ImageBuffer;

/// Path that selects standard output.
pub const STDOUT_PATH: &str = "-";

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} values, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Write an image as plain-text PPM (`P3`), one pixel per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> Result<(), OutputError> {
    check_size(image)?;

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;
    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(out, "{r} {g} {b}")?;
    }
    out.flush()?;
    Ok(())
}

/// Save an image to `path`, or to standard output when the path is `-`.
///
/// Standard output and `.ppm` files get plain PPM; other extensions are
/// encoded by the `image` crate.
pub fn save<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();

    if path.as_os_str() == STDOUT_PATH {
        let stdout = io::stdout();
        return write_ppm(image, BufWriter::new(stdout.lock()));
    }

    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        write_ppm(image, BufWriter::new(File::create(path)?))?;
    } else {
        check_size(image)?;
        let bytes = image.to_rgb();
        let actual = bytes.len();
        let encoded = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(
            OutputError::SizeMismatch {
                expected: image.width as usize * image.height as usize * 3,
                actual,
            },
        )?;
        encoded.save(path)?;
    }

    info!("Wrote {}", path.display());
    Ok(())
}

fn check_size(image: &ImageBuffer) -> Result<(), OutputError> {
    let expected = image.width as usize * image.height as usize;
    if image.pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn checker() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));
        image.set(0, 1, Color::new(4.0, -1.0, 0.0));
        image
    }

    #[test]
    fn test_ppm_format() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "P3",
                "2 2",
                "255",
                "255 255 255",
                "127 0 255",
                "255 0 0",
                "0 0 0"
            ]
        );
    }

    #[test]
    fn test_size_mismatch() {
        let mut image = checker();
        image.pixels.pop();
        let err = write_ppm(&image, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            OutputError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_save_ppm_and_png() {
        let dir = std::env::temp_dir().join(format!("glint-output-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ppm = dir.join("checker.ppm");
        save(&checker(), &ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));

        let png = dir.join("checker.png");
        save(&checker(), &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [127, 0, 255]);
        assert_eq!(decoded.get_pixel(0, 1).0, [255, 0, 0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let err = save(&checker(), "/nonexistent/glint/out.ppm").unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
