use std::path::Path;

use image::ImageEncoder;

use crate::error::SnapshotError;

/// Writes a packed RGB8 buffer as a PNG file.
pub fn save_png(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<(), SnapshotError> {
    let expected = width as usize * height as usize * 3;
    if buffer.len() != expected {
        return Err(SnapshotError::BufferSize {
            width,
            height,
            expected,
            actual: buffer.len(),
        });
    }

    let output = std::io::BufWriter::new(std::fs::File::create(path)?);
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgb8)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("robo_eye_{}_{name}", std::process::id()))
    }

    #[test]
    fn save_gradient_file() {
        let width = 64u32;
        let height = 32u32;
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        let mut intensity = 0u8;
        for pixel in buffer.chunks_mut(3) {
            pixel[0] = intensity;
            pixel[1] = intensity;
            pixel[2] = 255 - intensity;
            intensity = intensity.wrapping_add(1);
        }

        let path = scratch("gradient.png");
        save_png(&path, width, height, &buffer).expect("Error Saving File.");

        let decoded = image::open(&path).expect("Error Reading File.").to_rgb8();
        assert_eq!(decoded.dimensions(), (width, height));
        assert_eq!(decoded.get_pixel(1, 0), &image::Rgb([1, 1, 254]));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_short_buffer() {
        let path = scratch("short.png");
        let err = save_png(&path, 10, 10, &[0u8; 30]).unwrap_err();
        assert!(matches!(err, SnapshotError::BufferSize { expected: 300, actual: 30, .. }));
        assert!(!path.exists());
    }
}
