use crate::utils::error::ClassifierError;
use crate::Result;
use image::{DynamicImage, ImageFormat, RgbImage};

pub struct ImageLoader;

impl ImageLoader {
    /// 从字节加载图像（格式由内容嗅探）
    pub fn from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        if bytes.is_empty() {
            return Err(ClassifierError::DecodeFailure("Empty image data".to_string()));
        }

        image::load_from_memory(bytes).map_err(|e| ClassifierError::DecodeFailure(e.to_string()))
    }

    /// 检测图像格式
    pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }

    /// 统一转换为3通道RGB（灰度、调色板、带alpha的图像都会被转换，alpha直接丢弃）
    pub fn to_rgb(image: DynamicImage) -> RgbImage {
        match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => {
                tracing::debug!("Converting {:?} image to RGB", other.color());
                other.to_rgb8()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        image.write_to(&mut cursor, format).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn decodes_png_and_detects_format() {
        let bytes = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 3, Luma([10]))),
            ImageFormat::Png,
        );

        assert_eq!(ImageLoader::detect_format(&bytes), Some(ImageFormat::Png));
        let image = ImageLoader::from_bytes(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let err = ImageLoader::from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifierError::DecodeFailure(_)));

        let err = ImageLoader::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, ClassifierError::DecodeFailure(_)));
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]));
        let rgb = ImageLoader::to_rgb(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(1, 1).0, [200, 100, 50]);
    }
}
