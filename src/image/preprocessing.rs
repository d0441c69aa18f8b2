use crate::image::ImageLoader;
use crate::utils::error::ClassifierError;
use crate::Result;
use image::{imageops::FilterType, RgbImage};
use ndarray::Array4;

/// 模型输入尺寸 (H, W)
pub const INPUT_SIZE: (u32, u32) = (32, 32);

/// 通道数
pub const INPUT_CHANNELS: usize = 3;

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// 分类模型预处理流水线：解码 -> RGB -> 32x32 -> [0,1] -> NHWC
    pub fn preprocess_bytes(bytes: &[u8]) -> Result<Array4<f32>> {
        let image = ImageLoader::from_bytes(bytes)?;
        let rgb = ImageLoader::to_rgb(image);
        Self::to_tensor(&Self::resize(&rgb))
    }

    /// 直接缩放到目标尺寸，不保持宽高比（模型训练时即如此）
    pub fn resize(image: &RgbImage) -> RgbImage {
        let (target_h, target_w) = INPUT_SIZE;
        if image.dimensions() == (target_w, target_h) {
            return image.clone();
        }
        image::imageops::resize(image, target_w, target_h, FilterType::CatmullRom)
    }

    /// 归一化并添加batch维度，输出形状 [1, H, W, C]
    pub fn to_tensor(image: &RgbImage) -> Result<Array4<f32>> {
        let (width, height) = image.dimensions();
        let data: Vec<f32> = image.as_raw().iter().map(|&v| v as f32 / 255.0).collect();

        Array4::from_shape_vec(
            (1, height as usize, width as usize, INPUT_CHANNELS),
            data,
        )
        .map_err(|e| ClassifierError::DecodeFailure(format!("Invalid tensor shape: {}", e)))
    }
}
