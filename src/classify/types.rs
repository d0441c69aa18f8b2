use crate::models::label_for;
use crate::utils::error::ClassifierError;
use crate::Result;
use serde::Serialize;

/// 上传的图像：原始文件名 + 字节
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: axum::body::Bytes,
}

/// 单次分类结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class_index: usize,
    pub class_name: String,
    pub confidence: f32,
}

impl PredictionResult {
    /// 由模型输出的得分向量构造：取第一个最大值的索引与数值
    ///
    /// 含 NaN 或无穷大的输出视为推理失败。
    pub fn from_scores(scores: &[f32]) -> Result<Self> {
        if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
            return Err(ClassifierError::InferenceFailure(format!(
                "Model returned a non-finite score at index {}: {}",
                i, scores[i]
            )));
        }

        let (class_index, confidence) = scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, score)| match best {
                Some((_, max)) if score <= max => best,
                _ => Some((i, score)),
            })
            .ok_or_else(|| ClassifierError::InferenceFailure("Model returned no scores".to_string()))?;

        Ok(Self {
            class_index,
            class_name: label_for(class_index).into_owned(),
            confidence,
        })
    }

    /// 百分比格式，保留两位小数，例如 0.85 -> "85.00%"
    pub fn confidence_percent(&self) -> String {
        format_percent(self.confidence)
    }
}

pub fn format_percent(value: f32) -> String {
    format!("{:.2}%", value as f64 * 100.0)
}

/// 完整的请求处理结果，用于渲染结果页
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    /// 清洗后的文件名（即磁盘上的文件名）
    pub filename: String,
    pub prediction: PredictionResult,
    pub processing_time: f32,
}

/// 处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Intake,
    Persist,
    Preprocess,
    Classify,
    Completed,
}
