use crate::classify::PredictionResult;
use crate::Result;
use ndarray::Array4;
use serde::Serialize;

/// 分类输入：预处理后的张量 + 保存后的文件名
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    pub tensor: &'a Array4<f32>,
    pub filename: &'a str,
}

/// 分类后端运行模式，启动时确定，进程内不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    Model,
    Fallback,
}

impl ClassifierMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierMode::Model => "model",
            ClassifierMode::Fallback => "fallback",
        }
    }
}

/// 图像分类后端
///
/// 实现必须可以被多个请求并发调用。
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, input: ClassifyInput<'_>) -> Result<PredictionResult>;

    fn mode(&self) -> ClassifierMode;
}
