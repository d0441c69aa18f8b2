use crate::classify::PredictionResult;
use crate::models::{
    ClassifierMode, ClassifyInput, ImageClassifier, KeywordClassifier, OnnxClassifier,
};
use crate::{Config, Result};
use serde::Serialize;
use std::sync::Arc;

/// 模型管理器：启动时加载一次，之后只读，由所有请求共享
#[derive(Clone)]
pub struct ModelManager {
    classifier: Arc<dyn ImageClassifier>,
    model_path: String,
    intra_threads: usize,
}

impl ModelManager {
    /// 按配置加载分类后端
    ///
    /// 模型加载失败时：`require_model` 为真则返回错误（进程退出），否则切换到关键词回退模式。
    pub fn load(config: &Config) -> Result<Self> {
        tracing::info!("Initializing model manager...");

        let classifier: Arc<dyn ImageClassifier> = match OnnxClassifier::new(config) {
            Ok(model) => {
                tracing::info!("Classification model loaded successfully");
                Arc::new(model)
            }
            Err(e) if config.require_model => {
                tracing::error!("Model not available and --require-model is set: {}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Model not available ({}), using filename keyword fallback", e);
                Arc::new(KeywordClassifier::new())
            }
        };

        Ok(Self::with_classifier(classifier, config))
    }

    /// 使用指定后端构造（测试或嵌入时使用）
    pub fn with_classifier(classifier: Arc<dyn ImageClassifier>, config: &Config) -> Self {
        let manager = Self {
            classifier,
            model_path: config.model_path.display().to_string(),
            intra_threads: config.onnx_config.intra_threads,
        };
        tracing::info!("Model manager ready: mode={}", manager.mode().as_str());
        manager
    }

    pub fn classify(&self, input: ClassifyInput<'_>) -> Result<PredictionResult> {
        self.classifier.classify(input)
    }

    pub fn mode(&self) -> ClassifierMode {
        self.classifier.mode()
    }

    /// 获取模型统计信息
    pub fn get_stats(&self) -> ModelStats {
        ModelStats {
            mode: self.mode(),
            model_path: self.model_path.clone(),
            num_classes: crate::models::labels::CLASS_NAMES.len(),
            intra_threads: self.intra_threads,
        }
    }
}

/// 模型统计信息
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub mode: ClassifierMode,
    pub model_path: String,
    pub num_classes: usize,
    pub intra_threads: usize,
}
