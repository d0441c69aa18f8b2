use crate::classify::PredictionResult;
use crate::models::{ClassifierMode, ClassifyInput, ImageClassifier};
use crate::utils::error::ClassifierError;
use crate::{Config, Result};
use ort::{
    inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use parking_lot::Mutex;
use std::path::Path;

/// ONNX 图像分类器，输入 [1, 32, 32, 3] NHWC 张量，输出各类别概率
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,  // 动态发现的输入名称
    output_name: String, // 动态发现的输出名称
}

impl OnnxClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = &config.model_path;

        if !model_path.exists() {
            return Err(ClassifierError::ModelLoad(format!(
                "Classification model not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading classification model from: {}", model_path.display());

        let session = Self::build_session(model_path, config)?;

        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => {
                return Err(ClassifierError::ModelLoad(
                    "Classification model has no inputs".to_string(),
                ))
            }
        };

        let output_name = match session.outputs.first() {
            Some(output) => output.name.clone(),
            None => {
                return Err(ClassifierError::ModelLoad(
                    "Classification model has no outputs".to_string(),
                ))
            }
        };

        tracing::info!(
            "Classification model input: '{}', output: '{}'",
            input_name,
            output_name
        );
        for (i, output) in session.outputs.iter().enumerate() {
            tracing::debug!("Classification output[{}]: '{}'", i, output.name);
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    fn build_session(model_path: &Path, config: &Config) -> Result<Session> {
        let level = match config.onnx_config.optimization_level {
            0 => GraphOptimizationLevel::Disable,
            1 => GraphOptimizationLevel::Level1,
            2 => GraphOptimizationLevel::Level2,
            _ => GraphOptimizationLevel::Level3,
        };

        let session = Session::builder()
            .map_err(|e| ClassifierError::ModelLoad(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(level)
            .map_err(|e| ClassifierError::ModelLoad(format!("Failed to set optimization: {}", e)))?
            .with_intra_threads(config.onnx_config.intra_threads)
            .map_err(|e| ClassifierError::ModelLoad(format!("Failed to set intra threads: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ClassifierError::ModelLoad(format!("Failed to load model: {}", e)))?;

        Ok(session)
    }

    /// 运行模型，返回展平后的得分向量
    fn run(&self, input: ClassifyInput<'_>) -> Result<Vec<f32>> {
        let input_tensor = Tensor::from_array(input.tensor.clone())
            .map_err(|e| ClassifierError::InferenceFailure(format!("Failed to build input tensor: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| ClassifierError::InferenceFailure(e.to_string()))?;

        let scores: Vec<f32> = match outputs.get(self.output_name.as_str()) {
            Some(output) => output
                .try_extract_array::<f32>()
                .map_err(|e| ClassifierError::InferenceFailure(e.to_string()))?
                .iter()
                .copied()
                .collect(),
            None => {
                return Err(ClassifierError::InferenceFailure(format!(
                    "Classification output '{}' not found",
                    self.output_name
                )))
            }
        };

        Ok(scores)
    }
}

impl ImageClassifier for OnnxClassifier {
    fn classify(&self, input: ClassifyInput<'_>) -> Result<PredictionResult> {
        let scores = self.run(input)?;
        tracing::debug!("Model returned {} scores", scores.len());
        PredictionResult::from_scores(&scores)
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Model
    }
}
