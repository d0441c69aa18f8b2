use crate::{
    classify::{
        intake::{secure_filename, validate_filename},
        storage::save_upload,
        PipelineStage, PredictionOutcome, PredictionResult, UploadedImage,
    },
    image::{ImageLoader, ImagePreprocessor},
    models::{ClassifyInput, ModelManager},
    utils::error::ClassifierError,
    Result,
};
use std::path::Path;
use std::time::Instant;

/// 分类处理流水线：校验 -> 保存 -> 预处理 -> 分类
pub struct ClassificationPipeline;

impl ClassificationPipeline {
    /// 处理一次上传
    pub async fn process_upload(
        manager: &ModelManager,
        upload_dir: &Path,
        upload: UploadedImage,
        request_id: &str,
    ) -> Result<PredictionOutcome> {
        let start_time = Instant::now();

        // 校验通过前没有任何副作用
        Self::log_stage(request_id, PipelineStage::Intake, &upload.filename);
        validate_filename(&upload.filename)?;

        let filename = secure_filename(&upload.filename);
        Self::log_stage(request_id, PipelineStage::Persist, &filename);
        save_upload(upload_dir, &filename, &upload.data).await?;

        // 解码、缩放与推理都是CPU密集型操作，放到阻塞线程池执行
        let prediction = {
            let manager = manager.clone();
            let data = upload.data.clone();
            let filename = filename.clone();
            let request_id = request_id.to_string();

            tokio::task::spawn_blocking(move || {
                Self::classify_bytes(&manager, &data, &filename, &request_id)
            })
            .await
            .map_err(|e| ClassifierError::Internal(format!("Classification task failed: {}", e)))??
        };

        let processing_time = start_time.elapsed();
        Self::log_stage(request_id, PipelineStage::Completed, &filename);

        tracing::info!(
            "Prediction: request_id={}, file={}, class={} ({}), confidence={:.2}, mode={}, time={:.3}s",
            request_id,
            filename,
            prediction.class_name,
            prediction.class_index,
            prediction.confidence,
            manager.mode().as_str(),
            processing_time.as_secs_f32()
        );

        Ok(PredictionOutcome {
            filename,
            prediction,
            processing_time: processing_time.as_secs_f32(),
        })
    }

    /// 同步部分：预处理 + 分类
    pub fn classify_bytes(
        manager: &ModelManager,
        data: &[u8],
        filename: &str,
        request_id: &str,
    ) -> Result<PredictionResult> {
        Self::log_stage(request_id, PipelineStage::Preprocess, filename);
        if let Some(format) = ImageLoader::detect_format(data) {
            tracing::debug!("Detected image format: {:?}", format);
        }
        let tensor = ImagePreprocessor::preprocess_bytes(data)?;

        Self::log_stage(request_id, PipelineStage::Classify, filename);
        manager.classify(ClassifyInput {
            tensor: &tensor,
            filename,
        })
    }

    fn log_stage(request_id: &str, stage: PipelineStage, filename: &str) {
        tracing::debug!("Pipeline [{}]: {:?} - {}", request_id, stage, filename);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassifierMode, ImageClassifier, KeywordClassifier};
    use crate::Config;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::Arc;

    fn png_bytes() -> axum::body::Bytes {
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([10, 20, 30])))
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner().into()
    }

    fn fallback_manager() -> ModelManager {
        let config = Config::new(
            "127.0.0.1:0".to_string(),
            "unused".to_string(),
            "missing.onnx".to_string(),
            Some(1),
            false,
            false,
            None,
        )
        .unwrap();
        ModelManager::with_classifier(Arc::new(KeywordClassifier::new()), &config)
    }

    #[tokio::test]
    async fn fallback_upload_is_saved_and_classified() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedImage {
            filename: "Brown Dog.PNG".to_string(),
            data: png_bytes(),
        };

        let outcome = ClassificationPipeline::process_upload(&fallback_manager(), dir.path(), upload, "t1")
            .await
            .unwrap();

        assert_eq!(outcome.filename, "Brown_Dog.PNG");
        assert_eq!(outcome.prediction.class_name, "dog");
        assert_eq!(outcome.prediction.confidence_percent(), "92.00%");
        assert!(dir.path().join("Brown_Dog.PNG").exists());
    }

    #[tokio::test]
    async fn accented_filename_matches_keyword_after_sanitizing() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedImage {
            filename: "K\u{00f9}da.jpg".to_string(),
            data: png_bytes(),
        };

        let outcome = ClassificationPipeline::process_upload(&fallback_manager(), dir.path(), upload, "t4")
            .await
            .unwrap();

        assert_eq!(outcome.filename, "Kuda.jpg");
        assert_eq!(outcome.prediction.class_name, "horse");
        assert_eq!(outcome.prediction.confidence_percent(), "90.00%");
        assert!(dir.path().join("Kuda.jpg").exists());
    }

    #[tokio::test]
    async fn invalid_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedImage {
            filename: "file.txt".to_string(),
            data: png_bytes(),
        };

        let err = ClassificationPipeline::process_upload(&fallback_manager(), dir.path(), upload, "t2")
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::InvalidExtension(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn undecodable_image_fails_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedImage {
            filename: "cat.png".to_string(),
            data: axum::body::Bytes::from_static(b"not really a png"),
        };

        let err = ClassificationPipeline::process_upload(&fallback_manager(), dir.path(), upload, "t3")
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::DecodeFailure(_)));
        assert!(dir.path().join("cat.png").exists());
    }

    struct FailingModel;

    impl ImageClassifier for FailingModel {
        fn classify(&self, _input: ClassifyInput<'_>) -> Result<PredictionResult> {
            Err(ClassifierError::InferenceFailure("session crashed".to_string()))
        }

        fn mode(&self) -> ClassifierMode {
            ClassifierMode::Model
        }
    }

    #[test]
    fn inference_errors_propagate() {
        let config = Config::new(
            "127.0.0.1:0".to_string(),
            "unused".to_string(),
            "model.onnx".to_string(),
            Some(1),
            false,
            false,
            None,
        )
        .unwrap();
        let manager = ModelManager::with_classifier(Arc::new(FailingModel), &config);

        let err = ClassificationPipeline::classify_bytes(&manager, &png_bytes(), "x.png", "t4").unwrap_err();
        assert!(matches!(err, ClassifierError::InferenceFailure(_)));
    }
}
