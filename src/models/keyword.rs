use crate::classify::PredictionResult;
use crate::models::{labels, ClassifierMode, ClassifyInput, ImageClassifier};
use crate::Result;

/// 关键词规则：(关键词, 类别名, 置信度)
const KEYWORD_RULES: [(&[&str], &str, f32); 10] = [
    (&["dog", "anjing"], "dog", 0.92),
    (&["cat", "kucing"], "cat", 0.88),
    (&["car", "mobil"], "automobile", 0.95),
    (&["bird", "burung"], "bird", 0.79),
    (&["airplane", "pesawat"], "airplane", 0.99),
    (&["ship", "kapal"], "ship", 0.98),
    (&["truck", "truk"], "truck", 0.97),
    (&["horse", "kuda"], "horse", 0.90),
    (&["deer", "rusa"], "deer", 0.91),
    (&["frog", "katak"], "frog", 0.85),
];

const DEFAULT_CLASS: &str = "cat";
const DEFAULT_CONFIDENCE: f32 = 0.85;

/// 无模型时的演示后端：根据文件名中的关键词给出预测，忽略图像内容
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 按规则表顺序匹配，第一个命中的规则生效
    pub fn predict_filename(&self, filename: &str) -> PredictionResult {
        let lowered = filename.to_lowercase();

        let (class_name, confidence) = KEYWORD_RULES
            .iter()
            .find(|(keywords, _, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|&(_, class_name, confidence)| (class_name, confidence))
            .unwrap_or((DEFAULT_CLASS, DEFAULT_CONFIDENCE));

        PredictionResult {
            class_index: labels::index_of(class_name).unwrap_or_default(),
            class_name: class_name.to_string(),
            confidence,
        }
    }
}

impl ImageClassifier for KeywordClassifier {
    fn classify(&self, input: ClassifyInput<'_>) -> Result<PredictionResult> {
        let result = self.predict_filename(input.filename);
        tracing::debug!(
            "Fallback prediction for '{}': {} ({:.2})",
            input.filename,
            result.class_name,
            result.confidence
        );
        Ok(result)
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Fallback
    }
}
