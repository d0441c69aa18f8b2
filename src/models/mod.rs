pub mod backend;
pub mod classifier;
pub mod keyword;
pub mod labels;
pub mod manager;

pub use backend::{ClassifierMode, ClassifyInput, ImageClassifier};
pub use classifier::OnnxClassifier;
pub use keyword::KeywordClassifier;
pub use labels::{label_for, CLASS_NAMES};
pub use manager::{ModelManager, ModelStats};
