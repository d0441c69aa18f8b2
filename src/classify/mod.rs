pub mod intake;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use pipeline::ClassificationPipeline;
pub use types::{format_percent, PipelineStage, PredictionOutcome, PredictionResult, UploadedImage};
