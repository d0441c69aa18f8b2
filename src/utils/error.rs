use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("No file part in the request")]
    MissingFile,

    #[error("Uploaded file has an empty filename")]
    EmptyFilename,

    #[error("File extension not allowed: {0}")]
    InvalidExtension(String),

    #[error("Failed to save upload: {0}")]
    SaveFailure(String),

    #[error("Image decode failed: {0}")]
    DecodeFailure(String),

    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ClassifierError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClassifierError::MissingFile
            | ClassifierError::EmptyFilename
            | ClassifierError::Multipart(_) => StatusCode::BAD_REQUEST,
            ClassifierError::InvalidExtension(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ClassifierError::DecodeFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ClassifierError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ClassifierError::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ClassifierError::MissingFile => "MISSING_FILE",
            ClassifierError::EmptyFilename => "EMPTY_FILENAME",
            ClassifierError::InvalidExtension(_) => "INVALID_EXTENSION",
            ClassifierError::SaveFailure(_) => "SAVE_FAILURE",
            ClassifierError::DecodeFailure(_) => "DECODE_FAILURE",
            ClassifierError::InferenceFailure(_) => "INFERENCE_FAILURE",
            ClassifierError::Multipart(_) => "MULTIPART_ERROR",
            ClassifierError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ClassifierError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            ClassifierError::Config(_) => "CONFIG_ERROR",
            ClassifierError::Io(_) => "IO_ERROR",
            ClassifierError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON错误响应（服务端点使用；上传页面流程改为flash重定向）
impl IntoResponse for ClassifierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });

        tracing::error!("Request failed: {} ({})", self, status);

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_errors_are_client_errors() {
        assert_eq!(ClassifierError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ClassifierError::EmptyFilename.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ClassifierError::InvalidExtension("txt".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ClassifierError::PayloadTooLarge(16).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn pipeline_failures_are_server_errors() {
        assert_eq!(
            ClassifierError::SaveFailure("disk".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ClassifierError::InferenceFailure("boom".into()).error_code(),
            "INFERENCE_FAILURE"
        );
    }
}
