use crate::{
    classify::{ClassificationPipeline, UploadedImage},
    utils::error::ClassifierError,
    web::{extractors::RequestId, flash::Flash, ui, AppState},
    Result,
};
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

/// 首页：上传表单 + 待展示的 flash 提示
pub async fn index_handler(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, flash) = Flash::take(jar);
    (jar, ui::render_index(flash, state.models.mode()))
}

/// GET /predict 直接回到首页
pub async fn predict_redirect_handler() -> Redirect {
    Redirect::to("/")
}

/// Multipart文件上传处理器
///
/// 任何失败都转换为 flash 提示并重定向回首页，不渲染部分结果。
pub async fn predict_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    RequestId(request_id): RequestId,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    tracing::info!("Processing upload request: request_id={}", request_id);

    // 非 multipart 请求等同于没有上传文件
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => {
            tracing::debug!("Multipart rejected: {}", rejection.body_text());
            Err(ClassifierError::MissingFile)
        }
    };

    let result = match upload {
        Ok(upload) => {
            ClassificationPipeline::process_upload(
                &state.models,
                &state.config.upload_dir,
                upload,
                &request_id,
            )
            .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => ui::render_result(&outcome).into_response(),
        // 超过大小限制属于 HTTP 层错误，直接返回 413
        Err(e @ ClassifierError::PayloadTooLarge(_)) => e.into_response(),
        Err(e) => {
            tracing::warn!(
                "Prediction failed: request_id={}, code={}, error={}",
                request_id,
                e.error_code(),
                e
            );
            (Flash::from(&e).set(jar), Redirect::to("/")).into_response()
        }
    }
}

/// 读取 multipart 中的 `file` 字段，其他字段忽略
async fn read_upload(mut multipart: Multipart) -> Result<UploadedImage> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("unknown").to_string();

        if field_name != "file" {
            tracing::debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ClassifierError::EmptyFilename);
        }

        let data: Bytes = field.bytes().await.map_err(multipart_error)?;
        tracing::debug!("Received file '{}': {} bytes", filename, data.len());

        return Ok(UploadedImage { filename, data });
    }

    Err(ClassifierError::MissingFile)
}

fn multipart_error(err: MultipartError) -> ClassifierError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ClassifierError::PayloadTooLarge(crate::config::MAX_UPLOAD_SIZE)
    } else {
        ClassifierError::Multipart(err.body_text())
    }
}
