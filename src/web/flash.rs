use crate::utils::error::ClassifierError;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

pub const FLASH_COOKIE: &str = "flash";

/// 重定向回首页时展示的一次性提示
///
/// cookie 中只保存短代码，文案在渲染时查表。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    NoFileSelected,
    InvalidFileType,
    SaveError,
    ProcessingError,
    PredictionError,
    UploadError,
}

impl Flash {
    const ALL: [Flash; 6] = [
        Flash::NoFileSelected,
        Flash::InvalidFileType,
        Flash::SaveError,
        Flash::ProcessingError,
        Flash::PredictionError,
        Flash::UploadError,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Flash::NoFileSelected => "no_file",
            Flash::InvalidFileType => "invalid_type",
            Flash::SaveError => "save_error",
            Flash::ProcessingError => "processing_error",
            Flash::PredictionError => "prediction_error",
            Flash::UploadError => "upload_error",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::NoFileSelected => "No file selected",
            Flash::InvalidFileType => "Invalid file type. Please upload PNG, JPG, JPEG, or GIF.",
            Flash::SaveError => "Error saving file",
            Flash::ProcessingError => "Error processing image",
            Flash::PredictionError => "Error during prediction",
            Flash::UploadError => "Failed to read upload",
        }
    }

    /// 设置 flash cookie
    pub fn set(self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.add(
            Cookie::build((FLASH_COOKIE, self.code()))
                .path("/")
                .http_only(true),
        )
    }

    /// 取出并清除 flash cookie；没有 cookie 时 jar 原样返回
    pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Self>) {
        match jar.get(FLASH_COOKIE) {
            Some(cookie) => {
                let flash = Self::from_code(cookie.value());
                (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
            }
            None => (jar, None),
        }
    }
}

impl From<&ClassifierError> for Flash {
    fn from(err: &ClassifierError) -> Self {
        match err {
            ClassifierError::MissingFile | ClassifierError::EmptyFilename => Flash::NoFileSelected,
            ClassifierError::InvalidExtension(_) => Flash::InvalidFileType,
            ClassifierError::SaveFailure(_) | ClassifierError::Io(_) => Flash::SaveError,
            ClassifierError::DecodeFailure(_) => Flash::ProcessingError,
            ClassifierError::Multipart(_) | ClassifierError::PayloadTooLarge(_) => Flash::UploadError,
            _ => Flash::PredictionError,
        }
    }
}
