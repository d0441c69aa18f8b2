use crate::utils::error::ClassifierError;
use crate::Result;
use std::path::{Path, PathBuf};

/// 将上传文件写入上传目录，同名文件直接覆盖
///
/// 写入后检查文件是否存在，不存在则视为保存失败（不重试）。
pub async fn save_upload(upload_dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    if filename.is_empty() {
        return Err(ClassifierError::SaveFailure(
            "Filename is empty after sanitization".to_string(),
        ));
    }

    let path = upload_dir.join(filename);
    tracing::info!("Saving file to: {}", path.display());

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ClassifierError::SaveFailure(format!("{}: {}", path.display(), e)))?;

    match tokio::fs::try_exists(&path).await {
        Ok(true) => Ok(path),
        Ok(false) => Err(ClassifierError::SaveFailure(format!(
            "{} missing after write",
            path.display()
        ))),
        Err(e) => Err(ClassifierError::SaveFailure(format!("{}: {}", path.display(), e))),
    }
}
