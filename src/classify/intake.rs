use crate::utils::error::ClassifierError;
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 允许上传的扩展名（不区分大小写）
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex is valid")
});

const WINDOWS_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// 取最后一个 '.' 之后的扩展名并检查
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// 校验上传文件名：非空且扩展名合法
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(ClassifierError::EmptyFilename);
    }

    if !allowed_file(filename) {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default();
        return Err(ClassifierError::InvalidExtension(ext));
    }

    Ok(())
}

/// 清洗文件名，使其可以安全地写入上传目录
///
/// 先做 NFKD 分解（`à` -> `a` + 组合符），再去掉非ASCII字符，
/// 路径分隔符替换为空白，空白折叠为 '_'，
/// 只保留 `[A-Za-z0-9_.-]`，并去掉首尾的 '.' 和 '_'。
/// 结果可能为空字符串，由调用方处理。
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let mut cleaned = stripped.trim_matches(|c| c == '.' || c == '_').to_string();

    if cfg!(windows) && is_windows_device_name(&cleaned) {
        cleaned.insert(0, '_');
    }

    cleaned
}

fn is_windows_device_name(filename: &str) -> bool {
    let stem = filename.split('.').next().unwrap_or_default();
    WINDOWS_DEVICE_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_extensions_are_case_insensitive() {
        for name in ["a.png", "a.JPG", "photo.Jpeg", "anim.GIF", ".png", "x.tar.gif"] {
            assert!(allowed_file(name), "{}", name);
        }
    }

    #[test]
    fn other_extensions_are_rejected() {
        for name in ["file.txt", "png", "image.png.exe", "archive.", "noext", "a.webp"] {
            assert!(!allowed_file(name), "{}", name);
        }
    }

    #[test]
    fn validate_reports_specific_errors() {
        assert!(matches!(validate_filename(""), Err(ClassifierError::EmptyFilename)));
        match validate_filename("file.txt") {
            Err(ClassifierError::InvalidExtension(ext)) => assert_eq!(ext, "txt"),
            other => panic!("expected InvalidExtension, got {:?}", other),
        }
        assert!(validate_filename("whitecat.jpg").is_ok());
    }

    #[test]
    fn sanitizes_paths_and_unsafe_chars() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\windows\\cat.png"), "windows_cat.png");
        assert_eq!(secure_filename("i contain cool \u{00fc}ml\u{00e4}uts.txt"), "i_contain_cool_umlauts.txt");
        assert_eq!(secure_filename("kucing (1).jpg"), "kucing_1.jpg");
    }

    #[test]
    fn accented_letters_keep_their_base_letter() {
        assert_eq!(secure_filename("C\u{00e0}t.jpg"), "Cat.jpg");
        assert_eq!(secure_filename("K\u{00f9}da.jpg"), "Kuda.jpg");
        // 全角字符经兼容分解变为ASCII
        assert_eq!(secure_filename("\u{ff44}og.png"), "dog.png");
    }

    #[test]
    fn well_formed_names_are_unchanged() {
        for name in ["whitecat.jpg", "dog-01.png", "IMG_2024.jpeg"] {
            assert_eq!(secure_filename(name), name);
        }
    }

    #[test]
    fn fully_unsafe_names_sanitize_to_empty() {
        assert_eq!(secure_filename("..."), "");
        assert_eq!(secure_filename("\u{732b}\u{732b}"), "");
    }
}
