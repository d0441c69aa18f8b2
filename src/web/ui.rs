use crate::classify::PredictionOutcome;
use crate::models::ClassifierMode;
use crate::web::flash::Flash;
use axum::response::Html;

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: #333;
        }
        .container {
            background: white;
            border-radius: 20px;
            padding: 40px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.1);
            max-width: 640px;
            width: 90%;
            text-align: center;
        }
        h1 { color: #5a67d8; margin-bottom: 10px; font-size: 2.2em; }
        .subtitle { color: #666; margin-bottom: 30px; }
        .flash {
            background: #fed7d7;
            color: #9b2c2c;
            border-radius: 10px;
            padding: 12px 16px;
            margin-bottom: 20px;
        }
        .mode { color: #718096; font-size: 0.85em; margin-top: 20px; }
        .upload-area {
            border: 2px dashed #cbd5e0;
            border-radius: 15px;
            padding: 40px 20px;
            margin: 20px 0;
            background: #f8fafc;
            cursor: pointer;
            transition: all 0.3s ease;
        }
        .upload-area:hover, .upload-area.dragover {
            border-color: #5a67d8;
            background: #edf2f7;
        }
        .upload-text { font-size: 1.1em; color: #4a5568; }
        .upload-hint { color: #a0aec0; font-size: 0.9em; margin-top: 8px; }
        #file-input { display: none; }
        #file-info, #preview-image { display: none; }
        #file-info { color: #4a5568; margin-bottom: 10px; }
        .btn:disabled { opacity: 0.5; cursor: not-allowed; }
        .loading-spinner {
            display: none;
            width: 20px;
            height: 20px;
            margin: 0 auto;
            border: 3px solid rgba(255, 255, 255, 0.4);
            border-top-color: white;
            border-radius: 50%;
            animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .btn {
            background: linear-gradient(135deg, #5a67d8, #667eea);
            color: white;
            border: none;
            padding: 15px 30px;
            border-radius: 10px;
            font-size: 1.1em;
            cursor: pointer;
            text-decoration: none;
            display: inline-block;
        }
        .preview { max-width: 256px; max-height: 256px; border-radius: 10px; margin: 20px 0; }
        .prediction { font-size: 2em; color: #2d3748; margin: 10px 0; }
        .confidence { font-size: 1.3em; color: #5a67d8; margin-bottom: 20px; }
        .filename { color: #718096; font-size: 0.9em; }
"#;

/// 上传页脚本：点击/拖拽选择文件、预览、类型与大小检查、提交时的加载状态
const UPLOAD_SCRIPT: &str = r#"
        const fileInput = document.getElementById('file-input');
        const uploadArea = document.getElementById('upload-area');
        const fileInfo = document.getElementById('file-info');
        const fileName = document.getElementById('file-name');
        const fileSize = document.getElementById('file-size');
        const predictBtn = document.getElementById('predict-btn');
        const btnText = predictBtn.querySelector('.btn-text');
        const spinner = predictBtn.querySelector('.loading-spinner');
        const uploadForm = document.getElementById('upload-form');
        const previewPlaceholder = document.getElementById('preview-placeholder');
        const previewImage = document.getElementById('preview-image');

        const allowedTypes = ['image/jpeg', 'image/jpg', 'image/png', 'image/gif'];
        const maxSize = 16 * 1024 * 1024;

        // 点击上传区域
        uploadArea.addEventListener('click', () => {
            fileInput.click();
        });

        // 文件选择
        fileInput.addEventListener('change', () => {
            if (fileInput.files[0]) {
                handleFile(fileInput.files[0]);
            }
        });

        // 拖拽上传
        uploadArea.addEventListener('dragover', (e) => {
            e.preventDefault();
            uploadArea.classList.add('dragover');
        });

        uploadArea.addEventListener('dragleave', (e) => {
            e.preventDefault();
            uploadArea.classList.remove('dragover');
        });

        uploadArea.addEventListener('drop', (e) => {
            e.preventDefault();
            uploadArea.classList.remove('dragover');
            if (e.dataTransfer.files[0]) {
                fileInput.files = e.dataTransfer.files;
                fileInput.dispatchEvent(new Event('change'));
            }
        });

        function handleFile(file) {
            if (!allowedTypes.includes(file.type)) {
                alert('Please upload a valid image file (JPEG, PNG, GIF)');
                resetForm();
                return;
            }

            if (file.size > maxSize) {
                alert('File size too large. Maximum 16MB allowed.');
                resetForm();
                return;
            }

            fileName.textContent = file.name;
            fileSize.textContent = `${(file.size / 1024 / 1024).toFixed(2)} MB`;
            fileInfo.style.display = 'block';
            predictBtn.disabled = false;

            const reader = new FileReader();
            reader.onload = (e) => {
                previewImage.src = e.target.result;
                previewPlaceholder.style.display = 'none';
                previewImage.style.display = 'inline-block';
            };
            reader.readAsDataURL(file);
        }

        function resetForm() {
            fileInput.value = '';
            predictBtn.disabled = true;
            fileInfo.style.display = 'none';
            previewPlaceholder.style.display = 'block';
            previewImage.style.display = 'none';
        }

        uploadForm.addEventListener('submit', (e) => {
            if (!fileInput.files[0]) {
                e.preventDefault();
                alert('Please select an image first');
                return;
            }

            btnText.textContent = 'Classifying...';
            spinner.style.display = 'block';
            predictBtn.disabled = true;
        });
"#;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>"#
    ))
}

/// 上传页面
pub fn render_index(flash: Option<Flash>, mode: ClassifierMode) -> Html<String> {
    let flash_html = flash
        .map(|f| format!(r#"        <div class="flash">{}</div>"#, f.message()))
        .unwrap_or_default();

    let mode_note = match mode {
        ClassifierMode::Model => "Predictions are made by the loaded model.",
        ClassifierMode::Fallback => "No model loaded: demo predictions are derived from the filename.",
    };

    let body = format!(
        r#"        <h1>Image Classifier</h1>
        <p class="subtitle">Upload an image to classify it into one of 10 categories</p>
{flash_html}
        <form id="upload-form" action="/predict" method="post" enctype="multipart/form-data">
            <div class="upload-area" id="upload-area">
                <div id="preview-placeholder">
                    <div class="upload-text">Click or drag an image here</div>
                    <div class="upload-hint">PNG, JPG, JPEG or GIF, up to 16MB</div>
                </div>
                <img class="preview" id="preview-image" alt="Preview">
                <input type="file" id="file-input" name="file" accept=".png,.jpg,.jpeg,.gif">
            </div>
            <div id="file-info"><span id="file-name"></span> (<span id="file-size"></span>)</div>
            <button type="submit" class="btn" id="predict-btn" disabled>
                <span class="btn-text">Classify Image</span>
                <div class="loading-spinner"></div>
            </button>
        </form>
        <p class="mode">{mode_note}</p>
        <script>{UPLOAD_SCRIPT}</script>"#
    );

    page("Image Classifier", &body)
}

/// 结果页面
///
/// 文件名已经过清洗（仅含 `[A-Za-z0-9_.-]`），类别名来自固定表，可以直接嵌入HTML。
pub fn render_result(outcome: &PredictionOutcome) -> Html<String> {
    let body = format!(
        r#"        <h1>Prediction Result</h1>
        <img class="preview" src="/uploads/{filename}" alt="{filename}">
        <p class="filename">{filename}</p>
        <p class="prediction">{class_name}</p>
        <p class="confidence">Confidence: {confidence}</p>
        <a class="btn" href="/">Classify another image</a>"#,
        filename = outcome.filename,
        class_name = outcome.prediction.class_name,
        confidence = outcome.prediction.confidence_percent(),
    );

    page("Prediction Result", &body)
}
