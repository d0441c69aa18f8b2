use crate::utils::error::ClassifierError;
use crate::Result;
use std::path::PathBuf;

/// 签名密钥最小长度（字节）
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// 最大请求体大小：16 MiB
pub const MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器绑定地址
    pub bind_addr: String,

    /// 上传文件保存目录
    pub upload_dir: PathBuf,

    /// 模型文件路径
    pub model_path: PathBuf,

    /// 模型缺失时是否直接退出（否则进入关键词回退模式）
    pub require_model: bool,

    /// flash cookie签名密钥（为空时每个进程随机生成）
    pub secret_key: Option<String>,

    /// 工作线程数量
    pub workers: usize,

    /// 开发模式
    pub dev_mode: bool,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,

    /// 服务器配置
    pub server_config: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,

    /// 优化级别
    pub optimization_level: i32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 请求超时时间（秒）
    pub request_timeout: u64,

    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

impl Config {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bind_addr: String,
        upload_dir: String,
        model_path: String,
        workers: Option<usize>,
        dev_mode: bool,
        require_model: bool,
        secret_key: Option<String>,
    ) -> Result<Self> {
        if let Some(ref key) = secret_key {
            if key.len() < MIN_SECRET_KEY_LEN {
                return Err(ClassifierError::Config(format!(
                    "Secret key must be at least {} bytes, got {}",
                    MIN_SECRET_KEY_LEN,
                    key.len()
                )));
            }
        }

        let cpu_cores = num_cpus::get();
        let workers = workers.unwrap_or(cpu_cores).max(1);

        let onnx_config = OnnxConfig {
            intra_threads: (cpu_cores * 3 / 4).max(1), // 使用75%的CPU核心
            optimization_level: 3,
        };

        let server_config = ServerConfig {
            request_timeout: if dev_mode { 300 } else { 60 },
            max_request_size: MAX_UPLOAD_SIZE,
        };

        Ok(Self {
            bind_addr,
            upload_dir: PathBuf::from(upload_dir),
            model_path: PathBuf::from(model_path),
            require_model,
            secret_key,
            workers,
            dev_mode,
            onnx_config,
            server_config,
        })
    }

    /// 确保上传目录存在
    pub fn ensure_upload_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.upload_dir).map_err(|e| {
            ClassifierError::Config(format!(
                "Failed to create upload directory {}: {}",
                self.upload_dir.display(),
                e
            ))
        })
    }
}
