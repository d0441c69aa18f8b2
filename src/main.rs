use anyhow::Result;
use clap::Parser;
use onnx_classifier::{config::Config, web::serve};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "onnx-classifier")]
#[command(about = "ONNX-powered image classification web service")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0:5000")]
    bind: String,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory uploaded images are saved to
    #[arg(long, default_value = "static/uploads")]
    upload_dir: String,

    /// ONNX model path
    #[arg(long, default_value = "models/model.onnx")]
    model_path: String,

    /// Exit if the model cannot be loaded instead of using the filename fallback
    #[arg(long)]
    require_model: bool,

    /// Secret used to sign flash cookies (at least 32 bytes)
    #[arg(long, env = "CLASSIFIER_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting ONNX image classifier...");
    tracing::info!("Bind address: {}", args.bind);
    tracing::info!("Upload directory: {}", args.upload_dir);
    tracing::info!("Model path: {}", args.model_path);

    // 创建配置
    let config = Config::new(
        args.bind,
        args.upload_dir,
        args.model_path,
        args.workers,
        args.dev,
        args.require_model,
        args.secret_key,
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?;

    // 启动服务器
    runtime.block_on(serve(config))?;

    Ok(())
}
