use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "PaddlePaddle/PaddleOCR-VL-1.5";
pub const DEFAULT_API_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";
pub const DEFAULT_PROMPT: &str =
    "Recognize all text in this image and transcribe it exactly as written.";

#[derive(Parser, Debug)]
#[command(name = "silicon-ocr", version)]
#[command(about = "Recognize text in images via SiliconFlow's hosted PaddleOCR-VL model")]
pub struct Cli {
    /// Image paths or glob patterns (e.g. scan.png, pages/*.jpg)
    #[arg(required = true)]
    pub images: Vec<String>,

    /// API key (default: SILICONFLOW_API_KEY environment variable)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Remote model identifier
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Recognition prompt sent alongside each image
    #[arg(short = 'p', long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Emit results as a single JSON object instead of delimited text
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Write formatted output to a file instead of standard output
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Maximum response tokens per image
    #[arg(long, default_value_t = 300)]
    pub max_tokens: u32,

    /// Chat-completions endpoint URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds (one attempt per image, no retries)
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
