use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "urdu-ocr",
    version,
    about = "Urdu OCR with text normalization and CER/WER accuracy scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize images or PDFs, normalize the text and optionally score it
    Ocr(OcrArgs),
    /// Normalize a text file into canonical Urdu form
    Normalize(NormalizeArgs),
    /// Score hypothesis text files against reference text files
    Score(ScoreArgs),
    /// Report OCR tool versions and installed Tesseract languages
    Tools(ToolsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OcrArgs {
    /// Image (png, jpg, jpeg, tif, tiff) or PDF files, in page order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Reference text file for one page; repeat in page order
    #[arg(long = "reference")]
    pub references: Vec<PathBuf>,

    /// Tesseract language code
    #[arg(long, default_value = "urd")]
    pub lang: String,

    /// Rasterization DPI for PDF pages
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,

    #[arg(long, default_value_t = 1800)]
    pub resize_max_dim: u32,

    #[arg(long, default_value_t = false)]
    pub no_denoise: bool,

    #[arg(long, default_value_t = false)]
    pub no_threshold: bool,

    #[arg(long, default_value_t = false)]
    pub deskew: bool,

    #[arg(long, default_value = ".cache/urdu-ocr")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text file to normalize, or `-` for stdin
    pub input: PathBuf,

    /// Write the normalized text here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Hypothesis text file; repeat in page order
    #[arg(long = "hypothesis", required = true)]
    pub hypotheses: Vec<PathBuf>,

    /// Reference text file; repeat in page order
    #[arg(long = "reference", required = true)]
    pub references: Vec<PathBuf>,

    /// Score hypotheses as-is instead of normalizing them first
    #[arg(long, default_value_t = false)]
    pub raw_hypotheses: bool,

    /// Normalize references the same way as hypotheses
    #[arg(long, default_value_t = false)]
    pub normalize_references: bool,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ToolsArgs {
    /// Language expected to be installed for Tesseract
    #[arg(long, default_value = "urd")]
    pub lang: String,
}
