use serde::Serialize;

use urdu_ocr::{AggregateMetrics, PageMetrics};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolVersions {
    pub tesseract: Option<String>,
    pub pdftoppm: Option<String>,
    pub tesseract_languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrSettings {
    pub lang: String,
    pub dpi: u32,
    pub resize_max_dim: u32,
    pub denoise: bool,
    pub threshold: bool,
    pub deskew: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrPaths {
    pub output_dir: String,
    pub pages_dir: String,
    pub report_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEntry {
    pub path: String,
    pub kind: String,
    pub sha256: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub page: usize,
    pub source: String,
    pub page_in_file: usize,
    pub raw_char_count: usize,
    pub cleaned_char_count: usize,
    pub text_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OcrCounts {
    pub input_count: usize,
    pub page_count: usize,
    pub pdf_page_count: usize,
    pub image_page_count: usize,
    pub empty_page_count: usize,
    pub reference_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub pages: Vec<PageMetrics>,
    pub overall: AggregateMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub settings: OcrSettings,
    pub paths: OcrPaths,
    pub counts: OcrCounts,
    pub inputs: Vec<InputEntry>,
    pub pages: Vec<PageRecord>,
    pub metrics: Option<MetricsReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorePair {
    pub page: usize,
    pub hypothesis_path: String,
    pub reference_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub normalize_hypotheses: bool,
    pub normalize_references: bool,
    pub pairs: Vec<ScorePair>,
    pub metrics: MetricsReport,
}
