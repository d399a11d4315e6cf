use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use image::GrayImage;
use tracing::{debug, info, warn};

use crate::cli::OcrArgs;
use crate::model::{
    InputEntry, OcrCounts, OcrPaths, OcrRunManifest, OcrSettings, PageRecord, ToolVersions,
};
use crate::util::{
    ensure_directory, now_utc_string, read_reference_texts, sha256_file, utc_compact_string,
    write_json_pretty, write_text,
};

mod ocr_tools_and_manifest;
mod page_acquisition;
mod preprocess;
mod run;

pub use ocr_tools_and_manifest::collect_tool_versions;
pub use run::run;

use ocr_tools_and_manifest::*;
use page_acquisition::*;
use preprocess::*;
