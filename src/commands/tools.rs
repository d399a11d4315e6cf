use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ToolsArgs;
use crate::commands::ocr::collect_tool_versions;

pub fn run(args: ToolsArgs) -> Result<()> {
    let versions = collect_tool_versions();

    match &versions.tesseract {
        Some(version) => info!(version = %version, "tesseract available"),
        None => warn!("tesseract not found on PATH"),
    }
    match &versions.pdftoppm {
        Some(version) => info!(version = %version, "pdftoppm available"),
        None => warn!("pdftoppm not found on PATH; PDF inputs cannot be rasterized"),
    }

    info!(
        languages = %versions.tesseract_languages.join(","),
        "installed tesseract languages"
    );

    if versions.tesseract.is_some() && !versions.tesseract_languages.contains(&args.lang) {
        warn!(lang = %args.lang, "tesseract language data missing");
    }

    Ok(())
}
