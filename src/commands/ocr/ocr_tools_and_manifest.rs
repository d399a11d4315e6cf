use super::*;

const TESSERACT_OEM: &str = "3";
/// Page segmentation mode 4: a single column of variable-size text.
const TESSERACT_PSM: &str = "4";

pub fn recognize_page(image_path: &Path, lang: &str) -> Result<String> {
    let output = Command::new("tesseract")
        .arg(image_path)
        .arg("stdout")
        .arg("-l")
        .arg(lang)
        .arg("--oem")
        .arg(TESSERACT_OEM)
        .arg("--psm")
        .arg(TESSERACT_PSM)
        .output()
        .with_context(|| format!("failed to execute tesseract for {}", image_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "tesseract returned non-zero exit status for {}: {}",
            image_path.display(),
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).replace('\u{0000}', ""))
}

pub fn command_available(program: &str) -> bool {
    Command::new(program).arg("--version").output().is_ok()
}

pub fn ensure_ocr_tools(needs_pdftoppm: bool) -> Result<()> {
    if !command_available("tesseract") {
        bail!(
            "tesseract is not available on PATH; install Tesseract with the Urdu (urd) language data"
        );
    }
    if needs_pdftoppm && !command_available("pdftoppm") {
        bail!("pdftoppm is not available on PATH; install poppler-utils to process PDF inputs");
    }
    Ok(())
}

pub fn collect_tool_versions() -> ToolVersions {
    ToolVersions {
        tesseract: command_version_optional("tesseract", &["--version"]),
        pdftoppm: command_version_optional("pdftoppm", &["-v"]),
        tesseract_languages: installed_tesseract_languages(),
    }
}

fn installed_tesseract_languages() -> Vec<String> {
    let Ok(output) = Command::new("tesseract").arg("--list-langs").output() else {
        return Vec::new();
    };

    // Older releases print the list on stderr.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stdout.trim().is_empty() {
        parse_language_list(&stderr)
    } else {
        parse_language_list(&stdout)
    }
}

pub fn parse_language_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(|line| line.to_string())
        .collect()
}

fn command_version_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
}

pub fn render_ocr_command(args: &OcrArgs) -> String {
    let mut command = vec!["urdu-ocr".to_string(), "ocr".to_string()];

    for input in &args.inputs {
        command.push(input.display().to_string());
    }
    for reference in &args.references {
        command.push("--reference".to_string());
        command.push(reference.display().to_string());
    }
    command.push("--lang".to_string());
    command.push(args.lang.clone());
    command.push("--dpi".to_string());
    command.push(args.dpi.to_string());
    command.push("--resize-max-dim".to_string());
    command.push(args.resize_max_dim.to_string());
    if args.no_denoise {
        command.push("--no-denoise".to_string());
    }
    if args.no_threshold {
        command.push("--no-threshold".to_string());
    }
    if args.deskew {
        command.push("--deskew".to_string());
    }
    command.push("--output-dir".to_string());
    command.push(args.output_dir.display().to_string());
    if let Some(path) = &args.report_path {
        command.push("--report-path".to_string());
        command.push(path.display().to_string());
    }

    command.join(" ")
}

pub fn settings_for(args: &OcrArgs) -> OcrSettings {
    let options = PreprocessOptions::from_args(args);
    OcrSettings {
        lang: args.lang.clone(),
        dpi: args.dpi,
        resize_max_dim: options.resize_max_dim,
        denoise: options.denoise,
        threshold: options.threshold,
        deskew: options.deskew,
    }
}
