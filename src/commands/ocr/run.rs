use urdu_ocr::normalize;

use crate::commands::report::{evaluate_against_references, log_metrics};

use super::*;

/// Everything a run learns about its inputs and pages before scoring.
#[derive(Debug, Default)]
pub struct RecognizedPages {
    pub inputs: Vec<InputEntry>,
    pub pages: Vec<PageRecord>,
    pub cleaned_texts: Vec<String>,
    pub counts: OcrCounts,
}

pub fn run(args: OcrArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("ocr-{}", utc_compact_string(started_ts));

    let kinds = args
        .inputs
        .iter()
        .map(|input| {
            if !input.is_file() {
                bail!("input file does not exist: {}", input.display());
            }
            classify_input(input)
        })
        .collect::<Result<Vec<InputKind>>>()?;

    ensure_ocr_tools(kinds.contains(&InputKind::Pdf))?;
    let tool_versions = collect_tool_versions();
    if !tool_versions.tesseract_languages.is_empty()
        && !tool_versions.tesseract_languages.contains(&args.lang)
    {
        warn!(lang = %args.lang, "tesseract language data not listed as installed");
    }

    let references = read_reference_texts(&args.references)?;

    let output_dir = args.output_dir.clone();
    let pages_dir = run_pages_dir(&output_dir, &run_id);
    ensure_directory(&pages_dir)?;
    let report_path = args.report_path.clone().unwrap_or_else(|| {
        output_dir.join(format!("ocr_run_{}.json", utc_compact_string(started_ts)))
    });

    let stamp = started_ts.timestamp_nanos_opt().unwrap_or_default();
    let work_dir =
        std::env::temp_dir().join(format!("urdu_ocr_{}_{}", std::process::id(), stamp));
    ensure_directory(&work_dir)?;

    info!(
        run_id = %run_id,
        inputs = args.inputs.len(),
        references = references.len(),
        lang = %args.lang,
        "starting ocr run"
    );

    let recognized = recognize_inputs(&args, &kinds, &work_dir, &pages_dir);
    let _ = fs::remove_dir_all(&work_dir);
    let mut recognized = recognized?;
    recognized.counts.reference_count = references.len();

    let mut warnings = Vec::new();
    if recognized.counts.empty_page_count > 0 {
        warnings.push(format!(
            "{} page(s) produced no text after normalization",
            recognized.counts.empty_page_count
        ));
    }

    let metrics = evaluate_against_references(&recognized.cleaned_texts, &references, &mut warnings);
    if let Some(report) = &metrics {
        log_metrics(report);
    }

    let manifest = OcrRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_ocr_command(&args),
        tool_versions,
        settings: settings_for(&args),
        paths: OcrPaths {
            output_dir: output_dir.display().to_string(),
            pages_dir: pages_dir.display().to_string(),
            report_path: report_path.display().to_string(),
        },
        counts: recognized.counts,
        inputs: recognized.inputs,
        pages: recognized.pages,
        metrics,
        warnings,
    };

    write_json_pretty(&report_path, &manifest)?;

    info!(path = %report_path.display(), "wrote ocr run manifest");
    info!(pages = manifest.counts.page_count, "ocr run completed");

    Ok(())
}

fn recognize_inputs(
    args: &OcrArgs,
    kinds: &[InputKind],
    work_dir: &Path,
    pages_dir: &Path,
) -> Result<RecognizedPages> {
    let options = PreprocessOptions::from_args(args);
    let mut recognized = RecognizedPages {
        counts: OcrCounts {
            input_count: args.inputs.len(),
            ..OcrCounts::default()
        },
        ..RecognizedPages::default()
    };

    for (index, (input, kind)) in args.inputs.iter().zip(kinds).enumerate() {
        let sha256 = sha256_file(input)?;
        let sources = acquire_pages(input, *kind, index + 1, args.dpi, work_dir)
            .with_context(|| format!("failed to load pages from {}", input.display()))?;

        info!(input = %input.display(), kind = kind.as_str(), pages = sources.len(), "loaded input");

        for source in &sources {
            let page = recognized.pages.len() + 1;
            let preprocessed_path = work_dir.join(format!("page_{page:03}_pre.png"));

            preprocess_page(&source.image_path, &options, &preprocessed_path)?;
            let raw_text = recognize_page(&preprocessed_path, &args.lang)
                .with_context(|| format!("failed OCR for page {page} of {}", input.display()))?;
            let cleaned = normalize(&raw_text);

            let text_path = page_text_path(pages_dir, page);
            write_text(&text_path, &cleaned)?;

            let record = page_record(page, source, &raw_text, &cleaned, &text_path);
            info!(
                page,
                page_in_file = source.page_in_file,
                raw_chars = record.raw_char_count,
                cleaned_chars = record.cleaned_char_count,
                "recognized page"
            );

            tally_page(&mut recognized.counts, *kind, &cleaned);
            recognized.pages.push(record);
            recognized.cleaned_texts.push(cleaned);
        }

        recognized.inputs.push(InputEntry {
            path: input.display().to_string(),
            kind: kind.as_str().to_string(),
            sha256,
            page_count: sources.len(),
        });
    }

    Ok(recognized)
}

/// Page texts live under a directory per run so earlier manifests keep
/// pointing at their own output.
pub fn run_pages_dir(output_dir: &Path, run_id: &str) -> PathBuf {
    output_dir.join(run_id).join("pages")
}

pub fn page_text_path(pages_dir: &Path, page: usize) -> PathBuf {
    pages_dir.join(format!("page_{page:03}.txt"))
}

pub fn page_record(
    page: usize,
    source: &PageSource,
    raw_text: &str,
    cleaned: &str,
    text_path: &Path,
) -> PageRecord {
    PageRecord {
        page,
        source: source.source.display().to_string(),
        page_in_file: source.page_in_file,
        raw_char_count: raw_text.chars().count(),
        cleaned_char_count: cleaned.chars().count(),
        text_path: text_path.display().to_string(),
    }
}

pub fn tally_page(counts: &mut OcrCounts, kind: InputKind, cleaned: &str) {
    counts.page_count += 1;
    match kind {
        InputKind::Pdf => counts.pdf_page_count += 1,
        InputKind::Image => counts.image_page_count += 1,
    }
    if cleaned.is_empty() {
        counts.empty_page_count += 1;
    }
}
