use super::*;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputKind {
    Pdf,
    Image,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
        }
    }
}

/// One page image, located by its input file and position within that file.
#[derive(Debug, Clone)]
pub struct PageSource {
    pub source: PathBuf,
    pub page_in_file: usize,
    pub image_path: PathBuf,
}

pub fn classify_input(path: &Path) -> Result<InputKind> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if extension == "pdf" {
        return Ok(InputKind::Pdf);
    }
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(InputKind::Image);
    }

    bail!(
        "unsupported input format for {}: expected a PDF or one of {}",
        path.display(),
        IMAGE_EXTENSIONS.join(", ")
    )
}

pub fn acquire_pages(
    input: &Path,
    kind: InputKind,
    input_index: usize,
    dpi: u32,
    work_dir: &Path,
) -> Result<Vec<PageSource>> {
    let images = match kind {
        InputKind::Image => vec![input.to_path_buf()],
        InputKind::Pdf => rasterize_pdf(input, dpi, work_dir, &format!("input_{input_index:03}"))?,
    };

    Ok(images
        .into_iter()
        .enumerate()
        .map(|(index, image_path)| PageSource {
            source: input.to_path_buf(),
            page_in_file: index + 1,
            image_path,
        })
        .collect())
}

fn rasterize_pdf(pdf_path: &Path, dpi: u32, work_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let output_root = work_dir.join(prefix);

    let output = Command::new("pdftoppm")
        .arg("-r")
        .arg(dpi.to_string())
        .arg("-png")
        .arg(pdf_path)
        .arg(&output_root)
        .output()
        .with_context(|| format!("failed to execute pdftoppm for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "failed to convert PDF to images ({}): {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let pages = collect_rendered_pages(work_dir, prefix)?;
    if pages.is_empty() {
        bail!(
            "pdftoppm did not produce any page images for {}",
            pdf_path.display()
        );
    }

    debug!(pdf = %pdf_path.display(), pages = pages.len(), "rasterized pdf");
    Ok(pages)
}

/// pdftoppm names pages `<prefix>-<n>.png` with `n` zero-padded to a common
/// width, so a lexical sort restores page order.
pub fn collect_rendered_pages(work_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let page_prefix = format!("{prefix}-");
    let mut pages = Vec::new();

    let entries = fs::read_dir(work_dir)
        .with_context(|| format!("failed to read {}", work_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", work_dir.display()))?;
        let path = entry.path();

        let is_page = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(&page_prefix) && name.ends_with(".png"))
            .unwrap_or(false);

        if is_page {
            pages.push(path);
        }
    }

    pages.sort();
    Ok(pages)
}
