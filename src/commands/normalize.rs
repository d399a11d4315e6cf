use anyhow::Result;
use tracing::info;

use crate::cli::NormalizeArgs;
use crate::util::{read_text, write_text};

pub fn run(args: NormalizeArgs) -> Result<()> {
    let raw = read_text(&args.input)?;
    let cleaned = urdu_ocr::normalize(&raw);

    info!(
        input = %args.input.display(),
        raw_chars = raw.chars().count(),
        cleaned_chars = cleaned.chars().count(),
        "normalized text"
    );

    match args.output {
        Some(path) => {
            write_text(&path, &cleaned)?;
            info!(path = %path.display(), "wrote normalized text");
        }
        None => println!("{cleaned}"),
    }

    Ok(())
}
