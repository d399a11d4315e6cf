use anyhow::{Result, bail};
use tracing::info;

use urdu_ocr::{normalize, score};

use crate::cli::ScoreArgs;
use crate::commands::report::log_metrics;
use crate::model::{MetricsReport, ScorePair, ScoreReport};
use crate::util::{now_utc_string, read_reference_texts, read_text, write_json_pretty};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TextPreparation {
    pub normalize_hypotheses: bool,
    pub normalize_references: bool,
}

impl TextPreparation {
    fn from_args(args: &ScoreArgs) -> Self {
        Self {
            normalize_hypotheses: !args.raw_hypotheses,
            normalize_references: args.normalize_references,
        }
    }
}

pub fn run(args: ScoreArgs) -> Result<()> {
    if args.hypotheses.len() != args.references.len() {
        bail!(
            "hypothesis count ({}) does not match reference count ({})",
            args.hypotheses.len(),
            args.references.len()
        );
    }

    let preparation = TextPreparation::from_args(&args);
    let hypotheses = args
        .hypotheses
        .iter()
        .map(|path| read_text(path))
        .collect::<Result<Vec<String>>>()?;
    let references = read_reference_texts(&args.references)?;
    let (hypotheses, references) = prepare_texts(hypotheses, references, preparation);

    info!(
        pairs = hypotheses.len(),
        normalize_hypotheses = preparation.normalize_hypotheses,
        normalize_references = preparation.normalize_references,
        "scoring text pairs"
    );

    let (pages, overall) = score(&hypotheses, &references);
    let metrics = MetricsReport { pages, overall };
    log_metrics(&metrics);

    if let Some(path) = &args.report_path {
        let report = ScoreReport {
            manifest_version: 1,
            generated_at: now_utc_string(),
            normalize_hypotheses: preparation.normalize_hypotheses,
            normalize_references: preparation.normalize_references,
            pairs: args
                .hypotheses
                .iter()
                .zip(&args.references)
                .enumerate()
                .map(|(index, (hypothesis, reference))| ScorePair {
                    page: index + 1,
                    hypothesis_path: hypothesis.display().to_string(),
                    reference_path: reference.display().to_string(),
                })
                .collect(),
            metrics,
        };
        write_json_pretty(path, &report)?;
        info!(path = %path.display(), "wrote score report");
    }

    Ok(())
}

/// Hypotheses are normalized by default; references stay raw unless asked.
pub fn prepare_texts(
    hypotheses: Vec<String>,
    references: Vec<String>,
    preparation: TextPreparation,
) -> (Vec<String>, Vec<String>) {
    let hypotheses = if preparation.normalize_hypotheses {
        hypotheses.iter().map(|text| normalize(text)).collect()
    } else {
        hypotheses
    };
    let references = if preparation.normalize_references {
        references.iter().map(|text| normalize(text)).collect()
    } else {
        references
    };

    (hypotheses, references)
}
