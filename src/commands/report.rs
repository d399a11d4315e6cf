use tracing::{info, warn};

use urdu_ocr::score;

use crate::model::MetricsReport;

/// Score cleaned page texts when a matching set of references is available.
///
/// A reference count that differs from the page count skips scoring with a
/// warning, leaving the pairing decision to the user.
pub fn evaluate_against_references(
    cleaned_texts: &[String],
    references: &[String],
    warnings: &mut Vec<String>,
) -> Option<MetricsReport> {
    if references.is_empty() {
        return None;
    }

    if references.len() != cleaned_texts.len() {
        let message = format!(
            "reference count ({}) does not match page count ({}); accuracy metrics skipped",
            references.len(),
            cleaned_texts.len()
        );
        warn!(
            references = references.len(),
            pages = cleaned_texts.len(),
            "reference count does not match page count"
        );
        warnings.push(message);
        return None;
    }

    let (pages, overall) = score(cleaned_texts, references);
    Some(MetricsReport { pages, overall })
}

pub fn log_metrics(report: &MetricsReport) {
    for page in &report.pages {
        info!(
            page = page.page,
            cer = page.cer,
            char_accuracy_pct = page.char_accuracy_pct,
            wer = page.wer,
            word_accuracy_pct = page.word_accuracy_pct,
            "page accuracy"
        );
    }

    info!(
        pages = report.pages.len(),
        cer = report.overall.cer,
        char_accuracy_pct = report.overall.char_accuracy_pct,
        wer = report.overall.wer,
        word_accuracy_pct = report.overall.word_accuracy_pct,
        "overall accuracy"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_references_means_no_metrics() {
        let mut warnings = Vec::new();
        let report = evaluate_against_references(&texts(&["سلام"]), &[], &mut warnings);

        assert!(report.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn mismatched_reference_count_warns_and_skips() {
        let mut warnings = Vec::new();
        let report = evaluate_against_references(
            &texts(&["ایک", "دو"]),
            &texts(&["ایک"]),
            &mut warnings,
        );

        assert!(report.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("reference count (1) does not match page count (2)"));
    }

    #[test]
    fn matching_references_produce_page_and_overall_metrics() {
        let mut warnings = Vec::new();
        let report = evaluate_against_references(
            &texts(&["سلا", "ایک دو تی"]),
            &texts(&["سلام", "ایک دو تین"]),
            &mut warnings,
        )
        .expect("metrics should be computed");

        assert!(warnings.is_empty());
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].char_accuracy_pct, 75.0);
        assert_eq!(report.overall.char_accuracy_pct, 85.71);
    }
}
