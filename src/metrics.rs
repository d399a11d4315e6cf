//! Character and word error rates for OCR output against reference text.
//!
//! Per-page rates divide by the reference length floored at one. The overall
//! rates are micro-averaged: edit counts and reference lengths are summed
//! across pages before dividing, so long pages weigh more than short ones.
//! Rates are not clamped; an insertion-heavy hypothesis yields a rate above
//! 1.0 and a negative accuracy.

use serde::{Deserialize, Serialize};

use crate::distance::edit_distance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub page: usize,
    pub cer: f64,
    pub char_accuracy_pct: f64,
    pub wer: f64,
    pub word_accuracy_pct: f64,
    pub char_errors: usize,
    pub char_ref_len: usize,
    pub word_errors: usize,
    pub word_ref_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub cer: f64,
    pub char_accuracy_pct: f64,
    pub wer: f64,
    pub word_accuracy_pct: f64,
}

#[derive(Debug, Default)]
struct ErrorTotals {
    char_ref: usize,
    char_errors: usize,
    word_ref: usize,
    word_errors: usize,
}

/// Score cleaned hypotheses against references, pairing them by position.
///
/// Pairs are formed by zipping, so surplus entries on either side are ignored.
/// Keeping both sequences the same length is the caller's job.
pub fn score<H, R>(hypotheses: &[H], references: &[R]) -> (Vec<PageMetrics>, AggregateMetrics)
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let mut pages = Vec::with_capacity(hypotheses.len().min(references.len()));
    let mut totals = ErrorTotals::default();

    for (index, (hypothesis, reference)) in hypotheses.iter().zip(references).enumerate() {
        let page = score_page(index + 1, hypothesis.as_ref(), reference.as_ref());

        totals.char_ref += page.char_ref_len;
        totals.char_errors += page.char_errors;
        totals.word_ref += page.word_ref_len;
        totals.word_errors += page.word_errors;

        pages.push(page);
    }

    (pages, totals.aggregate())
}

/// Score a single hypothesis/reference pair as page `page`.
pub fn score_page(page: usize, hypothesis: &str, reference: &str) -> PageMetrics {
    let hyp_chars = hypothesis.chars().collect::<Vec<char>>();
    let ref_chars = reference.chars().collect::<Vec<char>>();
    let char_errors = edit_distance(&hyp_chars, &ref_chars);
    let char_ref_len = ref_chars.len().max(1);
    let cer = char_errors as f64 / char_ref_len as f64;

    let hyp_words = hypothesis.split_whitespace().collect::<Vec<&str>>();
    let ref_words = reference.split_whitespace().collect::<Vec<&str>>();
    let word_errors = edit_distance(&hyp_words, &ref_words);
    let word_ref_len = ref_words.len().max(1);
    let wer = word_errors as f64 / word_ref_len as f64;

    PageMetrics {
        page,
        cer,
        char_accuracy_pct: accuracy_pct(cer),
        wer,
        word_accuracy_pct: accuracy_pct(wer),
        char_errors,
        char_ref_len,
        word_errors,
        word_ref_len,
    }
}

impl ErrorTotals {
    fn aggregate(&self) -> AggregateMetrics {
        let cer = ratio(self.char_errors, self.char_ref);
        let wer = ratio(self.word_errors, self.word_ref);

        AggregateMetrics {
            cer,
            char_accuracy_pct: accuracy_pct(cer),
            wer,
            word_accuracy_pct: accuracy_pct(wer),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// `(1 - rate) * 100`, rounded to two decimals with ties to even.
/// Negative when `rate > 1`.
pub fn accuracy_pct(rate: f64) -> f64 {
    round2((1.0 - rate) * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn empty_input_gives_perfect_overall_scores() {
        let hypotheses: [&str; 0] = [];
        let references: [&str; 0] = [];

        let (pages, overall) = score(&hypotheses, &references);

        assert!(pages.is_empty());
        assert_eq!(
            overall,
            AggregateMetrics {
                cer: 0.0,
                char_accuracy_pct: 100.0,
                wer: 0.0,
                word_accuracy_pct: 100.0,
            }
        );
    }

    #[test]
    fn exact_match_scores_perfectly() {
        let (pages, overall) = score(&["سلام"], &["سلام"]);

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.page, 1);
        assert_eq!(page.cer, 0.0);
        assert_eq!(page.char_accuracy_pct, 100.0);
        assert_eq!(page.wer, 0.0);
        assert_eq!(page.word_accuracy_pct, 100.0);
        assert_eq!(overall.char_accuracy_pct, 100.0);
    }

    #[test]
    fn single_deletion_costs_one_character() {
        let (pages, _) = score(&["سلا"], &["سلام"]);
        let page = &pages[0];

        assert_eq!(page.char_errors, 1);
        assert_eq!(page.char_ref_len, 4);
        assert!(approx_eq(page.cer, 0.25));
        assert_eq!(page.char_accuracy_pct, 75.0);
        assert_eq!(page.word_errors, 1);
        assert_eq!(page.wer, 1.0);
        assert_eq!(page.word_accuracy_pct, 0.0);
    }

    #[test]
    fn overall_rate_is_micro_averaged() {
        let hypotheses = ["سلا", "ایک دو تی"];
        let references = ["سلام", "ایک دو تین"];

        let (pages, overall) = score(&hypotheses, &references);

        assert_eq!(pages[0].char_errors, 1);
        assert_eq!(pages[0].char_ref_len, 4);
        assert!(approx_eq(pages[0].cer, 0.25));
        assert_eq!(pages[1].char_errors, 1);
        assert_eq!(pages[1].char_ref_len, 10);
        assert!(approx_eq(pages[1].cer, 0.1));

        assert!(approx_eq(overall.cer, 2.0 / 14.0));
        assert!(!approx_eq(overall.cer, (0.25 + 0.1) / 2.0));
        assert_eq!(overall.char_accuracy_pct, 85.71);

        // Word totals: one error of one word, one error of three words.
        assert!(approx_eq(overall.wer, 2.0 / 4.0));
        assert_eq!(overall.word_accuracy_pct, 50.0);
    }

    #[test]
    fn insertion_heavy_hypothesis_is_not_clamped() {
        let (pages, overall) = score(&["ایک دو تین چار پانچ"], &["ایک"]);
        let page = &pages[0];

        assert!(page.cer > 1.0);
        assert!(page.char_accuracy_pct < 0.0);
        assert_eq!(page.word_errors, 4);
        assert_eq!(page.wer, 4.0);
        assert_eq!(page.word_accuracy_pct, -300.0);
        assert_eq!(overall.wer, 4.0);
        assert_eq!(overall.word_accuracy_pct, -300.0);
    }

    #[test]
    fn empty_reference_uses_length_floor() {
        let (pages, overall) = score(&["اب"], &[""]);
        let page = &pages[0];

        assert_eq!(page.char_ref_len, 1);
        assert_eq!(page.char_errors, 2);
        assert_eq!(page.cer, 2.0);
        assert_eq!(page.char_accuracy_pct, -100.0);
        assert_eq!(page.word_ref_len, 1);
        assert_eq!(page.wer, 1.0);
        assert_eq!(overall.cer, 2.0);

        let (pages, _) = score(&[""], &[""]);
        assert_eq!(pages[0].cer, 0.0);
        assert_eq!(pages[0].char_accuracy_pct, 100.0);
    }

    #[test]
    fn mismatched_lengths_are_truncated_to_shorter() {
        let (pages, _) = score(&["ایک", "دو", "تین"], &["ایک", "دو"]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page, 2);

        let (pages, _) = score(&["ایک"], &["ایک", "دو"]);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn references_are_compared_without_normalization() {
        // Tatweel in the reference is an ordinary character to the scorer.
        let (pages, _) = score(&["سلام"], &["ســلام"]);
        assert_eq!(pages[0].char_errors, 2);
    }

    #[test]
    fn accuracy_rounds_to_two_decimals() {
        assert_eq!(accuracy_pct(1.0 / 3.0), 66.67);
        assert_eq!(accuracy_pct(0.0), 100.0);
        assert_eq!(accuracy_pct(2.0 / 14.0), 85.71);
    }

    #[test]
    fn accuracy_ties_round_to_even() {
        let hypothesis = format!("{}{}", "ب".repeat(29), "پ".repeat(3));
        let reference = "ب".repeat(32);

        let (pages, overall) = score(&[hypothesis], &[reference]);
        let page = &pages[0];

        assert_eq!(page.char_errors, 3);
        assert_eq!(page.cer, 0.09375);
        assert_eq!(page.char_accuracy_pct, 90.62);
        assert_eq!(overall.char_accuracy_pct, 90.62);
    }

    #[test]
    fn metrics_serialize_with_snake_case_fields() {
        let (pages, overall) = score(&["سلام"], &["سلام"]);
        let page = serde_json::to_value(&pages[0]).expect("page metrics serialize");
        let overall = serde_json::to_value(&overall).expect("overall metrics serialize");

        assert_eq!(page["page"], 1);
        assert_eq!(page["char_accuracy_pct"], 100.0);
        assert_eq!(overall["word_accuracy_pct"], 100.0);
        assert!(overall.get("cer").is_some());
    }
}
