//! Canonicalization of raw OCR output into restricted Urdu-script text.
//!
//! [`normalize`] is total: every input, including the empty string, maps to a
//! defined output. The allow-list and the compiled patterns are immutable
//! statics built on first use.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

const TATWEEL: char = '\u{0640}';
const ALEF: char = '\u{0627}';
const URDU_QUESTION_MARK: char = '\u{061F}';

/// Arabic, Arabic Supplement, Arabic Extended-A and both presentation-form blocks.
pub const URDU_ALLOWED_RANGES: &str =
    r"\x{0600}-\x{06FF}\x{0750}-\x{077F}\x{08A0}-\x{08FF}\x{FB50}-\x{FDFF}\x{FE70}-\x{FEFF}";

/// Digits, whitespace and the punctuation kept in cleaned text.
pub const ALLOWED_ADDITIONAL: &str = r"0-9۰-۹\s.,؟!\-:؛()/\x{066B}\x{066C}";

/// Marks that never take leading whitespace and always take one trailing space.
const SPACED_PUNCTUATION: &str = r".,؟!:؛)\]";

static DISALLOWED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[^{URDU_ALLOWED_RANGES}{ALLOWED_ADDITIONAL}]+"))
        .expect("allow-list pattern is valid")
});

static HORIZONTAL_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("space pattern is valid"));

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s+([{SPACED_PUNCTUATION}])"))
        .expect("leading punctuation pattern is valid")
});

static SPACE_AFTER_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"([{SPACED_PUNCTUATION}])\s*(\S)"))
        .expect("trailing punctuation pattern is valid")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

/// Normalize recognized text into canonical Urdu form.
///
/// The steps run in a fixed order; reordering them changes the output.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = normalize_characters(raw);
    let text = strip_control_characters(&text);
    let text = DISALLOWED_RUN.replace_all(&text, " ");
    let text = HORIZONTAL_SPACE_RUN.replace_all(&text, " ");
    let text = fix_punctuation_spacing(&text);
    let text = trim_line_ends(&text);
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");

    text.trim().to_string()
}

/// NFC composition followed by the one-to-one and one-to-zero substitutions.
fn normalize_characters(raw: &str) -> String {
    raw.nfc()
        .filter_map(|character| match character {
            TATWEEL => None,
            '\u{0622}' | '\u{0623}' | '\u{0625}' => Some(ALEF),
            '?' => Some(URDU_QUESTION_MARK),
            '\u{2013}' | '\u{2014}' | '\u{2015}' => Some('-'),
            other => Some(other),
        })
        .collect()
}

fn strip_control_characters(text: &str) -> String {
    text.chars()
        .filter(|character| *character == '\n' || !character.is_control())
        .collect()
}

fn fix_punctuation_spacing(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1");
    SPACE_AFTER_PUNCTUATION
        .replace_all(&text, "$1 $2")
        .into_owned()
}

fn trim_line_ends(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn removes_tatweel() {
        let cleaned = normalize("ســـلام");
        assert!(!cleaned.contains(TATWEEL));
        assert_eq!(cleaned, "سلام");
    }

    #[test]
    fn maps_ascii_question_mark_to_urdu() {
        let cleaned = normalize("کیا؟ ok?");
        assert!(!cleaned.contains('?'));
        assert_eq!(cleaned, "کیا؟ ؟");

        let cleaned = normalize("Hello?");
        assert!(cleaned.contains('؟'));
        assert!(!cleaned.contains('?'));
    }

    #[test]
    fn folds_alef_variants_to_plain_alef() {
        assert_eq!(normalize("آ أ إ"), "ا ا ا");
    }

    #[test]
    fn composes_before_folding_alef_madda() {
        // Alef followed by combining madda composes to U+0622, then folds.
        assert_eq!(normalize("\u{0627}\u{0653}ب"), "اب");
    }

    #[test]
    fn normalizes_dashes_to_hyphen() {
        assert_eq!(normalize("سال\u{2013}نو\u{2014}دن\u{2015}رات"), "سال-نو-دن-رات");
    }

    #[test]
    fn strips_control_characters_but_keeps_newlines() {
        assert_eq!(normalize("ایک\u{0007}دو\nتین"), "ایکدو\nتین");
        assert_eq!(normalize("ایک\tدو\r\nتین"), "ایکدو\nتین");
    }

    #[test]
    fn replaces_disallowed_runs_with_single_space() {
        assert_eq!(normalize("اردو abc def زبان"), "اردو زبان");
        assert_eq!(normalize("اردو#@زبان"), "اردو زبان");
    }

    #[test]
    fn keeps_digits_and_separators() {
        assert_eq!(normalize("۱۲۳ 456 ۳٫۵ ۱٬۰۰۰"), "۱۲۳ 456 ۳٫۵ ۱٬۰۰۰");
        assert_eq!(normalize("(ب/ج)"), "(ب/ج)");
    }

    #[test]
    fn removes_space_before_punctuation() {
        assert_eq!(normalize("سلام , دنیا !"), "سلام, دنیا!");
        assert_eq!(normalize("کیوں ؟"), "کیوں؟");
        // The Arabic comma is not one of the spaced marks.
        assert_eq!(normalize("سلام ، دنیا"), "سلام ، دنیا");
    }

    #[test]
    fn inserts_space_after_punctuation() {
        assert_eq!(normalize("سلام,دنیا"), "سلام, دنیا");
        assert_eq!(normalize("سلام،دنیا"), "سلام،دنیا");
        assert_eq!(normalize("جملہ۔اگلا"), "جملہ۔اگلا");
        assert_eq!(normalize("ایک:دو؛تین"), "ایک: دو؛ تین");
    }

    #[test]
    fn punctuation_followed_by_newline_joins_with_single_space() {
        assert_eq!(normalize("پہلا.\nدوسرا"), "پہلا. دوسرا");
    }

    #[test]
    fn collapses_horizontal_whitespace() {
        assert_eq!(normalize("ایک     دو"), "ایک دو");
    }

    #[test]
    fn trims_lines_and_collapses_blank_runs() {
        assert_eq!(normalize("  ایک   \n\n\n\n  دو  "), "ایک\n\n دو");
        assert_eq!(normalize("ایک \nدو"), "ایک\nدو");
    }

    #[test]
    fn fully_disallowed_input_becomes_empty() {
        assert_eq!(normalize("Hello World"), "");
        assert_eq!(normalize("\u{0001}\u{0002}"), "");
    }

    #[test]
    fn output_satisfies_cleaned_text_invariants() {
        let cleaned = normalize("  ــاردو   abc\t\t زبان ?  \n\n\n\n(متن)  ۔ \r\n  ");

        assert!(cleaned.chars().all(|character| character == '\n' || !character.is_control()));
        assert!(!cleaned.contains("  "));
        assert!(!cleaned.contains("\n\n\n"));
        assert!(cleaned.lines().all(|line| line == line.trim_end()));
        assert_eq!(cleaned, cleaned.trim());
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "",
            "سلام",
            "ســـلام  دنیا ?",
            "اردو abc def زبان",
            "سلام ، دنیا !کیسے ہو",
            "a..b ،، ))",
            "  ایک   \n\n\n\n  دو  ",
            "پہلا.\nدوسرا\t!\u{0007}",
            "۱۲۳ 456 ۳٫۵ – ۱٬۰۰۰",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
