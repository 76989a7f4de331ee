//! Adapter layer: turn Wikipedia summaries into display-ready biographies

use std::sync::LazyLock;

use regex::Regex;

use super::dto;

/// Suffixes tried, in order, after the bare artist name
const TITLE_SUFFIXES: [&str; 3] = [" (band)", " (musician)", " (singer)"];

const MAX_SENTENCES: usize = 3;
const MAX_BIOGRAPHY_LEN: usize = 500;

static PRONUNCIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^(]*?)\s*\([^)]*pronunciation[^)]*\)\s*").expect("valid pronunciation regex")
});
static LISTEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*listen[^)]*\)\s*").expect("valid listen regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Page titles to try for an artist, most specific last
pub fn title_variants(artist_name: &str) -> Vec<String> {
    std::iter::once(artist_name.to_string())
        .chain(
            TITLE_SUFFIXES
                .iter()
                .map(|suffix| format!("{}{}", artist_name, suffix)),
        )
        .collect()
}

/// Disambiguation pages list candidates instead of describing anyone
pub fn is_disambiguation(summary: &dto::SummaryResponse) -> bool {
    summary.page_type == "disambiguation"
        || summary.extract.to_lowercase().contains("may refer to")
}

/// Strip audio and pronunciation artifacts and shorten to a few sentences.
///
/// Keeps at most three sentences, then at most 500 bytes cut on a sentence
/// boundary.
pub fn clean_extract(extract: &str) -> String {
    let cleaned = PRONUNCIATION.replace(extract, "${1} ");
    let cleaned = LISTEN.replace_all(&cleaned, " ");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let mut cleaned = cleaned.trim().to_string();

    let sentences: Vec<&str> = cleaned.split(". ").collect();
    if sentences.len() > MAX_SENTENCES {
        cleaned = format!("{}.", sentences[..MAX_SENTENCES].join(". "));
    }

    if cleaned.len() > MAX_BIOGRAPHY_LEN {
        cleaned = shorten_on_sentence(&cleaned);
    }

    cleaned
}

fn shorten_on_sentence(text: &str) -> String {
    let mut result = String::new();
    for part in text.split(". ") {
        let extra = if result.is_empty() { 0 } else { 2 };
        if result.len() + extra + part.len() + 2 > MAX_BIOGRAPHY_LEN {
            break;
        }
        if !result.is_empty() {
            result.push_str(". ");
        }
        result.push_str(part);
    }

    if result.is_empty() {
        // A single sentence longer than the limit: cut on a word boundary
        let mut end = MAX_BIOGRAPHY_LEN - 3;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let head = &text[..end];
        let head = head.rfind(' ').map_or(head, |space| &head[..space]);
        return format!("{}...", head.trim_end());
    }

    if !result.ends_with('.') {
        result.push('.');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(page_type: &str, extract: &str) -> dto::SummaryResponse {
        dto::SummaryResponse {
            page_type: page_type.to_string(),
            title: "Title".to_string(),
            displaytitle: None,
            extract: extract.to_string(),
            extract_html: None,
        }
    }

    #[test]
    fn test_title_variants_order() {
        assert_eq!(
            title_variants("Nirvana"),
            vec![
                "Nirvana",
                "Nirvana (band)",
                "Nirvana (musician)",
                "Nirvana (singer)"
            ]
        );
    }

    #[test]
    fn test_disambiguation_detection() {
        assert!(is_disambiguation(&summary("disambiguation", "")));
        assert!(is_disambiguation(&summary(
            "standard",
            "Nirvana May Refer To: a band, a concept"
        )));
        assert!(!is_disambiguation(&summary(
            "standard",
            "Nirvana was an American rock band."
        )));
    }

    #[test]
    fn test_removes_pronunciation_and_listen() {
        let extract = "Björk (pronunciation: /bjɜːrk/) Guðmundsdóttir (listen) is an Icelandic   singer.";
        assert_eq!(
            clean_extract(extract),
            "Björk Guðmundsdóttir is an Icelandic singer."
        );
    }

    #[test]
    fn test_keeps_three_sentences() {
        let extract = "One is here. Two is here. Three is here. Four is here. Five.";
        assert_eq!(
            clean_extract(extract),
            "One is here. Two is here. Three is here."
        );
    }

    #[test]
    fn test_short_extract_untouched() {
        assert_eq!(clean_extract("  A band.  "), "A band.");
        assert_eq!(clean_extract(""), "");
    }

    #[test]
    fn test_long_extract_cut_on_sentence_boundary() {
        let first = "a".repeat(300);
        let second = "b".repeat(300);
        let extract = format!("{}. {}. Short.", first, second);

        let cleaned = clean_extract(&extract);

        assert_eq!(cleaned, format!("{}.", first));
        assert!(cleaned.len() <= MAX_BIOGRAPHY_LEN);
    }

    #[test]
    fn test_single_overlong_sentence_cut_on_word() {
        let extract = "word ".repeat(200);

        let cleaned = clean_extract(&extract);

        assert!(cleaned.len() <= MAX_BIOGRAPHY_LEN);
        assert!(cleaned.ends_with("word..."));
    }
}
