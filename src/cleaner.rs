use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid bracket pattern"));
static FILLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:uh|um|erm|ah|like)\b").expect("valid filler pattern"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word pattern"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strips annotations, fillers and stutters, then flattens the text into one
/// capitalized paragraph. Pass order matters.
pub fn clean_transcript_text(text: &str) -> String {
    let text = BRACKETED_RE.replace_all(text, "");
    let text = FILLER_RE.replace_all(&text, "");
    let text = collapse_adjacent_duplicates(&text);
    let text = text.replace('\n', " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    capitalize_first(text.trim())
}

/// Reduces each run of the same word, separated only by whitespace, to its
/// first occurrence. Comparison ignores case.
fn collapse_adjacent_duplicates(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    // End offset and lowercased form of the word kept last.
    let mut last_kept: Option<(usize, String)> = None;

    for word in WORD_RE.find_iter(text) {
        let lowered = word.as_str().to_lowercase();

        let is_repeat = match &last_kept {
            Some((kept_end, kept_word)) => {
                let gap = &text[*kept_end..word.start()];
                !gap.is_empty() && gap.chars().all(char::is_whitespace) && *kept_word == lowered
            }
            None => false,
        };

        // A repeat drops its leading gap along with the word itself.
        if !is_repeat {
            out.push_str(&text[cursor..word.end()]);
        }
        cursor = word.end();
        last_kept = Some((word.end(), lowered));
    }

    out.push_str(&text[cursor..]);
    out
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_bracketed_annotations() {
        assert_eq!(clean_transcript_text("[Music] hello"), "Hello");
        assert_eq!(
            clean_transcript_text("so [Applause] we [laughs] begin"),
            "So we begin"
        );
    }

    #[test]
    fn test_bracket_removal_is_non_greedy() {
        assert_eq!(clean_transcript_text("[a] keep this [b]"), "Keep this");
    }

    #[test]
    fn test_removes_filler_words() {
        assert_eq!(
            clean_transcript_text("um so uh I was, Like, thinking"),
            "So I was, , thinking"
        );
    }

    #[test]
    fn test_filler_words_need_word_boundaries() {
        assert_eq!(
            clean_transcript_text("the drum likely ahead"),
            "The drum likely ahead"
        );
    }

    #[test]
    fn test_collapses_adjacent_duplicates() {
        assert_eq!(clean_transcript_text("the the cat cat"), "The cat");
        assert_eq!(clean_transcript_text("I I I think"), "I think");
        assert_eq!(clean_transcript_text("The the end"), "The end");
    }

    #[test]
    fn test_keeps_non_adjacent_duplicates() {
        assert_eq!(clean_transcript_text("the cat the"), "The cat the");
    }

    #[test]
    fn test_duplicates_across_removed_filler_collapse() {
        assert_eq!(clean_transcript_text("we um we should"), "We should");
    }

    #[test]
    fn test_duplicate_match_is_whole_word() {
        assert_eq!(clean_transcript_text("the theory"), "The theory");
        assert_eq!(clean_transcript_text("cat, cat"), "Cat, cat");
    }

    #[test]
    fn test_merges_lines_and_whitespace() {
        assert_eq!(
            clean_transcript_text("  first line\nsecond   line\n\nthird  "),
            "First line second line third"
        );
    }

    #[test]
    fn test_timestamped_lines_lose_their_prefix() {
        let text = "[00:00:00] hello there\n[00:00:02] general kenobi";
        assert_eq!(clean_transcript_text(text), "Hello there general kenobi");
    }

    #[test]
    fn test_only_first_character_changes_case() {
        assert_eq!(clean_transcript_text("éclair and NASA"), "Éclair and NASA");
    }

    #[test]
    fn test_empty_when_only_noise() {
        assert_eq!(clean_transcript_text("[Music]\num uh\n[Applause]"), "");
        assert_eq!(clean_transcript_text(""), "");
    }

    #[test]
    fn test_bracket_spanning_newline_survives_first_pass() {
        // Brackets are stripped before lines are merged, so an annotation
        // broken across lines only disappears on a second pass.
        let once = clean_transcript_text("a [b\nc] d");
        assert_eq!(once, "A [b c] d");
        assert_eq!(clean_transcript_text(&once), "A d");
    }

    /// Holds for text without bracketed annotations split across lines.
    #[test]
    fn test_idempotent_on_clean_text() {
        let inputs = [
            "[Music] so um the the plan is is simple",
            "Hello world",
            "we we\nwe like to to test",
            "the cat the",
        ];
        for input in inputs {
            let once = clean_transcript_text(input);
            assert_eq!(clean_transcript_text(&once), once, "input: {input:?}");
        }
    }
}
