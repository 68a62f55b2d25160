//! Paragraph layout for generated summaries.

/// Sentences grouped into one paragraph.
pub const SENTENCES_PER_PARAGRAPH: usize = 3;

/// Split `text` at sentence boundaries: `.`, `?` or `!`, then a whitespace
/// run, then an ASCII uppercase letter. The whitespace run is dropped.
///
/// Abbreviations are not special-cased, so "Dr. Smith" splits after "Dr.".
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '?' | '!') {
            continue;
        }
        let end = idx + ch.len_utf8();

        // Consume the whitespace run, if any, and look at what follows it.
        let mut saw_space = false;
        while let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                saw_space = true;
                chars.next();
            } else {
                break;
            }
        }

        if let Some(&(next_idx, next)) = chars.peek() {
            if saw_space && next.is_ascii_uppercase() {
                sentences.push(&text[start..end]);
                start = next_idx;
            }
        }
    }

    sentences.push(&text[start..]);
    sentences
}

/// Lay out a summary as paragraphs of up to three sentences, separated by a
/// blank line. Whitespace-only input gives an empty string.
pub fn format_paragraphs(summary: &str) -> String {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    split_sentences(trimmed)
        .chunks(SENTENCES_PER_PARAGRAPH)
        .map(|group| group.join(" "))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Sentence number {i} is here."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn word_count(s: &str) -> usize {
        s.split_whitespace().count()
    }

    #[test]
    fn empty_and_blank_input_give_empty_output() {
        assert_eq!(format_paragraphs(""), "");
        assert_eq!(format_paragraphs("   \n\t "), "");
    }

    #[test]
    fn up_to_three_sentences_is_one_paragraph() {
        for n in 1..=3 {
            let out = format_paragraphs(&sentences(n));
            assert!(!out.contains("\n\n"), "n={n}: {out:?}");
            assert_eq!(out, sentences(n));
        }
    }

    #[test]
    fn nine_sentences_make_three_paragraphs() {
        let out = format_paragraphs(&sentences(9));
        assert_eq!(out.split("\n\n").count(), 3);
    }

    #[test]
    fn paragraph_count_is_ceiling_of_sentences_over_three() {
        for n in 1..=13 {
            let out = format_paragraphs(&sentences(n));
            assert_eq!(out.split("\n\n").count(), n.div_ceil(3), "n={n}");
        }
    }

    #[test]
    fn word_count_is_preserved() {
        let input = sentences(7);
        let out = format_paragraphs(&input);
        assert_eq!(word_count(&out.replace("\n\n", " ")), word_count(&input));
    }

    #[test]
    fn groups_are_joined_in_order() {
        let out = format_paragraphs("One. Two! Three? Four. Five.");
        assert_eq!(out, "One. Two! Three?\n\nFour. Five.");
    }

    #[test]
    fn lowercase_after_period_is_not_a_boundary() {
        let parts = split_sentences("Version 2. then more text. Next one.");
        assert_eq!(parts, vec!["Version 2. then more text.", "Next one."]);
    }

    #[test]
    fn punctuation_without_whitespace_is_not_a_boundary() {
        let parts = split_sentences("See example.Com for details. Then go.");
        assert_eq!(parts, vec!["See example.Com for details.", "Then go."]);
    }

    #[test]
    fn whitespace_run_between_sentences_is_collapsed() {
        let out = format_paragraphs("First one.\n\n   Second one.");
        assert_eq!(out, "First one. Second one.");
    }

    #[test]
    fn abbreviations_split_like_any_other_boundary() {
        let parts = split_sentences("We met Dr. Smith today. He was kind.");
        assert_eq!(parts, vec!["We met Dr.", "Smith today.", "He was kind."]);
    }

    #[test]
    fn trailing_punctuation_keeps_last_sentence_whole() {
        let parts = split_sentences("Only one sentence.");
        assert_eq!(parts, vec!["Only one sentence."]);
    }
}
