use gleaner::summarizer::*;

mod test_helpers {
    /// Position of every summary sentence inside the original sentence list.
    pub fn positions(original: &[&str], summary: &str) -> Vec<usize> {
        let mut out = Vec::new();
        let mut rest = summary;
        while !rest.is_empty() {
            let (idx, sentence) = original
                .iter()
                .enumerate()
                .filter(|(_, s)| rest.starts_with(*s))
                .max_by_key(|(_, s)| s.len())
                .unwrap_or_else(|| panic!("summary fragment {rest:?} not found in original"));
            out.push(idx);
            rest = rest[sentence.len()..].trim_start();
        }
        out
    }
}

use test_helpers::*;

#[cfg(test)]
mod short_input {
    use super::*;

    #[test]
    fn test_empty_and_none_yield_empty_string() {
        for k in [0, 1, 5, 10] {
            assert_eq!(summarize(Some(""), k), "");
            assert_eq!(summarize(None, k), "");
        }
    }

    #[test]
    fn test_whitespace_only_yields_empty_string() {
        assert_eq!(summarize(Some("   \n\t "), 5), "");
    }

    #[test]
    fn test_identity_for_five_or_fewer_sentences() {
        let text = "Rust is fast. It is memory safe! Is it fun? Yes. Very much so.";
        assert_eq!(summarize(Some(text), 5), text);
    }

    #[test]
    fn test_short_input_is_rejoined_with_single_spaces() {
        let text = "First sentence.   Second sentence!\n\nThird one?";
        assert_eq!(
            summarize(Some(text), 5),
            "First sentence. Second sentence! Third one?"
        );
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_sentence() {
        let text = "a blob without any sentence terminator at all";
        assert_eq!(summarize(Some(text), 1), text);
    }
}

#[cfg(test)]
mod selection {
    use super::*;

    const SENTENCES: [&str; 8] = [
        "Short one.",
        "This sentence is considerably longer and carries many different words inside it.",
        "Tiny.",
        "Another fairly long sentence that mentions compilers, borrow checking and lifetimes.",
        "Ok!",
        "A medium sized sentence about cargo.",
        "The longest sentence of them all talks about async runtimes, executors, wakers and pinned futures in detail.",
        "Bye?",
    ];

    fn text() -> String {
        SENTENCES.join(" ")
    }

    #[test]
    fn test_returns_exactly_k_sentences() {
        let summary = summarize(Some(&text()), 5);
        assert_eq!(positions(&SENTENCES, &summary).len(), 5);
    }

    #[test]
    fn test_preserves_original_order() {
        let summary = summarize(Some(&text()), 5);
        let pos = positions(&SENTENCES, &summary);
        assert!(
            pos.windows(2).all(|w| w[0] < w[1]),
            "positions not increasing: {pos:?}"
        );
    }

    #[test]
    fn test_picks_highest_scoring_sentences() {
        let summary = summarize(Some(&text()), 3);
        assert_eq!(
            summary,
            [SENTENCES[1], SENTENCES[3], SENTENCES[6]].join(" ")
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        // identical length and vocabulary size, so identical scores
        let text = "Aa bb. Cc dd. Ee ff. Gg hh.";
        assert_eq!(summarize(Some(text), 2), "Aa bb. Cc dd.");
    }

    #[test]
    fn test_duplicate_sentences_use_their_own_position() {
        let text = "Same words here. X. Same words here. Y. Z.";
        assert_eq!(
            summarize(Some(text), 2),
            "Same words here. Same words here."
        );
    }

    #[test]
    fn test_arabic_terminators() {
        let text = "ما هو الصدأ؟ لغة برمجة حديثة وسريعة جدا. نعم. لا. ربما. حسنا.";
        let summary = summarize(Some(text), 5);
        assert!(summary.starts_with("ما هو الصدأ؟ لغة برمجة حديثة وسريعة جدا."));
        assert_eq!(summary.matches(['.', '؟']).count(), 5);
    }

    #[test]
    fn test_summarizer_struct_uses_configured_limit() {
        let summarizer = Summarizer::new(SummarizerConfig {
            max_sentences: 2,
            ..SummarizerConfig::default()
        });
        let summary = summarizer.summarize(Some(&text()));
        assert_eq!(summary, [SENTENCES[3], SENTENCES[6]].join(" "));
    }
}
