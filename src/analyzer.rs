use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that close a sentence, Latin and Arabic.
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '؟', '?'];

/// A tokenizer receives a stream of characters, breaks it up into individual tokens,
/// and outputs a stream of tokens.
/// Depending on the tokenizer a token is a word ("Quick brown fox!" -> [quick, brown, fox])
/// or a whole sentence.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace runs that directly follow a sentence terminator.
/// The terminator stays with the sentence it closes.
pub struct SentenceTokenizer;

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0usize;
        let mut prev: Option<char> = None;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let after_terminator = prev.is_some_and(|p| SENTENCE_TERMINATORS.contains(&p));
            if c.is_whitespace() && after_terminator {
                sentences.push(text[start..idx].to_string());
                // swallow the rest of the whitespace run
                let mut next_start = text.len();
                while let Some(&(j, w)) = chars.peek() {
                    if w.is_whitespace() {
                        chars.next();
                    } else {
                        next_start = j;
                        break;
                    }
                }
                start = next_start;
                prev = None;
                continue;
            }
            prev = Some(c);
        }

        if start < text.len() {
            sentences.push(text[start..].to_string());
        }
        sentences
    }
}

// Letters, numbers and `_`. Combining marks (harakat, accents written as
// separate code points) are not word characters and split the run.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("word pattern is valid"));

/// Maximal runs of word characters (letters, numbers and `_`).
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
/// For example, a lowercase token filter converts all tokens to lowercase.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

pub struct TrimTokenFilter;

impl TokenFilter for TrimTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                let trimmed = t.term.trim();
                if trimmed.len() != t.term.len() {
                    t.term = trimmed.to_string();
                }
                t
            })
            .collect()
    }
}

/// Drops empty tokens. Positions of the surviving tokens are left untouched.
pub struct EmptyTokenFilter;

impl TokenFilter for EmptyTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens.retain(|t| !t.term.is_empty());
        tokens
    }
}

/// Pure text analysis pipeline: tokenizer followed by token filters.
pub struct TextAnalyzer {
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
    pub pos: usize,
}

impl std::ops::Deref for TextToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

impl TextAnalyzer {
    pub fn new(tokenizer: Box<dyn Tokenizer>, token_filters: Vec<Box<dyn TokenFilter>>) -> Self {
        Self {
            tokenizer,
            token_filters,
        }
    }

    /// Trimmed, non-empty sentences.
    pub fn sentences() -> Self {
        Self::new(
            Box::new(SentenceTokenizer),
            vec![Box::new(TrimTokenFilter), Box::new(EmptyTokenFilter)],
        )
    }

    /// Lowercased word tokens.
    pub fn words() -> Self {
        Self::new(Box::new(WordTokenizer), vec![Box::new(LowerCaseTokenFilter)])
    }

    pub fn tokenize(&self, content: &str) -> Vec<TextToken> {
        self.tokenizer
            .tokenize(content)
            .into_iter()
            .enumerate()
            .map(|(idx, term)| TextToken { term, pos: idx })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content and returns a list of tokens
    pub fn analyze(&self, raw_content: &str) -> Vec<TextToken> {
        let tokens = self.tokenize(raw_content);
        self.token_filter(tokens)
    }
}
