//! Key-term extraction for routing prompts
//!
//! Routing works better on the content words of a prompt than on the
//! prompt itself: "How do I keep my printed parts from warping?" carries the
//! same signal as "print part warp". This module lowercases and tokenizes
//! text, drops English stop words and punctuation, and reduces each
//! remaining word to a rule-based lemma.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const MIN_LEMMA_LEN: usize = 3;

// English stop words as spaCy defines them. The apostrophe fragments at the
// end stand in for its contraction tokens (`'s`, `n't`, `'ll`), since
// `tokenize` splits "don't" into "don" and "t".
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
        "are", "around", "as", "at", "be", "became", "because", "become", "becomes", "been",
        "before", "behind", "being", "below", "beside", "besides", "between", "beyond",
        "both", "but", "by", "ca", "can", "cannot", "could", "did", "do", "does", "doing",
        "done", "down", "due", "during", "each", "either", "else", "elsewhere", "enough",
        "even", "ever", "every", "everyone", "everything", "everywhere", "few", "for",
        "from", "further", "get", "give", "go", "had", "has", "have", "he", "hence", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
        "in", "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last",
        "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine",
        "more", "moreover", "most", "mostly", "much", "must", "my", "myself", "namely",
        "neither", "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
        "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
        "over", "own", "per", "perhaps", "please", "put", "quite", "rather", "re", "really",
        "regarding", "same", "say", "see", "seem", "seemed", "seeming", "seems", "several",
        "she", "should", "show", "since", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "take", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "thence", "there",
        "thereafter", "thereby", "therefore", "therein", "these", "they", "this", "those",
        "though", "through", "throughout", "thus", "to", "together", "too", "toward",
        "towards", "under", "unless", "until", "up", "upon", "us", "used", "using",
        "various", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whenever", "where", "whereas", "wherever", "whether", "which", "while", "who",
        "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves", "s", "t", "ll",
        "ve", "d", "m", "don", "doesn", "didn", "isn", "aren", "wasn", "weren", "won",
    ]
    .into_iter()
    .collect()
});

/// Split text into lowercase word tokens.
///
/// Anything that is not alphanumeric separates tokens, so punctuation never
/// survives and `e-learning` or `UI/UX` split into their parts.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undo consonant doubling (`running` -> `runn` -> `run`) and restore the
/// silent `e` on short consonant-vowel-consonant stems (`cod` -> `code`).
fn repair_stem(mut stem: String) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let len = chars.len();

    if len >= 2 {
        let last = chars[len - 1];
        if last == chars[len - 2] && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
            stem.pop();
            return stem;
        }
    }

    if len == MIN_LEMMA_LEN
        && !is_vowel(chars[0])
        && is_vowel(chars[1])
        && !is_vowel(chars[2])
        && !matches!(chars[2], 'w' | 'x' | 'y')
    {
        stem.push('e');
    }

    stem
}

/// Reduce a lowercase token to a rule-based lemma.
///
/// Covers regular plurals and the `-ing` / `-ed` verb forms, which is what
/// matters when comparing prompts against persona descriptions. Tokens are
/// never shortened below three characters.
pub fn lemmatize(token: &str) -> String {
    let len = token.chars().count();
    if len <= MIN_LEMMA_LEN || !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = token.strip_suffix("ied") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }

    if token.ends_with("sses") {
        return token[..token.len() - 2].to_string();
    }

    for suffix in ["ches", "shes", "xes", "zes"] {
        if token.ends_with(suffix) {
            return token[..token.len() - 2].to_string();
        }
    }

    if let Some(stem) = token.strip_suffix("ing") {
        if stem.len() >= MIN_LEMMA_LEN && stem.chars().any(is_vowel) {
            return repair_stem(stem.to_string());
        }
        return token.to_string();
    }

    // need, speed, feed
    if token.ends_with("eed") {
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ed") {
        if stem.len() >= MIN_LEMMA_LEN && stem.chars().any(is_vowel) && !stem.ends_with('e') {
            return repair_stem(stem.to_string());
        }
        if let Some(stem) = token.strip_suffix('d') {
            if stem.len() >= MIN_LEMMA_LEN {
                return stem.to_string();
            }
        }
        return token.to_string();
    }

    if token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }

    token.to_string()
}

/// Content words of `text`: lemmas of every token that is neither a stop
/// word nor a lone letter, in original order.
pub fn key_terms(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .filter(|token| token.chars().count() > 1 || token.chars().all(|c| c.is_numeric()))
        .map(|token| lemmatize(&token))
        .collect()
}

/// Space-joined key terms; empty when the prompt has no content words.
pub fn extract_key_terms(text: &str) -> String {
    key_terms(text).join(" ")
}
