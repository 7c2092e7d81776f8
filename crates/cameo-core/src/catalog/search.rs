//! Keyword scoring shared by every catalog lookup.
//!
//! Deliberately simple: lowercase substring containment over tokens longer
//! than two characters. Good enough for spoken queries ("do you have oat
//! milk"), and fully deterministic, which the lookups rely on.

/// Splits a query into lowercase tokens worth matching on.
///
/// Tokens of one or two characters ("a", "of", "to") are dropped; they
/// match everything and carry no signal.
pub fn keyword_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Counts how many tokens appear as substrings of the text.
pub fn score_text(tokens: &[String], text: &str) -> usize {
    let haystack = text.to_lowercase();
    tokens
        .iter()
        .filter(|token| haystack.contains(token.as_str()))
        .count()
}

/// Picks the highest-scoring candidate, keeping the first on ties.
///
/// Returns `None` when every candidate scores zero, so callers can tell
/// "no match" from "matched the first item".
pub fn best_match<T>(
    candidates: impl Iterator<Item = T>,
    score: impl Fn(&T) -> usize,
) -> Option<T> {
    let mut best: Option<(usize, T)> = None;
    for candidate in candidates {
        let candidate_score = score(&candidate);
        if candidate_score == 0 {
            continue;
        }
        match &best {
            Some((best_score, _)) if *best_score >= candidate_score => {}
            _ => best = Some((candidate_score, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_drop_short_words() {
        let tokens = keyword_tokens("Do you have a 2% milk?");
        assert_eq!(tokens, vec!["have", "milk"]);
    }

    #[test]
    fn test_tokens_split_on_punctuation() {
        let tokens = keyword_tokens("on-prem deployment");
        assert_eq!(tokens, vec!["prem", "deployment"]);
    }

    #[test]
    fn test_score_counts_contained_tokens() {
        let tokens = keyword_tokens("fresh bakery bread");
        assert_eq!(score_text(&tokens, "Bakery: fresh oat loaf"), 2);
        assert_eq!(score_text(&tokens, "dairy"), 0);
    }

    #[test]
    fn test_best_match_keeps_first_on_tie() {
        let items = vec!["alpha one", "alpha two"];
        let tokens = keyword_tokens("alpha");
        let hit = best_match(items.iter(), |item| score_text(&tokens, item)).unwrap();
        assert_eq!(*hit, "alpha one");
    }

    #[test]
    fn test_best_match_none_when_all_zero() {
        let items = vec!["alpha", "beta"];
        let tokens = keyword_tokens("gamma");
        assert!(best_match(items.iter(), |item| score_text(&tokens, item)).is_none());
    }
}
