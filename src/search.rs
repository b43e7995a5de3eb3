//! Whole-word article search
//!
//! A field matches a token when splitting the field on single spaces yields a
//! word equal to the token. Title, subtitle and content are checked
//! independently and each matching field contributes one copy of the article
//! to the result, so an article matching in two fields appears twice.
//!
//! Splitting on `' '` keeps empty words: an empty field, a leading or trailing
//! space, or a run of spaces all produce `""`. An empty token matches exactly
//! those fields and nothing else.
//!
//! # Example
//!
//! ```
//! use articles_rs::article::sample;
//! use articles_rs::search::search;
//!
//! let mut article = sample();
//! // The sample title is "Hola!!", so only the content has the word "Hola"
//! assert_eq!(search(&[article.clone()], "Hola").len(), 1);
//!
//! // With "Hola" in the title as well, the article is listed twice
//! article.title = "Hola Mundo".to_string();
//! assert_eq!(search(&[article.clone()], "Hola").len(), 2);
//!
//! // "Hol" is only part of a word
//! assert!(search(&[article], "Hol").is_empty());
//! ```

use crate::article::Article;

/// Whether `token` is one of the space-separated words of `field`
#[must_use]
pub fn contains_word(field: &str, token: &str) -> bool {
    field.split(' ').any(|word| word == token)
}

/// Number of fields of `article` containing `token` as a word
#[must_use]
pub fn match_count(article: &Article, token: &str) -> usize {
    article
        .searchable_fields()
        .into_iter()
        .filter(|field| contains_word(field, token))
        .count()
}

/// Articles containing `token` as a word, once per matching field
///
/// Result order follows `articles`.
#[must_use]
pub fn search(articles: &[Article], token: &str) -> Vec<Article> {
    let mut hits = Vec::new();
    for article in articles {
        for _ in 0..match_count(article, token) {
            hits.push(article.clone());
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::sample;
    use chrono::Utc;

    fn article(title: &str, subtitle: &str, content: &str) -> Article {
        Article {
            id: "t".to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            content: content.to_string(),
            creation: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_contains_word_exact() {
        assert!(contains_word("Hola Amigos!!", "Hola"));
        assert!(contains_word("Hola Amigos!!", "Amigos!!"));
        assert!(!contains_word("Hola Amigos!!", "Amigos"));
        assert!(!contains_word("Hello", "Hel"));
        assert!(!contains_word("hola", "Hola"));
    }

    #[test]
    fn test_contains_word_splits_on_space_only() {
        assert!(!contains_word("one\ttwo", "two"));
        assert!(!contains_word("one\ntwo", "one"));
        assert!(contains_word("one\ttwo three", "three"));
    }

    #[test]
    fn test_empty_token() {
        assert!(contains_word("", ""));
        assert!(contains_word("a  b", ""));
        assert!(contains_word(" a", ""));
        assert!(contains_word("a ", ""));
        assert!(!contains_word("a b", ""));
    }

    #[test]
    fn test_search_sample_matches_content_only() {
        let articles = vec![sample()];
        let hits = search(&articles, "Hola");
        assert_eq!(hits, vec![articles[0].clone()]);
        assert_eq!(search(&articles, "Hola!!").len(), 1);
    }

    #[test]
    fn test_search_duplicates_per_field() {
        let mut seed = sample();
        seed.title = "Hola Mundo".to_string();
        let articles = vec![seed];
        let hits = search(&articles, "Hola");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|a| *a == articles[0]));
    }

    #[test]
    fn test_search_all_three_fields() {
        let articles = vec![article("rust", "rust", "rust")];
        assert_eq!(search(&articles, "rust").len(), 3);
    }

    #[test]
    fn test_search_word_repeated_in_one_field_counts_once() {
        let articles = vec![article("go go go", "", "x")];
        assert_eq!(search(&articles, "go").len(), 1);
    }

    #[test]
    fn test_search_substring_does_not_match() {
        let articles = vec![article("Greeting", "", "Hello")];
        assert!(search(&articles, "Hel").is_empty());
    }

    #[test]
    fn test_search_empty_token_hits_empty_fields() {
        let articles = vec![article("title", "", "")];
        assert_eq!(search(&articles, "").len(), 2);
        let full = vec![article("a", "b", "c")];
        assert!(search(&full, "").is_empty());
    }

    #[test]
    fn test_search_preserves_input_order() {
        let mut first = article("x", "", "y");
        first.id = "1".to_string();
        let mut second = article("x", "y", "z");
        second.id = "2".to_string();
        let hits = search(&[first, second], "x");
        let ids: Vec<&str> = hits.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }
}
