//! Приведение сырых токенов к канонической форме слова.

/// Срезает с обоих концов пробельные символы и ASCII-пунктуацию, сколько бы их ни было.
///
/// Регистр не меняется. Пробелы и пунктуация снимаются вперемешку, поэтому
/// `normalize(normalize(x)) == normalize(x)` для любого `x`.
pub fn normalize(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Делит текст отрывка по одиночным пробелам (пустые токены сохраняются).
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ')
}

/// Токены эталонного списка слов в исходном порядке.
pub fn reference_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_surrounding_punctuation_repeatedly() {
        assert_eq!(normalize("\"Hello,\""), "Hello");
        assert_eq!(normalize("...world!?"), "world");
        assert_eq!(normalize("  (nested)  "), "nested");
    }

    #[test]
    fn keeps_inner_punctuation_and_case() {
        assert_eq!(normalize("don't"), "don't");
        assert_eq!(normalize("Well-known."), "Well-known");
    }

    #[test]
    fn punctuation_only_becomes_empty() {
        assert_eq!(normalize("--"), "");
        assert_eq!(normalize(" ,;: "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "plain", ",\nword", " , a ", "\"quoted\".", "…ellipsis…", "!?", "\tx\t", "ü,",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn split_words_keeps_empty_tokens() {
        let tokens: Vec<_> = split_words("a  b").collect();
        assert_eq!(tokens, vec!["a", "", "b"]);
    }

    #[test]
    fn reference_tokens_ignore_layout() {
        let tokens: Vec<_> = reference_tokens("the  of\nand\tto ").collect();
        assert_eq!(tokens, vec!["the", "of", "and", "to"]);
    }
}
