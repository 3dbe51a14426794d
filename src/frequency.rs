use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::normalize::normalize;

/// Отображение "каноническое слово -> частотный балл".
///
/// Балл тем меньше, чем раньше слово впервые встретилось в эталонном списке.
/// Пустое слово никогда не хранится.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    scores: HashMap<String, f64>,
}

impl FrequencyMap {
    /// Балл сырого токена после нормализации; 0 для неизвестных слов.
    pub fn frequency(&self, token: &str) -> f64 {
        self.scores.get(normalize(token)).copied().unwrap_or(0.0)
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.scores.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<'de> Deserialize<'de> for FrequencyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::<String, f64>::deserialize(deserializer).map(|scores| scores.into_iter().collect())
    }
}

impl FromIterator<(String, f64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores: HashMap<String, f64> = iter.into_iter().collect();
        scores.remove("");
        Self { scores }
    }
}

/// Строит частотный словарь по позиции первого вхождения каждого слова.
///
/// Слову на 1-й позиции `i` достаётся балл `i / U`, где `U` — число различных
/// *сырых* токенов. Ключи же нормализованы, поэтому `U` может не совпадать с
/// размером словаря ("word" и "word," дают один ключ, но два различных токена).
/// Такое поведение сохранено намеренно.
pub fn build_frequencies<'a, I>(tokens: I) -> FrequencyMap
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens.into_iter().collect();
    let distinct_raw = tokens.iter().copied().collect::<HashSet<_>>().len();
    if distinct_raw == 0 {
        warn!("эталонный список слов пуст, словарь частот будет пустым");
        return FrequencyMap::default();
    }

    let mut scores: HashMap<String, f64> = HashMap::new();
    for (index, token) in tokens.iter().enumerate() {
        let word = normalize(token);
        if !scores.contains_key(word) {
            scores.insert(word.to_string(), (index + 1) as f64 / distinct_raw as f64);
        }
    }
    scores.remove("");

    debug!(
        tokens = tokens.len(),
        distinct_raw,
        words = scores.len(),
        "словарь частот построен"
    );
    FrequencyMap { scores }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::reference_tokens;

    fn build(text: &str) -> FrequencyMap {
        build_frequencies(reference_tokens(text))
    }

    #[test]
    fn scores_follow_first_occurrence() {
        let map = build("a a b b b c");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("a"), Some(1.0 / 3.0));
        assert_eq!(map.get("b"), Some(3.0 / 3.0));
        assert_eq!(map.get("c"), Some(6.0 / 3.0));
    }

    #[test]
    fn distinct_count_uses_raw_tokens() {
        // "the" и "the," — один ключ, но два различных сырых токена: U = 3.
        let map = build("the the, of");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("the"), Some(1.0 / 3.0));
        assert_eq!(map.get("of"), Some(3.0 / 3.0));
    }

    #[test]
    fn never_stores_empty_word() {
        let map = build("-- ... the !!");
        assert!(!map.contains(""));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("the"), Some(3.0 / 4.0));

        let only_punct = build("! ? ...");
        assert!(only_punct.is_empty());
    }

    #[test]
    fn repeated_spaces_take_no_position() {
        // При делении по одиночному пробелу пустой токен занял бы позицию и вошёл в U (a = 1/3).
        let map = build("a  b");
        assert_eq!(map.get("a"), Some(1.0 / 2.0));
        assert_eq!(map.get("b"), Some(2.0 / 2.0));
    }

    #[test]
    fn tolerates_absent_empty_word() {
        let map = build("one two three");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn empty_reference_yields_empty_map() {
        assert!(build("").is_empty());
        assert!(build("   \n").is_empty());
    }

    #[test]
    fn frequency_normalizes_lookup() {
        let map = build("the of and");
        assert_eq!(map.frequency("\"the,"), 1.0 / 3.0);
        assert_eq!(map.frequency("missing"), 0.0);
        assert_eq!(map.frequency(""), 0.0);
    }

    #[test]
    fn collecting_drops_empty_key() {
        let map: FrequencyMap = vec![("".to_string(), 0.5), ("a".to_string(), 1.0)]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 1);
        assert!(!map.contains(""));
    }
}
