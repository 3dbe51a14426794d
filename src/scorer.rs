use std::collections::{BTreeSet, HashSet};
use std::fmt;

use tracing::debug;

use crate::chunker::{get_texts, ChunkPolicy};
use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::normalize::{normalize, split_words};

pub const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Верхние границы (включительно) для Easy и Medium.
///
/// Значения по умолчанию подобраны под конкретный эталонный список слов;
/// для другого списка их нужно перекалибровать.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyThresholds {
    pub easy_max: f64,
    pub medium_max: f64,
}

impl DifficultyThresholds {
    pub const DEFAULT_EASY_MAX: f64 = 0.000055;
    pub const DEFAULT_MEDIUM_MAX: f64 = 0.000099;

    pub fn classify(&self, score: f64) -> Difficulty {
        if score <= self.easy_max {
            Difficulty::Easy
        } else if score <= self.medium_max {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self {
            easy_max: Self::DEFAULT_EASY_MAX,
            medium_max: Self::DEFAULT_MEDIUM_MAX,
        }
    }
}

/// Отрывок с оценкой; после создания не меняется.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    pub text: String,
    pub complexity: f64,
    pub difficulty: Difficulty,
    pub keywords: Vec<String>,
    pub coverage: f64,
}

/// Сумма ненулевых баллов, делённая на `|словарь| - пропущенные`.
///
/// Токены берутся делением по одиночным пробелам; токен, которого нет в
/// словаре (в том числе пустой), считается пропущенным. Если знаменатель
/// равен нулю, возвращается [`Error::ZeroDenominator`]. Когда пропущенных
/// больше размера словаря, знаменатель отрицателен и оценка тоже.
pub fn complexity(text: &str, frequencies: &FrequencyMap) -> Result<f64> {
    let mut missing = 0usize;
    let mut sum = 0.0f64;
    for word in split_words(text) {
        let freq = frequencies.frequency(word);
        if freq != 0.0 {
            sum += freq;
        } else {
            missing += 1;
        }
    }

    let mapping_len = frequencies.len();
    if mapping_len == missing {
        return Err(Error::ZeroDenominator {
            mapping_len,
            missing,
        });
    }
    Ok(sum / (mapping_len as f64 - missing as f64))
}

pub fn difficulty(score: f64, thresholds: &DifficultyThresholds) -> Difficulty {
    thresholds.classify(score)
}

/// До пяти самых "редких" слов отрывка.
///
/// Слова сравниваются в канонической форме, пустое слово не попадает в
/// выдачу. Сортировка по убыванию балла, при равенстве по алфавиту.
pub fn keywords(text: &str, frequencies: &FrequencyMap) -> Vec<String> {
    let words: BTreeSet<&str> = split_words(text)
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect();

    let mut ranked: Vec<(&str, f64)> = words
        .into_iter()
        .map(|w| (w, frequencies.get(w).unwrap_or(0.0)))
        .collect();
    // BTreeSet уже отсортирован по алфавиту, стабильная сортировка это сохранит.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(w, _)| w.to_string())
        .collect()
}

/// Доля (в процентах) различных сырых токенов с ненулевым баллом.
pub fn coverage(text: &str, frequencies: &FrequencyMap) -> f64 {
    let words: HashSet<&str> = split_words(text).collect();
    let known = words
        .iter()
        .filter(|w| frequencies.frequency(w) != 0.0)
        .count();
    known as f64 / words.len() as f64 * 100.0
}

pub fn score_passage(
    text: String,
    frequencies: &FrequencyMap,
    thresholds: &DifficultyThresholds,
) -> Result<ScoredPassage> {
    let complexity = complexity(&text, frequencies)?;
    let difficulty = difficulty(complexity, thresholds);
    let keywords = keywords(&text, frequencies);
    let coverage = coverage(&text, frequencies);
    Ok(ScoredPassage {
        text,
        complexity,
        difficulty,
        keywords,
        coverage,
    })
}

/// Нарезает книгу и оценивает каждый отрывок по порядку.
pub fn categorize(
    book: &str,
    policy: ChunkPolicy,
    frequencies: &FrequencyMap,
    thresholds: &DifficultyThresholds,
) -> Result<Vec<ScoredPassage>> {
    let chunks = get_texts(book, policy);
    debug!(passages = chunks.len(), ?policy, "книга нарезана");

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let scored = score_passage(text, frequencies, thresholds)?;
            debug!(
                index,
                complexity = scored.complexity,
                coverage = scored.coverage,
                difficulty = %scored.difficulty,
                "отрывок оценён"
            );
            Ok(scored)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::build_frequencies;

    fn map(words: &str) -> FrequencyMap {
        build_frequencies(words.split_whitespace())
    }

    #[test]
    fn difficulty_bands_include_boundaries() {
        let t = DifficultyThresholds::default();
        assert_eq!(difficulty(0.0, &t), Difficulty::Easy);
        assert_eq!(difficulty(0.000055, &t), Difficulty::Easy);
        assert_eq!(difficulty(0.0000551, &t), Difficulty::Medium);
        assert_eq!(difficulty(0.000099, &t), Difficulty::Medium);
        assert_eq!(difficulty(0.0000991, &t), Difficulty::Hard);
        assert_eq!(difficulty(1.0, &t), Difficulty::Hard);
    }

    #[test]
    fn difficulty_is_monotonic() {
        let t = DifficultyThresholds::default();
        let mut previous = Difficulty::Easy;
        for step in 0..400 {
            let current = difficulty(step as f64 * 0.0000005, &t);
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, Difficulty::Hard);
    }

    #[test]
    fn complexity_excludes_missing_from_denominator() {
        // a=0.25, b=0.5, c=0.75, d=1.0
        let freqs = map("a b c d");
        let score = complexity("a, b zzz", &freqs).unwrap();
        assert_eq!(score, (0.25 + 0.5) / (4.0 - 1.0));
    }

    #[test]
    fn complexity_counts_empty_tokens_as_missing() {
        let freqs = map("a b c d");
        let score = complexity("a  b", &freqs).unwrap();
        assert_eq!(score, 0.75 / 3.0);
    }

    #[test]
    fn zero_denominator_is_an_error() {
        let freqs = map("a b");
        let err = complexity("x y", &freqs).unwrap_err();
        assert!(matches!(
            err,
            Error::ZeroDenominator {
                mapping_len: 2,
                missing: 2
            }
        ));
        assert!(complexity("", &FrequencyMap::default()).is_ok());
    }

    #[test]
    fn keywords_rank_rarest_first_with_alphabetical_ties() {
        let freqs = map("the of and to in is was");
        let kws = keywords("the was, is in. to unknown and zebra", &freqs);
        assert_eq!(kws, vec!["was", "is", "in", "to", "and"]);
    }

    #[test]
    fn keywords_are_distinct_and_bounded() {
        let freqs = map("a b c");
        let kws = keywords("c c, \"c\" b b a zz yy xx", &freqs);
        assert_eq!(kws, vec!["c", "b", "a", "xx", "yy"]);

        let few = keywords("a a a", &freqs);
        assert_eq!(few, vec!["a"]);
        assert!(keywords(" ,, ", &freqs).is_empty());
    }

    #[test]
    fn keywords_follow_non_increasing_frequency() {
        let freqs = map("one two three four five six seven eight");
        let kws = keywords("eight two six one four seven", &freqs);
        assert!(kws.len() <= MAX_KEYWORDS);
        let scores: Vec<f64> = kws.iter().map(|w| freqs.frequency(w)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn coverage_counts_distinct_raw_tokens() {
        let freqs = map("a b");
        assert_eq!(coverage("a a b c", &freqs), 2.0 / 3.0 * 100.0);
        assert_eq!(coverage("zz", &freqs), 0.0);
    }

    #[test]
    fn categorize_scores_each_passage() {
        let freqs = map("hello world this is a test");
        let scored = categorize(
            "Hello world. This is a test.",
            ChunkPolicy::default(),
            &freqs,
            &DifficultyThresholds::default(),
        )
        .unwrap();
        assert_eq!(scored.len(), 1);
        let passage = &scored[0];
        assert_eq!(passage.text, "Hello world. This is a test.");
        assert_eq!(passage.difficulty, Difficulty::Hard);
        assert!(passage.keywords.len() <= MAX_KEYWORDS);
    }
}
