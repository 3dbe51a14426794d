use std::path::PathBuf;

use crate::cache::MalformedCachePolicy;
use crate::chunker::{ChunkPolicy, DEFAULT_WORD_LIMIT};
use crate::error::{Error, Result};
use crate::scorer::DifficultyThresholds;

pub const DEFAULT_REFERENCE_PATH: &str = "final_version_words.txt";
pub const DEFAULT_BOOK_PATH: &str = "book.txt";
pub const DEFAULT_CACHE_PATH: &str = "freq_list";
pub const DEFAULT_OUTPUT_PATH: &str = "final_texts.txt";

/// Параметры одного прогона.
#[derive(Debug, Clone)]
pub struct Config {
    pub reference_path: PathBuf,
    pub book_path: PathBuf,
    /// `None` — кэш не читается и не пишется.
    pub cache_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub chunking: ChunkPolicy,
    pub thresholds: DifficultyThresholds,
    pub on_malformed_cache: MalformedCachePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            book_path: PathBuf::from(DEFAULT_BOOK_PATH),
            cache_path: Some(PathBuf::from(DEFAULT_CACHE_PATH)),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            chunking: ChunkPolicy::Sentences {
                word_limit: DEFAULT_WORD_LIMIT,
            },
            thresholds: DifficultyThresholds::default(),
            on_malformed_cache: MalformedCachePolicy::Fail,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        match self.chunking {
            ChunkPolicy::Sentences { word_limit: 0 } => {
                return Err(Error::InvalidConfig("лимит слов должен быть больше нуля".into()));
            }
            ChunkPolicy::Tiles { width: 0 } => {
                return Err(Error::InvalidConfig("ширина окна должна быть больше нуля".into()));
            }
            _ => {}
        }

        let DifficultyThresholds {
            easy_max,
            medium_max,
        } = self.thresholds;
        if !easy_max.is_finite() || !medium_max.is_finite() {
            return Err(Error::InvalidConfig("пороги сложности должны быть конечными".into()));
        }
        if easy_max < 0.0 || easy_max > medium_max {
            return Err(Error::InvalidConfig(format!(
                "ожидалось 0 <= easy ({easy_max}) <= medium ({medium_max})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_path.as_deref(), Some(std::path::Path::new("freq_list")));
    }

    #[test]
    fn rejects_zero_sizes() {
        let mut config = Config::default();
        config.chunking = ChunkPolicy::Sentences { word_limit: 0 };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        config.chunking = ChunkPolicy::Tiles { width: 0 };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        config.chunking = ChunkPolicy::Tiles {
            width: crate::chunker::DEFAULT_TILE_WIDTH,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = Config::default();
        config.thresholds = DifficultyThresholds {
            easy_max: 0.5,
            medium_max: 0.1,
        };
        assert!(config.validate().is_err());
        config.thresholds.easy_max = f64::NAN;
        assert!(config.validate().is_err());
    }
}
