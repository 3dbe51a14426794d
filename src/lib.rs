//! Нарезка книги на отрывки с оценкой сложности по частотному словарю.

pub mod cache;
pub mod chunker;
pub mod config;
pub mod error;
pub mod frequency;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod scorer;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::frequency::FrequencyMap;
pub use crate::pipeline::{run, RunSummary};
pub use crate::scorer::{Difficulty, DifficultyThresholds, ScoredPassage};
