use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::cache::{load_or_build, CacheOutcome, FrequencyStore, JsonFileStore, MemoryStore};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::{write_report_file, DifficultySummary};
use crate::scorer::categorize;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub cache: CacheOutcome,
    pub vocabulary: usize,
    pub difficulties: DifficultySummary,
    /// Среднее покрытие отрывков словарём, в процентах.
    pub mean_coverage: f64,
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

/// Словарь (из кэша или заново) -> нарезка книги -> оценка -> отчёт.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    require_file(&config.reference_path)?;
    require_file(&config.book_path)?;

    let start = Instant::now();
    let store: Box<dyn FrequencyStore> = match &config.cache_path {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let (frequencies, cache) = load_or_build(store.as_ref(), config.on_malformed_cache, || {
        read_text(&config.reference_path)
    })?;
    info!(
        words = frequencies.len(),
        ?cache,
        "словарь частот готов за {} мс",
        start.elapsed().as_millis()
    );

    let book = read_text(&config.book_path)?;
    let passages = categorize(&book, config.chunking, &frequencies, &config.thresholds)?;
    write_report_file(&config.output_path, &passages)?;

    let difficulties = DifficultySummary::from_passages(&passages);
    let mean_coverage = if passages.is_empty() {
        0.0
    } else {
        passages.iter().map(|p| p.coverage).sum::<f64>() / passages.len() as f64
    };
    info!(
        passages = difficulties.total(),
        easy = difficulties.easy,
        medium = difficulties.medium,
        hard = difficulties.hard,
        "отчёт записан в {}",
        config.output_path.display()
    );

    Ok(RunSummary {
        cache,
        vocabulary: frequencies.len(),
        difficulties,
        mean_coverage,
    })
}
