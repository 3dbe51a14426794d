use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use graded_reader::cache::MalformedCachePolicy;
use graded_reader::chunker::{ChunkPolicy, DEFAULT_TILE_WIDTH, DEFAULT_WORD_LIMIT};
use graded_reader::config::{
    DEFAULT_BOOK_PATH, DEFAULT_CACHE_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_REFERENCE_PATH,
};
use graded_reader::{Config, DifficultyThresholds};

/// CLI: нарезка книги на отрывки с уровнем сложности и ключевыми словами.
#[derive(Parser, Debug)]
#[command(name = "graded-reader", version, about)]
struct Args {
    /// Эталонный список слов через пробел, от частых к редким
    #[arg(long = "reference", default_value = DEFAULT_REFERENCE_PATH)]
    reference_path: PathBuf,

    /// Текст книги (UTF-8)
    #[arg(long = "book", default_value = DEFAULT_BOOK_PATH)]
    book_path: PathBuf,

    /// JSON-кэш словаря частот; если файл есть, словарь не перестраивается
    #[arg(long = "cache", default_value = DEFAULT_CACHE_PATH)]
    cache_path: PathBuf,

    /// Не читать и не писать кэш
    #[arg(long = "no-cache")]
    no_cache: bool,

    /// Куда писать отчёт
    #[arg(long = "output", default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,

    /// Способ нарезки книги
    #[arg(long = "chunking", value_enum, default_value_t = Chunking::Sentences)]
    chunking: Chunking,

    /// Лимит слов в отрывке (для нарезки по предложениям)
    #[arg(long = "word-limit", default_value_t = DEFAULT_WORD_LIMIT)]
    word_limit: usize,

    /// Ширина окна в символах (для нарезки окнами)
    #[arg(long = "tile-width", default_value_t = DEFAULT_TILE_WIDTH)]
    tile_width: usize,

    /// Верхняя граница оценки для уровня Easy
    #[arg(long = "easy-max", default_value_t = DifficultyThresholds::DEFAULT_EASY_MAX)]
    easy_max: f64,

    /// Верхняя граница оценки для уровня Medium
    #[arg(long = "medium-max", default_value_t = DifficultyThresholds::DEFAULT_MEDIUM_MAX)]
    medium_max: f64,

    /// Что делать с повреждённым кэшем
    #[arg(long = "on-bad-cache", value_enum, default_value_t = BadCache::Fail)]
    on_bad_cache: BadCache,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Chunking {
    /// По точкам, с лимитом слов
    Sentences,
    /// Окнами фиксированной ширины
    Tiles,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BadCache {
    Fail,
    Rebuild,
}

impl Args {
    fn into_config(self) -> Config {
        let chunking = match self.chunking {
            Chunking::Sentences => ChunkPolicy::Sentences {
                word_limit: self.word_limit,
            },
            Chunking::Tiles => ChunkPolicy::Tiles {
                width: self.tile_width,
            },
        };
        let on_malformed_cache = match self.on_bad_cache {
            BadCache::Fail => MalformedCachePolicy::Fail,
            BadCache::Rebuild => MalformedCachePolicy::Rebuild,
        };
        Config {
            reference_path: self.reference_path,
            book_path: self.book_path,
            cache_path: (!self.no_cache).then_some(self.cache_path),
            output_path: self.output_path,
            chunking,
            thresholds: DifficultyThresholds {
                easy_max: self.easy_max,
                medium_max: self.medium_max,
            },
            on_malformed_cache,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let config = Args::parse().into_config();

    let summary = graded_reader::run(&config).with_context(|| {
        format!(
            "Не удалось обработать книгу {}",
            config.book_path.display()
        )
    })?;

    // Итог одной строкой — удобно для пайпов
    println!(
        "{} passages: {} easy, {} medium, {} hard (coverage {:.1}%)",
        summary.difficulties.total(),
        summary.difficulties.easy,
        summary.difficulties.medium,
        summary.difficulties.hard,
        summary.mean_coverage
    );

    Ok(())
}
