use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::scorer::{Difficulty, ScoredPassage};

const SEPARATOR: &str =
    "--------------------------------------------------------------------------";

/// Пишет отрывки в текстовом виде: уровень, ключевые слова, текст, разделитель.
pub fn write_report<W: Write>(mut out: W, passages: &[ScoredPassage]) -> io::Result<()> {
    for passage in passages {
        writeln!(out, "{} level.", passage.difficulty)?;
        writeln!(out, "Keywords: {}", passage.keywords.join(", "))?;
        writeln!(out, "{}", passage.text)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    out.flush()
}

pub fn write_report_file(path: &Path, passages: &[ScoredPassage]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_report(BufWriter::new(file), passages).map_err(|e| Error::io(path, e))
}

/// Сколько отрывков попало в каждый уровень.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultySummary {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultySummary {
    pub fn from_passages(passages: &[ScoredPassage]) -> Self {
        let mut summary = Self::default();
        for passage in passages {
            match passage.difficulty {
                Difficulty::Easy => summary.easy += 1,
                Difficulty::Medium => summary.medium += 1,
                Difficulty::Hard => summary.hard += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}
