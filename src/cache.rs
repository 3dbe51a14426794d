use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::frequency::{build_frequencies, FrequencyMap};
use crate::normalize::reference_tokens;

/// Хранилище готового словаря частот между запусками.
pub trait FrequencyStore {
    /// `Ok(None)` — кэша нет.
    fn load(&self) -> Result<Option<FrequencyMap>>;
    fn save(&self, map: &FrequencyMap) -> Result<()>;
}

/// JSON-объект `{"слово": балл, ...}` в одном файле.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrequencyStore for JsonFileStore {
    fn load(&self) -> Result<Option<FrequencyMap>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let map = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            Error::MalformedCache {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(map))
    }

    fn save(&self, map: &FrequencyMap) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        // Пишем во временный файл рядом и атомарно подменяем.
        let temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, map).map_err(|e| Error::io(&self.path, e.into()))?;
            writer.flush().map_err(|e| Error::io(&self.path, e))?;
        }
        temp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        Ok(())
    }
}

/// Хранилище в памяти, для тестов и прогонов без диска.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<Option<FrequencyMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(map: FrequencyMap) -> Self {
        Self {
            map: RefCell::new(Some(map)),
        }
    }

    pub fn stored(&self) -> Option<FrequencyMap> {
        self.map.borrow().clone()
    }
}

impl FrequencyStore for MemoryStore {
    fn load(&self) -> Result<Option<FrequencyMap>> {
        Ok(self.map.borrow().clone())
    }

    fn save(&self, map: &FrequencyMap) -> Result<()> {
        *self.map.borrow_mut() = Some(map.clone());
        Ok(())
    }
}

/// Что делать, если кэш есть, но не читается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedCachePolicy {
    #[default]
    Fail,
    Rebuild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

/// Берёт словарь из кэша или строит его по эталонному списку и сохраняет.
///
/// Эталонный текст запрашивается только при промахе. Устаревший кэш не
/// распознаётся: если он читается, ему верят.
pub fn load_or_build<S, F>(
    store: &S,
    policy: MalformedCachePolicy,
    reference: F,
) -> Result<(FrequencyMap, CacheOutcome)>
where
    S: FrequencyStore + ?Sized,
    F: FnOnce() -> Result<String>,
{
    match store.load() {
        Ok(Some(map)) => {
            info!(words = map.len(), "словарь частот загружен из кэша");
            return Ok((map, CacheOutcome::Hit));
        }
        Ok(None) => info!("кэш частот не найден, строим словарь"),
        Err(err @ Error::MalformedCache { .. }) => match policy {
            MalformedCachePolicy::Fail => return Err(err),
            MalformedCachePolicy::Rebuild => warn!("{err}; словарь будет перестроен"),
        },
        Err(err) => return Err(err),
    }

    let text = reference()?;
    let map = build_frequencies(reference_tokens(&text));
    store.save(&map)?;
    info!(words = map.len(), "словарь частот построен и сохранён");
    Ok((map, CacheOutcome::Miss))
}
