use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("файл не найден: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("ошибка ввода-вывода для {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("кэш частот {} повреждён: {source}", path.display())]
    MalformedCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Знаменатель сложности обнулился: все слова словаря "пропущены".
    #[error("деление на ноль при оценке сложности (словарь: {mapping_len}, пропущено: {missing})")]
    ZeroDenominator { mapping_len: usize, missing: usize },

    #[error("некорректная конфигурация: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::MissingFile { path }
        } else {
            Error::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
