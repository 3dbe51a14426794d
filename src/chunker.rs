//! Нарезка книги на отрывки.

pub const DEFAULT_WORD_LIMIT: usize = 130;
pub const DEFAULT_TILE_WIDTH: usize = 970;

pub const SENTENCE_DELIMITER: char = '.';
pub const CONTINUATION_MARKER: &str = "...";

/// Способ нарезки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Жадно набирает фрагменты между точками, пока в отрывке не больше `word_limit` слов.
    Sentences { word_limit: usize },
    /// Окна по `width` символов с многоточиями на стыках.
    Tiles { width: usize },
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        ChunkPolicy::Sentences {
            word_limit: DEFAULT_WORD_LIMIT,
        }
    }
}

pub fn get_texts(book: &str, policy: ChunkPolicy) -> Vec<String> {
    match policy {
        ChunkPolicy::Sentences { word_limit } => chunk_sentences(book, word_limit),
        ChunkPolicy::Tiles { width } => chunk_tiles(book, width),
    }
}

/// Делит текст по точкам и собирает фрагменты в отрывки.
///
/// Перед добавлением фрагмента считается число слов уже набранного буфера
/// (фрагменты через точку, деление по одиночным пробелам). Если оно не больше
/// `word_limit`, фрагмент дописывается, иначе буфер закрывается с точкой в
/// конце и начинается новый. Последний фрагмент всегда дописывается в текущий
/// буфер, который тут же закрывается без добавочной точки. Длинный фрагмент
/// никогда не режется.
///
/// Склейка всех отрывков даёт исходный текст.
pub fn chunk_sentences(book: &str, word_limit: usize) -> Vec<String> {
    let fragments: Vec<&str> = book.split(SENTENCE_DELIMITER).collect();
    let last = fragments.len() - 1;
    let delimiter = SENTENCE_DELIMITER.to_string();

    let mut texts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (i, fragment) in fragments.into_iter().enumerate() {
        if i == last {
            current.push(fragment);
            texts.push(current.join(&delimiter));
            break;
        }

        let words = current.join(&delimiter).split(' ').count();
        if words <= word_limit {
            current.push(fragment);
        } else {
            let mut text = current.join(&delimiter);
            text.push(SENTENCE_DELIMITER);
            texts.push(text);
            current = vec![fragment];
        }
    }
    texts
}

/// Режет текст на окна по `width` символов без перекрытия.
///
/// Все окна, кроме первого, начинаются с `...`; все окна заканчиваются `...`.
/// Пустой текст даёт пустой список.
pub fn chunk_tiles(book: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = book.chars().collect();
    chars
        .chunks(width)
        .enumerate()
        .map(|(i, window)| {
            let mut text = String::with_capacity(window.len() + 2 * CONTINUATION_MARKER.len());
            if i > 0 {
                text.push_str(CONTINUATION_MARKER);
            }
            text.extend(window);
            text.push_str(CONTINUATION_MARKER);
            text
        })
        .collect()
}
