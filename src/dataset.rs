use serde::Serialize;
use strum::{Display, EnumIter};

/// A single learnable unit. The id is stable across sessions and unique within a catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    #[serde(flatten)]
    pub entry: Entry,
}

/// Per-kind payload. The Georgian side is the source text, Russian the target text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Letter {
        georgian: String,
        russian: String,
        pronunciation_note: Option<String>,
    },
    Word {
        georgian: String,
        russian: String,
        transliteration: String,
    },
    Phrase {
        georgian: String,
        russian: String,
        /// Georgian words in reading order, punctuation stripped.
        tokens: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Letter,
    Word,
    Phrase,
}

/// Characters ignored when comparing assembled phrases.
pub(crate) const PHRASE_PUNCTUATION: [char; 4] = ['?', '.', '!', ','];

pub(crate) fn phrase_tokens(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(|word| word.trim_matches(&PHRASE_PUNCTUATION[..]))
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

impl Item {
    pub fn letter(id: &str, georgian: &str, russian: &str, note: Option<&str>) -> Self {
        Self {
            id: id.to_owned(),
            entry: Entry::Letter {
                georgian: georgian.to_owned(),
                russian: russian.to_owned(),
                pronunciation_note: note.map(str::to_owned),
            },
        }
    }

    pub fn word(id: &str, georgian: &str, russian: &str, transliteration: &str) -> Self {
        Self {
            id: id.to_owned(),
            entry: Entry::Word {
                georgian: georgian.to_owned(),
                russian: russian.to_owned(),
                transliteration: transliteration.to_owned(),
            },
        }
    }

    pub fn phrase(id: &str, georgian: &str, russian: &str) -> Self {
        Self {
            id: id.to_owned(),
            entry: Entry::Phrase {
                georgian: georgian.to_owned(),
                russian: russian.to_owned(),
                tokens: phrase_tokens(georgian),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ItemKind {
        match self.entry {
            Entry::Letter { .. } => ItemKind::Letter,
            Entry::Word { .. } => ItemKind::Word,
            Entry::Phrase { .. } => ItemKind::Phrase,
        }
    }

    /// Georgian text.
    pub fn source_text(&self) -> &str {
        match &self.entry {
            Entry::Letter { georgian, .. }
            | Entry::Word { georgian, .. }
            | Entry::Phrase { georgian, .. } => georgian,
        }
    }

    /// Russian text.
    pub fn target_text(&self) -> &str {
        match &self.entry {
            Entry::Letter { russian, .. }
            | Entry::Word { russian, .. }
            | Entry::Phrase { russian, .. } => russian,
        }
    }

    pub fn transliteration(&self) -> Option<&str> {
        match &self.entry {
            Entry::Word {
                transliteration, ..
            } => Some(transliteration),
            _ => None,
        }
    }

    pub fn pronunciation_note(&self) -> Option<&str> {
        match &self.entry {
            Entry::Letter {
                pronunciation_note, ..
            } => pronunciation_note.as_deref(),
            _ => None,
        }
    }

    /// Constituent words of a phrase; empty for letters and words.
    pub fn tokens(&self) -> &[String] {
        match &self.entry {
            Entry::Phrase { tokens, .. } => tokens,
            _ => &[],
        }
    }
}
