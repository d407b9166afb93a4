//! Localization tables and text handles as they appear in raw data.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hash key into a language's text map.
pub type TextHash = u64;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cht,
    Cn,
    De,
    #[default]
    En,
    Es,
    Fr,
    Id,
    Jp,
    Kr,
    Pt,
    Ru,
    Th,
    Vi,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Self::Cht,
        Self::Cn,
        Self::De,
        Self::En,
        Self::Es,
        Self::Fr,
        Self::Id,
        Self::Jp,
        Self::Kr,
        Self::Pt,
        Self::Ru,
        Self::Th,
        Self::Vi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cht => "cht",
            Self::Cn => "cn",
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Id => "id",
            Self::Jp => "jp",
            Self::Kr => "kr",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Th => "th",
            Self::Vi => "vi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lowered)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Reference to localized text in a raw record.
///
/// In data: a bare number is a plain text-map hash, `{ "dynamic": <hash> }` is a
/// template that takes positional parameters, and an object keyed by language
/// code is an inline per-language mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextHandle {
    Hash(TextHash),
    Dynamic { dynamic: TextHash },
    Inline(BTreeMap<Language, String>),
}

impl TextHandle {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

/// Per-language text maps, keyed by hash.
#[derive(Debug, Clone, Default)]
pub struct TextMap {
    languages: HashMap<Language, HashMap<TextHash, String>>,
}

impl TextMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_language(&mut self, language: Language, texts: HashMap<TextHash, String>) {
        self.languages.insert(language, texts);
    }

    pub fn insert(&mut self, language: Language, hash: TextHash, text: impl Into<String>) {
        self.languages
            .entry(language)
            .or_default()
            .insert(hash, text.into());
    }

    pub fn get(&self, language: Language, hash: TextHash) -> Option<&str> {
        self.languages
            .get(&language)
            .and_then(|texts| texts.get(&hash))
            .map(String::as_str)
    }

    pub fn has_language(&self, language: Language) -> bool {
        self.languages.contains_key(&language)
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert_eq!(" jp ".parse::<Language>(), Ok(Language::Jp));
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn unknown_language_error_names_the_input() {
        let err = "Klingon".parse::<Language>().unwrap_err();
        assert_eq!(err, UnknownLanguage("Klingon".to_string()));
        assert_eq!(err.to_string(), "unknown language 'Klingon'");
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn text_handle_shapes_deserialize_structurally() {
        let plain: TextHandle = serde_json::from_str("42").unwrap();
        assert_eq!(plain, TextHandle::Hash(42));

        let dynamic: TextHandle = serde_json::from_str(r#"{"dynamic": 7}"#).unwrap();
        assert!(dynamic.is_dynamic());

        let inline: TextHandle = serde_json::from_str(r#"{"en": "Hello", "jp": "Konnichiwa"}"#).unwrap();
        match inline {
            TextHandle::Inline(map) => assert_eq!(map.get(&Language::En).map(String::as_str), Some("Hello")),
            other => panic!("expected inline handle, got {other:?}"),
        }
    }

    #[test]
    fn text_map_lookup_is_per_language() {
        let mut texts = TextMap::new();
        texts.insert(Language::En, 1, "Attack");
        assert_eq!(texts.get(Language::En, 1), Some("Attack"));
        assert_eq!(texts.get(Language::Jp, 1), None);
        assert!(texts.has_language(Language::En));
    }
}
