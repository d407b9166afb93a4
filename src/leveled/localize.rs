//! Localization: text handle + language (+ params) → display string.
//!
//! Resolution never fails. A missing translation falls back to the fallback
//! language and then to the empty string; a malformed placeholder is copied
//! through literally.
//!
//! Placeholder syntax:
//! - `{N}`: 0-based parameter, up to four decimals with trailing zeros trimmed.
//! - `#N`, `#N[i]`, `#N[fK]`: 1-based parameter, plain / rounded integer / K
//!   decimals. A `%` right after the placeholder scales the value by 100.

use tracing::debug;

use crate::data::{Language, TextHandle, TextHash, TextMap};

#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    texts: &'a TextMap,
    language: Language,
    fallback: Language,
}

impl<'a> Localizer<'a> {
    pub fn new(texts: &'a TextMap, language: Language) -> Self {
        Self {
            texts,
            language,
            fallback: Language::En,
        }
    }

    pub fn with_fallback(mut self, fallback: Language) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn fallback(&self) -> Language {
        self.fallback
    }

    /// Text behind a handle without parameter substitution. For a dynamic
    /// handle this is the raw template.
    pub fn text(&self, handle: &TextHandle) -> String {
        match handle {
            TextHandle::Hash(hash) | TextHandle::Dynamic { dynamic: hash } => self.lookup(*hash),
            TextHandle::Inline(map) => map
                .get(&self.language)
                .or_else(|| map.get(&self.fallback))
                .cloned()
                .unwrap_or_else(|| {
                    debug!(language = %self.language, "inline text has no translation");
                    String::new()
                }),
        }
    }

    /// Resolve a handle, expanding a dynamic template with `params`.
    ///
    /// An empty `params` leaves the template unexpanded so callers can still
    /// see that a template exists. Plain handles ignore `params`.
    pub fn resolve(&self, handle: &TextHandle, params: &[f64]) -> String {
        let text = self.text(handle);
        if handle.is_dynamic() && !params.is_empty() {
            expand_template(&text, params)
        } else {
            text
        }
    }

    /// Resolve an optional handle; `None` resolves to the empty string.
    pub fn resolve_opt(&self, handle: Option<&TextHandle>, params: &[f64]) -> String {
        handle
            .map(|handle| self.resolve(handle, params))
            .unwrap_or_default()
    }

    fn lookup(&self, hash: TextHash) -> String {
        if let Some(text) = self.texts.get(self.language, hash) {
            return text.to_string();
        }
        if let Some(text) = self.texts.get(self.fallback, hash) {
            debug!(
                hash,
                language = %self.language,
                fallback = %self.fallback,
                "missing translation; using fallback"
            );
            return text.to_string();
        }
        debug!(hash, language = %self.language, "missing translation");
        String::new()
    }
}

/// Largest `K` accepted in `#N[fK]`; anything wider is left as literal text.
const MAX_FIXED_DECIMALS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamFormat {
    Plain,
    Integer,
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    index: usize,
    format: ParamFormat,
    percent: bool,
}

impl Placeholder {
    fn render(&self, params: &[f64]) -> Option<String> {
        let value = *params.get(self.index)?;
        let scaled = if self.percent { value * 100.0 } else { value };
        let mut text = format_param(scaled, self.format);
        if self.percent {
            text.push('%');
        }
        Some(text)
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

/// Parse a placeholder at the start of `s`; returns it with the bytes consumed.
fn parse_placeholder(s: &str) -> Option<(Placeholder, usize)> {
    if let Some(rest) = s.strip_prefix('{') {
        let digits = leading_digits(rest);
        if digits.is_empty() || !rest[digits.len()..].starts_with('}') {
            return None;
        }
        let index = digits.parse().ok()?;
        let placeholder = Placeholder {
            index,
            format: ParamFormat::Plain,
            percent: false,
        };
        return Some((placeholder, 1 + digits.len() + 1));
    }

    let rest = s.strip_prefix('#')?;
    let digits = leading_digits(rest);
    let position: usize = digits.parse().ok()?;
    let index = position.checked_sub(1)?;
    let mut consumed = 1 + digits.len();

    let mut format = ParamFormat::Plain;
    let after = &s[consumed..];
    if let Some(bracket) = after.strip_prefix('[') {
        let close = bracket.find(']')?;
        format = match &bracket[..close] {
            "i" => ParamFormat::Integer,
            f if f.starts_with('f') && f.len() > 1 => {
                let decimals = f[1..].parse::<u8>().ok().map(usize::from)?;
                if decimals > MAX_FIXED_DECIMALS {
                    return None;
                }
                ParamFormat::Fixed(decimals)
            }
            _ => return None,
        };
        consumed += close + 2;
    }

    let percent = s[consumed..].starts_with('%');
    if percent {
        consumed += 1;
    }
    Some((Placeholder { index, format, percent }, consumed))
}

/// Substitute positional `params` into `template`, best effort.
pub fn expand_template(template: &str, params: &[f64]) -> String {
    let mut out = String::with_capacity(template.len() + params.len() * 4);
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '#']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let consumed = match parse_placeholder(tail) {
            Some((placeholder, consumed)) => {
                match placeholder.render(params) {
                    Some(text) => out.push_str(&text),
                    None => {
                        debug!(
                            index = placeholder.index,
                            params = params.len(),
                            "template parameter out of range"
                        );
                        out.push_str(&tail[..consumed]);
                    }
                }
                consumed
            }
            None => {
                out.push_str(&tail[..1]);
                1
            }
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

fn trim_decimal(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn format_param(value: f64, format: ParamFormat) -> String {
    match format {
        ParamFormat::Plain => trim_decimal(value, 4),
        ParamFormat::Integer => trim_decimal(value.round(), 0),
        ParamFormat::Fixed(decimals) => format!("{value:.decimals$}"),
    }
}

/// Display form of a stat value: `0.08` → `8%` when percent, `33.6` otherwise.
pub fn format_stat_value(value: f64, percent: bool) -> String {
    if percent {
        format!("{}%", trim_decimal(value * 100.0, 2))
    } else {
        trim_decimal(value, 2)
    }
}
