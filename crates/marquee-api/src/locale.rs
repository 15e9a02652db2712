//! Locale code to API language mapping.
//!
//! The front-end works with two-letter locale codes (`ru`); the catalog
//! expects full language tags (`ru-RU`).

use crate::catalog::DEFAULT_LANGUAGE;

/// Default two-letter locale code.
pub const DEFAULT_LOCALE: &str = "en";

/// Locale code, API language tag and native display name.
static LOCALE_TABLE: [(&str, &str, &str); 10] = [
    ("en", "en-US", "English"),
    ("ru", "ru-RU", "Русский"),
    ("es", "es-ES", "Español"),
    ("fr", "fr-FR", "Français"),
    ("de", "de-DE", "Deutsch"),
    ("it", "it-IT", "Italiano"),
    ("pt", "pt-BR", "Português"),
    ("ja", "ja-JP", "日本語"),
    ("ko", "ko-KR", "한국어"),
    ("zh", "zh-CN", "中文"),
];

/// Supported two-letter locale codes, in table order.
pub const SUPPORTED_LOCALES: [&str; 10] = [
    "en", "ru", "es", "fr", "de", "it", "pt", "ja", "ko", "zh",
];

/// Maps a two-letter locale code to the catalog language tag.
///
/// Unmapped codes fall back to `en-US`.
#[must_use]
pub fn api_language(code: &str) -> &'static str {
    LOCALE_TABLE
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map_or(DEFAULT_LANGUAGE, |(_, tag, _)| *tag)
}

/// Native display name for a locale code, or the upper-cased code if unknown.
#[must_use]
pub fn display_name(code: &str) -> String {
    LOCALE_TABLE
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map_or_else(|| code.to_uppercase(), |(_, _, name)| String::from(*name))
}

/// Reduces a device language tag to its two-letter locale code.
///
/// Accepts `ru_RU.UTF-8`, `ru-RU`, `ru`. `C`, `POSIX` and empty tags map to
/// [`DEFAULT_LOCALE`].
#[must_use]
pub fn locale_from_tag(tag: &str) -> String {
    let language = tag
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if language.is_empty()
        || language.eq_ignore_ascii_case("C")
        || language.eq_ignore_ascii_case("POSIX")
    {
        return String::from(DEFAULT_LOCALE);
    }
    language.to_ascii_lowercase()
}
