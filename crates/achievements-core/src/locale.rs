//! Locale tags accepted by Game Center, and the aliases we rewrite into them.
//!
//! Normalization is advisory: an unknown tag passes through unchanged and the
//! remote service decides whether it is acceptable.

/// Locale tags the remote service accepts for achievement localizations.
pub const SUPPORTED_LOCALES: &[&str] = &[
    "ar-SA", "ca", "cs", "da", "de-DE", "el", "en-AU", "en-CA", "en-GB", "en-US", "es-ES",
    "es-MX", "fi", "fr-CA", "fr-FR", "he", "hi", "hr", "hu", "id", "it", "ja", "ko", "ms",
    "nl-NL", "no", "pl", "pt-BR", "pt-PT", "ro", "ru", "sk", "sv", "th", "tr", "uk", "vi",
    "zh-Hans", "zh-Hant",
];

/// `(input, accepted)` pairs. Every value is a member of [`SUPPORTED_LOCALES`].
pub const LOCALE_ALIASES: &[(&str, &str)] = &[
    ("it-IT", "it"),
    ("ja-JP", "ja"),
    ("ko-KR", "ko"),
    ("zh-CN", "zh-Hans"),
    ("zh-SG", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
    ("zh-HK", "zh-Hant"),
    ("fi-FI", "fi"),
    ("sv-SE", "sv"),
    ("da-DK", "da"),
    ("no-NO", "no"),
    ("nb-NO", "no"),
    ("pl-PL", "pl"),
    ("tr-TR", "tr"),
    ("ru-RU", "ru"),
    ("cs-CZ", "cs"),
    ("sk-SK", "sk"),
    ("hu-HU", "hu"),
    ("ro-RO", "ro"),
    ("hr-HR", "hr"),
    ("uk-UA", "uk"),
    ("el-GR", "el"),
    ("he-IL", "he"),
    ("th-TH", "th"),
    ("vi-VN", "vi"),
    ("id-ID", "id"),
    ("ms-MY", "ms"),
    ("hi-IN", "hi"),
    ("ca-ES", "ca"),
    ("ar-AR", "ar-SA"),
    ("ar", "ar-SA"),
    ("de", "de-DE"),
    ("en", "en-US"),
    ("es", "es-ES"),
    ("fr", "fr-FR"),
    ("nl", "nl-NL"),
    ("pt", "pt-BR"),
];

/// Map `input` through the alias table, or return it unchanged.
pub fn normalize(input: &str) -> &str {
    LOCALE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == input)
        .map(|(_, accepted)| *accepted)
        .unwrap_or(input)
}

/// Whether `locale` is in the accepted vocabulary. Case-sensitive.
pub fn is_valid(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}
