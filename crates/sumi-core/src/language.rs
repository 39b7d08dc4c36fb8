//! Language configuration registry: locale resolution, engine locale tags,
//! native display names and the translated-string bundle.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sumi_config::ConfigError;
use sumi_types::{LanguageCode, UiStrings};

use LanguageCode::*;

/// Ordered (prefix, code) pairs for system-locale resolution. First match
/// wins in table order, so the order is part of the contract.
pub const LOCALE_TABLE: &[(&str, LanguageCode)] = &[
    ("en", En),
    ("es", Es),
    ("fr", Fr),
    ("it", It),
    ("de", De),
    ("pt", Pt),
    ("nl", Nl),
    ("pl", Pl),
    ("sv", Sv),
    ("ru", Ru),
    ("ja", Ja),
    ("ko", Ko),
    ("zh", Zh),
    ("ar", Ar),
    ("el", El),
    ("hu", Hu),
    ("tr", Tr),
    ("hi", Hi),
    ("he", He),
    ("fi", Fi),
    ("da", Da),
    ("no", No),
    ("hr", Hr),
    ("th", Th),
    ("bg", Bg),
    ("vi", Vi),
    ("ms", Ms),
    ("uk", Uk),
    ("is", Is),
    ("fa", Fa),
    ("ps", Ps),
    ("mn", Mn),
    ("sw", Sw),
    ("am", Am),
    ("ha", Ha),
    ("yo", Yo),
];

/// Resolve a system locale string ("ja_JP.UTF-8", "de_AT") to a supported
/// code. Unknown or undeterminable locales fall back to English.
pub fn resolve_from_locale(locale: Option<&str>) -> LanguageCode {
    let Some(locale) = locale else {
        return En;
    };
    let locale = locale.trim();
    LOCALE_TABLE
        .iter()
        .find(|(prefix, _)| locale.to_ascii_lowercase().starts_with(prefix))
        .map(|&(_, code)| code)
        .unwrap_or(En)
}

/// The Tesseract traineddata identifier an engine instance is constructed
/// with.
pub fn engine_locale(code: LanguageCode) -> &'static str {
    match code {
        En => "eng",
        Es => "spa",
        Fr => "fra",
        It => "ita",
        De => "deu",
        Pt => "por",
        Nl => "nld",
        Pl => "pol",
        Sv => "swe",
        Ru => "rus",
        Ja => "jpn",
        Ko => "kor",
        Zh => "chi_sim",
        Ar => "ara",
        El => "ell",
        Hu => "hun",
        Tr => "tur",
        Hi => "hin",
        He => "heb",
        Fi => "fin",
        Da => "dan",
        No => "nor",
        Hr => "hrv",
        Th => "tha",
        Bg => "bul",
        Vi => "vie",
        Ms => "msa",
        Uk => "ukr",
        Is => "isl",
        Fa => "fas",
        Ps => "pus",
        Mn => "mon",
        Sw => "swa",
        Am => "amh",
        Ha => "hau",
        Yo => "yor",
    }
}

/// Native display name, for the language menu collaborator.
pub fn native_name(code: LanguageCode) -> &'static str {
    match code {
        En => "English",
        Es => "Español",
        Fr => "Français",
        It => "Italiano",
        De => "Deutsch",
        Pt => "Português",
        Nl => "Nederlands",
        Pl => "Polski",
        Sv => "Svenska",
        Ru => "Русский",
        Ja => "日本語",
        Ko => "한국어",
        Zh => "中文",
        Ar => "العربية",
        El => "Ελληνικά",
        Hu => "Magyar",
        Tr => "Türkçe",
        Hi => "हिन्दी",
        He => "עברית",
        Fi => "Suomi",
        Da => "Dansk",
        No => "Norsk",
        Hr => "Hrvatski",
        Th => "ไทย",
        Bg => "Български",
        Vi => "Tiếng Việt",
        Ms => "Bahasa Melayu",
        Uk => "Українська",
        Is => "Íslenska",
        Fa => "فارسی",
        Ps => "پښتو",
        Mn => "Монгол",
        Sw => "Kiswahili",
        Am => "አማርኛ",
        Ha => "Hausa",
        Yo => "Yorùbá",
    }
}

/// The translated-string bundle, loaded once at startup and complete by
/// construction: every supported code has an entry with every key.
pub struct LanguagePack {
    entries: HashMap<LanguageCode, UiStrings>,
}

impl LanguagePack {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: HashMap<LanguageCode, UiStrings> =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        for code in LanguageCode::ALL {
            if !entries.contains_key(&code) {
                return Err(ConfigError::MissingLanguage(code));
            }
        }
        Ok(Self { entries })
    }

    /// Never fails for an enumerated code; completeness is enforced at load.
    pub fn strings(&self, code: LanguageCode) -> &UiStrings {
        self.entries
            .get(&code)
            .expect("bundle completeness checked at load")
    }
}

/// Owns the "current language" selection on top of the loaded bundle.
pub struct LanguageRegistry {
    pack: LanguagePack,
    current: LanguageCode,
}

impl LanguageRegistry {
    pub fn new(pack: LanguagePack, initial: LanguageCode) -> Self {
        Self {
            pack,
            current: initial,
        }
    }

    pub fn current(&self) -> LanguageCode {
        self.current
    }

    pub fn set_current(&mut self, code: LanguageCode) {
        self.current = code;
    }

    pub fn strings(&self, code: LanguageCode) -> &UiStrings {
        self.pack.strings(code)
    }

    pub fn current_strings(&self) -> &UiStrings {
        self.pack.strings(self.current)
    }
}
