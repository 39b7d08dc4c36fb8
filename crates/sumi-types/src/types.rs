use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Supported recognition/UI languages (ISO 639-1 codes).
///
/// The set is closed: every code here has an engine locale, a native display
/// name and a translated-string bundle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Es,
    Fr,
    It,
    De,
    Pt,
    Nl,
    Pl,
    Sv,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    El,
    Hu,
    Tr,
    Hi,
    He,
    Fi,
    Da,
    No,
    Hr,
    Th,
    Bg,
    Vi,
    Ms,
    Uk,
    Is,
    Fa,
    Ps,
    Mn,
    Sw,
    Am,
    Ha,
    Yo,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 36] = [
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::It,
        LanguageCode::De,
        LanguageCode::Pt,
        LanguageCode::Nl,
        LanguageCode::Pl,
        LanguageCode::Sv,
        LanguageCode::Ru,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Ar,
        LanguageCode::El,
        LanguageCode::Hu,
        LanguageCode::Tr,
        LanguageCode::Hi,
        LanguageCode::He,
        LanguageCode::Fi,
        LanguageCode::Da,
        LanguageCode::No,
        LanguageCode::Hr,
        LanguageCode::Th,
        LanguageCode::Bg,
        LanguageCode::Vi,
        LanguageCode::Ms,
        LanguageCode::Uk,
        LanguageCode::Is,
        LanguageCode::Fa,
        LanguageCode::Ps,
        LanguageCode::Mn,
        LanguageCode::Sw,
        LanguageCode::Am,
        LanguageCode::Ha,
        LanguageCode::Yo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::It => "it",
            LanguageCode::De => "de",
            LanguageCode::Pt => "pt",
            LanguageCode::Nl => "nl",
            LanguageCode::Pl => "pl",
            LanguageCode::Sv => "sv",
            LanguageCode::Ru => "ru",
            LanguageCode::Ja => "ja",
            LanguageCode::Ko => "ko",
            LanguageCode::Zh => "zh",
            LanguageCode::Ar => "ar",
            LanguageCode::El => "el",
            LanguageCode::Hu => "hu",
            LanguageCode::Tr => "tr",
            LanguageCode::Hi => "hi",
            LanguageCode::He => "he",
            LanguageCode::Fi => "fi",
            LanguageCode::Da => "da",
            LanguageCode::No => "no",
            LanguageCode::Hr => "hr",
            LanguageCode::Th => "th",
            LanguageCode::Bg => "bg",
            LanguageCode::Vi => "vi",
            LanguageCode::Ms => "ms",
            LanguageCode::Uk => "uk",
            LanguageCode::Is => "is",
            LanguageCode::Fa => "fa",
            LanguageCode::Ps => "ps",
            LanguageCode::Mn => "mn",
            LanguageCode::Sw => "sw",
            LanguageCode::Am => "am",
            LanguageCode::Ha => "ha",
            LanguageCode::Yo => "yo",
        }
    }

    /// Parse a bare two-letter tag ("ja", "JA"). Locale strings like
    /// "ja_JP.UTF-8" go through the registry's locale resolution instead.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one bitmap representation everything downstream consumes: RGB8,
/// row-major, top-left origin, no alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CanonicalImage {
    /// Build from an RGB8 buffer. Returns `None` when a dimension is zero or
    /// the buffer length is not exactly `width * height * 3`; there is no
    /// partially constructed image.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for CanonicalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The pixel buffer is megabytes of noise; keep Debug output readable.
        f.debug_struct("CanonicalImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Ordered text lines from one recognition call, in the order the engine
/// returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
    lines: Vec<String>,
}

impl RecognitionResult {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Flatten into the display form. Zero lines is a valid result and
    /// yields an empty string.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Platform-native bitmap as handed over by the clipboard or a drop event:
/// RGBA8, row-major.
#[derive(Debug, Clone)]
pub struct RawBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// What a drag-and-drop event carries.
#[derive(Debug, Clone)]
pub enum DropPayload {
    /// Image bytes embedded in the payload (already encoded, e.g. PNG).
    Bytes(Vec<u8>),
    /// A list of local files; only the first is loaded.
    Paths(Vec<PathBuf>),
}

/// One of the three raw image representations the normalizer accepts.
#[derive(Debug, Clone)]
pub enum ImageInput {
    Path(PathBuf),
    Encoded(Vec<u8>),
    Native(RawBitmap),
}

/// Translated UI strings for one language. Field set is fixed; a bundle entry
/// missing any key fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiStrings {
    pub drag_drop: String,
    pub open_image: String,
    pub paste_clipboard: String,
    pub change_language: String,
    pub recognize_text: String,
    pub show_info: String,
    pub copy_text: String,
    pub text_copied: String,
    pub info_title: String,
    pub dependencies_info: String,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Frontend -> app.
    OpenImage(PathBuf),
    PasteClipboard,
    DropImage(DropPayload),
    Recognize,
    ChangeLanguage(LanguageCode),
    CopyText {
        /// `None` copies the full recognized text.
        selection: Option<String>,
    },
    ShowInfo,
    Shutdown,
    // App -> display collaborators.
    /// A new canonical image is current; the preview surface owns its
    /// scaling policy, so it gets the full bitmap.
    ImageLoaded(Arc<CanonicalImage>),
    ShowText(String),
    LanguageChanged {
        code: LanguageCode,
        strings: UiStrings,
    },
    Status {
        message: String,
    },
    Info {
        title: String,
        body: String,
    },
}
