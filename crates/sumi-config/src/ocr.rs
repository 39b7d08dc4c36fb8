use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sumi_types::LanguageCode;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language override. `None` resolves from the system locale.
    pub language: Option<LanguageCode>,
    /// Directory holding Tesseract traineddata files. `None` uses the
    /// engine's compiled-in default.
    pub tessdata_dir: Option<PathBuf>,
}
