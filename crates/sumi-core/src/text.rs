use unicode_normalization::UnicodeNormalization;

/// Per-line cleanup applied to engine output before assembly.
pub trait Postprocessor {
    fn process(&self, line: &str) -> String {
        let line = line.trim();
        if line.is_empty() {
            return String::new();
        }
        // NFC: engines emit decomposed forms for some scripts.
        line.nfc().collect()
    }
}

pub struct DefaultPostprocessor;
impl Postprocessor for DefaultPostprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_edges_and_keeps_inner_spacing() {
        let post = DefaultPostprocessor;
        assert_eq!(post.process("  hello  world "), "hello  world");
        assert_eq!(post.process("   "), "");
    }

    #[test]
    fn recomposes_decomposed_characters() {
        let post = DefaultPostprocessor;
        // "e" + combining acute accent composes to "é".
        assert_eq!(post.process("caf\u{0065}\u{0301}"), "café");
    }
}
