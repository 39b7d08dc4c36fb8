//! System locale detection from the environment.

/// glibc precedence: LC_ALL beats LC_MESSAGES beats LANG. The "C" and
/// "POSIX" locales count as undeterminable.
pub fn detect() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"].into_iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| {
                !value.is_empty() && value.as_str() != "C" && value.as_str() != "POSIX"
            })
    })
}
