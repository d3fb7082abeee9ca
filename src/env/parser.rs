//! `NAME=VALUE` line parsing shared by the config cache and the patcher.
//!
//! A variable's identity is the exact text before the first `=`, so the
//! name is never trimmed: `  KEY=v` is not the variable `KEY`.  That keeps
//! what the cache reads and what `update_environment_variable` replaces
//! in agreement.

/// Parse a single environment line into a (name, value) pair.
///
/// Returns `None` for blank lines, `#` comments, lines without `=`, and
/// lines whose name is empty or contains whitespace.  The value keeps
/// everything after the first `=` (base64 padding included), minus one
/// pair of matching surrounding quotes.
pub fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, value) = line.split_once('=')?;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return None;
    }

    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    Some((name, value))
}
