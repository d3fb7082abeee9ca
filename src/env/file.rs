//! Patch-in-place updates of `NAME=VALUE` environment files.
//!
//! The whole file is read, one variable is replaced or appended, and the
//! whole file is written back.  Every other line is kept verbatim and in
//! order.  Nothing is cached between calls, so edits made by hand in the
//! meantime are respected.
//!
//! The file is overwritten where it is, so its permissions and any
//! symlink pointing at it stay intact.  There is no locking: two
//! processes patching the same file race and the last write wins.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::info;
use zeroize::Zeroizing;

use crate::errors::{EnvSealError, Result};

/// Reject names the line format cannot represent.
pub fn validate_variable_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EnvSealError::Validation(
            "variable name cannot be empty".into(),
        ));
    }
    if name.contains('=') || name.chars().any(char::is_whitespace) {
        return Err(EnvSealError::Validation(format!(
            "variable name '{}' must not contain '=' or whitespace",
            name.escape_debug()
        )));
    }
    Ok(())
}

/// Reject values that would spill onto a second line.
fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(EnvSealError::Validation(format!(
            "value for '{name}' must not contain line breaks"
        )));
    }
    Ok(())
}

/// Replace every `name=...` line with `name=value`, or append one if none
/// matched.
pub fn update_environment_lines<S: AsRef<str>>(lines: &[S], name: &str, value: &str) -> Vec<String> {
    let prefix = format!("{name}=");
    let replacement = format!("{name}={value}");
    let mut updated = false;

    let mut result: Vec<String> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.starts_with(&prefix) {
                updated = true;
                replacement.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !updated {
        result.push(replacement);
    }

    result
}

/// Set `name=value` in the file at `path`, overwriting it in place.
pub fn update_environment_variable(path: &Path, name: &str, value: &str) -> Result<()> {
    validate_variable_name(name)?;
    validate_value(name, value)?;

    let content =
        Zeroizing::new(fs::read_to_string(path).map_err(|e| EnvSealError::file_io(path, e))?);
    let lines: Vec<&str> = content.lines().collect();
    let updated = update_environment_lines(&lines, name, value);

    let mut output = Zeroizing::new(updated.join("\n"));
    output.push('\n');

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| EnvSealError::file_io(path, e))?;
    file.write_all(output.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| EnvSealError::file_io(path, e))?;

    info!("environment variable '{name}' updated in {}", path.display());
    Ok(())
}

/// Create `path` and its parent directories if they are missing.
///
/// An existing file is left untouched.
pub fn ensure_file_exists(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| EnvSealError::file_io(parent, e))?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EnvSealError::file_io(path, e))?;

    Ok(())
}
