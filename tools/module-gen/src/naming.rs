//! Identifier derivation for generated symbols

use hashbrown::HashMap;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{GenError, Result};

static UPPER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("([A-Z]+)").expect("valid regex"));
static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new("([A-Z][a-z]+)").expect("valid regex"));

/// Normalize a file basename into an `UPPER_SNAKE` enumerator name.
///
/// Words are split at hyphens, spaces, the start of every uppercase run and
/// the start of every capitalized word, so `IconArrowDown` becomes
/// `ICON_ARROW_DOWN` and `HTTPRequest` becomes `HTTP_REQUEST`. Underscores
/// are kept as-is.
pub fn constant_name(basename: &str) -> String {
    let spaced = basename.replace('-', " ");
    let spaced = UPPER_RUN.replace_all(&spaced, " ${1}");
    let spaced = CAPITALIZED_WORD.replace_all(&spaced, " ${1}");

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// File name with its final extension removed
pub fn basename(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .ok_or_else(|| GenError::InvalidIdentifier {
            name: path.to_string_lossy().into_owned(),
            path: path.to_path_buf(),
        })
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Fail if `name` cannot be pasted into generated source as an identifier
pub fn require_identifier(name: &str, path: &Path) -> Result<()> {
    if is_c_identifier(name) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier {
            name: name.to_owned(),
            path: path.to_path_buf(),
        })
    }
}

/// Fail if `name` would put non-ASCII text into the generated header
pub fn require_ascii(name: &str, path: &Path) -> Result<()> {
    if name.is_ascii() {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier {
            name: name.to_owned(),
            path: path.to_path_buf(),
        })
    }
}

/// Fail on the first identifier produced by two different inputs.
pub fn ensure_unique<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (name, path) in names {
        if let Some(first) = seen.insert(name, path) {
            return Err(GenError::IdentifierCollision {
                name: name.to_owned(),
                first: PathBuf::from(first),
                second: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
