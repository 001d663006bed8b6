//! Generated header text and its on-disk replacement
//!
//! Every generator builds the complete file in memory with [`HeaderWriter`]
//! and only then hands a [`GeneratedHeader`] to [`GeneratedHeader::write`].
//! Nothing is written if any input fails to load.

use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};

/// First line of every generated file
pub const BANNER: &str = "/* THIS FILE IS GENERATED DO NOT EDIT */";

/// In-memory builder for a guarded header
pub struct HeaderWriter {
    guard: String,
    out: String,
}

impl HeaderWriter {
    /// Start a header with the banner and any includes that must precede the guard.
    pub fn new(guard: &str, pre_guard_includes: &[&str]) -> Result<Self> {
        let mut out = String::new();
        writeln!(out, "{BANNER}")?;

        if !pre_guard_includes.is_empty() {
            writeln!(out)?;
            for include in pre_guard_includes {
                writeln!(out, "#include \"{include}\"")?;
            }
        }
        writeln!(out)?;

        writeln!(out, "#ifndef {guard}")?;
        writeln!(out, "#define {guard}")?;

        Ok(Self {
            guard: guard.to_owned(),
            out,
        })
    }

    /// Raw access for `writeln!`
    pub fn body(&mut self) -> &mut String {
        &mut self.out
    }

    /// Emit `body` inside `#ifdef flag ... #endif`, or emit nothing at all
    /// when the capability is disabled.
    pub fn capability<F>(&mut self, flag: &str, enabled: bool, body: F) -> Result<()>
    where
        F: FnOnce(&mut String) -> Result<()>,
    {
        if !enabled {
            tracing::warn!("{flag} disabled, omitting guarded declarations");
            return Ok(());
        }

        writeln!(self.out, "#ifdef {flag}")?;
        body(&mut self.out)?;
        writeln!(self.out, "#endif // {flag}")?;
        Ok(())
    }

    /// Close the header guard.
    pub fn finish(mut self, target: &Path) -> Result<GeneratedHeader> {
        writeln!(self.out, "#endif // {}", self.guard)?;
        Ok(GeneratedHeader {
            target: target.to_path_buf(),
            guard: self.guard,
            text: self.out,
        })
    }
}

/// Fully rendered header, ready to replace its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    target: PathBuf,
    guard: String,
    text: String,
}

impl GeneratedHeader {
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn guard(&self) -> &str {
        &self.guard
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the target file with this header.
    ///
    /// The text is staged in a temporary file next to the target and renamed
    /// over it, so the previous output survives any failure. The target
    /// directory must already exist.
    pub fn write(&self) -> Result<()> {
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |source| GenError::WriteOutput {
            path: self.target.clone(),
            source,
        };

        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        staged.write_all(self.text.as_bytes()).map_err(write_err)?;
        staged.flush().map_err(write_err)?;
        set_output_permissions(staged.as_file(), &self.target).map_err(write_err)?;
        staged
            .persist(&self.target)
            .map_err(|e| write_err(e.error))?;

        tracing::info!("Generated {}", self.target.display());
        Ok(())
    }

    /// True when the target exists and already holds exactly this text.
    pub fn is_current(&self) -> bool {
        std::fs::read(&self.target)
            .map(|existing| existing == self.text.as_bytes())
            .unwrap_or(false)
    }
}

/// Give the staged file the mode the header ends up with: the previous
/// target's mode when there is one, otherwise `0644`.
#[cfg(unix)]
fn set_output_permissions(staged: &std::fs::File, target: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::metadata(target)
        .map(|m| m.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644));
    staged.set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_output_permissions(_staged: &std::fs::File, _target: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Read a whole input file, mapping failures to [`GenError::ReadInput`].
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| GenError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(target: &Path, enabled: bool) -> GeneratedHeader {
        let mut w = HeaderWriter::new("_SAMPLE_H", &[]).unwrap();
        writeln!(w.body(), "static const int sample_count = 1;").unwrap();
        w.capability("DEBUG_ENABLED", enabled, |out| {
            writeln!(out, "static const int sample_debug = 1;")?;
            Ok(())
        })
        .unwrap();
        w.finish(target).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = sample(Path::new("sample.gen.h"), true);
        assert_eq!(
            header.text(),
            "/* THIS FILE IS GENERATED DO NOT EDIT */\n\
             \n\
             #ifndef _SAMPLE_H\n\
             #define _SAMPLE_H\n\
             static const int sample_count = 1;\n\
             #ifdef DEBUG_ENABLED\n\
             static const int sample_debug = 1;\n\
             #endif // DEBUG_ENABLED\n\
             #endif // _SAMPLE_H\n"
        );
        assert_eq!(header.guard(), "_SAMPLE_H");
    }

    #[test]
    fn test_disabled_capability_leaves_no_trace() {
        let header = sample(Path::new("sample.gen.h"), false);
        assert!(!header.text().contains("DEBUG_ENABLED"));
        assert!(!header.text().contains("sample_debug"));
        assert!(header.text().contains("sample_count"));
    }

    #[test]
    fn test_pre_guard_includes() {
        let w = HeaderWriter::new("_X_H", &["modules/modules_enabled.gen.h"]).unwrap();
        let header = w.finish(Path::new("x.h")).unwrap();
        assert!(header.text().starts_with(
            "/* THIS FILE IS GENERATED DO NOT EDIT */\n\n#include \"modules/modules_enabled.gen.h\"\n\n#ifndef _X_H\n"
        ));
    }

    #[test]
    fn test_write_replaces_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("sample.gen.h");
        std::fs::write(&target, "stale").unwrap();

        let header = sample(&target, true);
        assert!(!header.is_current());
        header.write().unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), header.text());
        assert!(header.is_current());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_header_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let target = dir.path().join("sample.gen.h");
        sample(&target, true).write().unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let target = dir.path().join("sample.gen.h");
        std::fs::write(&target, "stale").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o664)).unwrap();

        sample(&target, true).write().unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("sample.gen.h");

        let err = sample(&target, true).write().unwrap_err();
        assert!(matches!(err, GenError::WriteOutput { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_read_missing_input() {
        let dir = tempdir().unwrap();
        let err = read_input(&dir.path().join("nope.svg")).unwrap_err();
        assert!(matches!(err, GenError::ReadInput { .. }));
    }
}
