//! Preprocessor define mirror generator
//!
//! Re-emits the build's profiler defines as flag macros in a header that
//! then includes the profiler itself, so every translation unit including it
//! sees the same configuration as the profiler sources.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use serde::Deserialize;

use crate::env::{BuildEnvironment, DefineEntry};
use crate::error::Result;
use crate::header::{GeneratedHeader, HeaderWriter};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefineMirrorOptions {
    /// Only defines whose name starts with this prefix are mirrored
    pub prefix: String,
    pub guard: String,
    /// Included unconditionally after the mirrored defines
    pub include: String,
}

impl Default for DefineMirrorOptions {
    fn default() -> Self {
        Self {
            prefix: "TRACY_".to_string(),
            guard: "GODOT_TRACY_H".to_string(),
            include: "thirdparty/tracy/public/tracy/Tracy.hpp".to_string(),
        }
    }
}

/// Plain string defines with the prefix are mirrored. Integer and path-list
/// values are skipped without error.
pub fn mirrors(entry: &DefineEntry, prefix: &str) -> bool {
    entry.value.is_plain_string() && entry.name.starts_with(prefix)
}

/// Render the mirror header. Values are never mirrored, only names.
pub fn render_define_mirror(
    target: &Path,
    defines: &[DefineEntry],
    options: &DefineMirrorOptions,
) -> Result<GeneratedHeader> {
    let mut w = HeaderWriter::new(&options.guard, &[])?;
    let out = w.body();
    writeln!(out)?;

    for entry in defines {
        if mirrors(entry, &options.prefix) {
            writeln!(out, "#define {}", entry.name)?;
        } else {
            tracing::trace!("Skipping define {}", entry.name);
        }
    }

    writeln!(out)?;
    writeln!(out, "#include \"{}\"", options.include)?;
    writeln!(out)?;

    w.finish(target)
}

/// Render and write the mirror header to `target`.
pub fn generate_define_mirror(
    target: &Path,
    defines: &[DefineEntry],
    options: &DefineMirrorOptions,
) -> Result<()> {
    tracing::info!(
        "Mirroring {}* defines into {}",
        options.prefix,
        target.display()
    );
    render_define_mirror(target, defines, options)?.write()
}

/// Mirror the defines of a build environment.
pub fn generate_define_mirror_from_env(
    target: &Path,
    env: &dyn BuildEnvironment,
    options: &DefineMirrorOptions,
) -> Result<()> {
    generate_define_mirror(target, env.cpp_defines(), options)
}
