//! Icon set header generator
//!
//! Embeds a sequence of SVG icons as escaped string literals alongside a
//! name table and an enum. Index `k` of the sources array, index `k` of the
//! names array and enumerator value `k` all refer to the same input file.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::env::BuildEnvironment;
use crate::error::Result;
use crate::header::{read_input, GeneratedHeader, HeaderWriter};
use crate::naming;

/// Symbol names and guards for an icon set header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconSetOptions {
    /// Prefix of `<prefix>_count`, `<prefix>_sources` and `<prefix>_names`
    pub symbol_prefix: String,
    pub enum_name: String,
    pub guard: String,
    /// Flag guarding the embedded SVG sources
    pub capability_flag: String,
    /// Header defining the `MODULE_*_ENABLED` flags
    pub modules_include: String,
}

impl Default for IconSetOptions {
    fn default() -> Self {
        Self {
            symbol_prefix: "game_tools_theme_icons".to_string(),
            enum_name: "GameToolsThemeIcons".to_string(),
            guard: "_GAME_TOOLS_THEME_ICONS_H".to_string(),
            capability_flag: "MODULE_SVG_ENABLED".to_string(),
            modules_include: "modules/modules_enabled.gen.h".to_string(),
        }
    }
}

struct Icon<'a> {
    path: &'a Path,
    name: String,
    constant: String,
    bytes: Vec<u8>,
}

/// `\xNN` for every byte, two lowercase hex digits each
pub fn escape_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("\\x{b:02x}")).collect()
}

/// Render the icon header without touching the filesystem target.
pub fn render_icon_header(
    target: &Path,
    sources: &[PathBuf],
    env: &dyn BuildEnvironment,
    options: &IconSetOptions,
) -> Result<GeneratedHeader> {
    let mut icons = Vec::with_capacity(sources.len());
    for path in sources {
        let name = naming::basename(path)?;
        // Emitted verbatim into the names table
        naming::require_ascii(&name, path)?;
        let constant = naming::constant_name(&name);
        naming::require_identifier(&constant, path)?;
        let bytes = read_input(path)?;
        icons.push(Icon {
            path,
            name,
            constant,
            bytes,
        });
    }
    naming::ensure_unique(icons.iter().map(|i| (i.constant.as_str(), i.path)))?;

    let prefix = &options.symbol_prefix;
    let mut w = HeaderWriter::new(&options.guard, &[options.modules_include.as_str()])?;

    writeln!(w.body(), "static const int {prefix}_count = {};", icons.len())?;
    writeln!(w.body())?;

    w.capability(&options.capability_flag, env.vector_graphics(), |out| {
        writeln!(out, "static const char *{prefix}_sources[] = {{")?;
        write_list(out, icons.iter().map(|i| escape_bytes(&i.bytes)))?;
        writeln!(out, "}};")?;
        Ok(())
    })?;
    if env.vector_graphics() {
        writeln!(w.body())?;
    }

    let out = w.body();
    writeln!(out, "static const char *{prefix}_names[] = {{")?;
    write_list(out, icons.iter().map(|i| i.name.clone()))?;
    writeln!(out, "}};")?;

    writeln!(out, "enum {} {{", options.enum_name)?;
    for icon in &icons {
        writeln!(out, "\t{},", icon.constant)?;
    }
    writeln!(out, "}};")?;

    w.finish(target)
}

/// Quoted, tab-indented, comma-separated; no comma after the last entry.
fn write_list<I>(out: &mut String, items: I) -> Result<()>
where
    I: ExactSizeIterator<Item = String>,
{
    let last = items.len().saturating_sub(1);
    for (i, item) in items.enumerate() {
        let sep = if i == last { "" } else { "," };
        writeln!(out, "\t\"{item}\"{sep}")?;
    }
    Ok(())
}

/// Render and write the icon header to `target`.
pub fn generate_icon_header(
    target: &Path,
    sources: &[PathBuf],
    env: &dyn BuildEnvironment,
    options: &IconSetOptions,
) -> Result<()> {
    tracing::info!("Embedding {} icons into {}", sources.len(), target.display());
    render_icon_header(target, sources, env, options)?.write()
}
