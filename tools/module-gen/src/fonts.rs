//! Font blob header generator
//!
//! Fonts are embedded uncompressed: the consumer hands the array to the font
//! rasterizer as a flat memory buffer, so bytes are emitted in file order.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::env::BuildEnvironment;
use crate::error::Result;
use crate::header::{read_input, GeneratedHeader, HeaderWriter};
use crate::naming;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontBlobOptions {
    /// Prefix of `<prefix><basename>` and `<prefix><basename>_size`
    pub symbol_prefix: String,
    pub guard: String,
    /// Flag guarding every declaration in the file
    pub capability_flag: String,
}

impl Default for FontBlobOptions {
    fn default() -> Self {
        Self {
            symbol_prefix: "_font_".to_string(),
            guard: "_IMGUI_FONTS_H".to_string(),
            capability_flag: "DEBUG_ENABLED".to_string(),
        }
    }
}

struct FontBlob {
    symbol: String,
    bytes: Vec<u8>,
}

/// Render the font header without touching the filesystem target.
pub fn render_font_header(
    target: &Path,
    sources: &[PathBuf],
    env: &dyn BuildEnvironment,
    options: &FontBlobOptions,
) -> Result<GeneratedHeader> {
    let mut fonts = Vec::with_capacity(sources.len());
    for path in sources {
        // Basename is used verbatim, no case normalization
        let symbol = format!("{}{}", options.symbol_prefix, naming::basename(path)?);
        naming::require_identifier(&symbol, path)?;
        let bytes = read_input(path)?;
        fonts.push(FontBlob { symbol, bytes });
    }
    naming::ensure_unique(
        fonts
            .iter()
            .zip(sources)
            .map(|(f, path)| (f.symbol.as_str(), path.as_path())),
    )?;

    let mut w = HeaderWriter::new(&options.guard, &[])?;
    w.capability(&options.capability_flag, env.debug_features(), |out| {
        for font in &fonts {
            writeln!(out, "static const int {}_size = {};", font.symbol, font.bytes.len())?;
            writeln!(out, "static const unsigned char {}[] = {{", font.symbol)?;
            for b in &font.bytes {
                writeln!(out, "{b},")?;
            }
            writeln!(out, "}};")?;
        }
        Ok(())
    })?;

    w.finish(target)
}

/// Render and write the font header to `target`.
pub fn generate_font_header(
    target: &Path,
    sources: &[PathBuf],
    env: &dyn BuildEnvironment,
    options: &FontBlobOptions,
) -> Result<()> {
    tracing::info!("Embedding {} fonts into {}", sources.len(), target.display());
    render_font_header(target, sources, env, options)?.write()
}
