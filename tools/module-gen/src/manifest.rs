//! modgen.toml manifest parsing and build orchestration
//!
//! A manifest describes the build environment and the headers to generate:
//!
//! ```toml
//! [environment]
//! debug_features = true
//! vector_graphics = true
//!
//! [[environment.defines]]
//! name = "TRACY_ENABLE"
//!
//! [[icons]]
//! target = "modules/game/resources/game_tools_theme_icons.gen.h"
//! source_dir = "modules/game/resources/tool_icons"
//! extension = "svg"
//!
//! [[fonts]]
//! target = "modules/imgui/imgui_fonts.gen.h"
//! sources = ["modules/imgui/thirdparty/fonts/JetBrainsMono_Regular.ttf"]
//!
//! [[defines]]
//! target = "modules/tracy/tracy.gen.h"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::actions::BuildAction;
use crate::defines::DefineMirrorOptions;
use crate::env::StaticEnvironment;
use crate::fonts::FontBlobOptions;
use crate::icons::IconSetOptions;

pub const DEFAULT_MANIFEST: &str = "modgen.toml";

/// Root manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub environment: StaticEnvironment,
    #[serde(default)]
    pub icons: Vec<AssetJob<IconSetOptions>>,
    #[serde(default)]
    pub fonts: Vec<AssetJob<FontBlobOptions>>,
    #[serde(default)]
    pub defines: Vec<DefineJob>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Header generated from a list of input files
#[derive(Debug, Deserialize)]
pub struct AssetJob<O> {
    pub target: PathBuf,
    /// Explicit inputs, emitted in this order
    #[serde(default)]
    pub sources: Option<Vec<PathBuf>>,
    /// Alternatively, every file in this directory, sorted by name
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Extension filter for `source_dir` (without the dot)
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(flatten)]
    pub options: O,
}

/// Define mirror header
#[derive(Debug, Deserialize)]
pub struct DefineJob {
    pub target: PathBuf,
    #[serde(flatten)]
    pub options: DefineMirrorOptions,
}

/// Fully resolved unit of work
#[derive(Debug)]
pub struct PlannedJob {
    pub action: BuildAction,
    pub target: PathBuf,
    pub sources: Vec<PathBuf>,
}

impl Manifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let mut manifest = Self::parse(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(manifest)
    }

    /// Parse manifest from string; paths resolve against the current directory
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid manifest")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn resolve_sources<O>(&self, job: &AssetJob<O>) -> Result<Vec<PathBuf>> {
        match (&job.sources, &job.source_dir) {
            (Some(_), Some(_)) => anyhow::bail!(
                "{}: set either 'sources' or 'source_dir', not both",
                job.target.display()
            ),
            (None, None) => anyhow::bail!(
                "{}: no inputs, set 'sources' or 'source_dir'",
                job.target.display()
            ),
            (Some(sources), None) => Ok(sources.iter().map(|s| self.resolve(s)).collect()),
            (None, Some(dir)) => list_dir(&self.resolve(dir), job.extension.as_deref()),
        }
    }

    /// Every job in declaration order: icons, then fonts, then defines.
    pub fn plan(&self) -> Result<Vec<PlannedJob>> {
        let mut jobs = Vec::new();

        for job in &self.icons {
            jobs.push(PlannedJob {
                action: BuildAction::Icons(job.options.clone()),
                target: self.resolve(&job.target),
                sources: self.resolve_sources(job)?,
            });
        }
        for job in &self.fonts {
            jobs.push(PlannedJob {
                action: BuildAction::Fonts(job.options.clone()),
                target: self.resolve(&job.target),
                sources: self.resolve_sources(job)?,
            });
        }
        for job in &self.defines {
            jobs.push(PlannedJob {
                action: BuildAction::DefineMirror(job.options.clone()),
                target: self.resolve(&job.target),
                sources: Vec::new(),
            });
        }

        Ok(jobs)
    }
}

/// Files directly inside `dir`, sorted by file name
fn list_dir(dir: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = match extension {
            Some(ext) => entry.path().extension().and_then(|e| e.to_str()) == Some(ext),
            None => true,
        };
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Check that every input exists and every target directory is present
pub fn validate(manifest: &Manifest) -> Result<()> {
    for job in manifest.plan()? {
        for source in &job.sources {
            if !source.is_file() {
                anyhow::bail!(
                    "{} source not found for {}: {}",
                    job.action.name(),
                    job.target.display(),
                    source.display()
                );
            }
        }
        let dir = match job.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            anyhow::bail!("Target directory does not exist: {}", dir.display());
        }
    }
    Ok(())
}

/// Regenerate every header; stops at the first failure
pub fn build_all(manifest: &Manifest) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for job in manifest.plan()? {
        tracing::debug!("Running {} -> {}", job.action.name(), job.target.display());
        let target = job
            .action
            .run(std::slice::from_ref(&job.target), &job.sources, &manifest.environment)
            .with_context(|| format!("Failed to generate {}", job.target.display()))?;
        written.push(target);
    }
    Ok(written)
}

/// Render every header in memory and return the targets that are missing or stale
pub fn check_all(manifest: &Manifest) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for job in manifest.plan()? {
        let header = job
            .action
            .render(std::slice::from_ref(&job.target), &job.sources, &manifest.environment)
            .with_context(|| format!("Failed to render {}", job.target.display()))?;
        if header.is_current() {
            tracing::info!("✓ {} in sync", job.target.display());
        } else {
            tracing::warn!("✗ {} out of sync", job.target.display());
            stale.push(job.target);
        }
    }
    Ok(stale)
}
