//! Build actions in the `(targets, sources, env)` shape a build driver calls

use std::path::{Path, PathBuf};

use crate::defines::{self, DefineMirrorOptions};
use crate::env::BuildEnvironment;
use crate::error::{GenError, Result};
use crate::fonts::{self, FontBlobOptions};
use crate::header::GeneratedHeader;
use crate::icons::{self, IconSetOptions};

/// One of the three generators, configured and ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildAction {
    Icons(IconSetOptions),
    Fonts(FontBlobOptions),
    /// Ignores its sources; reads the environment's defines instead
    DefineMirror(DefineMirrorOptions),
}

impl BuildAction {
    pub fn name(&self) -> &'static str {
        match self {
            BuildAction::Icons(_) => "icons",
            BuildAction::Fonts(_) => "fonts",
            BuildAction::DefineMirror(_) => "defines",
        }
    }

    /// Render the header for `targets[0]` without writing it.
    pub fn render(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
        env: &dyn BuildEnvironment,
    ) -> Result<GeneratedHeader> {
        let target = primary_target(targets)?;
        match self {
            BuildAction::Icons(opts) => icons::render_icon_header(target, sources, env, opts),
            BuildAction::Fonts(opts) => fonts::render_font_header(target, sources, env, opts),
            BuildAction::DefineMirror(opts) => {
                defines::render_define_mirror(target, env.cpp_defines(), opts)
            }
        }
    }

    /// Regenerate `targets[0]` from scratch. Returns the written path.
    pub fn run(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
        env: &dyn BuildEnvironment,
    ) -> Result<PathBuf> {
        let target = primary_target(targets)?;
        match self {
            BuildAction::Icons(opts) => icons::generate_icon_header(target, sources, env, opts)?,
            BuildAction::Fonts(opts) => fonts::generate_font_header(target, sources, env, opts)?,
            BuildAction::DefineMirror(opts) => {
                defines::generate_define_mirror_from_env(target, env, opts)?
            }
        }
        Ok(target.to_path_buf())
    }
}

fn primary_target(targets: &[PathBuf]) -> Result<&Path> {
    targets
        .first()
        .map(PathBuf::as_path)
        .ok_or(GenError::MissingTarget)
}
