//! module-gen library
//!
//! Build-time generators that turn engine module assets into C++ headers:
//! SVG icon sets, raw font blobs and a mirror of the profiler's preprocessor
//! defines. Each generator is a pure function of its ordered inputs and the
//! [`BuildEnvironment`]; every run regenerates its target from scratch.

pub mod actions;
pub mod defines;
pub mod env;
pub mod error;
pub mod fonts;
pub mod header;
pub mod icons;
pub mod manifest;
pub mod naming;

pub use actions::BuildAction;
pub use defines::{generate_define_mirror, generate_define_mirror_from_env, DefineMirrorOptions};
pub use env::{BuildEnvironment, DefineEntry, DefineValue, StaticEnvironment};
pub use error::{GenError, Result};
pub use fonts::{generate_font_header, FontBlobOptions};
pub use header::GeneratedHeader;
pub use icons::{generate_icon_header, IconSetOptions};
pub use naming::constant_name;
