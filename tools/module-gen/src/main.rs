//! module-gen - engine module source generator
//!
//! Regenerates the headers that embed module assets (SVG icons, fonts) and
//! mirror profiler defines, either from a modgen.toml manifest or one header
//! at a time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use module_gen::manifest::{self, Manifest, DEFAULT_MANIFEST};
use module_gen::{
    BuildAction, DefineEntry, DefineMirrorOptions, FontBlobOptions, IconSetOptions,
    StaticEnvironment,
};

#[derive(Parser)]
#[command(name = "module-gen")]
#[command(about = "Engine module source generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate every header listed in a manifest
    Build {
        /// Path to modgen.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Check that generated headers are in sync with their inputs
    Check {
        /// Path to modgen.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Embed SVG icons into a header
    Icons {
        /// Output header
        #[arg(short, long)]
        output: PathBuf,

        /// Icon files, in enum order
        sources: Vec<PathBuf>,

        /// Build without vector graphics support (omits embedded sources)
        #[arg(long)]
        no_svg: bool,
    },

    /// Embed font files into a header
    Fonts {
        /// Output header
        #[arg(short, long)]
        output: PathBuf,

        /// Font files
        sources: Vec<PathBuf>,

        /// Build without debug features (omits every font)
        #[arg(long)]
        no_debug: bool,
    },

    /// Mirror prefixed preprocessor defines into a header
    Defines {
        /// Output header
        #[arg(short, long)]
        output: PathBuf,

        /// Define name prefix to mirror
        #[arg(long, default_value = "TRACY_")]
        prefix: String,

        /// Active define, as NAME or NAME=VALUE (repeatable)
        #[arg(short = 'D', long = "define")]
        defines: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { manifest } => {
            tracing::info!("Building headers from {:?}", manifest);
            let config = Manifest::load(&manifest)?;
            manifest::validate(&config)?;
            let written = manifest::build_all(&config)?;
            tracing::info!("Generated {} headers", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking headers from {:?}", manifest);
            let config = Manifest::load(&manifest)?;
            let stale = manifest::check_all(&config)?;
            if !stale.is_empty() {
                anyhow::bail!(
                    "{} generated headers are out of sync. Run 'module-gen build' to regenerate.",
                    stale.len()
                );
            }
            tracing::info!("All headers are in sync!");
        }

        Commands::Icons {
            output,
            sources,
            no_svg,
        } => {
            let env = StaticEnvironment::new().with_vector_graphics(!no_svg);
            BuildAction::Icons(IconSetOptions::default()).run(&[output], &sources, &env)?;
        }

        Commands::Fonts {
            output,
            sources,
            no_debug,
        } => {
            let env = StaticEnvironment::new().with_debug_features(!no_debug);
            BuildAction::Fonts(FontBlobOptions::default()).run(&[output], &sources, &env)?;
        }

        Commands::Defines {
            output,
            prefix,
            defines,
        } => {
            let env = defines
                .iter()
                .map(|d| DefineEntry::parse(d))
                .fold(StaticEnvironment::new(), StaticEnvironment::with_define);
            let options = DefineMirrorOptions {
                prefix,
                ..DefineMirrorOptions::default()
            };
            BuildAction::DefineMirror(options).run(&[output], &[], &env)?;
        }
    }

    Ok(())
}
