//! Integration tests for module-gen
//!
//! Drives the binary end to end: write inputs -> generate -> inspect header

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn module_gen(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_module-gen"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run module-gen")
}

/// Test SVG icons -> icon set header
#[test]
fn test_icons_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("IconArrowDown.svg"), "<svg/>").unwrap();
    std::fs::write(dir.path().join("HTTPRequest.svg"), "<g/>").unwrap();

    let output = module_gen(
        dir.path(),
        &["icons", "-o", "icons.gen.h", "IconArrowDown.svg", "HTTPRequest.svg"],
    );
    assert!(output.status.success(), "module-gen icons command failed");

    let text = std::fs::read_to_string(dir.path().join("icons.gen.h")).unwrap();
    assert!(text.starts_with("/* THIS FILE IS GENERATED DO NOT EDIT */\n"));
    assert!(text.contains("static const int game_tools_theme_icons_count = 2;"));
    assert!(text.contains("#ifdef MODULE_SVG_ENABLED"));
    assert!(text.contains("\t\"\\x3c\\x73\\x76\\x67\\x2f\\x3e\",\n"));
    assert!(text.contains("\tICON_ARROW_DOWN,\n\tHTTP_REQUEST,\n"));
}

/// Test that --no-svg removes the embedded sources entirely
#[test]
fn test_icons_without_svg() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("Play.svg"), "<svg/>").unwrap();

    let output = module_gen(dir.path(), &["icons", "-o", "icons.gen.h", "--no-svg", "Play.svg"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(dir.path().join("icons.gen.h")).unwrap();
    assert!(!text.contains("game_tools_theme_icons_sources"));
    assert!(text.contains("game_tools_theme_icons_names"));
}

/// Test font bytes are emitted verbatim
#[test]
fn test_fonts_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("tiny.ttf"), [0x00u8, 0xFF, 0x10]).unwrap();

    let output = module_gen(dir.path(), &["fonts", "-o", "fonts.gen.h", "tiny.ttf"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(dir.path().join("fonts.gen.h")).unwrap();
    assert!(text.contains("static const int _font_tiny_size = 3;"));
    assert!(text.contains("0,\n255,\n16,\n"));
}

/// Test define mirroring filters by prefix
#[test]
fn test_defines_command() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = module_gen(
        dir.path(),
        &[
            "defines",
            "-o",
            "tracy.gen.h",
            "-D",
            "TRACY_ENABLE=1",
            "-D",
            "TRACY_ON_DEMAND=1",
            "-D",
            "OTHER_FLAG=1",
        ],
    );
    assert!(output.status.success());

    let text = std::fs::read_to_string(dir.path().join("tracy.gen.h")).unwrap();
    assert!(text.contains("#define TRACY_ENABLE\n#define TRACY_ON_DEMAND\n"));
    assert!(!text.contains("OTHER_FLAG"));
}

/// Test a missing input fails the step and keeps the previous header
#[test]
fn test_missing_input_keeps_previous_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("fonts.gen.h"), "previous").unwrap();

    let output = module_gen(dir.path(), &["fonts", "-o", "fonts.gen.h", "missing.ttf"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.ttf"), "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("fonts.gen.h")).unwrap(),
        "previous"
    );
}

/// Test manifest build, then check, then drift detection
#[test]
fn test_manifest_build_and_check() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("tool_icons")).unwrap();
    std::fs::create_dir(dir.path().join("gen")).unwrap();
    std::fs::write(dir.path().join("tool_icons/Move.svg"), "<m/>").unwrap();
    std::fs::write(dir.path().join("tool_icons/Rotate.svg"), "<r/>").unwrap();
    std::fs::write(
        dir.path().join("modgen.toml"),
        r#"
[environment]
vector_graphics = true
debug_features = true

[[environment.defines]]
name = "TRACY_ENABLE"

[[environment.defines]]
name = "TRACY_PATHS"
value = ["thirdparty/tracy"]

[[icons]]
target = "gen/icons.gen.h"
source_dir = "tool_icons"
extension = "svg"

[[defines]]
target = "gen/tracy.gen.h"
"#,
    )
    .unwrap();

    assert!(!module_gen(dir.path(), &["check"]).status.success());
    assert!(module_gen(dir.path(), &["build"]).status.success());
    assert!(module_gen(dir.path(), &["check"]).status.success());

    let icons = std::fs::read_to_string(dir.path().join("gen/icons.gen.h")).unwrap();
    assert!(icons.contains("\tMOVE,\n\tROTATE,\n"));
    let tracy = std::fs::read_to_string(dir.path().join("gen/tracy.gen.h")).unwrap();
    assert!(tracy.contains("#define TRACY_ENABLE\n"));
    assert!(!tracy.contains("TRACY_PATHS"));

    // Build is deterministic
    assert!(module_gen(dir.path(), &["build"]).status.success());
    assert_eq!(
        icons,
        std::fs::read_to_string(dir.path().join("gen/icons.gen.h")).unwrap()
    );

    std::fs::write(dir.path().join("tool_icons/Scale.svg"), "<s/>").unwrap();
    assert!(!module_gen(dir.path(), &["check"]).status.success());
}
