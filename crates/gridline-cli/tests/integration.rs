//! Integration tests for the gridline CLI.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Path to the gridline binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gridline"))
}

const RECT_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <rect id="box" x="20" y="20" width="60" height="40"/>
  <rect id="twin" x="20" y="20" width="60" height="40"/>
</svg>"#;

fn write_svg(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn svg_output_has_one_line_per_distinct_edge() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);

    let output = Command::new(binary_path())
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("id=\"grid-lines\" inkscape:label=\"Grid Lines\""), "Should have the grid layer");
    assert_eq!(count(&stdout, "<line"), 4, "Two identical rects share 4 lines:\n{}", stdout);
    assert!(
        stdout.contains("x1=\"0.0000\" y1=\"20.0000\" x2=\"100.0000\" y2=\"20.0000\"")
            || stdout.contains("x1=\"100.0000\" y1=\"20.0000\" x2=\"0.0000\" y2=\"20.0000\""),
        "Top edge should span the artboard:\n{}",
        stdout
    );
    assert!(stdout.contains("stroke-width=\"1\""));
    assert!(stdout.contains("fill=\"none\""));
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn json_output_has_segments_and_stats() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);

    let output = Command::new(binary_path())
        .args([input.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");

    assert_eq!(json["layer"], "Grid Lines");
    assert_eq!(json["segments"].as_array().map(|a| a.len()), Some(4));
    assert_eq!(json["stats"]["edges"], 8);
    assert_eq!(json["stats"]["duplicates"], 4);
    assert_eq!(json["stats"]["emitted"], 4);
    assert_eq!(json["artboard"]["width"], 100.0);
    assert_eq!(json["artboard"]["y_axis"], "down");
    assert!(json.get("lines").is_none());
}

#[test]
fn select_limits_the_input() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(
        dir.path(),
        "two.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <rect id="a" x="10" y="10" width="10" height="10"/>
  <path id="b" d="M 50 10 L 50 90 L 60 90 Z"/>
</svg>"#,
    );

    let output = Command::new(binary_path())
        .args([input.to_str().unwrap(), "--select", "b", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let lines = json["segments"].as_array().unwrap();
    assert_eq!(lines.len(), 3, "a triangle has three lines: {:?}", lines);
    assert_eq!(lines[0]["x1"], 50.0);
    assert_eq!(lines[0]["x2"], 50.0);
    // Nothing from the unselected rect at y = 10..20
    assert!(lines.iter().all(|l| l["y1"] != 20.0 && l["x1"] != 20.0));
}

#[test]
fn unknown_selection_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);

    let output = Command::new(binary_path())
        .args([input.to_str().unwrap(), "--select", "missing"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn empty_document_reports_no_selection() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(
        dir.path(),
        "empty.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"></svg>"#,
    );

    let output = Command::new(binary_path())
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No selection"));
    assert!(output.stdout.is_empty());
}

#[test]
fn layer_name_avoids_existing_ids() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(
        dir.path(),
        "layered.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="Guides"><rect x="10" y="10" width="10" height="10"/></g>
</svg>"#,
    );

    let output = Command::new(binary_path())
        .args([input.to_str().unwrap(), "--layer", "Guides"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("id=\"guides-2\" inkscape:label=\"Guides 2\""), "{}", stdout);
}

#[test]
fn layer_id_avoids_existing_ids() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(
        dir.path(),
        "ids.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="grid-lines"><rect x="10" y="10" width="10" height="10"/></g>
</svg>"#,
    );

    let output = Command::new(binary_path())
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("id=\"grid-lines-2\" inkscape:label=\"Grid Lines 2\""), "{}", stdout);
    assert!(!stdout.contains("id=\"Grid Lines"), "ids carry no spaces:\n{}", stdout);
}

#[test]
fn config_file_and_artboard_override() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);
    let config = dir.path().join("grid.yaml");
    fs::write(&config, "layer_name: Construction\nstroke:\n  width: 0.5\n").unwrap();

    let output = Command::new(binary_path())
        .args([
            input.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--artboard",
            "0 0 200 50",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("viewBox=\"0 0 200 50\""));
    assert!(stdout.contains("id=\"construction\" inkscape:label=\"Construction\""));
    assert!(stdout.contains("stroke-width=\"0.5\""));
    // y = 60 is below the 50-unit artboard, so only 3 of the 4 lines fit.
    assert_eq!(count(&stdout, "<line"), 3);
}

#[test]
fn writes_output_file_and_png() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);
    let out_svg = dir.path().join("grid.svg");
    let out_png = dir.path().join("grid.png");

    let output = Command::new(binary_path())
        .args([
            input.to_str().unwrap(),
            "-o",
            out_svg.to_str().unwrap(),
            "--png",
            out_png.to_str().unwrap(),
            "--png-scale",
            "1",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(&out_svg).unwrap();
    assert_eq!(count(&written, "<line"), 4);
    let png = fs::read(&out_png).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn reads_svg_from_stdin() {
    let mut child = Command::new(binary_path())
        .args(["-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");

    child.stdin.take().unwrap().write_all(RECT_SVG.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["segments"].as_array().map(|a| a.len()), Some(4));
}

#[test]
fn bad_tolerance_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_svg(dir.path(), "rect.svg", RECT_SVG);

    let output = Command::new(binary_path())
        .args([input.to_str().unwrap(), "--tolerance", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tolerance"));
}

#[test]
fn example_config_parses_back() {
    let output = Command::new(binary_path())
        .arg("--example-config")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let yaml: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).expect("valid YAML");
    assert_eq!(yaml["tolerance"].as_f64(), Some(0.001));
}
