//! File-level conversion tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokens_babel::{convert, convert_all, ConvertOptions, OutputFormat};
use tokens_parser::ResolveDiagnostic;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}

#[test]
fn test_writes_both_formats() {
    let out = TempDir::new().unwrap();
    let options = ConvertOptions::new("esds", out.path().join("dist"));

    let report = convert(&fixture_path("tokens.yaml"), &options);

    assert!(report.failures.is_empty());
    assert_eq!(
        report.written,
        vec![
            out.path().join("dist").join("tokens.json"),
            out.path().join("dist").join("tokens.scss"),
        ]
    );

    let json: serde_json::Value =
        serde_json::from_str(&read(&out.path().join("dist/tokens.json"))).unwrap();
    assert_eq!(json["esds_tokens"]["spacing"]["md"], "8px");
    assert_eq!(json["esds_tokens"]["namespace"], "esds");

    let scss = read(&out.path().join("dist/tokens.scss"));
    assert!(scss.contains("$esds-namespace: \"esds\" !default;"));
}

#[test]
fn test_only_requested_formats() {
    let out = TempDir::new().unwrap();
    let options = ConvertOptions::new("esds", out.path()).with_formats([OutputFormat::Scss]);

    let report = convert(&fixture_path("brand_colors.yaml"), &options);

    assert!(report.is_clean());
    assert!(out.path().join("brand_colors.scss").exists());
    assert!(!out.path().join("brand_colors.json").exists());

    let scss = read(&out.path().join("brand_colors.scss"));
    assert!(scss.contains("$esds-link: #1a73e8 !default;"));
    assert!(scss.contains("$esds-brand-colors: ("));
}

#[test]
fn test_missing_source_writes_nothing() {
    let out = TempDir::new().unwrap();
    let options = ConvertOptions::new("esds", out.path().join("dist"));

    let report = convert(&out.path().join("nope.yaml"), &options);

    assert!(report.skipped);
    assert!(report.written.is_empty());
    assert!(!out.path().join("dist").exists());
}

#[test]
fn test_malformed_source_still_emits() {
    let out = TempDir::new().unwrap();
    let options = ConvertOptions::new("esds", out.path());

    let report = convert(&fixture_path("malformed.yaml"), &options);

    assert!(report.load_error.is_some());
    assert_eq!(report.written.len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&read(&out.path().join("malformed.json"))).unwrap();
    assert_eq!(json, serde_json::json!({"esds_malformed": {"namespace": "esds"}}));
}

#[test]
fn test_unresolved_alias_is_reported_and_embedded() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("aliases.yaml");
    fs::write(&source, "link: \"!{*missingX}\"\n").unwrap();
    let options = ConvertOptions::new("esds", dir.path().join("out"));

    let report = convert(&source, &options);

    assert_eq!(
        report.diagnostics,
        vec![ResolveDiagnostic::UnresolvedAlias {
            name: "missingX".to_string()
        }]
    );
    let scss = read(&dir.path().join("out/aliases.scss"));
    assert!(scss.contains("$esds-link: CANNOT FIND VALUE FOR missingX !default;"));
}

#[test]
fn test_unwritable_output_is_a_per_format_failure() {
    let dir = TempDir::new().unwrap();
    // a file where the output directory should be
    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "").unwrap();
    let options = ConvertOptions::new("esds", &blocked);

    let report = convert(&fixture_path("tokens.yaml"), &options);

    assert!(report.written.is_empty());
    let failed: Vec<_> = report.failures.iter().map(|(format, _)| *format).collect();
    assert_eq!(failed, vec![OutputFormat::Json, OutputFormat::Scss]);
}

#[test]
fn test_convert_all_is_independent_per_source() {
    let out = TempDir::new().unwrap();
    let options = ConvertOptions::new("esds", out.path());
    let sources = [
        fixture_path("tokens.yaml"),
        out.path().join("missing.yaml"),
        fixture_path("brand_colors.yaml"),
    ];

    let reports = convert_all(&sources, &options);

    assert_eq!(reports.len(), 3);
    assert!(!reports[0].skipped);
    assert!(reports[1].skipped);
    assert!(!reports[2].skipped);
    assert!(out.path().join("tokens.json").exists());
    assert!(out.path().join("brand_colors.json").exists());
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("tokens.yaml");
    let options = ConvertOptions::new("esds", dir.path().join("out"))
        .with_formats([OutputFormat::Json]);

    fs::write(&source, "radius: 2px\n").unwrap();
    convert(&source, &options);
    fs::write(&source, "radius: 4px\n").unwrap();
    convert(&source, &options);

    let json = read(&dir.path().join("out/tokens.json"));
    assert!(json.contains("\"radius\": \"4px\""));
    assert!(!json.contains("2px"));
}

#[test]
fn test_pointer_chains_reach_the_output() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("chained.yaml");
    fs::write(
        &source,
        "base: &base \"#0a0a0a\"\ntext: &text *base\naccent: &accent *nowhere\nloop: &loop *loop\ntitle: \"!{*text}\"\n",
    )
    .unwrap();
    let options = ConvertOptions::new("esds", dir.path().join("out"));

    let report = convert(&source, &options);

    assert!(report.load_error.is_none(), "{:?}", report.load_error);
    let scss = read(&dir.path().join("out/chained.scss"));
    assert!(scss.contains("$esds-text: #0a0a0a !default;"));
    assert!(scss.contains("$esds-title: #0a0a0a !default;"));
    assert!(scss.contains("$esds-accent: CANNOT FIND VALUE FOR nowhere !default;"));
    assert!(scss.contains("$esds-loop: CYCLIC REFERENCE FOR loop -> loop !default;"));

    let json: serde_json::Value =
        serde_json::from_str(&read(&dir.path().join("out/chained.json"))).unwrap();
    assert_eq!(json["esds_chained"]["text"], "#0a0a0a");
}
