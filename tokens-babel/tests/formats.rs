//! Exact output tests (token tree → JSON / SCSS)

use tokens_babel::{render, EmitContext, OutputFormat};
use tokens_parser::parse;

const SPACING: &str = "spacing:\n  sm: 4px\n  md: 8px\n";

#[test]
fn test_spacing_scss_layout() {
    let tree = parse(SPACING);
    let scss = render(&tree, OutputFormat::Scss, "ns", "tokens").unwrap();

    insta::assert_snapshot!(scss, @r#"
    // DO NOT EDIT: This file is automatically generated by a build task

    $ns-spacing-sm: 4px !default;
    $ns-spacing-md: 8px !default;

    $ns-namespace: "ns" !default;
    $ns-tokens: (
        'spacing': (
            'sm': $ns-spacing-sm,
            'md': $ns-spacing-md
        ),
        'namespace': $ns-namespace
    );

    @function ns-token($keys...) {
        $map: $ns-tokens;
        @each $key in $keys {
            $map: map-get($map, $key);
        }
        @return $map;
    }
    "#);
}

#[test]
fn test_spacing_json_with_namespace() {
    let tree = parse(SPACING);
    let json = render(&tree, OutputFormat::Json, "ns", "tokens").unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "ns_tokens": {
                "spacing": {"sm": "4px", "md": "8px"},
                "namespace": "ns"
            }
        })
    );
}

#[test]
fn test_hyphenated_namespace() {
    let tree = parse(SPACING);

    let json = render(&tree, OutputFormat::Json, "my-ds", "tokens").unwrap();
    assert!(json.contains("\"my_ds_tokens\""));
    assert!(json.contains("\"namespace\": \"my-ds\""));

    let scss = render(&tree, OutputFormat::Scss, "my-ds", "tokens").unwrap();
    assert!(scss.contains("$my-ds-spacing-sm: 4px !default;"));
    assert!(scss.contains("$my-ds-namespace: \"my-ds\" !default;"));
    assert!(scss.contains("@function my-ds-token($keys...) {"));
}

#[test]
fn test_fixture_scss_sections() {
    let tree = parse(include_str!("fixtures/tokens.yaml"));
    let scss = OutputFormat::Scss
        .formatter()
        .serialize(
            &tree,
            &EmitContext {
                namespace: "esds",
                base_name: "tokens",
            },
        )
        .unwrap();

    assert!(scss.contains(
        "$esds-color-background: #ffffff !default;\n\n$esds-spacing-sm: 4px !default;\n"
    ));
    assert!(scss.contains("$esds-color-link: #1a73e8 !default;\n"));
    assert!(scss.contains("$esds-button-color: null !default;\n"));
    assert!(scss.contains("$esds-font-stack-0: Helvetica !default;\n"));
    assert!(scss.contains("    'font-stack': (\n        '0': $esds-font-stack-0,\n"));
}
