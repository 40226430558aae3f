use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn config_file_controls_class_prefix() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello\n").unwrap();

    let config = dir.path().join("quill.toml");
    fs::write(
        &config,
        r#"[render]
class_prefix = "doc"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("render").arg(&input).arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"<h1 class="doc-h1">Hello</h1>"#));
}

#[test]
fn extra_flag_overrides_config_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello\n").unwrap();

    let config = dir.path().join("quill.toml");
    fs::write(&config, "[render]\nclass_prefix = \"doc\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("render")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--extra-class-prefix")
        .arg("page");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"class="page-h1""#))
        .stdout(predicate::str::contains("doc-h1").not());
}

#[test]
fn serialize_markers_come_from_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, "<p><em>soft</em></p><ul><li>item</li></ul>").unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("serialize")
        .arg(&input)
        .arg("--extra-emphasis")
        .arg("_")
        .arg("--extra-bullet")
        .arg("*");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_soft_\n\n* item"));
}

#[test]
fn frontmatter_is_kept_when_stripping_is_disabled() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "---\ntitle: x\n---\nBody\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("render")
        .arg(&input)
        .arg("--extra-strip-frontmatter")
        .arg("false");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("title: x"));
}

#[test]
fn out_of_range_heading_level_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("render")
        .arg(&input)
        .arg("--extra-max-heading-level")
        .arg("9");

    cmd.assert().failure().stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quill");
    cmd.arg("render")
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("absent.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
