use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn generator_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("insta485generator"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write fixture");
}

fn make_site() -> TempDir {
    let input = TempDir::new().expect("input");
    let root = input.path();
    write(
        root,
        "config.json",
        r#"[
            {"template": "index.html", "url": "/", "context": {"words": ["hello", "world"]}},
            {"template": "index.html", "url": "/about/", "context": {"words": ["about"]}}
        ]"#,
    );
    write(
        root,
        "templates/index.html",
        "<ul>{% for w in words %}<li>{{ w }}</li>{% endfor %}</ul>\n",
    );
    write(root, "static/css/style.css", "body {}");
    input
}

#[test]
fn builds_into_default_output_dir() {
    let input = make_site();
    generator_cmd()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let out = input.path().join("html");
    assert_eq!(
        fs::read_to_string(out.join("index.html")).expect("index"),
        "<ul><li>hello</li><li>world</li></ul>\n"
    );
    assert!(out.join("about/index.html").is_file());
    assert!(out.join("css/style.css").is_file());
}

#[test]
fn output_flag_overrides_destination() {
    let input = make_site();
    let dest = TempDir::new().expect("dest");
    let out = dest.path().join("site");
    generator_cmd()
        .arg(input.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    assert!(out.join("index.html").is_file());
    assert!(!input.path().join("html").exists());
}

#[test]
fn verbose_prints_progress_per_page_and_static_copy() {
    let input = make_site();
    let assert = generator_cmd()
        .arg(input.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(contains("Rendered index.html -> "))
        .stdout(contains("Copied "));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert_eq!(stdout.lines().filter(|l| l.starts_with("Rendered ")).count(), 2);
    assert!(stdout.contains(&format!("{}", Path::new("about").join("index.html").display())));
}

#[test]
fn missing_config_exits_one_and_names_file() {
    let input = make_site();
    fs::remove_file(input.path().join("config.json")).expect("rm");
    generator_cmd()
        .arg(input.path())
        .assert()
        .code(1)
        .stderr(contains("insta485generator error: '"))
        .stderr(contains("config.json' not found"));
    assert!(!input.path().join("html").exists());
}

#[test]
fn malformed_config_exits_one_with_detail_line() {
    let input = make_site();
    write(input.path(), "config.json", "[{\"template\": \"index.html\",]");
    let assert = generator_cmd().arg(input.path()).assert().code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8");
    let mut lines = stderr.lines();
    let first = lines.next().expect("first line");
    assert!(first.starts_with("insta485generator error: '"), "got: {first}");
    assert!(first.ends_with("config.json'"), "got: {first}");
    assert!(lines.next().is_some(), "expected JSON detail line");
}

#[test]
fn missing_templates_dir_exits_one() {
    let input = make_site();
    fs::remove_dir_all(input.path().join("templates")).expect("rm");
    generator_cmd()
        .arg(input.path())
        .assert()
        .code(1)
        .stderr(contains("templates' not found"));
}

#[test]
fn template_syntax_error_exits_one_and_names_template() {
    let input = make_site();
    write(input.path(), "templates/index.html", "{% for w in words %}{{ w }}");
    generator_cmd()
        .arg(input.path())
        .assert()
        .code(1)
        .stderr(contains("insta485generator error: 'index.html'"));
}

#[test]
fn nonexistent_input_dir_is_a_usage_error() {
    let tmp = TempDir::new().expect("tmp");
    generator_cmd()
        .arg(tmp.path().join("nope"))
        .assert()
        .code(2)
        .stderr(contains("does not exist"));
}
