use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_postkit")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap()
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

// -- tag --

#[test]
fn tag_stdin_mode() {
    let assert = cmd()
        .arg("tag")
        .write_stdin(fixture("article.md"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("article.tagged.md"));
}

#[test]
fn tag_stdin_already_tagged() {
    let tagged = fixture("article.tagged.md");
    let assert = cmd().arg("tag").write_stdin(tagged.clone()).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, tagged);
}

#[test]
fn tag_posts_directory() {
    let dir = TempDir::new().unwrap();
    let ja = dir.path().join("posts/006/ja.md");
    let en = dir.path().join("posts/006/en.md");
    write(&ja, &fixture("article.md"));
    write(&en, &fixture("article.en.md"));

    cmd()
        .arg("tag")
        .arg(dir.path().join("posts"))
        .assert()
        .success()
        .stdout(predicate::str::contains("tagged"))
        .stdout(predicate::str::contains("(8 markers)"))
        .stdout(predicate::str::contains("(already tagged)"))
        .stdout(predicate::str::contains("updated 1 of 2 files"));

    assert_eq!(fs::read_to_string(&ja).unwrap(), fixture("article.tagged.md"));
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/006/ja.md.backup")).unwrap(),
        fixture("article.md")
    );
    assert!(!dir.path().join("posts/006/en.md.backup").exists());
}

#[test]
fn tag_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let ja = dir.path().join("ja.md");
    write(&ja, &fixture("article.md"));

    cmd()
        .args(["tag", "--dry-run"])
        .arg(&ja)
        .assert()
        .success()
        .stdout(predicate::str::contains("would tag"))
        .stdout(predicate::str::contains("would update 1 of 1 files"));

    assert_eq!(fs::read_to_string(&ja).unwrap(), fixture("article.md"));
}

#[test]
fn tag_no_backup() {
    let dir = TempDir::new().unwrap();
    let ja = dir.path().join("ja.md");
    write(&ja, &fixture("article.md"));

    cmd().args(["tag", "--no-backup"]).arg(&ja).assert().success();

    assert_eq!(fs::read_to_string(&ja).unwrap(), fixture("article.tagged.md"));
    assert!(!dir.path().join("ja.md.backup").exists());
}

#[test]
fn tag_glob_without_matches() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg("tag")
        .arg(format!("{}/*.md", dir.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("updated 0 of 0 files"))
        .stderr(predicate::str::contains("no files matched"));
}

// -- validate --

#[test]
fn validate_stdin_text() {
    cmd()
        .arg("validate")
        .write_stdin(fixture("article.tagged.md"))
        .assert()
        .success()
        .stdout("<stdin>: 8 tags, sequential\n");
}

#[test]
fn validate_json_report() {
    let assert = cmd()
        .args(["validate", "--format", "json"])
        .arg(fixture_path("article.en.md"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["total_tags"], 3);
    assert_eq!(value[0]["tag_numbers"], serde_json::json!([1, 2, 3]));
    assert_eq!(value[0]["is_sequential"], true);
    assert_eq!(value[0]["duplicates"], false);
}

#[test]
fn validate_out_of_order_warns() {
    cmd()
        .arg("validate")
        .write_stdin("<!-- s1 -->\na\n<!-- s3 -->\nb\n<!-- s2 -->\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 tags, out of sequence"))
        .stdout(predicate::str::contains("numbers: 1, 3, 2"))
        .stderr(predicate::str::contains("not sequential"));
}

#[test]
fn validate_strict_fails() {
    cmd()
        .args(["validate", "--strict"])
        .write_stdin("<!-- s1 -->\n<!-- s1 -->\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed sentence tags"));
}

#[test]
fn validate_strict_passes_on_untagged() {
    cmd()
        .args(["validate", "--strict"])
        .write_stdin("plain text\n")
        .assert()
        .success()
        .stdout("<stdin>: no tags\n");
}

#[test]
fn validate_unknown_format() {
    cmd()
        .args(["validate", "--format", "yaml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: yaml"));
}

// -- align --

#[test]
fn align_reports_missing_sentences() {
    let dir = TempDir::new().unwrap();
    let ja = dir.path().join("ja.md");
    write(&ja, &fixture("article.tagged.md"));

    cmd()
        .arg("align")
        .arg(&ja)
        .arg(fixture_path("article.en.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "s1 [h1|h1]\n  < # 日本語の敬語入門\n  > # An Introduction to Keigo\n",
        ))
        .stdout(predicate::str::contains("s4 [li|-]\n  < - **尊敬語**: 相手を高める表現\n  > (missing)\n"))
        .stderr(predicate::str::contains("missing 5 sentence(s)"));
}

#[test]
fn align_json() {
    let assert = cmd()
        .args(["align", "-f", "json"])
        .arg(fixture_path("article.en.md"))
        .arg(fixture_path("article.en.md"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[1]["left"], rows[1]["right"]);
    assert_eq!(rows[2]["right_block"], "h2");
}

// -- import + check-article --

#[test]
fn import_then_check_article() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().to_str().unwrap();

    cmd()
        .args(["--base-dir", base, "import", "--article-id", "011"])
        .arg(fixture_path("reply.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 sentence tags)"));

    let ja = dir.path().join("src/content/blog/posts/011/ja.md");
    let body = fs::read_to_string(&ja).unwrap();
    assert!(body.starts_with("---\ntitle: \"敬語の基本\""));
    assert!(body.contains("<!-- s1 -->\n# 敬語の基本"));
    assert!(body.contains("<!-- s3 -->\n- **尊敬語**: 相手を高める"));
    assert!(dir
        .path()
        .join("public/images/blog/011/captions.json")
        .is_file());

    write(&dir.path().join("public/images/blog/011/hero.jpg"), "jpeg");

    cmd()
        .args(["--base-dir", base, "check-article", "011"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 error(s), 0 warning(s)"))
        .stdout(predicate::str::contains("article '011' is complete"));
}

#[test]
fn import_keeps_code_blocks_in_body() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().to_str().unwrap();
    let reply = dir.path().join("reply.txt");
    write(
        &reply,
        "```markdown\n---\ntitle: \"Shell\"\nexcerpt: \"x\"\n---\n\n# Shell\n\n```bash\necho hi\n```\n\n## After\n\nKept text.\n```\n",
    );

    cmd()
        .args(["--base-dir", base, "import", "--article-id", "012"])
        .arg(&reply)
        .assert()
        .success();

    let body = fs::read_to_string(dir.path().join("src/content/blog/posts/012/ja.md")).unwrap();
    assert!(body.contains("echo hi"));
    assert!(body.contains("## After"));
    assert!(body.trim_end().ends_with("Kept text."));
}

#[test]
fn import_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().to_str().unwrap();
    let run = || {
        let mut c = cmd();
        c.args(["--base-dir", base, "import", "--article-id", "011"])
            .arg(fixture_path("reply.txt"));
        c
    };
    run().assert().success();
    run()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn check_article_missing() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["--base-dir", dir.path().to_str().unwrap(), "check-article", "404"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("article directory does not exist"))
        .stdout(predicate::str::contains("run with --fix"));
}

#[test]
fn check_article_fix() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("src/content/blog/posts/007/ja.md"),
        &fixture("article.tagged.md"),
    );

    cmd()
        .args(["--base-dir", dir.path().to_str().unwrap(), "check-article", "007", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added publishDate"))
        .stdout(predicate::str::contains("warning: captions.json not found"));

    let meta: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("src/content/blog/posts/007/meta.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(meta["heroImage"], "/images/blog/007/hero.jpg");
    assert!(dir.path().join("public/images/blog/007").is_dir());
}

#[test]
fn config_file_layout() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("postkit.toml");
    write(
        &config,
        "posts_dir = \"content/posts\"\nimages_dir = \"static/img\"\nimages_url = \"/img\"\n",
    );
    write(
        &dir.path().join("content/posts/001/ja.md"),
        &fixture("article.tagged.md"),
    );

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["check-article", "001", "--fix"])
        .assert()
        .success();

    let meta = fs::read_to_string(dir.path().join("content/posts/001/meta.json")).unwrap();
    assert!(meta.contains("\"heroImage\": \"/img/001/hero.jpg\""));
    assert!(dir.path().join("static/img/001").is_dir());
}

#[test]
fn invalid_article_id() {
    cmd()
        .args(["check-article", "../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid article id"));
}

// -- check-keys --

fn keys_fixture(name: &str) -> String {
    fixture_path(&format!("keys/{}", name))
}

#[test]
fn check_keys_reports_unused_and_undefined() {
    cmd()
        .arg("check-keys")
        .arg(keys_fixture("messages/ja.json"))
        .arg(keys_fixture("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("defined: 9, used: 6, matched: 5"))
        .stdout(predicate::str::contains("unused (3):\n  - Header.menu.blog\n  - Unused\n  - Unused.old\n"))
        .stdout(predicate::str::contains("undefined (1):\n  - Header.missing\n"))
        .stdout(predicate::str::contains("fromMarkdown").not());
}

#[test]
fn check_keys_json_format() {
    let assert = cmd()
        .args(["check-keys", "-f", "json"])
        .arg(keys_fixture("messages/ja.json"))
        .arg(keys_fixture("src"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["undefined"], serde_json::json!(["Header.missing"]));
    assert_eq!(value["matched"], 5);
}

#[test]
fn check_keys_strict_fails_on_undefined() {
    cmd()
        .args(["check-keys", "--strict"])
        .arg(keys_fixture("messages/ja.json"))
        .arg(keys_fixture("src"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 translation key(s) used but not defined"));
}

#[test]
fn check_keys_writes_minimal_dictionary() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("messages/ja_minimal.json");

    cmd()
        .arg("check-keys")
        .arg(keys_fixture("messages/ja.json"))
        .arg(keys_fixture("src"))
        .arg("--write-minimal")
        .arg(&out)
        .assert()
        .success();

    let minimal: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        minimal,
        serde_json::json!({
            "Header": {"title": "日本語AIブログ", "menu": {"home": "ホーム"}},
            "Footer": {"copyright": "© 2025 nihongo-ai"}
        })
    );
}

#[test]
fn check_keys_defaults_from_base_dir() {
    cmd()
        .args(["--base-dir", &fixture_path("keys"), "check-keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matched: 5"));
}

#[test]
fn check_keys_missing_src_dir() {
    cmd()
        .arg("check-keys")
        .arg(keys_fixture("messages/ja.json"))
        .arg("/no/such/src")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
