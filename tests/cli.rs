use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const URL_2023: &str = "http://tenhou.net/0/?log=2023010100gm-0029-0000-abcdef1234&tw=2";

fn command_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tenhou-log-urls").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_sample_page(dir: &Path) {
    let html_dir = dir.join("html_files");
    fs::create_dir_all(&html_dir).unwrap();
    fs::write(
        html_dir.join("a.html"),
        format!("<html>\nfoo 四鳳南喰赤 {} bar\n</html>\n", URL_2023),
    )
    .unwrap();
}

#[test]
fn extracts_urls_with_default_directories() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());

    command_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 HTML file(s)"))
        .stdout(predicate::str::contains("Line 2: Found 1 URL(s)"))
        .stdout(predicate::str::contains("tenhou_log_urls_2023_1.txt"))
        .stdout(predicate::str::contains("Total URLs extracted: 1"));

    let written =
        fs::read_to_string(temp_dir.path().join("log_htmls/tenhou_log_urls_2023_1.txt")).unwrap();
    assert_eq!(written, format!("{}\n", URL_2023));
}

#[test]
fn second_run_picks_next_sequence_number() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());

    command_in(temp_dir.path()).assert().success();
    command_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tenhou_log_urls_2023_2.txt"));

    assert!(temp_dir
        .path()
        .join("log_htmls/tenhou_log_urls_2023_1.txt")
        .exists());
    assert!(temp_dir
        .path()
        .join("log_htmls/tenhou_log_urls_2023_2.txt")
        .exists());
}

#[test]
fn no_keyword_lines_reports_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let html_dir = temp_dir.path().join("html_files");
    fs::create_dir_all(&html_dir).unwrap();
    fs::write(html_dir.join("a.html"), format!("{}\n", URL_2023)).unwrap();

    command_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No URLs found!"));

    let output_dir = temp_dir.path().join("log_htmls");
    assert!(output_dir.is_dir());
    assert_eq!(fs::read_dir(output_dir).unwrap().count(), 0);
}

#[test]
fn missing_input_directory_exits_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    command_in(temp_dir.path())
        .arg("does_not_exist")
        .assert()
        .success()
        .stderr(predicate::str::contains("Directory 'does_not_exist' not found!"))
        .stderr(predicate::str::contains("extraction script"));
}

#[test]
fn directory_without_html_files_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let html_dir = temp_dir.path().join("html_files");
    fs::create_dir_all(&html_dir).unwrap();
    fs::write(html_dir.join("notes.txt"), format!("四鳳南喰赤 {}\n", URL_2023)).unwrap();

    command_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete!").not());

    let output_dir = temp_dir.path().join("log_htmls");
    assert!(output_dir.is_dir());
    assert_eq!(fs::read_dir(output_dir).unwrap().count(), 0);
}

#[test]
fn preview_is_truncated_after_five_urls() {
    let temp_dir = TempDir::new().unwrap();
    let html_dir = temp_dir.path().join("html_files");
    fs::create_dir_all(&html_dir).unwrap();
    let page: String = (0..7)
        .map(|i| format!("四鳳南喰赤 http://tenhou.net/0/?log=2023010100gm-0029-0000-{:04}\n", i))
        .collect();
    fs::write(html_dir.join("a.html"), page).unwrap();

    command_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total URLs extracted: 7"))
        .stdout(predicate::str::contains("Preview (first 5 URLs):"))
        .stdout(predicate::str::contains("-0004\n"))
        .stdout(predicate::str::contains("-0005\n").not())
        .stdout(predicate::str::contains("  ... and 2 more"));

    let written =
        fs::read_to_string(temp_dir.path().join("log_htmls/tenhou_log_urls_2023_1.txt")).unwrap();
    assert_eq!(written.lines().count(), 7);
}

#[test]
fn positional_paths_and_explicit_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let pages = temp_dir.path().join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("x.html"), format!("四鳳南喰赤 {}\n", URL_2023)).unwrap();

    command_in(temp_dir.path())
        .args(["pages", "out", "out/custom/urls.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated output filename").not());

    let written = fs::read_to_string(temp_dir.path().join("out/custom/urls.txt")).unwrap();
    assert_eq!(written, format!("{}\n", URL_2023));
}

#[test]
fn dry_run_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());

    command_in(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Output would be saved to"));

    assert!(!temp_dir.path().join("log_htmls").exists());
}

#[test]
fn json_report_is_parseable() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());

    let output = command_in(temp_dir.path())
        .args(["--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let report_start = stdout.find("{\n").unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout[report_start..]).unwrap();

    assert_eq!(report["urls"][0], URL_2023);
    assert_eq!(report["dry_run"], false);
}

#[test]
fn quiet_json_prints_only_the_report() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());
    fs::write(
        temp_dir.path().join("html_files/b.html"),
        [0xff, 0xfe, b'\n'],
    )
    .unwrap();

    let output = command_in(temp_dir.path())
        .args(["--output-format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["urls"][0], URL_2023);
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn unreadable_file_is_reported_once() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());
    fs::write(temp_dir.path().join("html_files/b.html"), [0xff, 0xfe, b'\n']).unwrap();

    let output = command_in(temp_dir.path()).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("b.html").count(), 1);

    let written =
        fs::read_to_string(temp_dir.path().join("log_htmls/tenhou_log_urls_2023_1.txt")).unwrap();
    assert_eq!(written, format!("{}\n", URL_2023));
}

#[test]
fn quiet_mode_prints_only_output_path() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_page(temp_dir.path());

    command_in(temp_dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            Path::new("log_htmls")
                .join("tenhou_log_urls_2023_1.txt")
                .display()
        )));
}

#[test]
fn keyword_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_dir = temp_dir.path().join("html_files");
    fs::create_dir_all(&html_dir).unwrap();
    fs::write(html_dir.join("a.html"), format!("三鳳南喰赤 {}\n", URL_2023)).unwrap();
    fs::write(
        temp_dir.path().join("tenhou-log-urls.toml"),
        "[scan]\nkeyword = \"三鳳南喰赤\"\n",
    )
    .unwrap();

    command_in(temp_dir.path()).assert().success();

    assert!(temp_dir
        .path()
        .join("log_htmls/tenhou_log_urls_2023_1.txt")
        .exists());
}

#[test]
fn invalid_config_exits_with_code_2() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("bad.toml"),
        "[scan]\nurl_pattern = \"(\"\n",
    )
    .unwrap();

    command_in(temp_dir.path())
        .args(["--config", "bad.toml"])
        .assert()
        .code(2);
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();

    command_in(temp_dir.path())
        .args(["--generate-config", "--config", "sample.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = fs::read_to_string(temp_dir.path().join("sample.toml")).unwrap();
    assert!(content.contains("[scan]"));
}
