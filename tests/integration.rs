use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cnfdiff_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cnfdiff"));
    // Keep config discovery hermetic
    cmd.current_dir(dir);
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

// ===========================================
// diff: exit codes and report lines
// ===========================================

#[test]
fn test_diff_identical_files_exits_zero() {
    let dir = TempDir::new().unwrap();
    let content = "[mysqld]\nmax_connections = 100\n";
    let a = write(&dir, "a.cnf", content);
    let b = write(&dir, "b.cnf", content);

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no differences"));
}

#[test]
fn test_diff_reports_differing_value_and_exits_one() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nmax_connections = 100\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nmax_connections = 200\n");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Diff:"));
    assert!(stdout.contains("max_connections"));
    // Raw values and both file names appear in the report line
    assert!(stdout.contains("a.cnf: 100"));
    assert!(stdout.contains("b.cnf: 200"));
}

#[test]
fn test_diff_missing_key_shows_missing_marker() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[db]\nmax_connections = 100\n");
    let b = write(&dir, "b.cnf", "[db]\nmax_connections = 100\nquery_cache = on\n");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("query_cache"));
    assert!(stdout.contains("MISSING"));
}

#[test]
fn test_diff_tolerates_equivalent_spellings() {
    let dir = TempDir::new().unwrap();
    let a = write(
        &dir,
        "a.cnf",
        "[mysqld]\nquery_cache = ON\nsort_buffer_size = 512K\nsql_mode = STRICT_TRANS_TABLES,NO_ZERO_DATE\n",
    );
    let b = write(
        &dir,
        "b.cnf",
        "[mysqld]\nquery_cache = 1\nsort_buffer_size = 524288\nsql_mode = no_zero_date, strict_trans_tables\n",
    );

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
}

#[test]
fn test_diff_excluded_parameters_never_compared() {
    let dir = TempDir::new().unwrap();
    // port and datadir legitimately differ across environments
    let a = write(&dir, "a.cnf", "[mysqld]\nport = 3306\ndatadir = /data/a\nkey = 1\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nport = 3307\ndatadir = /data/b\nkey = 1\n");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("port"));
    assert!(!stdout.contains("datadir"));
}

#[test]
fn test_diff_no_builtin_excludes_compares_everything() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nport = 3306\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nport = 3307\n");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--no-builtin-excludes", &a, &b])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port"));
}

#[test]
fn test_diff_cli_exclude_flag() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nwsrep_node_name = node-a\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nwsrep_node_name = node-b\n");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--exclude", "wsrep_node_name", &a, &b])
        .output()
        .unwrap();

    assert!(output.status.success());
}

// ===========================================
// diff: output modes
// ===========================================

#[test]
fn test_quiet_mode_prints_only_key_names() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nkey = 1\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nkey = 2\n");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--quiet", &a, &b])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "mysqld.key");
}

#[test]
fn test_matches_flag_lists_matching_parameters() {
    let dir = TempDir::new().unwrap();
    let content = "[mysqld]\nmax_connections = 100\n";
    let a = write(&dir, "a.cnf", content);
    let b = write(&dir, "b.cnf", content);

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--matches", &a, &b])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Match:"));
    assert!(stdout.contains("max_connections"));
}

#[test]
fn test_diff_mode_shows_unified_diff() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nkey = 1\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nkey = 2\n");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--diff", &a, &b])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- a.cnf"));
    assert!(stdout.contains("+++ b.cnf"));
    assert!(stdout.contains("-key = 1"));
    assert!(stdout.contains("+key = 2"));
}

// ===========================================
// diff: degrade-to-empty error handling
// ===========================================

#[test]
fn test_missing_file_degrades_to_empty_configuration() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nkey = 1\n");
    let missing = dir.path().join("missing.cnf");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", &a, missing.to_str().unwrap()])
        .output()
        .unwrap();

    // Still produces a report: every key on the readable side is missing
    // on the other, and the run exits nonzero
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MISSING"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty configuration"));
}

#[test]
fn test_malformed_json_degrades_to_empty_configuration() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nkey = 1\n");
    let bad = write(&dir, "bad.json", "{not json");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &bad]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty configuration"));
}

#[test]
fn test_out_of_section_lines_warn_but_do_not_fail() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.cnf", "stray = 1\n[mysqld]\nkey = 1\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nkey = 1\n");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside of any section"));
}

// ===========================================
// template subcommand
// ===========================================

#[test]
fn test_template_writes_filtered_json() {
    let dir = TempDir::new().unwrap();
    let cnf = write(
        &dir,
        "a.cnf",
        "[mysqld]\nmax_connections = 100\nskip-name-resolve\nport = 3306\n",
    );
    let json_path = dir.path().join("a.json");

    let output = cnfdiff_cmd(dir.path())
        .args(["template", &cnf, json_path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = fs::read_to_string(&json_path).unwrap();
    // 4-space pretty printing, flags as booleans, denylist applied
    assert!(json.contains("    \"mysqld\""));
    assert!(json.contains("\"max_connections\": \"100\""));
    assert!(json.contains("\"skip-name-resolve\": true"));
    assert!(!json.contains("port"));
}

#[test]
fn test_template_round_trips_through_diff() {
    let dir = TempDir::new().unwrap();
    let cnf = write(
        &dir,
        "a.cnf",
        "[mysqld]\nmax_connections = 100\nsql_mode = STRICT_TRANS_TABLES\n[client]\nloose-default-character-set = utf8\n",
    );
    let json = dir.path().join("a.json");

    let status = cnfdiff_cmd(dir.path())
        .args(["template", &cnf, json.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", json.to_str().unwrap(), &cnf])
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_template_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.cnf");
    let json = dir.path().join("out.json");

    let output = cnfdiff_cmd(dir.path())
        .args(["template", missing.to_str().unwrap(), json.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!json.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

// ===========================================
// init subcommand and cnfdiff.toml
// ===========================================

#[test]
fn test_init_creates_config_template() {
    let dir = TempDir::new().unwrap();

    let output = cnfdiff_cmd(dir.path()).arg("init").output().unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(dir.path().join("cnfdiff.toml")).unwrap();
    assert!(content.contains("[compare]"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cnfdiff.toml"), "existing").unwrap();

    let output = cnfdiff_cmd(dir.path()).arg("init").output().unwrap();

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("cnfdiff.toml")).unwrap(),
        "existing"
    );
}

#[test]
fn test_config_file_extends_excludes() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cnfdiff.toml"),
        "[compare]\nexclude = [\"wsrep_node_name\"]\n",
    )
    .unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nwsrep_node_name = node-a\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nwsrep_node_name = node-b\n");

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Using config:"));
}

#[test]
fn test_config_file_show_matches() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cnfdiff.toml"), "[compare]\nshow_matches = true\n").unwrap();
    let content = "[mysqld]\nkey = 1\n";
    let a = write(&dir, "a.cnf", content);
    let b = write(&dir, "b.cnf", content);

    let output = cnfdiff_cmd(dir.path()).args(["diff", &a, &b]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Match:"));
}

#[test]
fn test_explicit_config_path_flag() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.toml");
    fs::write(&custom, "[compare]\nexclude = [\"special_key\"]\n").unwrap();
    let a = write(&dir, "a.cnf", "[mysqld]\nspecial_key = 1\n");
    let b = write(&dir, "b.cnf", "[mysqld]\nspecial_key = 2\n");

    let output = cnfdiff_cmd(dir.path())
        .args(["diff", "--config", custom.to_str().unwrap(), &a, &b])
        .output()
        .unwrap();

    assert!(output.status.success());
}
