use std::fs;
use std::path::{Path, PathBuf};

use sitebuild::env::EnvVars;
use sitebuild::error::Error;
use sitebuild::inject::{
    check_watched_file, inject_env, process_files, replace_placeholders, InjectOptions,
    Substitutor,
};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn vars(pairs: &[(&str, &str)]) -> EnvVars {
    pairs.iter().copied().collect()
}

fn options(root: &Path) -> InjectOptions {
    InjectOptions {
        env_file: root.join(".env"),
        source: root.join("src"),
        destination: root.join("public/js"),
        watch: Some(PathBuf::from("config.js")),
        strict: false,
    }
}

/// Project with an env file and a small source tree.
fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join(".env"), "API_KEY=abc123\nAUTH_DOMAIN=demo.example.com\n");
    write(
        &root.join("src/config.js"),
        "export const config = {\n  apiKey: \"{{API_KEY}}\",\n  authDomain: \"{{AUTH_DOMAIN}}\",\n};\n",
    );
    write(&root.join("src/ui/app.js"), "import { config } from '../config.js';\n");
    temp_dir
}

#[test]
fn test_replace_all_occurrences() {
    let out = replace_placeholders("{{FOO}}-{{FOO}} and {{FOO}}", &vars(&[("FOO", "bar")])).unwrap();
    assert_eq!(out, "bar-bar and bar");
}

#[test]
fn test_unknown_placeholder_is_kept() {
    let out = replace_placeholders("a {{UNKNOWN}} b {{FOO}}", &vars(&[("FOO", "x")])).unwrap();
    assert_eq!(out, "a {{UNKNOWN}} b x");
}

#[test]
fn test_keys_with_regex_metacharacters() {
    let env = vars(&[("A.B", "dot"), ("C+D", "plus"), ("E*", "star")]);
    let out = replace_placeholders("{{A.B}} {{AxB}} {{C+D}} {{CCD}} {{E*}} {{EE}}", &env).unwrap();
    assert_eq!(out, "dot {{AxB}} plus {{CCD}} star {{EE}}");
}

#[test]
fn test_placeholders_are_case_sensitive() {
    let out = replace_placeholders("{{foo}} {{FOO}}", &vars(&[("FOO", "x")])).unwrap();
    assert_eq!(out, "{{foo}} x");
}

#[test]
fn test_content_without_placeholders_is_unchanged() {
    let content = "function f() { return {a: 1}; }\n";
    assert_eq!(replace_placeholders(content, &vars(&[("A", "1")])).unwrap(), content);
}

#[test]
fn test_process_files() {
    let temp_dir = project();
    let root = temp_dir.path();
    let substitutor = Substitutor::new(&vars(&[("API_KEY", "k")])).unwrap();

    let summary = process_files(root.join("src"), root.join("out"), &substitutor).unwrap();

    let config = fs::read_to_string(root.join("out/config.js")).unwrap();
    assert!(config.contains("apiKey: \"k\""));
    assert!(config.contains("{{AUTH_DOMAIN}}"));
    assert!(root.join("out/ui/app.js").exists());
    assert_eq!(summary.generated.len(), 2);
    assert_eq!(summary.unresolved.get(Path::new("config.js")), Some(&vec!["AUTH_DOMAIN".to_string()]));
}

#[test_log::test]
fn test_inject_env() {
    let temp_dir = project();
    let root = temp_dir.path();

    let summary = inject_env(&options(root)).unwrap();

    let config = fs::read_to_string(root.join("public/js/config.js")).unwrap();
    assert_eq!(
        config,
        "export const config = {\n  apiKey: \"abc123\",\n  authDomain: \"demo.example.com\",\n};\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("public/js/ui/app.js")).unwrap(),
        "import { config } from '../config.js';\n"
    );
    assert!(summary.unresolved.is_empty());
    assert!(!root.join("public/js.lock").exists());
}

#[test]
fn test_inject_env_is_idempotent() {
    let temp_dir = project();
    let root = temp_dir.path();

    inject_env(&options(root)).unwrap();
    let first = TempDir::new().unwrap();
    fs::rename(root.join("public/js"), first.path().join("js")).unwrap();

    inject_env(&options(root)).unwrap();

    assert!(!dir_diff::is_different(first.path().join("js"), root.join("public/js")).unwrap());
}

#[test]
fn test_stale_output_is_removed() {
    let temp_dir = project();
    let root = temp_dir.path();
    write(&root.join("public/js/stale.js"), "old");
    write(&root.join("public/js/old/nested.js"), "old");

    inject_env(&options(root)).unwrap();

    assert!(!root.join("public/js/stale.js").exists());
    assert!(!root.join("public/js/old").exists());
    assert!(root.join("public/js/config.js").exists());
}

#[test]
fn test_missing_env_file_leaves_destination_untouched() {
    let temp_dir = project();
    let root = temp_dir.path();
    fs::remove_file(root.join(".env")).unwrap();
    write(&root.join("public/js/previous.js"), "previous");

    let result = inject_env(&options(root));

    assert!(matches!(result, Err(Error::EnvFileNotFound { .. })));
    assert_eq!(fs::read_to_string(root.join("public/js/previous.js")).unwrap(), "previous");
    assert!(!root.join("public/js/config.js").exists());
}

#[test]
fn test_missing_source_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join(".env"), "A=1\n");
    write(&root.join("public/js/previous.js"), "previous");

    let result = inject_env(&options(root));

    assert!(matches!(result, Err(Error::SourceDoesNotExist { .. })));
    assert!(root.join("public/js/previous.js").exists());
}

#[test]
fn test_binary_files_are_copied_verbatim() {
    let temp_dir = project();
    let root = temp_dir.path();
    let icon = [0x00, 0x00, 0x01, 0x00, b'{', b'{', 0xff];
    fs::write(root.join("src/favicon.ico"), icon).unwrap();

    let summary = inject_env(&options(root)).unwrap();

    assert_eq!(fs::read(root.join("public/js/favicon.ico")).unwrap(), icon);
    assert_eq!(summary.copied_binary, vec![PathBuf::from("favicon.ico")]);
}

#[test_log::test]
fn test_watched_file_with_leftovers_is_only_a_warning() {
    let temp_dir = project();
    let root = temp_dir.path();
    write(&root.join(".env"), "API_KEY=abc123\n");

    let summary = inject_env(&options(root)).unwrap();

    assert!(check_watched_file(root.join("public/js/config.js")));
    assert_eq!(summary.unresolved.len(), 1);
}

#[test]
fn test_missing_watched_file_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    assert!(!check_watched_file(temp_dir.path().join("config.js")));
}

#[test_log::test]
fn test_binary_watched_file_does_not_fail_the_run() {
    let temp_dir = project();
    let root = temp_dir.path();
    fs::write(root.join("src/config.js"), [b'a', 0xff, b'{', b'{']).unwrap();

    let summary = inject_env(&options(root)).unwrap();

    assert_eq!(summary.copied_binary, vec![PathBuf::from("config.js")]);
    assert!(check_watched_file(root.join("public/js/config.js")));
}

#[test]
fn test_strict_mode_fails_on_leftovers() {
    let temp_dir = project();
    let root = temp_dir.path();
    write(&root.join(".env"), "API_KEY=abc123\n");
    let options = InjectOptions { strict: true, ..options(root) };

    match inject_env(&options) {
        Err(Error::UnresolvedPlaceholders { files }) => {
            assert_eq!(files, vec![PathBuf::from("config.js")])
        }
        other => panic!("Expected UnresolvedPlaceholders, got {other:?}"),
    }
}

#[test]
fn test_destination_inside_source_is_rejected() {
    let temp_dir = project();
    let root = temp_dir.path();
    let options = InjectOptions { destination: root.join("src/out"), ..options(root) };

    assert!(matches!(inject_env(&options), Err(Error::ConfigError(_))));
    assert!(!root.join("src/out").exists());
}

#[test]
fn test_source_inside_destination_is_rejected() {
    let temp_dir = project();
    let root = temp_dir.path();
    write(&root.join("public/src/config.js"), "{{API_KEY}}");
    let options = InjectOptions {
        source: root.join("public/src"),
        destination: root.join("public"),
        ..options(root)
    };

    assert!(matches!(inject_env(&options), Err(Error::ConfigError(_))));
    assert_eq!(fs::read_to_string(root.join("public/src/config.js")).unwrap(), "{{API_KEY}}");
}

#[test]
fn test_same_source_and_destination_is_rejected() {
    let temp_dir = project();
    let root = temp_dir.path();
    let options = InjectOptions { destination: root.join("src/ui/.."), ..options(root) };

    assert!(matches!(inject_env(&options), Err(Error::ConfigError(_))));
    assert!(root.join("src/config.js").exists());
}
