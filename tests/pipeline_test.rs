use dc::{DcError, Options};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `<tmp>/shop/.compose` with the given files, plus `<tmp>/shop/services/api`.
fn project(files: &[(&str, &str)]) -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let compose_dir = tmp.path().join("shop").join(".compose");
    let work_dir = tmp.path().join("shop").join("services").join("api");
    fs::create_dir_all(&compose_dir).unwrap();
    fs::create_dir_all(&work_dir).unwrap();
    for (name, body) in files {
        fs::write(compose_dir.join(name), body).unwrap();
    }
    (tmp, compose_dir, work_dir)
}

fn opts(args: &[&str]) -> Options {
    let mut argv = vec!["dc"];
    argv.extend_from_slice(args);
    Options::try_from_args(argv).unwrap()
}

#[test]
fn prepare_builds_overlay_from_nested_directory() {
    let (_tmp, compose_dir, work_dir) = project(&[
        ("docker-compose.default.yml", "services: {}\n"),
        ("docker-compose.staging.yml", "services: {}\n"),
    ]);

    let inv = dc::prepare(&work_dir, &opts(&["--env", "staging", "up", "--build", "web"])).unwrap();

    let expected: Vec<OsString> = vec![
        "-f".into(),
        compose_dir.join("docker-compose.default.yml").into(),
        "-f".into(),
        compose_dir.join("docker-compose.staging.yml").into(),
        "up".into(),
        "--build".into(),
        "web".into(),
    ];
    assert_eq!(inv.args, expected);
    assert_eq!(inv.project_name, "shop-staging");
}

#[test]
fn custom_marker_and_base_names_are_honoured() {
    let tmp = TempDir::new().unwrap();
    let marker = tmp.path().join("billing").join("deploy");
    fs::create_dir_all(&marker).unwrap();
    fs::write(marker.join("common.yml"), "").unwrap();
    fs::write(marker.join("docker-compose.prod.yml"), "").unwrap();

    let inv = dc::prepare(
        &tmp.path().join("billing"),
        &opts(&["-composeDirName", "deploy", "-baseCompose=common.yml", "-env", "prod", "ps"]),
    )
    .unwrap();

    assert_eq!(inv.base_file, marker.join("common.yml"));
    assert_eq!(inv.env_file, marker.join("docker-compose.prod.yml"));
    assert_eq!(inv.project_name, "billing-prod");
}

#[tokio::test]
async fn missing_env_file_stops_before_launch() {
    let (_tmp, _compose_dir, work_dir) = project(&[("docker-compose.default.yml", "")]);

    // A launch attempt would surface as LaunchFailed for this binary
    let err = dc::run(
        &work_dir,
        &opts(&["--compose-bin", "dc-test-no-such-binary", "--env", "qa", "up"]),
    )
    .await
    .unwrap_err();

    match err {
        DcError::RequiredFileMissing { file, .. } => assert_eq!(file, "docker-compose.qa.yml"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_compose_dir_stops_before_launch() {
    let tmp = TempDir::new().unwrap();

    let err = dc::run(
        tmp.path(),
        &opts(&["--compose-dir-name", ".dc-test-absent-marker", "--compose-bin", "dc-test-no-such-binary"]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DcError::ComposeDirNotFound { .. }));
    assert!(err.to_string().contains(".dc-test-absent-marker"));
}

/// `sh -f <base> -f <env> ...` runs the base file as a script, which lets a
/// plain shell stand in for docker-compose.
#[cfg(unix)]
#[tokio::test]
async fn run_hands_overlay_and_project_name_to_the_child() {
    let script = r#"
[ "$COMPOSE_PROJECT_NAME" = "shop-devel" ] || exit 10
[ "$1" = "-f" ] || exit 11
[ "$(basename "$2")" = "docker-compose.devel.yml" ] || exit 12
[ "$3" = "config" ] && [ "$4" = "--services" ] || exit 13
exit 7
"#;
    let (_tmp, _compose_dir, work_dir) = project(&[
        ("docker-compose.default.yml", script),
        ("docker-compose.devel.yml", ""),
    ]);

    let code = dc::run(
        &work_dir,
        &opts(&["--compose-bin", "sh", "--env", "devel", "--relay", "config", "--services"]),
    )
    .await
    .unwrap();

    assert_eq!(code, 7);
}

#[test]
fn locator_result_is_absolute() {
    let (_tmp, compose_dir, work_dir) = project(&[]);
    let found = dc::config::locate_compose_dir(&work_dir, ".compose").unwrap();
    assert!(found.is_absolute());
    assert_eq!(found, compose_dir);
    assert_eq!(found.parent().and_then(Path::file_name).unwrap(), "shop");
}
