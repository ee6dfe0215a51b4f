//! Integration tests for the docker CLI driver
//!
//! A small shell script stands in for the docker binary so the tests do not
//! need a daemon. The stub writes its arguments into the archive, which lets
//! the tests check the exact command line.

#![cfg(unix)]

use docker_save::adapters::driver::{DockerDriver, ExportDriver};
use docker_save::cli::commands::save::SaveArgs;
use docker_save::config::SaveConfig;
use docker_save::core::save::SaveStage;
use docker_save::domain::ids::{DOCKER_IMPORT_BUILDER_ID, DOCKER_TAG_BUILDER_ID};
use docker_save::domain::{Artifact, DockerSaveError, DriverError, ImageArtifactBuilder};
use docker_save::ui::BufferedUi;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

// Writing an executable while another thread spawns a process can fail
// with ETXTBSY, so stub creation and process spawning are serialized.
static SPAWN_MUTEX: Mutex<()> = Mutex::new(());

fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

const ECHO_STUB: &str = r#"#!/bin/sh
[ "$1" = "save" ] || { echo "unexpected command: $1" >&2; exit 64; }
[ "$2" = "--" ] || { echo "missing option terminator" >&2; exit 64; }
[ "$#" -eq 3 ] || { echo "unexpected arguments: $*" >&2; exit 64; }
printf 'archive-of-%s' "$3"
"#;

const FAILING_STUB: &str = r#"#!/bin/sh
printf 'partial'
echo "Error response from daemon: No such image: $3" >&2
exit 1
"#;

const HANGING_STUB: &str = r#"#!/bin/sh
printf 'partial'
exec sleep 30
"#;

fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("docker");
    std::fs::write(&path, body).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn artifact(id: &str, builder_id: &str) -> Arc<dyn Artifact> {
    Arc::new(
        ImageArtifactBuilder::new()
            .id(id)
            .unwrap()
            .builder_id(builder_id)
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn test_driver_streams_stdout_into_sink() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), ECHO_STUB);
    let driver = DockerDriver::new(stub.to_string_lossy());
    let (_tx, rx) = watch::channel(false);
    let mut sink = Vec::new();

    driver
        .save_image("app:1.0", &mut sink, rx)
        .await
        .unwrap();

    assert_eq!(sink, b"archive-of-app:1.0");
}

#[tokio::test]
async fn test_driver_passes_dash_leading_id_as_operand() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), ECHO_STUB);
    let driver = DockerDriver::new(stub.to_string_lossy());
    let (_tx, rx) = watch::channel(false);
    let mut sink = Vec::new();

    driver
        .save_image("-o/tmp/x", &mut sink, rx)
        .await
        .unwrap();

    assert_eq!(sink, b"archive-of--o/tmp/x");
}

#[tokio::test]
async fn test_save_command_rejects_dash_leading_image() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), ECHO_STUB);
    let path = dir.path().join("image.tar");
    let no_config = dir.path().join("absent.toml");
    let (_tx, rx) = watch::channel(false);

    let code = save_args("-o/tmp/x", DOCKER_TAG_BUILDER_ID, &path, &stub)
        .execute(no_config.to_str().unwrap(), rx)
        .await
        .unwrap();

    assert_eq!(code, 2);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_driver_reports_stderr_on_failure() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), FAILING_STUB);
    let driver = DockerDriver::new(stub.to_string_lossy());
    let (_tx, rx) = watch::channel(false);
    let mut sink = Vec::new();

    let err = driver
        .save_image("missing:latest", &mut sink, rx)
        .await
        .unwrap_err();

    match &err {
        DriverError::CommandFailed { stderr, .. } => {
            assert_eq!(
                stderr,
                "Error response from daemon: No such image: missing:latest"
            );
        }
        other => panic!("expected command failure, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Error exporting: "));
    assert!(err.to_string().contains("\nStderr: "));
}

#[tokio::test]
async fn test_driver_stops_on_shutdown() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), HANGING_STUB);
    let driver = DockerDriver::new(stub.to_string_lossy());
    let (tx, rx) = watch::channel(false);
    let mut sink = Vec::new();

    let cancel = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(true).unwrap();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(10),
        driver.save_image("app:1.0", &mut sink, rx),
    )
    .await
    .expect("driver should stop after shutdown")
    .unwrap_err();

    cancel.await.unwrap();
    assert!(matches!(err, DriverError::Cancelled));
}

#[tokio::test]
async fn test_stage_with_docker_stub_end_to_end() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), ECHO_STUB);
    let path = dir.path().join("image.tar");
    let config = SaveConfig::new(&path).with_docker_path(stub.to_string_lossy());
    let stage = SaveStage::new(config);
    let ui = BufferedUi::new();
    let (_tx, rx) = watch::channel(false);

    let outcome = stage
        .post_process(&ui, artifact("sha256:feed", DOCKER_TAG_BUILDER_ID), rx)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"archive-of-sha256:feed");
    assert_eq!(outcome.bytes_written, "archive-of-sha256:feed".len() as u64);
    assert_eq!(ui.messages().len(), 2);
}

#[tokio::test]
async fn test_stage_with_failing_stub_leaves_no_file() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), FAILING_STUB);
    let path = dir.path().join("image.tar");
    let stage = SaveStage::new(SaveConfig::new(&path).with_docker_path(stub.to_string_lossy()));
    let (_tx, rx) = watch::channel(false);

    let err = stage
        .post_process(
            &BufferedUi::new(),
            artifact("missing:latest", DOCKER_IMPORT_BUILDER_ID),
            rx,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DockerSaveError::Export(_)));
    assert!(err.to_string().contains("No such image: missing:latest"));
    assert!(!path.exists());
}

fn save_args(image: &str, builder_id: &str, path: &Path, docker: &Path) -> SaveArgs {
    SaveArgs {
        image: image.to_string(),
        builder_id: builder_id.to_string(),
        path: Some(path.to_path_buf()),
        docker_path: Some(docker.to_string_lossy().to_string()),
        json: true,
    }
}

#[tokio::test]
async fn test_save_command_exit_codes() {
    let _guard = spawn_lock();
    let dir = TempDir::new().unwrap();
    let echo = write_stub(dir.path(), ECHO_STUB);
    let no_config = dir.path().join("absent.toml");
    let no_config = no_config.to_str().unwrap();
    let path = dir.path().join("image.tar");

    let (_tx, rx) = watch::channel(false);
    let ok = save_args("app:1", DOCKER_TAG_BUILDER_ID, &path, &echo)
        .execute(no_config, rx.clone())
        .await
        .unwrap();
    assert_eq!(ok, 0);
    assert_eq!(std::fs::read(&path).unwrap(), b"archive-of-app:1");

    let rejected = save_args("app:1", "unknown-stage", &dir.path().join("other.tar"), &echo)
        .execute(no_config, rx.clone())
        .await
        .unwrap();
    assert_eq!(rejected, 3);
    assert!(!dir.path().join("other.tar").exists());

    let unwritable = save_args(
        "app:1",
        DOCKER_TAG_BUILDER_ID,
        &dir.path().join("nope").join("image.tar"),
        &echo,
    )
    .execute(no_config, rx.clone())
    .await
    .unwrap();
    assert_eq!(unwritable, 4);

    let failing_dir = TempDir::new().unwrap();
    let failing = write_stub(failing_dir.path(), FAILING_STUB);
    let failed_path = dir.path().join("failed.tar");
    let failed = save_args("app:1", DOCKER_TAG_BUILDER_ID, &failed_path, &failing)
        .execute(no_config, rx)
        .await
        .unwrap();
    assert_eq!(failed, 5);
    assert!(!failed_path.exists());
}
