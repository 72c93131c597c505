use std::path::PathBuf;

use songkhla::domain::UploadedArtifact;
use songkhla::infrastructure::storage::SpoolDir;

fn create_test_spool() -> (tempfile::TempDir, SpoolDir) {
    let dir = tempfile::TempDir::new().unwrap();
    let spool = SpoolDir::new(dir.path().to_path_buf()).unwrap();
    (dir, spool)
}

#[test]
fn given_same_file_name_when_requesting_paths_then_they_never_collide() {
    let (_dir, spool) = create_test_spool();

    let a = spool.unique_path("voice.wav");
    let b = spool.unique_path("voice.wav");

    assert_ne!(a, b);
}

#[test]
fn given_upload_name_when_staging_then_only_extension_survives() {
    let (_dir, spool) = create_test_spool();

    let path = spool.unique_path("../../../etc/passwd.MP3");

    assert_eq!(path.parent().unwrap(), spool.base());
    assert_eq!(path.extension().unwrap(), "mp3");
    assert!(!path.file_name().unwrap().to_str().unwrap().contains("passwd"));
}

#[test]
fn given_name_without_extension_when_staging_then_path_has_none() {
    let (_dir, spool) = create_test_spool();

    let path = spool.unique_path("recording");

    assert!(path.extension().is_none());
}

#[test]
fn given_wav_request_when_staging_then_path_ends_in_wav() {
    let (_dir, spool) = create_test_spool();

    let path = spool.unique_wav_path();

    assert_eq!(path.extension().unwrap(), "wav");
}

#[tokio::test]
async fn given_artifact_with_derivative_when_discarding_then_both_files_removed() {
    let (_dir, spool) = create_test_spool();

    let original = spool.unique_path("voice.ogg");
    let derived = spool.unique_wav_path();
    std::fs::write(&original, b"original").unwrap();
    std::fs::write(&derived, b"derived").unwrap();

    let mut artifact = UploadedArtifact::new(original.clone());
    artifact.set_derived(derived.clone());

    spool.discard(&artifact).await;

    assert!(!original.exists());
    assert!(!derived.exists());
}

#[tokio::test]
async fn given_already_missing_file_when_discarding_then_no_panic() {
    let (_dir, spool) = create_test_spool();

    let artifact = UploadedArtifact::new(PathBuf::from("/nonexistent/voice.wav"));

    spool.discard(&artifact).await;
}

#[test]
fn given_non_wav_name_when_checking_artifact_then_not_waveform() {
    let artifact = UploadedArtifact::new(PathBuf::from("/tmp/a.ogg"));
    assert!(!artifact.is_waveform());

    let artifact = UploadedArtifact::new(PathBuf::from("/tmp/a.WAV"));
    assert!(artifact.is_waveform());

    let artifact = UploadedArtifact::new(PathBuf::from("/tmp/noext"));
    assert!(!artifact.is_waveform());
}

#[test]
fn given_artifact_without_derivative_when_working_path_then_original() {
    let original = PathBuf::from("/tmp/a.wav");
    let artifact = UploadedArtifact::new(original.clone());

    assert_eq!(artifact.working_path(), original.as_path());

    let mut artifact = UploadedArtifact::new(PathBuf::from("/tmp/a.ogg"));
    let derived = PathBuf::from("/tmp/b.wav");
    artifact.set_derived(derived.clone());
    assert_eq!(artifact.working_path(), derived.as_path());
}
