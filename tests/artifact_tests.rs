//! Saving clips to disk under tempo-tagged names.

mod helpers;

use helpers::*;
use voxtempo::codec::read_header;
use voxtempo::prelude::*;

#[tokio::test]
async fn test_original_and_corrected_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(l16_response(4800, 24000));

    let original = engine
        .generate(&TtsRequest::new("Hola", "Kore"))
        .await
        .unwrap();
    let corrected = engine.correct_tempo(&original, 1.3).await.unwrap();

    let original_path = original.save(dir.path(), "hola").unwrap();
    let corrected_path = corrected.save(dir.path(), "hola").unwrap();

    assert_eq!(original_path.file_name().unwrap(), "hola_1.0x.wav");
    assert_eq!(corrected_path.file_name().unwrap(), "hola_1.3x.wav");
    assert_eq!(std::fs::read(&original_path).unwrap(), original.wav);
    assert_eq!(std::fs::read(&corrected_path).unwrap(), corrected.wav);
}

#[tokio::test]
async fn test_saved_file_is_playable_wav() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(l16_response(2000, 22050));
    let clip = engine
        .generate(&TtsRequest::new("Hola", "Kore"))
        .await
        .unwrap();

    let path = clip.save(dir.path(), "clip").unwrap();
    let header = read_header(&std::fs::read(path).unwrap()).unwrap();

    assert_eq!(header.channels, 1);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.sample_rate, 22050);
    assert_eq!(header.sample_count, 2000);
}

#[tokio::test]
async fn test_save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let engine = engine_with(l16_response(100, 24000));
    let clip = engine
        .generate(&TtsRequest::new("Hola", "Kore"))
        .await
        .unwrap();

    let path = clip.save(&nested, "").unwrap();

    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "speech_1.0x.wav");
}

#[test]
fn test_artifact_names() {
    assert_eq!(artifact_file_name("hola", 1.0), "hola_1.0x.wav");
    assert_eq!(artifact_file_name("hola", 1.3), "hola_1.3x.wav");
    assert_ne!(
        artifact_file_name("hola", 1.3),
        artifact_file_name("hola", 1.4)
    );
}
