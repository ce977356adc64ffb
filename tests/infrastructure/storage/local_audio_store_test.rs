use tbodemy::application::ports::AudioStore;
use tbodemy::domain::{AudioKey, AudioScope, CourseId};
use tbodemy::infrastructure::storage::LocalAudioStore;

#[tokio::test]
async fn given_stored_audio_when_checking_then_exists_and_lands_under_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalAudioStore::new(dir.path().to_path_buf()).unwrap();
    let key = AudioKey::sentence(&AudioScope::unit(CourseId::from_i64(2), 1), "abcd1234");

    assert!(!store.exists(&key).await.unwrap());
    let written = store.put(&key, b"mp3".to_vec()).await.unwrap();

    assert_eq!(written, 3);
    assert!(store.exists(&key).await.unwrap());
    let on_disk = dir.path().join("audio/course_2/course_2_unit_1_abcd1234.mp3");
    assert_eq!(std::fs::read(on_disk).unwrap(), b"mp3".to_vec());
}

#[tokio::test]
async fn given_existing_object_when_putting_again_then_content_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalAudioStore::new(dir.path().to_path_buf()).unwrap();
    let key = AudioKey::speaking_turn(4, 9);

    store.put(&key, b"first".to_vec()).await.unwrap();
    store.put(&key, b"second".to_vec()).await.unwrap();

    let on_disk = dir.path().join(key.as_str());
    assert_eq!(std::fs::read(on_disk).unwrap(), b"second".to_vec());
}

#[test]
fn given_missing_base_dir_when_creating_store_then_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("static");

    LocalAudioStore::new(base.clone()).unwrap();

    assert!(base.is_dir());
}
