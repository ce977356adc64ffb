mod local_audio_store;

pub use local_audio_store::LocalAudioStore;
