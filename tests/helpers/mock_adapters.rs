use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tbodemy::application::ports::{
    AudioStore, AudioStoreError, CompletionRequest, CredentialError, IssuedToken, LlmClient,
    LlmClientError, PasswordHasher, SpeechSynthesisError, SpeechSynthesizer, TokenCodec,
    TranscriptionEngine, TranscriptionError,
};
use tbodemy::application::services::{
    AudioLibrary, AuthService, CourseService, EnrollmentService, GrammarService, LessonService,
    ReplyVoice, SocialService, SpeakingService,
};
use tbodemy::application::ports::UserRepository;
use tbodemy::domain::{AudioKey, NewUser, User, UserId, UserRole};
use tbodemy::infrastructure::auth::JwtTokenCodec;
use tbodemy::infrastructure::persistence::InMemoryStore;
use tbodemy::presentation::{AppState, create_router};

pub const TEST_TOKEN_SECRET: &str = "test-secret";

pub enum Transcript {
    Text(String),
    QuotaExhausted,
}

/// Records every file it was asked to transcribe and whether it existed.
pub struct MockTranscriber {
    transcript: Transcript,
    pub seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockTranscriber {
    pub fn saying(text: &str) -> Self {
        Self {
            transcript: Transcript::Text(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn quota_exhausted() -> Self {
        Self {
            transcript: Transcript::QuotaExhausted,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_paths(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriber {
    async fn transcribe(&self, audio_file: &Path) -> Result<String, TranscriptionError> {
        self.seen
            .lock()
            .unwrap()
            .push((audio_file.to_path_buf(), audio_file.exists()));
        match &self.transcript {
            Transcript::Text(text) => Ok(text.clone()),
            Transcript::QuotaExhausted => Err(TranscriptionError::QuotaExceeded),
        }
    }
}

#[derive(Clone)]
pub enum LlmStep {
    Reply(String),
    RateLimited,
}

/// Plays its script one completion at a time, then repeats the fallback
/// step; keeps the requests it received.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<LlmStep>>,
    fallback: LlmStep,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self::scripted(Vec::new(), LlmStep::Reply(reply.to_string()))
    }

    /// Answers the first completion (the greeting), then reports throttling.
    pub fn replying_then_rate_limited(first: &str) -> Self {
        Self::scripted(vec![LlmStep::Reply(first.to_string())], LlmStep::RateLimited)
    }

    pub fn scripted(script: Vec<LlmStep>, fallback: LlmStep) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match step {
            LlmStep::Reply(reply) => Ok(reply),
            LlmStep::RateLimited => Err(LlmClientError::RateLimited),
        }
    }
}

/// Encodes the text as `mp3:{text}`; when `fail_from` is set, every call
/// from that zero-based index on fails.
#[derive(Default)]
pub struct CountingSynthesizer {
    pub calls: AtomicUsize,
    fail_from: Option<usize>,
}

impl CountingSynthesizer {
    pub fn failing_from(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_from: Some(call),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for CountingSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _language: &str,
    ) -> Result<Vec<u8>, SpeechSynthesisError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_from.is_some_and(|from| call >= from) {
            return Err(SpeechSynthesisError::ApiRequestFailed(
                "voice service unavailable".to_string(),
            ));
        }
        Ok(format!("mp3:{}", text).into_bytes())
    }
}

#[derive(Default)]
pub struct MemoryAudioStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryAudioStore {
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn bytes_at(&self, key: &AudioKey) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key.as_str()).cloned()
    }
}

#[async_trait]
impl AudioStore for MemoryAudioStore {
    async fn exists(&self, key: &AudioKey) -> Result<bool, AudioStoreError> {
        Ok(self.objects.lock().unwrap().contains_key(key.as_str()))
    }

    async fn put(&self, key: &AudioKey, bytes: Vec<u8>) -> Result<u64, AudioStoreError> {
        let len = bytes.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(key.as_str().to_string(), bytes);
        Ok(len)
    }
}

/// Stores the password verbatim; keeps the HTTP tests fast.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        Ok(hash == format!("plain:{}", password))
    }
}

pub fn token_codec() -> Arc<dyn TokenCodec> {
    Arc::new(JwtTokenCodec::new(TEST_TOKEN_SECRET, 60))
}

pub fn issue_token(user_id: UserId) -> IssuedToken {
    JwtTokenCodec::new(TEST_TOKEN_SECRET, 60)
        .issue(user_id)
        .unwrap()
}

/// Every collaborator of the application, backed by the in-memory store and
/// scripted adapters.
pub struct TestApp {
    pub store: InMemoryStore,
    pub transcriber: Arc<MockTranscriber>,
    pub llm: Arc<ScriptedLlm>,
    pub synthesizer: Arc<CountingSynthesizer>,
    pub audio_store: Arc<MemoryAudioStore>,
    pub upload_dir: tempfile::TempDir,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_transcriber(MockTranscriber::saying("I goes to school"))
    }

    pub fn with_transcriber(transcriber: MockTranscriber) -> Self {
        Self::with_adapters(
            transcriber,
            ScriptedLlm::replying("Nice! Where is your school?"),
            CountingSynthesizer::default(),
        )
    }

    pub fn with_adapters(
        transcriber: MockTranscriber,
        llm: ScriptedLlm,
        synthesizer: CountingSynthesizer,
    ) -> Self {
        let store = InMemoryStore::new();
        let transcriber = Arc::new(transcriber);
        let llm = Arc::new(llm);
        let synthesizer = Arc::new(synthesizer);
        let audio_store = Arc::new(MemoryAudioStore::default());
        let upload_dir = tempfile::TempDir::new().unwrap();

        let grammar = Arc::new(GrammarService::new(Vec::new(), "en-US"));
        let sentence_audio = Arc::new(AudioLibrary::new(
            audio_store.clone(),
            synthesizer.clone(),
            "en",
        ));
        let reply_voice = Arc::new(ReplyVoice::new(
            audio_store.clone(),
            synthesizer.clone(),
            "en",
        ));

        let users = Arc::new(store.clone());
        let state = AppState {
            auth: Arc::new(AuthService::new(
                users.clone(),
                Arc::new(PlainTextHasher),
                token_codec(),
            )),
            courses: Arc::new(CourseService::new(
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                users.clone(),
                Arc::clone(&sentence_audio),
            )),
            enrollments: Arc::new(EnrollmentService::new(
                Arc::new(store.clone()),
                Arc::new(store.clone()),
            )),
            social: Arc::new(SocialService::new(
                users,
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                Arc::clone(&grammar),
            )),
            speaking: Arc::new(SpeakingService::new(
                Arc::new(store.clone()),
                transcriber.clone(),
                llm.clone(),
                grammar,
                reply_voice,
                upload_dir.path().to_path_buf(),
            )),
            lessons: Arc::new(LessonService::embedded(sentence_audio).unwrap()),
            static_dir: upload_dir.path().to_path_buf(),
        };

        Self {
            store,
            transcriber,
            llm,
            synthesizer,
            audio_store,
            upload_dir,
            state,
        }
    }

    pub async fn user(&self, email: &str, role: UserRole) -> User {
        UserRepository::create(
            &self.store,
            &NewUser {
                email: email.to_string(),
                password_hash: "plain:secret".to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                role,
            },
        )
        .await
        .unwrap()
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
