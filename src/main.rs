use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use tbodemy::application::ports::{
    CourseRepository, EnrollmentRepository, FriendshipRepository, GrammarChecker, LlmClient,
    MessageRepository, SpeakingRepository, UnitContentRepository, UserRepository,
};
use tbodemy::application::services::{
    AudioLibrary, AuthService, CourseService, EnrollmentService, GrammarService, LessonService,
    ReplyVoice, SocialService, SpeakingService,
};
use tbodemy::infrastructure::audio::OpenAiWhisperEngine;
use tbodemy::infrastructure::auth::{Argon2PasswordHasher, JwtTokenCodec};
use tbodemy::infrastructure::grammar::{LanguageToolChecker, LlmGrammarChecker};
use tbodemy::infrastructure::llm::OpenAiClient;
use tbodemy::infrastructure::observability::{TracingConfig, init_tracing};
use tbodemy::infrastructure::persistence::{
    InMemoryStore, PgCourseRepository, PgEnrollmentRepository, PgFriendshipRepository,
    PgMessageRepository, PgSpeakingRepository, PgUnitContentRepository, PgUserRepository,
    create_pool, run_migrations,
};
use tbodemy::infrastructure::speech::SynthesizerFactory;
use tbodemy::infrastructure::storage::LocalAudioStore;
use tbodemy::presentation::config::{DatabaseBackend, Settings};
use tbodemy::presentation::{AppState, Environment, create_router};

struct Repositories {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    content: Arc<dyn UnitContentRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    messages: Arc<dyn MessageRepository>,
    speaking: Arc<dyn SpeakingRepository>,
}

async fn build_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match settings.database.backend {
        DatabaseBackend::Postgres => {
            let pool = create_pool(&settings.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(Repositories {
                users: Arc::new(PgUserRepository::new(pool.clone())),
                courses: Arc::new(PgCourseRepository::new(pool.clone())),
                content: Arc::new(PgUnitContentRepository::new(pool.clone())),
                enrollments: Arc::new(PgEnrollmentRepository::new(pool.clone())),
                friendships: Arc::new(PgFriendshipRepository::new(pool.clone())),
                messages: Arc::new(PgMessageRepository::new(pool.clone())),
                speaking: Arc::new(PgSpeakingRepository::new(pool)),
            })
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory database backend, data is lost on restart");
            let store = InMemoryStore::new();
            Ok(Repositories {
                users: Arc::new(store.clone()),
                courses: Arc::new(store.clone()),
                content: Arc::new(store.clone()),
                enrollments: Arc::new(store.clone()),
                friendships: Arc::new(store.clone()),
                messages: Arc::new(store.clone()),
                speaking: Arc::new(store),
            })
        }
    }
}

fn build_grammar(
    settings: &Settings,
    llm: &Arc<dyn LlmClient>,
) -> anyhow::Result<Arc<GrammarService>> {
    let mut strategies: Vec<Arc<dyn GrammarChecker>> = Vec::new();
    if settings.grammar.use_llm && !settings.openai.api_key.is_empty() {
        strategies.push(Arc::new(LlmGrammarChecker::new(Arc::clone(llm))));
    }
    strategies.push(Arc::new(
        LanguageToolChecker::new(
            settings.grammar.languagetool_url.clone(),
            Duration::from_secs(settings.grammar.timeout_seconds),
        )
        .context("Failed to build LanguageTool client")?,
    ));
    Ok(Arc::new(GrammarService::new(
        strategies,
        settings.grammar.language.clone(),
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
    ));
    tracing::info!(environment = environment.as_str(), "Starting tbodemy");

    let repositories = build_repositories(&settings).await?;

    let static_dir = settings.storage.static_dir.clone();
    tokio::fs::create_dir_all(&settings.storage.upload_dir)
        .await
        .context("Failed to create upload directory")?;
    let audio_store = Arc::new(
        LocalAudioStore::new(static_dir.clone()).context("Failed to open static directory")?,
    );

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(
        settings.openai.base_url.clone(),
        settings.openai.api_key.clone(),
        settings.openai.chat_model.clone(),
        settings.openai.max_tokens,
        settings.openai.temperature,
    ));
    let transcriber = Arc::new(OpenAiWhisperEngine::new(
        settings.openai.api_key.clone(),
        Some(settings.openai.base_url.clone()),
        Some(settings.openai.transcription_model.clone()),
        settings.speech.language.clone(),
    ));
    let grammar = build_grammar(&settings, &llm)?;

    let sentence_audio = Arc::new(AudioLibrary::new(
        audio_store.clone(),
        SynthesizerFactory::sentence_voice(&settings.speech, &settings.openai),
        settings.speech.language.clone(),
    ));
    let reply_voice = Arc::new(ReplyVoice::new(
        audio_store,
        SynthesizerFactory::reply_voice(&settings.openai),
        settings.speech.language.clone(),
    ));

    let auth = Arc::new(AuthService::new(
        Arc::clone(&repositories.users),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenCodec::new(
            &settings.auth.secret_key,
            settings.auth.token_ttl_minutes,
        )),
    ));
    let courses = Arc::new(CourseService::new(
        Arc::clone(&repositories.courses),
        Arc::clone(&repositories.content),
        Arc::clone(&repositories.enrollments),
        Arc::clone(&repositories.users),
        Arc::clone(&sentence_audio),
    ));
    let enrollments = Arc::new(EnrollmentService::new(
        Arc::clone(&repositories.courses),
        Arc::clone(&repositories.enrollments),
    ));
    let social = Arc::new(SocialService::new(
        Arc::clone(&repositories.users),
        Arc::clone(&repositories.friendships),
        Arc::clone(&repositories.messages),
        Arc::clone(&grammar),
    ));
    let speaking = Arc::new(SpeakingService::new(
        Arc::clone(&repositories.speaking),
        transcriber,
        Arc::clone(&llm),
        grammar,
        reply_voice,
        settings.storage.upload_dir.clone(),
    ));
    let lessons = Arc::new(
        LessonService::embedded(sentence_audio).context("Failed to load daily lessons")?,
    );

    let state = AppState {
        auth,
        courses,
        enrollments,
        social,
        speaking,
        lessons,
        static_dir,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
