use tbodemy::application::services::{build_system_prompt, grammar_instructions};
use tbodemy::domain::{ConversationType, DifficultyLevel};

#[test]
fn given_business_beginner_session_when_building_prompt_then_includes_persona_and_level() {
    let prompt = build_system_prompt(
        "Job interviews",
        ConversationType::Business,
        DifficultyLevel::Beginner,
    );

    assert!(prompt.starts_with("You are a business English coach"));
    assert!(prompt.contains("Topic: Job interviews"));
    assert!(prompt.contains("Level: BEGINNER"));
    assert!(prompt.contains("Use simple vocabulary and short sentences."));
}

#[test]
fn given_casual_advanced_session_when_building_prompt_then_allows_idioms() {
    let prompt = build_system_prompt(
        "Weekend plans",
        ConversationType::Casual,
        DifficultyLevel::Advanced,
    );

    assert!(prompt.starts_with("You are a relaxed conversation partner"));
    assert!(prompt.contains("Level: ADVANCED"));
    assert!(prompt.contains("phrasal verbs"));
}

#[test]
fn given_language_when_building_grammar_instructions_then_names_language() {
    let prompt = grammar_instructions("en-US");

    assert!(prompt.contains("writing in en-US"));
    assert!(prompt.contains("\"corrected\""));
}
