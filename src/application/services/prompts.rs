use crate::domain::{ConversationType, DifficultyLevel};

fn persona(conversation_type: ConversationType) -> &'static str {
    match conversation_type {
        ConversationType::Formal => {
            "You are a professional English tutor conducting a formal conversation."
        }
        ConversationType::Informal => {
            "You are a friendly English conversation partner having a casual chat."
        }
        ConversationType::Business => {
            "You are a business English coach helping with professional communication."
        }
        ConversationType::Casual => {
            "You are a relaxed conversation partner helping someone practice everyday English."
        }
    }
}

fn level_guidance(level: DifficultyLevel) -> &'static str {
    match level {
        DifficultyLevel::Beginner => {
            "Use simple vocabulary and short sentences. Speak slowly and clearly. Avoid idioms and complex grammar."
        }
        DifficultyLevel::Intermediate => {
            "Use everyday vocabulary with some advanced words. Use varied sentence structures. You can use common idioms."
        }
        DifficultyLevel::Advanced => {
            "Use sophisticated vocabulary and complex sentence structures. Feel free to use idioms, phrasal verbs and nuanced expressions."
        }
    }
}

/// Tutor instructions prepended to every speaking-session completion.
pub fn build_system_prompt(
    topic: &str,
    conversation_type: ConversationType,
    level: DifficultyLevel,
) -> String {
    format!(
        "{persona}\n\n\
         Topic: {topic}\n\
         Level: {level}\n\n\
         Instructions:\n\
         - {guidance}\n\
         - Keep responses concise (2-4 sentences maximum).\n\
         - Ask engaging follow-up questions to keep the conversation flowing.\n\
         - Provide gentle corrections when the student makes significant errors, but focus on encouraging communication.\n\
         - Be supportive and encouraging.\n\
         - Adapt your language complexity to match the student's level.\n\n\
         Start the conversation by greeting the student and introducing the topic briefly.",
        persona = persona(conversation_type),
        topic = topic,
        level = level.as_str().to_uppercase(),
        guidance = level_guidance(level),
    )
}

/// System prompt for the LLM grammar strategy. The model must answer with a
/// JSON object of the shape `{"corrected": "...", "errors": [...]}`.
pub fn grammar_instructions(language: &str) -> String {
    format!(
        "You are a meticulous grammar checker for learners writing in {language}. \
         Correct grammar, spelling and punctuation in the user's text without changing its meaning or tone. \
         Reply with one JSON object and nothing else, shaped exactly like \
         {{\"corrected\": \"<full corrected text>\", \"errors\": [{{\"error\": \"<wrong fragment>\", \
         \"suggestion\": \"<replacement>\", \"message\": \"<short explanation>\", \"rule\": \"<RULE_ID>\"}}]}}. \
         If the text is already correct, return it unchanged with an empty errors array."
    )
}
