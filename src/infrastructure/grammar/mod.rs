mod languagetool_checker;
mod llm_grammar_checker;

pub use languagetool_checker::LanguageToolChecker;
pub use llm_grammar_checker::LlmGrammarChecker;
