pub mod audio;
pub mod auth;
pub mod grammar;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod speech;
pub mod storage;
