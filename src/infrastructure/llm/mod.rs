mod openai_client;
mod openai_error;

pub use openai_client::OpenAiClient;
pub use openai_error::is_quota_error;
