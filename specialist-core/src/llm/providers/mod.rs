//! Chat completion backends

pub mod openai;

pub use openai::OpenAIProvider;
