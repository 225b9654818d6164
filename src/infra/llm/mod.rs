mod env;
mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};
