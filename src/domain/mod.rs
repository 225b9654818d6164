mod errors;
mod generation;

pub use errors::GenerationError;
pub use generation::{
    ChatTurn, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, GenerateOptions, GenerationResult,
};
