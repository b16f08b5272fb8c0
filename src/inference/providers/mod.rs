pub mod gemini;
pub mod ollama;

pub use gemini::GeminiEngine;
pub use ollama::OllamaEngine;
