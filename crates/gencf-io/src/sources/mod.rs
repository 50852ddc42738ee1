pub mod deepseek;
pub mod eia;

pub use deepseek::{ChatClassifier, ChatClassifierConfig, RangeGuidance, DEFAULT_GUIDANCE};
pub use eia::EiaGenerationFetcher;
