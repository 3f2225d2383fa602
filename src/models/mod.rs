pub mod mood;
pub mod mood_level;
pub mod quote;
