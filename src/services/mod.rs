pub mod mood_summary;
