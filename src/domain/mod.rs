pub mod csv;
pub mod document;
pub mod error;
pub mod history;
pub mod llm_config;
pub mod theme;
pub mod usage_stats;
