pub mod appearance;
pub mod export;
pub mod extraction;
pub mod query;
pub mod session;
pub mod web_fetcher;
