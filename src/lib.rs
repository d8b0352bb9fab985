mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
mod shared;

pub use app::run;
