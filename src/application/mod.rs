pub mod use_cases;

pub use use_cases::export::ExportFormat;
pub use use_cases::extraction::{ExtractionInput, ExtractionUseCase};
pub use use_cases::query::QueryUseCase;
pub use use_cases::session::{DocumentSession, SessionState};
