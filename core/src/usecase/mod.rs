pub mod statement;

// Re-export
pub use statement::{report_for, report_for_on, StatementUseCase};
