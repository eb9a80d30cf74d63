pub mod file;
pub mod traits;

// Re-export
pub use file::FileSessionRepository;
pub use traits::SessionRepository;
