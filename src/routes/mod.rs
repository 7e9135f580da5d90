// Export all route modules
pub mod overview;
pub mod reports;

// Re-export all route handlers for easy importing
pub use overview::*;
pub use reports::*;
