//! ==============================================================================
//! components/mod.rs - UI Components
//! ==============================================================================

mod generator;
mod header;
mod notifications;

pub use generator::GeneratorPanel;
pub use header::Header;
pub use notifications::Notifications;
