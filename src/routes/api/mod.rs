pub mod groceries;
pub mod public;
mod router;

pub use router::router;
