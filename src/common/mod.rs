//! Shared building blocks: domain types, errors, observer traits, clock

pub mod channels;
pub mod clock;
pub mod errors;
pub mod traits;
pub mod types;
