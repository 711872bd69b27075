pub mod cleaning;
pub mod error;
pub mod pipeline;
pub mod ranking;
pub mod strength;
pub mod types;
