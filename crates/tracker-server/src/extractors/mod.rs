//! Custom extractors

pub mod payload;

pub use payload::Payload;
