//! Business logic services

pub mod tracker;

pub use tracker::ExerciseTracker;
