// ABOUTME: Ring module - builds the cyclic topology of resources and agents.
// ABOUTME: Construction is pure and runs once before any agent starts.

mod builder;

pub use builder::{MIN_AGENTS, Ring, RingBuilder, RingHandle, Seat};

#[cfg(test)]
mod builder_test;
