// ABOUTME: Root module for ringdine - deadlock-free contention for a ring of resources.
// ABOUTME: Re-exports all public types from submodules.

pub mod agent;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod prelude;
pub mod resource;
pub mod ring;
pub mod signal;

pub use error::DineError;
