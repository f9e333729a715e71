// ABOUTME: Resource module - the exclusive units agents contend for.
// ABOUTME: Exposes ResourceUnit and the guard representing ownership.

mod unit;

pub use unit::{ResourceGuard, ResourceUnit};
