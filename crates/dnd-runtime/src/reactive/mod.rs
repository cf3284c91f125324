#![forbid(unsafe_code)]

//! Reactive plumbing shared by the coordinator and its consumers.

pub mod broadcast;

pub use broadcast::{Broadcast, BroadcastReader, Subscription};
