//! The leap-group computation engine
//!
//! Control flow: graph -> hop enumeration -> leap-n generators -> group
//! closure -> structure classification.

mod classify;
mod closure;
mod config;
mod generators;
mod hops;
mod leap;

pub use classify::describe_group;
pub use closure::StabilizerChain;
pub use config::ComputeConfig;
pub use hops::{first_hop, hops, is_hop};
pub use leap::{leap_group, LeapGroup};
