//! Sortie: decides which missions a fleet may be ordered to fly.
//!
//! The eligibility core lives in [dispatch] and is pure: callers gather every fact
//! up front (ownership, friendliness, ACS groups, research) and get back an ordered
//! mission set plus duration options. [data] supplies configuration and a
//! fixture-backed universe, [parallel] resolves batches, and [server] / [cli] are
//! the local entry points.

pub mod cli;
pub mod data;
pub mod dispatch;
pub mod parallel;
pub mod server;
