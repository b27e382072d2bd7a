//! Hand-to-waste littering detection: carries waste objects across video
//! frames, measures how long each one stays away from every hand and emits
//! a single littering event per separation episode that outlasts the
//! configured time threshold.

pub mod litter;
pub mod utils;
