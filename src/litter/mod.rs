//! Export contents of `litter` folder
mod detection;
mod waste_track;
mod separation;
mod filters;
mod tracker;
mod litter_errors;

pub use self::{
    detection::*,
    waste_track::*,
    separation::*,
    filters::*,
    tracker::*,
    litter_errors::*,
};

#[cfg(test)]
pub mod test_data;
