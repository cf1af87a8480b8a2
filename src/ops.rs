pub mod box_it;
pub mod combine;
pub mod constant;
pub mod debounce;
pub mod delay;
pub mod end_when;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod merge;
pub mod sample;
pub mod scan;
pub mod take;
pub mod zip;
