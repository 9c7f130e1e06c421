//! Markex Marker Model
//!
//! Defines the data contracts handed over by the timeline extraction step:
//! - **Markers:** Named, timestamped annotations with kind, roles, and parent clip context
//! - **Timecodes:** Frame-rate aware positions, including drop-frame labelling
//! - **Timeline:** Timeline names and start timecode, plus the JSON document wrapper
//! - **Roles:** Order-preserving parallel role extraction across sub-timelines
//!
//! Markers are read-only once extracted; exporters project them, never mutate them.

pub mod filter;
pub mod marker;
pub mod roles;
pub mod timecode;
pub mod timeline;

pub use filter::*;
pub use marker::*;
pub use roles::*;
pub use timecode::*;
pub use timeline::*;
