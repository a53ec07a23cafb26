//! FHiCL configuration generation for artdaq-based data-acquisition
//! pipelines.
//!
//! The crate covers the two pipeline roles downstream of the fragment
//! receivers: the event builder, which assembles fragments from the front
//! ends into complete events, and the aggregator, which collects built
//! events for storage and monitoring. Each role has a generator that takes
//! a typed parameter set and returns the ready-to-load configuration
//! document as a string; callers own writing it to disk.
//!
//! Parameter sets are plain structs ([`config::AggregatorParams`],
//! [`config::EventBuilderParams`]) and can also be loaded from a YAML file
//! with [`config::load_params`].

pub mod config;
pub mod diff;
pub mod generate;
pub mod render;
