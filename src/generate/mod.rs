//! FHiCL document generators for the pipeline roles.
//!
//! Each generator is a pure function from a parameter struct to the
//! configuration text. Nothing is written to disk here.

pub mod aggregator;
pub mod compression;
pub mod daq_block;
pub mod event_builder;

use crate::config::ParamError;
use crate::render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),

    #[error("template rendering failed: {0}")]
    Render(#[from] RenderError),
}

pub use aggregator::generate_aggregator;
pub use event_builder::generate_event_builder;
