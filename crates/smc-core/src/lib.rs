#![deny(missing_docs)]

//! Core traits and data types for the SMC particle filter: structured
//! errors, the deterministic RNG handle with substream seed derivation,
//! scalar normal-density helpers, random-variate utilities, and the
//! [`InferenceModel`] capability implemented by user-supplied models.

pub mod errors;
pub mod model;
pub mod normal;
pub mod rng;
pub mod sampling;

pub use errors::{ErrorInfo, SmcError};
pub use model::{InferenceModel, PriorSpec};
pub use rng::{derive_substream_seed, RngHandle};
pub use sampling::{categorical_index, standard_normal, uniform_open01};
