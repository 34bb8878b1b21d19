#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Natural-language map command interpreter.
//!
//! Turns a free-text command ("highlight states where income is above
//! 60000 and crime rates are below 0.1 in red") into a typed
//! [`Intent`]. Interpretation is a pure function of the command string:
//! no datasets are consulted, no state is kept, and no input ever raises
//! an error — under-specified commands come back as [`Intent::Clarify`]
//! and unrecognized ones as [`Intent::Unknown`].
//!
//! The pipeline: lowercase the command, walk the [`dispatch::BRANCHES`]
//! priority cascade top to bottom, and return the first branch whose
//! parser produces a complete intent.

pub mod ambiguity;
pub mod conditions;
pub mod dispatch;
pub mod normalize;
pub mod registry;

pub use dispatch::interpret;
pub use map_data_query_models::{Condition, Intent};
