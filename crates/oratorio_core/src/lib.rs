//! Core data types for the oratorio narrated-audio pipeline.
//!
//! This crate provides the foundation data types shared across the oratorio
//! workspace: shape contracts, the trigger payload, and the generation
//! request/response model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod input;
mod message;
mod output;
mod request;
mod role;
mod script;
mod shape;

pub use input::Input;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use script::{DEFAULT_SCRIPT_LENGTH, ScriptRequest, Style};
pub use shape::{Field, Shape, ShapeMismatch};
