//! Protocol types for the query endpoint
//!
//! This module contains the wire envelope and the action trait.

mod action;
mod envelope;

pub use action::{Action, ActionDefinition, ActionName};
pub use envelope::{Envelope, ErrorBody, QueryRequest};
