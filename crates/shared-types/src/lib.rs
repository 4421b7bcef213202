//! # Shared Types Crate
//!
//! This crate contains the value objects exchanged between the scheduler,
//! the provider service, and the transport boundary.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Plain Data**: No locks, no I/O; everything is `Clone + Serialize`.
//! - **Owned Payloads**: A value handed to the scheduler is moved, never
//!   shared; follow-up tasks receive the same owned value.

pub mod entities;
pub mod representation;

pub use entities::*;
pub use representation::{AttributeValue, ResourceRepresentation};
