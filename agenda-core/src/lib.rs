//! Core types for the agenda tool.
//!
//! This crate provides the agenda record store and everything around it:
//! - `AgendaStore` for CRUD, search and date filtering over one slot
//! - `slot` backends the store persists into
//! - `notify` change events broadcast on every mutation
//! - `form` editing state for a create/edit form

pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod field_map;
pub mod form;
pub mod image;
pub mod notify;
pub mod record;
pub mod slot;
pub mod stats;
pub mod store;
pub mod transfer;

pub use error::{AgendaError, AgendaResult};
pub use record::{AgendaDraft, AgendaPatch, AgendaRecord};
pub use store::AgendaStore;
