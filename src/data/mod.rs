//! Tabular data model: ingestion, column roles, category averages and
//! selection lookup.
//!
//! Everything in this module is a pure transform over in-memory values, so it
//! runs (and is tested) outside the browser.

pub mod aggregate;
pub mod error;
pub mod schema;
pub mod selection;
pub mod table;

pub use aggregate::{Aggregates, CategoryAggregate, aggregate};
pub use error::ChartError;
pub use schema::{Schema, SchemaConfig};
pub use selection::{Selection, SelectionMode, resolve};
pub use table::{IngestOptions, IngestPolicy, Record, Table, ingest};
