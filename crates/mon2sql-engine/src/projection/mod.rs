//! # Projection
//!
//! Turns parsed records into output for a fixed destination:
//!
//! - [`project`] renders SQL for the destination table described by a
//!   [`DestinationSchema`]
//! - [`DisplayView`] picks the rows and columns worth showing to a person
//!
//! Both work from the column-typed [`RecordTable`](crate::table::RecordTable),
//! so a value renders the same way whichever record it came from.

pub mod display;
pub mod schema;
pub mod sql;

pub use display::{DEFAULT_DISPLAY_COLUMNS, DisplayOptions, DisplayView};
pub use schema::{DEFAULT_COLUMNS, DEFAULT_TABLE, DEFAULT_VALIDITY_COLUMN, DestinationSchema};
pub use sql::{ProjectionStats, SqlScript, project, render_cell};
