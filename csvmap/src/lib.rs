//! Csvmap
//!
//! Typed records <-> delimited text, driven by per-field index & column name mappings.
//!
//! ```rust,ignore
//! #[derive(CsvRecord, Default)]
//! struct User {
//!     row_number: usize,
//!     #[csv(index = 0, name = "identifier")]
//!     id: Option<u32>,
//!     #[csv(index = 1)]
//!     surname: String,
//! }
//!
//! let executor = CsvExecutor::<User>::new()?;
//! let doc = executor.write(&users)?;
//! let res = executor.read_str(&doc)?;
//! ```

extern crate self as csvmap;

pub mod config;
pub mod cv;
pub(crate) mod de;
pub mod ec;
pub mod error;
pub(crate) mod macros;
pub mod schema;
pub(crate) mod se;
pub mod util;
pub mod value;

pub use config::*;
pub use ec::*;
pub use error::*;
pub use schema::*;
pub use value::*;

pub(crate) use macros::*;
pub use util::{DEFAULT_DELIMITER, LINE_TERMINATOR};
pub(crate) use util::{DEFAULT_DATETIME_FMT, DEFAULT_DATE_FMT, DEFAULT_TIME_FMT};

#[cfg(feature = "derive")]
pub use csvmap_derive::CsvRecord;

pub use chrono;
pub use rust_decimal;
pub use uuid;
