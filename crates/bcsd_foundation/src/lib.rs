// crates/bcsd_foundation/src/lib.rs

//! Foundation layer of the BCSD reformatting workspace.
//!
//! Only the shared error type lives here; everything domain-specific sits
//! in the crates above.

pub mod error;

pub use error::{BcsdError, BcsdResult};
