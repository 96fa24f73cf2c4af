//! Projections of a [`KeyTable`](crate::KeyTable) into artifact shapes.
//!
//! - **`web`** – `web_key_name -> code`, ordered by name, rendered as JSON.
//! - **`firmware`** – `code -> firmware_symbol`, ordered by code, rendered as
//!   a `switch`-based C function with a `default` fallback.
//!
//! Both take the table by shared reference and never mutate it, so one loaded
//! table can feed both projections and the two artifacts always agree.

pub mod firmware;
pub mod web;
