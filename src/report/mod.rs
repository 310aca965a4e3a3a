//! Report renderers for the per-driver impact table.
//!
//! - [`terminal`] — colored summary box, risk ranking, and (with `--verbose`)
//!   the fleet-wide behavior breakdown; respects `--quiet`.
//! - [`csv`] — flat table export for downstream dashboards.

pub mod csv;
pub mod terminal;
