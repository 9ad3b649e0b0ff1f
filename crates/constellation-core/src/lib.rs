//! Constellation Core Types
//!
//! This crate provides the geometric foundation shared by the Constellation
//! placement engine, the content store and the command-line tool:
//!
//! - **Geometry**: points, sizes and axis-aligned bounds ([`geometry`] module)

pub mod geometry;
