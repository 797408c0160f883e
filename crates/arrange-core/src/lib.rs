//! Arrange Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Arrange layout
//! engine and its hosts. It includes:
//!
//! - **Geometry**: Points, sizes, bounds, segments and the orientation
//!   predicate used for crossing detection ([`geometry`] module)
//! - **Graph**: The input data model of typed nodes and directed edges
//!   ([`graph`] module)

pub mod geometry;
pub mod graph;
