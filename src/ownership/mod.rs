//! Domain layer: the package graph, ownership classification and the
//! policies built on top of it. Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
