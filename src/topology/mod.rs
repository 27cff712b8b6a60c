//! Reference-cell topologies.
//!
//! This module provides the recursive [`Topology`] type that drives every
//! basis construction, together with the [`CellType`] names used by mesh
//! codes and a hashable [`TopologyKey`] for caches.

pub mod cell_type;
pub mod reference;

pub use cell_type::CellType;
pub use reference::{Constructor, Topology, TopologyKey};
