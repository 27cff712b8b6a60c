//! Build-once cache of bases keyed by reference cell and order.
//!
//! The cache is an ordinary value owned by the caller; there is no global
//! registry. Entries are shared as `Arc<T>` and live as long as the
//! provider (or the last outstanding handle).

use crate::basis_error::BasisError;
use crate::topology::{Topology, TopologyKey};
use dashmap::DashMap;
use std::sync::Arc;

type Key = (TopologyKey, u32); // (cell, order)

#[derive(Debug)]
pub struct BasisProvider<T> {
    cache: DashMap<Key, Arc<T>>,
}

impl<T> Default for BasisProvider<T> {
    fn default() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }
}

impl<T> BasisProvider<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `(topology, order)`, building it with
    /// `create` on first use. Failed builds are not cached.
    ///
    /// Two threads racing on the same key may both build; the first insert
    /// wins and both receive it.
    pub fn get_or_try_create<C>(
        &self,
        topology: &Topology,
        order: u32,
        create: C,
    ) -> Result<Arc<T>, BasisError>
    where
        C: FnOnce(&Topology, u32) -> Result<T, BasisError>,
    {
        let key = (topology.key(), order);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }
        log::debug!("building basis for `{}` of order {order}", topology.name());
        let built = Arc::new(create(topology, order)?);
        Ok(Arc::clone(self.cache.entry(key).or_insert(built).value()))
    }

    pub fn contains(&self, topology: &Topology, order: u32) -> bool {
        self.cache.contains_key(&(topology.key(), order))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached entry; outstanding handles stay valid.
    pub fn clear(&self) {
        self.cache.clear();
    }
}
