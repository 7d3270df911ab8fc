//! Immutable location graph with a stable dense index.
//!
//! Public invariants:
//! - Indices are assigned in declaration order and never change.
//! - Every location has at least one neighbor.
//! - Adjacency is directed; nothing assumes `a -> b` implies `b -> a`.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::graph::GraphRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl Topology {
    /// Build from `(location, neighbors)` pairs.
    ///
    /// Repeated neighbors within one list collapse to their first occurrence.
    pub fn new<I, S, N>(spec: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut names = Vec::new();
        let mut index = HashMap::new();
        let mut raw: Vec<Vec<String>> = Vec::new();

        for (location, neighbors) in spec {
            let location = location.into();
            if index.contains_key(&location) {
                return Err(Error::DuplicateLocation(location));
            }
            index.insert(location.clone(), names.len());
            names.push(location);
            raw.push(neighbors.into_iter().map(Into::into).collect());
        }
        if names.is_empty() {
            return Err(Error::EmptyTopology);
        }

        let mut adjacency = Vec::with_capacity(names.len());
        for (i, nbrs) in raw.into_iter().enumerate() {
            let mut resolved: Vec<usize> = Vec::with_capacity(nbrs.len());
            for neighbor in nbrs {
                let j = *index.get(&neighbor).ok_or_else(|| Error::UnknownNeighbor {
                    location: names[i].clone(),
                    neighbor: neighbor.clone(),
                })?;
                if !resolved.contains(&j) {
                    resolved.push(j);
                }
            }
            if resolved.is_empty() {
                return Err(Error::IsolatedLocation(names[i].clone()));
            }
            adjacency.push(resolved);
        }

        Ok(Self { names, index, adjacency })
    }

    /// The nine-room mansion the ghost haunts.
    pub fn mansion() -> Self {
        let spec: [(&str, &[&str]); 9] = [
            ("Foyer", &["Hallway", "Library"]),
            ("Library", &["Foyer", "Study", "Conservatory"]),
            ("Study", &["Library", "Secret Room"]),
            ("Secret Room", &["Study", "Cellar"]),
            ("Cellar", &["Secret Room", "Kitchen"]),
            ("Kitchen", &["Cellar", "Dining Room"]),
            ("Dining Room", &["Kitchen", "Hallway"]),
            ("Hallway", &["Dining Room", "Foyer", "Conservatory"]),
            ("Conservatory", &["Hallway", "Library"]),
        ];
        let names: Vec<String> = spec.iter().map(|(n, _)| n.to_string()).collect();
        let index = names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect::<HashMap<_, _>>();
        let adjacency: Vec<Vec<usize>> = spec
            .iter()
            .map(|(_, nbrs)| nbrs.iter().map(|n| index[*n]).collect())
            .collect();
        Self { names, index, adjacency }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; construction rejects empty specifications.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Location names in index order.
    pub fn locations(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, location: &str) -> bool {
        self.index.contains_key(location)
    }

    pub fn index_of(&self, location: &str) -> Result<usize> {
        self.index
            .get(location)
            .copied()
            .ok_or_else(|| Error::UnknownLocation(location.to_string()))
    }

    pub fn location_at(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(Error::IndexOutOfRange { index, len: self.names.len() })
    }

    /// Neighbors of `location` in declaration order. Never empty.
    pub fn neighbors(&self, location: &str) -> Result<Vec<&str>> {
        let i = self.index_of(location)?;
        Ok(self.adjacency[i].iter().map(|&j| self.names[j].as_str()).collect())
    }

    /// Neighbor indices of `index`.
    pub fn neighbor_indices(&self, index: usize) -> Result<&[usize]> {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::IndexOutOfRange { index, len: self.names.len() })
    }
}

impl GraphRef for Topology {
    fn node_count(&self) -> usize {
        self.names.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
