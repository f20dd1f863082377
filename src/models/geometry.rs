// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coordinate and polygon ring types.

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// A point in "human" order, as typed into forms or returned by map pickers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// GeoJSON order: `[lng, lat]`.
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Exterior boundary of a polygon as `[lng, lat]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<[f64; 2]>);

/// Three distinct vertices plus the closing copy of the first.
pub const MIN_RING_VERTICES: usize = 4;

impl Ring {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.0
    }

    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Append a copy of the first vertex unless the ring is already closed.
    pub fn closed(mut self) -> Self {
        if let Some(&first) = self.0.first() {
            if !self.is_closed() {
                self.0.push(first);
            }
        }
        self
    }

    /// Number of distinct vertices, ignoring the closing copy.
    pub fn distinct_vertices(&self) -> usize {
        let mut seen: Vec<[f64; 2]> = Vec::with_capacity(self.0.len());
        for p in &self.0 {
            if !seen.contains(p) {
                seen.push(*p);
            }
        }
        seen.len()
    }

    /// Enough vertices to describe an area: three distinct points plus closure.
    pub fn is_valid_polygon(&self) -> bool {
        self.0.len() >= MIN_RING_VERTICES && self.distinct_vertices() >= 3
    }

    /// Nested `Vec` form used by GeoJSON polygon coordinates.
    pub fn to_positions(&self) -> Vec<Vec<f64>> {
        self.0.iter().map(|p| p.to_vec()).collect()
    }

    /// Convert to a `geo` polygon (no holes) for spatial predicates.
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let exterior: LineString<f64> = self
            .0
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect::<Vec<_>>()
            .into();
        Polygon::new(exterior, vec![])
    }
}

impl From<Vec<[f64; 2]>> for Ring {
    fn from(points: Vec<[f64; 2]>) -> Self {
        Self(points)
    }
}
