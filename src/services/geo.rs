// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Polygon normalization.
//!
//! The backend and the map widgets disagree on how an area is encoded:
//! GeoJSON features, bare geometries, nested coordinate arrays, lists of
//! `{lat, lng}` objects, or a record with the coordinates under some
//! Spanish or English field name. Everything here funnels those shapes into
//! one closed exterior [`Ring`] in `[lng, lat]` order.
//!
//! Typed GeoJSON geometries are already `[lng, lat]` and are taken as-is.
//! Coordinate order inside untyped raw pairs is guessed: a pair whose first
//! value fits a latitude and second fits a longitude is read as `[lat, lng]`
//! and swapped. Points where both readings are plausible (|x| <= 90 and
//! |y| <= 90) are therefore always treated as `[lat, lng]`. This is a known
//! ambiguity, kept as-is.
//!
//! The same guess applies to our own output: a legacy ring list fed back
//! in is untyped, so a ring whose points sit in the ambiguous band comes
//! back swapped. Wrap a ring as a GeoJSON `Polygon` before normalizing it
//! again.

use crate::models::geometry::{LatLng, Ring};
use geojson::{Feature, Geometry, JsonObject};
use serde_json::Value;

/// Record fields that may hold raw coordinates, in lookup order.
pub const RAW_COORDINATE_KEYS: &[&str] = &["poligono", "polygon", "area", "zona", "coordinates"];

static NULL: Value = Value::Null;

/// The input shapes we know how to read, in fall-through order.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonInput<'a> {
    /// GeoJSON Feature: read its geometry.
    Feature(&'a Value),
    /// GeoJSON FeatureCollection: first feature that yields a ring wins.
    FeatureCollection(&'a [Value]),
    /// GeoJSON Polygon coordinates: first ring is the exterior.
    Polygon(&'a Value),
    /// GeoJSON MultiPolygon coordinates: largest ring is the exterior.
    MultiPolygon(&'a Value),
    /// Object carrying raw coordinates under one of [`RAW_COORDINATE_KEYS`].
    RawProperty(&'a Value),
    /// Array of `{lat, lng}` objects.
    LatLngList(Vec<LatLng>),
    /// Array of pairs or arbitrarily nested arrays of pairs.
    Nested(&'a Value),
    /// Nothing usable.
    Unsupported,
}

impl<'a> PolygonInput<'a> {
    pub fn classify(input: &'a Value) -> Self {
        match input {
            Value::Object(obj) => {
                match obj.get("type").and_then(Value::as_str) {
                    Some("Feature") => {
                        return PolygonInput::Feature(obj.get("geometry").unwrap_or(&NULL))
                    }
                    Some("FeatureCollection") => {
                        let features = obj
                            .get("features")
                            .and_then(Value::as_array)
                            .map(Vec::as_slice)
                            .unwrap_or(&[]);
                        return PolygonInput::FeatureCollection(features);
                    }
                    Some("Polygon") => {
                        return PolygonInput::Polygon(
                            obj.get("coordinates").unwrap_or(&NULL),
                        )
                    }
                    Some("MultiPolygon") => {
                        return PolygonInput::MultiPolygon(
                            obj.get("coordinates").unwrap_or(&NULL),
                        )
                    }
                    _ => {}
                }

                RAW_COORDINATE_KEYS
                    .iter()
                    .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
                    .map(PolygonInput::RawProperty)
                    .unwrap_or(PolygonInput::Unsupported)
            }
            Value::Array(items) => {
                if items.first().is_some_and(is_lat_lng_object) {
                    PolygonInput::LatLngList(items.iter().filter_map(lat_lng_from_value).collect())
                } else {
                    PolygonInput::Nested(input)
                }
            }
            _ => PolygonInput::Unsupported,
        }
    }

    /// Canonical exterior ring for this input, if one can be derived.
    pub fn ring(&self) -> Option<Ring> {
        match self {
            PolygonInput::Feature(geometry) => normalize_ring(geometry),
            PolygonInput::FeatureCollection(features) => features.iter().find_map(normalize_ring),
            PolygonInput::Polygon(coords) => extract_rings(coords)
                .into_iter()
                .next()
                .map(|points| Ring::new(points).closed()),
            PolygonInput::MultiPolygon(coords) => {
                largest_ring(extract_rings(coords)).map(|points| Ring::new(points).closed())
            }
            PolygonInput::RawProperty(coords) | PolygonInput::Nested(coords) => {
                largest_ring(extract_rings(coords)).map(guessed_ring)
            }
            PolygonInput::LatLngList(points) => lat_lng_ring(points),
            PolygonInput::Unsupported => None,
        }
    }
}

/// Normalize any supported polygon shape into a closed `[lng, lat]` ring.
pub fn normalize_ring(input: &Value) -> Option<Ring> {
    PolygonInput::classify(input)
        .ring()
        .filter(|ring| !ring.is_empty())
}

/// Legacy nested form `[[[lng, lat], ...]]`: zero or one ring.
pub fn to_legacy_polygon_coords(input: &Value) -> Vec<Ring> {
    normalize_ring(input).into_iter().collect()
}

/// Convert `{lat, lng}` points into the legacy nested form.
///
/// Fewer than three points cannot enclose anything and yield no ring.
pub fn lat_lng_array_to_legacy_coords(points: &[LatLng]) -> Vec<Ring> {
    lat_lng_ring(points).into_iter().collect()
}

/// Wrap the normalized ring in a GeoJSON Polygon feature.
///
/// Returns `None` unless the ring has at least three distinct vertices
/// plus the closing point.
pub fn to_polygon_feature_from_any(input: &Value, properties: JsonObject) -> Option<Feature> {
    let ring = normalize_ring(input)?;
    if !ring.is_valid_polygon() {
        tracing::debug!(vertices = ring.len(), "Ring too small for a polygon feature");
        return None;
    }

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Polygon(vec![
            ring.to_positions()
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Heuristic `[lat, lng]` → `[lng, lat]` swap (see module docs).
pub fn guess_lng_lat(pair: [f64; 2]) -> [f64; 2] {
    let [a0, a1] = pair;
    let looks_lat_lng = (-90.0..=90.0).contains(&a0) && (-180.0..=180.0).contains(&a1);
    if looks_lat_lng {
        [a1, a0]
    } else {
        [a0, a1]
    }
}

fn guessed_ring(points: Vec<[f64; 2]>) -> Ring {
    Ring::new(points.into_iter().map(guess_lng_lat).collect()).closed()
}

fn lat_lng_ring(points: &[LatLng]) -> Option<Ring> {
    let points: Vec<[f64; 2]> = points
        .iter()
        .filter(|p| p.lat.is_finite() && p.lng.is_finite())
        .map(|p| p.to_lng_lat())
        .collect();
    if points.len() < 3 {
        return None;
    }
    Some(Ring::new(points).closed())
}

/// Ring with the most vertices; the first one wins ties.
fn largest_ring(rings: Vec<Vec<[f64; 2]>>) -> Option<Vec<[f64; 2]>> {
    rings.into_iter().reduce(|best, r| if r.len() > best.len() { r } else { best })
}

/// Two finite numbers at positions 0 and 1 (extra values such as altitude are ignored).
fn as_pair(value: &Value) -> Option<[f64; 2]> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    let x = items[0].as_f64()?;
    let y = items[1].as_f64()?;
    (x.is_finite() && y.is_finite()).then_some([x, y])
}

fn starts_with_pair(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(as_pair)
        .is_some()
}

/// Collect every array-of-pairs found by descending through nested arrays.
fn extract_rings(input: &Value) -> Vec<Vec<[f64; 2]>> {
    let Some(parts) = input.as_array() else {
        return Vec::new();
    };

    if starts_with_pair(input) {
        return vec![parts.iter().filter_map(as_pair).collect()];
    }

    let mut rings = Vec::new();
    for part in parts {
        let Some(items) = part.as_array() else {
            continue;
        };
        if starts_with_pair(part) {
            rings.push(items.iter().filter_map(as_pair).collect());
        } else if items.first().is_some_and(Value::is_array) {
            rings.extend(extract_rings(part));
        }
    }
    rings
}

fn is_lat_lng_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("lat") && obj.contains_key("lng"))
}

/// Numbers or numeric strings, like the map widgets send.
fn lat_lng_from_value(value: &Value) -> Option<LatLng> {
    let obj = value.as_object()?;
    let num = |v: &Value| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Some(LatLng::new(num(obj.get("lat")?)?, num(obj.get("lng")?)?))
}
