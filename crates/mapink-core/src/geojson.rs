//! GeoJSON interchange document for exported shapes.
//!
//! One feature per committed shape: polygons become `Polygon` geometries
//! with the implicit ring closure applied, every other kind becomes a
//! `LineString`. Style travels in feature properties. Round-tripping a
//! document through [`import`] and [`export`] preserves its
//! [`to_pretty_json`] text byte for byte.

use crate::shapes::{Shape, ShapeDraft, ShapeKind};
use crate::style::{Color, Style};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while encoding or decoding an interchange document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line string needs at least 2 positions, got {0}")]
    ShortLineString(usize),
    #[error("polygon has no rings")]
    EmptyPolygon,
    #[error("polygon ring needs at least 4 positions, got {0}")]
    ShortRing(usize),
    #[error("polygon ring is not closed")]
    OpenRing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum CollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum FeatureType {
    Feature,
}

/// A GeoJSON feature collection holding one feature per committed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    kind: CollectionType,
    pub features: Vec<Feature>,
}

impl Document {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            features,
        }
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// One exported shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: FeatureType,
    pub properties: Properties,
    pub geometry: Geometry,
}

/// Style annotations carried on each feature.
///
/// Dashed freehand and dashed line variants are distinguished from their
/// solid counterparts only by the `dashed` flag; the geometry type is the
/// same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub color: Color,
    pub thickness: f64,
    pub dashed: bool,
}

/// Geometry payload; positions are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    LineString(Vec<[f64; 2]>),
    Polygon(Vec<Vec<[f64; 2]>>),
}

/// Build a document from committed shapes. An empty slice produces an
/// empty, well-formed collection.
pub fn export(shapes: &[Shape]) -> Document {
    Document::new(shapes.iter().map(feature_from_shape).collect())
}

fn feature_from_shape(shape: &Shape) -> Feature {
    let positions: Vec<[f64; 2]> = shape.vertices.iter().map(|p| [p.x, p.y]).collect();
    let geometry = if shape.kind.is_polygon() {
        // GeoJSON rings repeat the first position; the engine's vertex
        // sequence does not.
        let mut ring = positions;
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        Geometry::Polygon(vec![ring])
    } else {
        Geometry::LineString(positions)
    };
    Feature {
        kind: FeatureType::Feature,
        properties: Properties {
            color: shape.style.color,
            thickness: shape.style.thickness,
            dashed: shape.style.dashed,
        },
        geometry,
    }
}

/// Decode a document into shape drafts ready to commit.
///
/// Only the exterior ring of a polygon is read. Line strings re-import as
/// plain (or dashed) line kinds; the freehand distinction does not exist at
/// the document level.
pub fn import(document: &Document) -> Result<Vec<ShapeDraft>, DocumentError> {
    document.features.iter().map(draft_from_feature).collect()
}

fn draft_from_feature(feature: &Feature) -> Result<ShapeDraft, DocumentError> {
    let style = Style {
        color: feature.properties.color,
        thickness: feature.properties.thickness,
        dashed: feature.properties.dashed,
    };
    match &feature.geometry {
        Geometry::LineString(positions) => {
            if positions.len() < 2 {
                return Err(DocumentError::ShortLineString(positions.len()));
            }
            let kind = if style.dashed {
                ShapeKind::DashedLine
            } else {
                ShapeKind::Line
            };
            Ok(ShapeDraft::from_vertices(kind, to_points(positions), style))
        }
        Geometry::Polygon(rings) => {
            let ring = rings.first().ok_or(DocumentError::EmptyPolygon)?;
            if ring.len() < 4 {
                return Err(DocumentError::ShortRing(ring.len()));
            }
            if ring.first() != ring.last() {
                return Err(DocumentError::OpenRing);
            }
            Ok(ShapeDraft::from_vertices(
                ShapeKind::Polygon,
                to_points(&ring[..ring.len() - 1]),
                style,
            ))
        }
    }
}

fn to_points(positions: &[[f64; 2]]) -> Vec<Point> {
    positions.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

/// Canonical pretty-printed byte form of a document.
pub fn to_pretty_json(document: &Document) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parse a document from its JSON text.
pub fn from_json(text: &str) -> Result<Document, DocumentError> {
    Ok(serde_json::from_str(text)?)
}
