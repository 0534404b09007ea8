//! Loro document schema and operations.

use loro::{
    Container, ExportMode, LoroDoc, LoroList, LoroMap, LoroResult, LoroValue, ValueOrContainer,
};
use uuid::Uuid;

use super::convert::{push_point, stroke_from_loro};
use crate::stroke::{Stroke, StrokeId};
use kurbo::Point;

/// Key for the strokes map in the document.
pub const SHAPES_KEY: &str = "shapes";
/// Key for the draw-order list in the document.
pub const STROKE_ORDER_KEY: &str = "stroke_order";

/// The shared, CRDT-backed stroke document.
///
/// Wraps a `LoroDoc` and provides the operations the drawing session needs:
/// begin a stroke, append points by identifier, read the ordered stroke
/// list, and clear. Every mutation commits as one transaction carrying a
/// caller-supplied description, so the backend's history records who caused
/// which change.
pub struct ShapeDocument {
    doc: LoroDoc,
}

impl ShapeDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { doc: LoroDoc::new() }
    }

    /// Create a document from an exported snapshot.
    pub fn from_snapshot(bytes: &[u8]) -> LoroResult<Self> {
        let doc = LoroDoc::new();
        doc.import(bytes)?;
        Ok(Self { doc })
    }

    /// Get the underlying LoroDoc.
    pub fn loro_doc(&self) -> &LoroDoc {
        &self.doc
    }

    /// The backend-assigned peer identifier for this client.
    pub fn peer_id(&self) -> u64 {
        self.doc.peer_id()
    }

    fn shapes_map(&self) -> LoroMap {
        self.doc.get_map(SHAPES_KEY)
    }

    fn stroke_order_list(&self) -> LoroList {
        self.doc.get_list(STROKE_ORDER_KEY)
    }

    fn commit_with_description(&self, description: &str) {
        self.doc.set_next_commit_message(description);
        self.doc.commit();
    }

    /// Set up the document root. Safe to call on a document that already
    /// has strokes; existing content is untouched.
    pub fn ensure_initialized(&self, description: &str) {
        // Containers are created on first access; touching them is enough.
        let _ = self.shapes_map();
        let _ = self.stroke_order_list();
        self.commit_with_description(description);
    }

    /// Number of strokes in the document.
    pub fn stroke_count(&self) -> usize {
        self.shapes_map().len()
    }

    /// Stroke IDs in draw order.
    pub fn stroke_order(&self) -> Vec<String> {
        let list = self.stroke_order_list();
        let mut result = Vec::with_capacity(list.len());
        for i in 0..list.len() {
            if let Some(ValueOrContainer::Value(LoroValue::String(id))) = list.get(i) {
                result.push(id.to_string());
            }
        }
        result
    }

    /// The identifier of the most recently inserted stroke.
    pub fn last_stroke_id(&self) -> Option<StrokeId> {
        let list = self.stroke_order_list();
        let len = list.len();
        if len == 0 {
            return None;
        }
        if let Some(ValueOrContainer::Value(LoroValue::String(id))) = list.get(len - 1) {
            Uuid::parse_str(&id.to_string()).ok()
        } else {
            None
        }
    }

    /// Start a new stroke holding a single point and return its assigned
    /// identifier. The insert and the order-list append commit atomically.
    pub fn begin_stroke(&self, first: Point, description: &str) -> LoroResult<StrokeId> {
        let id = Uuid::new_v4();
        let shapes = self.shapes_map();
        let order = self.stroke_order_list();

        let stroke_map = shapes.insert_container(&id.to_string(), LoroMap::new())?;
        stroke_map.insert("id", id.to_string())?;
        let points = stroke_map.insert_container("points", LoroList::new())?;
        push_point(&points, first)?;

        order.push(LoroValue::String(id.to_string().into()))?;

        self.commit_with_description(description);
        Ok(id)
    }

    /// Append a point to an existing stroke.
    ///
    /// Returns `Ok(false)` without mutating anything when the identifier no
    /// longer resolves (the stroke was removed by a concurrent clear).
    pub fn append_point(&self, id: &StrokeId, point: Point, description: &str) -> LoroResult<bool> {
        let shapes = self.shapes_map();
        let Some(ValueOrContainer::Container(Container::Map(stroke))) =
            shapes.get(&id.to_string())
        else {
            return Ok(false);
        };
        let Some(ValueOrContainer::Container(Container::List(points))) = stroke.get("points")
        else {
            return Ok(false);
        };

        push_point(&points, point)?;
        self.commit_with_description(description);
        Ok(true)
    }

    /// Get a stroke by identifier.
    pub fn get_stroke(&self, id: &StrokeId) -> Option<Stroke> {
        let shapes_value = self.shapes_map().get_deep_value();
        if let LoroValue::Map(map) = shapes_value {
            if let Some(LoroValue::Map(stroke_map)) = map.get(&id.to_string()) {
                return stroke_from_loro(stroke_map);
            }
        }
        None
    }

    /// All strokes in draw order.
    pub fn strokes_ordered(&self) -> Vec<Stroke> {
        let shapes_value = self.shapes_map().get_deep_value();
        let LoroValue::Map(map) = shapes_value else {
            return Vec::new();
        };

        let order = self.stroke_order();
        let mut strokes = Vec::with_capacity(order.len());
        for id in order {
            if let Some(LoroValue::Map(stroke_map)) = map.get(&id) {
                if let Some(stroke) = stroke_from_loro(stroke_map) {
                    strokes.push(stroke);
                }
            }
        }
        strokes
    }

    /// Remove every stroke, committing as one transaction.
    pub fn clear(&self, description: &str) -> LoroResult<()> {
        let order = self.stroke_order_list();
        let len = order.len();
        if len > 0 {
            order.delete(0, len)?;
        }

        let shapes = self.shapes_map();
        let keys: Vec<String> = {
            let value = shapes.get_deep_value();
            if let LoroValue::Map(map) = value {
                map.keys().cloned().collect()
            } else {
                vec![]
            }
        };
        for key in keys {
            shapes.delete(&key)?;
        }

        self.commit_with_description(description);
        Ok(())
    }

    /// Export the document as a snapshot (full state).
    pub fn export_snapshot(&self) -> Vec<u8> {
        self.doc.export(ExportMode::Snapshot).unwrap_or_default()
    }

    /// Export incremental updates since a version.
    pub fn export_updates(&self, since: &loro::VersionVector) -> Vec<u8> {
        self.doc.export(ExportMode::updates(since)).unwrap_or_default()
    }

    /// Import updates from another document.
    pub fn import(&self, bytes: &[u8]) -> LoroResult<()> {
        self.doc.import(bytes)?;
        Ok(())
    }

    /// Get the current version vector.
    pub fn version(&self) -> loro::VersionVector {
        self.doc.oplog_vv()
    }
}

impl Default for ShapeDocument {
    fn default() -> Self {
        Self::new()
    }
}
