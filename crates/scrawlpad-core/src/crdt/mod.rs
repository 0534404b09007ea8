//! CRDT integration using Loro for the shared stroke document.
//!
//! # Schema
//!
//! ```text
//! LoroDoc
//! ├── "shapes": LoroMap<StrokeId, LoroMap> (stroke data)
//! └── "stroke_order": LoroList<String> (stroke IDs in draw order)
//! ```
//!
//! Each stroke in "shapes" is a LoroMap with:
//! - "id": String (UUID)
//! - "points": LoroList of [x, y] pairs
//!
//! Keying strokes by id gives the lookup-by-identifier capability the
//! session controller needs on every move event; the order list keeps the
//! draw-order sequence semantics.

mod convert;
mod schema;

pub use convert::stroke_from_loro;
pub use schema::{ShapeDocument, SHAPES_KEY, STROKE_ORDER_KEY};

// Re-export Loro types that surface through the document API
pub use loro::{ExportMode, LoroError, LoroResult, VersionVector};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_document_starts_empty() {
        let doc = ShapeDocument::new();
        assert_eq!(doc.stroke_count(), 0);
        assert!(doc.last_stroke_id().is_none());
    }

    #[test]
    fn test_begin_stroke_creates_single_point_record() {
        let doc = ShapeDocument::new();
        let id = doc
            .begin_stroke(Point::new(10.0, 10.0), "update content by test")
            .expect("begin failed");

        assert_eq!(doc.stroke_count(), 1);
        let stroke = doc.get_stroke(&id).expect("stroke not found");
        assert_eq!(stroke.points, vec![Point::new(10.0, 10.0)]);
        assert_eq!(doc.last_stroke_id(), Some(id));
    }

    #[test]
    fn test_append_point_extends_stroke_in_order() {
        let doc = ShapeDocument::new();
        let id = doc
            .begin_stroke(Point::new(0.0, 0.0), "update content by test")
            .unwrap();

        for i in 1..=3 {
            let appended = doc
                .append_point(&id, Point::new(i as f64 * 10.0, 0.0), "update content by test")
                .unwrap();
            assert!(appended);
        }

        let stroke = doc.get_stroke(&id).unwrap();
        assert_eq!(stroke.len(), 4);
        assert_eq!(stroke.points[3], Point::new(30.0, 0.0));
    }

    #[test]
    fn test_append_point_to_missing_stroke_is_a_noop() {
        let doc = ShapeDocument::new();
        let id = doc
            .begin_stroke(Point::new(5.0, 5.0), "update content by test")
            .unwrap();
        doc.clear("clear content by test").unwrap();

        let appended = doc
            .append_point(&id, Point::new(6.0, 6.0), "update content by test")
            .unwrap();
        assert!(!appended);
        assert_eq!(doc.stroke_count(), 0);
    }

    #[test]
    fn test_stroke_order_matches_insertion() {
        let doc = ShapeDocument::new();
        let a = doc.begin_stroke(Point::new(1.0, 1.0), "test").unwrap();
        let b = doc.begin_stroke(Point::new(2.0, 2.0), "test").unwrap();

        let order = doc.stroke_order();
        assert_eq!(order, vec![a.to_string(), b.to_string()]);

        let strokes = doc.strokes_ordered();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].id(), a);
        assert_eq!(strokes[1].id(), b);
    }

    #[test]
    fn test_clear_empties_both_containers() {
        let doc = ShapeDocument::new();
        doc.begin_stroke(Point::new(1.0, 1.0), "test").unwrap();
        doc.begin_stroke(Point::new(2.0, 2.0), "test").unwrap();

        doc.clear("clear content by test").unwrap();

        assert_eq!(doc.stroke_count(), 0);
        assert!(doc.stroke_order().is_empty());
        assert!(doc.strokes_ordered().is_empty());
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let doc = ShapeDocument::new();
        doc.ensure_initialized("create points if not exists");
        doc.ensure_initialized("create points if not exists");

        assert_eq!(doc.stroke_count(), 0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let doc = ShapeDocument::new();
        let id = doc.begin_stroke(Point::new(10.0, 20.0), "test").unwrap();
        doc.append_point(&id, Point::new(30.0, 20.0), "test").unwrap();

        let bytes = doc.export_snapshot();
        let other = ShapeDocument::from_snapshot(&bytes).expect("import failed");

        assert_eq!(other.stroke_count(), 1);
        let stroke = other.get_stroke(&id).unwrap();
        assert_eq!(stroke.points, vec![Point::new(10.0, 20.0), Point::new(30.0, 20.0)]);
    }

    #[test]
    fn test_incremental_updates_apply_on_top_of_snapshot() {
        let doc = ShapeDocument::new();
        doc.begin_stroke(Point::new(1.0, 1.0), "test").unwrap();

        let other = ShapeDocument::from_snapshot(&doc.export_snapshot()).unwrap();
        let since = doc.version();

        doc.begin_stroke(Point::new(2.0, 2.0), "test").unwrap();
        other.import(&doc.export_updates(&since)).unwrap();

        assert_eq!(other.stroke_count(), 2);
    }

    #[test]
    fn test_import_merges_remote_stroke() {
        let local = ShapeDocument::new();
        local.begin_stroke(Point::new(1.0, 1.0), "test").unwrap();

        let remote = ShapeDocument::new();
        remote.begin_stroke(Point::new(9.0, 9.0), "test").unwrap();

        local.import(&remote.export_snapshot()).unwrap();
        assert_eq!(local.stroke_count(), 2);
    }
}
