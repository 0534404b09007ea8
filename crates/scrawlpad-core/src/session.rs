//! The drawing-session state machine.
//!
//! Owns the pointer-down/move/up transitions and commits the resulting
//! mutations to the shared [`ShapeDocument`]. The session never touches
//! pixels itself; each transition returns a [`SessionEffect`] that tells the
//! caller what the renderer has to do next.

use kurbo::{Point, Size};

use crate::crdt::{LoroResult, ShapeDocument};
use crate::mapper::{ClientPosition, PointMapper};
use crate::stroke::StrokeId;
use crate::tools::{ModeSelector, ToolKind};

/// Where the session currently is in the pointer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No button held; pointer events other than down are ignored.
    #[default]
    Idle,
    /// A stroke is in progress. `active` was created by the pointer-down
    /// that entered this state and is the only stroke moves may extend.
    Drawing { active: StrokeId },
}

impl SessionState {
    /// Check if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self, SessionState::Drawing { .. })
    }
}

/// What the caller has to do after a session transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    /// Nothing changed.
    None,
    /// The shared document changed; repaint from its strokes.
    Repaint,
    /// Clear a local `width`-sided square centered on `center`. The
    /// document is untouched, so the effect lasts only until the next
    /// repaint.
    Erase { center: Point, width: f64 },
    /// The document was emptied; wipe the surface.
    Clear,
}

/// The per-client drawing session.
///
/// Mutation failures from the document are not caught here; they propagate
/// to the caller's top-level handler.
pub struct DrawingSession {
    state: SessionState,
    mapper: PointMapper,
    canvas_size: Size,
    /// Active tool and stroke width.
    pub modes: ModeSelector,
}

impl DrawingSession {
    /// Create an idle session for a canvas of the given size.
    pub fn new(mapper: PointMapper, canvas_size: Size) -> Self {
        Self {
            state: SessionState::Idle,
            mapper,
            canvas_size,
            modes: ModeSelector::new(),
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<StrokeId> {
        match self.state {
            SessionState::Drawing { active } => Some(active),
            SessionState::Idle => None,
        }
    }

    /// Update the scroll offset used for point mapping.
    pub fn set_scroll(&mut self, scroll: kurbo::Vec2) {
        self.mapper.set_scroll(scroll);
    }

    fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.canvas_size.width
            && point.y <= self.canvas_size.height
    }

    fn update_description(doc: &ShapeDocument) -> String {
        format!("update content by {}", doc.peer_id())
    }

    /// Handle a pointer-down event.
    ///
    /// Starts a stroke holding the mapped point and records its identifier
    /// as the active stroke. Duplicate downs while already drawing and
    /// out-of-bounds points are discarded without touching the document.
    pub fn pointer_down(
        &mut self,
        doc: &ShapeDocument,
        raw: ClientPosition,
    ) -> LoroResult<SessionEffect> {
        if self.state.is_drawing() {
            return Ok(SessionEffect::None);
        }

        let point = self.mapper.map(raw);
        if !self.in_bounds(point) {
            return Ok(SessionEffect::None);
        }

        let active = doc.begin_stroke(point, &Self::update_description(doc))?;
        self.state = SessionState::Drawing { active };
        Ok(SessionEffect::Repaint)
    }

    /// Handle a pointer-move event.
    ///
    /// In brush mode the mapped point is appended to the active stroke; in
    /// eraser mode the document is left alone and the caller is asked to
    /// clear local pixels instead. Moves while idle and out-of-bounds moves
    /// are silently dropped.
    pub fn pointer_move(
        &mut self,
        doc: &ShapeDocument,
        raw: ClientPosition,
    ) -> LoroResult<SessionEffect> {
        let SessionState::Drawing { active } = self.state else {
            return Ok(SessionEffect::None);
        };

        let point = self.mapper.map(raw);
        if !self.in_bounds(point) {
            return Ok(SessionEffect::None);
        }

        match self.modes.current_tool {
            ToolKind::Brush => {
                // A cleared document leaves the active id dangling; the
                // append no-ops and the move is dropped.
                if doc.append_point(&active, point, &Self::update_description(doc))? {
                    Ok(SessionEffect::Repaint)
                } else {
                    Ok(SessionEffect::None)
                }
            }
            ToolKind::Eraser => Ok(SessionEffect::Erase {
                center: point,
                width: self.modes.stroke_width(),
            }),
        }
    }

    /// Handle a pointer-up event. Always returns to `Idle`; the finished
    /// stroke is never explicitly closed, it just stops receiving points.
    pub fn pointer_up(&mut self) -> SessionEffect {
        self.state = SessionState::Idle;
        SessionEffect::None
    }

    /// Empty the shared document. Available from either state; an
    /// in-progress stroke is orphaned and its later moves no-op.
    pub fn clear(&self, doc: &ShapeDocument) -> LoroResult<SessionEffect> {
        doc.clear(&format!("clear content by {}", doc.peer_id()))?;
        Ok(SessionEffect::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    const WIDTH: f64 = 640.0;
    const HEIGHT: f64 = 400.0;

    fn session() -> DrawingSession {
        // Zero panel offset so client coordinates equal canvas coordinates.
        DrawingSession::new(
            PointMapper::new(Vec2::ZERO),
            Size::new(WIDTH, HEIGHT),
        )
    }

    #[test]
    fn test_pointer_down_creates_active_single_point_stroke() {
        let doc = ShapeDocument::new();
        let mut s = session();

        let effect = s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();

        assert_eq!(effect, SessionEffect::Repaint);
        assert!(s.state().is_drawing());
        assert_eq!(doc.stroke_count(), 1);

        let id = s.active_stroke().unwrap();
        let stroke = doc.get_stroke(&id).unwrap();
        assert_eq!(stroke.points, vec![Point::new(10.0, 10.0)]);
    }

    #[test]
    fn test_out_of_bounds_pointer_down_is_discarded() {
        let doc = ShapeDocument::new();
        let mut s = session();

        let effect = s.pointer_down(&doc, ClientPosition::new(-5.0, 10.0)).unwrap();

        assert_eq!(effect, SessionEffect::None);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.active_stroke().is_none());
        assert_eq!(doc.stroke_count(), 0);
    }

    #[test]
    fn test_duplicate_pointer_down_is_ignored() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        let first = s.active_stroke().unwrap();

        let effect = s.pointer_down(&doc, ClientPosition::new(50.0, 50.0)).unwrap();
        assert_eq!(effect, SessionEffect::None);
        assert_eq!(doc.stroke_count(), 1);
        assert_eq!(s.active_stroke(), Some(first));
    }

    #[test]
    fn test_brush_moves_append_in_event_order() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        let n = 5;
        for i in 1..=n {
            let effect = s
                .pointer_move(&doc, ClientPosition::new(10.0 + i as f64 * 10.0, 10.0))
                .unwrap();
            assert_eq!(effect, SessionEffect::Repaint);
        }

        let stroke = doc.get_stroke(&s.active_stroke().unwrap()).unwrap();
        assert_eq!(stroke.len(), n + 1);
        assert_eq!(stroke.points[0], Point::new(10.0, 10.0));
        assert_eq!(stroke.points[n], Point::new(60.0, 10.0));
    }

    #[test]
    fn test_out_of_bounds_move_is_dropped() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        let effect = s
            .pointer_move(&doc, ClientPosition::new(WIDTH + 1.0, 10.0))
            .unwrap();

        assert_eq!(effect, SessionEffect::None);
        assert!(s.state().is_drawing());
        let stroke = doc.get_stroke(&s.active_stroke().unwrap()).unwrap();
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_pointer_up_always_idles_and_stops_mutation() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.pointer_up();
        assert_eq!(s.state(), SessionState::Idle);

        // Up while already idle stays idle.
        s.pointer_up();
        assert_eq!(s.state(), SessionState::Idle);

        let effect = s.pointer_move(&doc, ClientPosition::new(20.0, 10.0)).unwrap();
        assert_eq!(effect, SessionEffect::None);

        let strokes = doc.strokes_ordered();
        assert_eq!(strokes[0].len(), 1);
    }

    #[test]
    fn test_example_scenario_down_move_up() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.pointer_move(&doc, ClientPosition::new(20.0, 10.0)).unwrap();
        s.pointer_up();

        let strokes = doc.strokes_ordered();
        assert_eq!(strokes.len(), 1);
        assert_eq!(
            strokes[0].points,
            vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]
        );
    }

    #[test]
    fn test_eraser_move_does_not_mutate_document() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.modes.set_tool(ToolKind::Eraser);
        s.modes.set_stroke_width(5.0);

        let effect = s.pointer_move(&doc, ClientPosition::new(15.0, 15.0)).unwrap();

        assert_eq!(
            effect,
            SessionEffect::Erase {
                center: Point::new(15.0, 15.0),
                width: 5.0
            }
        );
        let strokes = doc.strokes_ordered();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].len(), 1);
    }

    #[test]
    fn test_mode_switch_mid_stroke_applies_on_next_move() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.pointer_move(&doc, ClientPosition::new(20.0, 10.0)).unwrap();

        s.modes.set_tool(ToolKind::Eraser);
        let effect = s.pointer_move(&doc, ClientPosition::new(30.0, 10.0)).unwrap();
        assert!(matches!(effect, SessionEffect::Erase { .. }));

        s.modes.set_tool(ToolKind::Brush);
        let effect = s.pointer_move(&doc, ClientPosition::new(40.0, 10.0)).unwrap();
        assert_eq!(effect, SessionEffect::Repaint);

        let stroke = doc.get_stroke(&s.active_stroke().unwrap()).unwrap();
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_clear_empties_document_from_either_state() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.pointer_up();
        s.pointer_down(&doc, ClientPosition::new(30.0, 30.0)).unwrap();
        assert_eq!(doc.stroke_count(), 2);

        let effect = s.clear(&doc).unwrap();
        assert_eq!(effect, SessionEffect::Clear);
        assert_eq!(doc.stroke_count(), 0);
        // The session is still drawing; clear never changes pointer state.
        assert!(s.state().is_drawing());
    }

    #[test]
    fn test_move_after_clear_noops_on_dangling_stroke() {
        let doc = ShapeDocument::new();
        let mut s = session();

        s.pointer_down(&doc, ClientPosition::new(10.0, 10.0)).unwrap();
        s.clear(&doc).unwrap();

        let effect = s.pointer_move(&doc, ClientPosition::new(20.0, 10.0)).unwrap();
        assert_eq!(effect, SessionEffect::None);
        assert_eq!(doc.stroke_count(), 0);
    }

    #[test]
    fn test_mapped_coordinates_respect_panel_offset() {
        let doc = ShapeDocument::new();
        let mut s = DrawingSession::new(
            PointMapper::new(Vec2::new(100.0, 50.0)),
            Size::new(WIDTH, HEIGHT),
        );

        s.pointer_down(&doc, ClientPosition::new(110.0, 60.0)).unwrap();

        let stroke = doc.get_stroke(&s.active_stroke().unwrap()).unwrap();
        assert_eq!(stroke.points, vec![Point::new(10.0, 10.0)]);
    }
}
