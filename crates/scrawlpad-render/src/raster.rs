//! Polyline rasterization.

use kurbo::Point;
use peniko::Color;

use crate::surface::Surface;

/// Stroke a polyline at the given width. Paths with fewer than two points
/// produce no segments and leave the surface untouched.
pub(crate) fn stroke_polyline(surface: &mut Surface, points: &[Point], width: f64, color: Color) {
    if points.len() < 2 {
        return;
    }
    for window in points.windows(2) {
        stroke_segment(surface, window[0], window[1], width, color);
    }
}

/// Stroke a single segment: every pixel whose center lies within half the
/// stroke width of the segment is painted, which also gives round caps and
/// joins.
fn stroke_segment(surface: &mut Surface, start: Point, end: Point, width: f64, color: Color) {
    let half = width / 2.0;

    let xs = (start.x.min(end.x) - half).floor().max(0.0) as u32;
    let ys = (start.y.min(end.y) - half).floor().max(0.0) as u32;
    let xe = ((start.x.max(end.x) + half).ceil()).min(surface.width() as f64) as u32;
    let ye = ((start.y.max(end.y) + half).ceil()).min(surface.height() as f64) as u32;

    for y in ys..ye {
        for x in xs..xe {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if segment_distance(center, start, end) <= half {
                surface.put_pixel(x, y, color);
            }
        }
    }
}

/// Distance from a point to the closest point of a segment.
fn segment_distance(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = kurbo::Vec2::new(end.x - start.x, end.y - start.y);
    let point_vec = kurbo::Vec2::new(point.x - start.x, point.y - start.y);

    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        // Segment is a point
        return point_vec.hypot();
    }

    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = Point::new(start.x + t * line_vec.x, start.y + t * line_vec.y);

    ((point.x - projection.x).powi(2) + (point.y - projection.y).powi(2)).sqrt()
}
