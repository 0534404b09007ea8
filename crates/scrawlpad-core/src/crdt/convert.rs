//! Conversion between stroke records and Loro values.

use kurbo::Point;
use loro::{LoroList, LoroMapValue, LoroResult, LoroValue};
use uuid::Uuid;

use crate::stroke::Stroke;

const KEY_ID: &str = "id";
const KEY_POINTS: &str = "points";

/// Append a point to a stroke's points list as an `[x, y]` pair.
pub(crate) fn push_point(points: &LoroList, point: Point) -> LoroResult<()> {
    let pair = points.insert_container(points.len(), LoroList::new())?;
    pair.push(point.x)?;
    pair.push(point.y)?;
    Ok(())
}

fn get_string(map: &LoroMapValue, key: &str) -> Option<String> {
    match map.get(key)? {
        LoroValue::String(s) => Some(s.to_string()),
        _ => None,
    }
}

/// Reconstruct a stroke from its deep-value map.
pub fn stroke_from_loro(map: &LoroMapValue) -> Option<Stroke> {
    let id = Uuid::parse_str(&get_string(map, KEY_ID)?).ok()?;

    let points: Vec<Point> = if let Some(LoroValue::List(points_list)) = map.get(KEY_POINTS) {
        points_list
            .iter()
            .filter_map(|p| {
                if let LoroValue::List(coords) = p {
                    if coords.len() >= 2 {
                        let x = match coords.first()? {
                            LoroValue::Double(d) => *d,
                            LoroValue::I64(i) => *i as f64,
                            _ => return None,
                        };
                        let y = match coords.get(1)? {
                            LoroValue::Double(d) => *d,
                            LoroValue::I64(i) => *i as f64,
                            _ => return None,
                        };
                        return Some(Point::new(x, y));
                    }
                }
                None
            })
            .collect()
    } else {
        vec![]
    };

    Some(Stroke::from_points(id, points))
}
