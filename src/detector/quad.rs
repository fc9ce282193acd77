//! Quad candidate extraction from traced contours
//!
//! Each contour is reduced to a minimal polygon (Ramer-Douglas-Peucker with
//! epsilon proportional to the contour perimeter); only polygons reducing to
//! exactly four convex corners of plausible size and angle regularity
//! survive. Candidates are ranked so the pipeline tries the most
//! marker-like quad first.

use crate::config::DetectorConfig;
use crate::detector::contour::Contour;
use crate::models::Point;
use crate::utils::geometry::{corner_angle_deg, point_line_distance, signed_area};

/// Epsilon for polygon reduction as a fraction of the contour perimeter
const RDP_EPSILON_RATIO: f32 = 0.04;

/// A four-corner polygon hypothesized to be the marker outline
#[derive(Debug, Clone)]
pub struct QuadCandidate {
    /// Corners in image coordinates, clockwise starting from the corner
    /// nearest the image origin
    pub corners: [Point; 4],
    /// Enclosed area in square pixels
    pub area: f32,
    /// Plausibility score; higher is better
    pub score: f32,
}

/// Filter contours down to ranked quad candidates.
///
/// Returns an empty vector when no contour is marker-like; that is the
/// expected no-marker path for a frame, not an error.
pub fn find_quads(contours: &[Contour], config: &DetectorConfig) -> Vec<QuadCandidate> {
    let mut candidates: Vec<QuadCandidate> = contours
        .iter()
        .filter_map(|contour| evaluate_contour(contour, config))
        .collect();

    // Best first; equal scores fall back to the larger quad
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.area
                    .partial_cmp(&a.area)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    candidates
}

fn evaluate_contour(contour: &Contour, config: &DetectorConfig) -> Option<QuadCandidate> {
    let points: Vec<Point> = contour.iter().map(|p| p.to_point()).collect();
    let epsilon = (points.len() as f32 * RDP_EPSILON_RATIO).max(2.0);

    let polygon = approx_closed_polygon(&points, epsilon);
    if polygon.len() != 4 {
        return None;
    }

    let mut corners = [polygon[0], polygon[1], polygon[2], polygon[3]];
    if !is_convex(&corners) {
        return None;
    }

    canonical_order(&mut corners);

    let area = signed_area(&corners).abs();
    if area < config.min_quad_area {
        return None;
    }

    // Internal angles stay near 90 degrees for any plausibly-viewed square
    let mut worst_deviation = 0.0f32;
    let mut total_deviation = 0.0f32;
    for i in 0..4 {
        let prev = &corners[(i + 3) % 4];
        let next = &corners[(i + 1) % 4];
        let deviation = (corner_angle_deg(prev, &corners[i], next) - 90.0).abs();
        worst_deviation = worst_deviation.max(deviation);
        total_deviation += deviation;
    }
    if worst_deviation > config.angle_tolerance_deg {
        return None;
    }

    let regularity = 1.0 - (total_deviation / 4.0) / config.angle_tolerance_deg;
    let score = regularity * area.sqrt();

    Some(QuadCandidate {
        corners,
        area,
        score,
    })
}

/// Reduce a closed contour to a polygon.
///
/// The curve is split at two roughly-antipodal anchor points and each half
/// is reduced independently, so closure is preserved without special-casing
/// the wrap-around segment.
fn approx_closed_polygon(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() < 4 {
        return points.to_vec();
    }

    // Approximate diameter: farthest point from points[0], then farthest
    // from that
    let a = farthest_from(points, 0);
    let b = farthest_from(points, a);
    let (first, second) = if a < b { (a, b) } else { (b, a) };

    let mut polygon = Vec::new();
    rdp(&points[first..=second], epsilon, &mut polygon);
    polygon.pop(); // second anchor re-added by the wrap half

    let mut wrap: Vec<Point> = points[second..].to_vec();
    wrap.extend_from_slice(&points[..=first]);
    let mut second_half = Vec::new();
    rdp(&wrap, epsilon, &mut second_half);
    second_half.pop(); // first anchor already at the polygon head
    polygon.extend(second_half);

    polygon
}

fn farthest_from(points: &[Point], idx: usize) -> usize {
    let origin = &points[idx];
    let mut best = idx;
    let mut best_d = 0.0f32;
    for (i, p) in points.iter().enumerate() {
        let d = origin.distance_squared(p);
        if d > best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Ramer-Douglas-Peucker over an open polyline; appends the reduced points
/// including the first endpoint, excluding recursion duplicates
fn rdp(points: &[Point], epsilon: f32, out: &mut Vec<Point>) {
    if points.len() < 3 {
        out.extend_from_slice(points);
        return;
    }

    let first = &points[0];
    let last = &points[points.len() - 1];
    let mut max_dist = 0.0f32;
    let mut max_idx = 0;
    for (i, p) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let d = point_line_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        rdp(&points[..=max_idx], epsilon, out);
        out.pop(); // split point re-added by the second half
        rdp(&points[max_idx..], epsilon, out);
    } else {
        out.push(*first);
        out.push(*last);
    }
}

/// All cross products of consecutive edges share a sign
fn is_convex(corners: &[Point; 4]) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let p = &corners[i];
        let q = &corners[(i + 1) % 4];
        let r = &corners[(i + 2) % 4];
        let cross = (q.x - p.x) * (r.y - q.y) - (q.y - p.y) * (r.x - q.x);
        if cross.abs() < f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Rotate/reflect into the canonical ordering: clockwise in image
/// coordinates, starting from the corner nearest the image origin
fn canonical_order(corners: &mut [Point; 4]) {
    if signed_area(corners) < 0.0 {
        corners.reverse();
    }

    let origin = Point::new(0.0, 0.0);
    let start = corners
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(&origin)
                .partial_cmp(&b.distance_squared(&origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    corners.rotate_left(start);
}
