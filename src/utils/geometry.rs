//! Projective geometry for quad rectification
//!
//! A 3x3 homography is solved with the direct linear transform: the four
//! corner correspondences give an 8x8 linear system, solved by Gaussian
//! elimination with partial pivoting. Near-singular systems (pivot below
//! epsilon) yield `None`, which the rectifier surfaces as
//! `DegenerateTransform`.

use crate::models::Point;

/// Pivots below this magnitude mean the corner configuration is
/// near-collinear and the system is numerically unstable
const PIVOT_EPS: f32 = 1e-10;

/// 3x3 projective transformation
pub struct PerspectiveTransform {
    m: [[f32; 3]; 3],
}

impl PerspectiveTransform {
    /// Build the transform mapping each `src[i]` onto `dst[i]`
    pub fn from_quad(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = [[0.0f32; 8]; 8];
        let mut b = [0.0f32; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x, src[i].y);
            let (dx, dy) = (dst[i].x, dst[i].y);

            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;
            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        let h = solve_linear_system(&mut a, &mut b)?;
        Some(Self {
            m: [
                [h[0], h[1], h[2]],
                [h[3], h[4], h[5]],
                [h[6], h[7], 1.0],
            ],
        })
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: &Point) -> Point {
        let w = self.m[2][0] * p.x + self.m[2][1] * p.y + self.m[2][2];
        if w.abs() < PIVOT_EPS {
            return Point::new(0.0, 0.0);
        }
        let x = (self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2]) / w;
        let y = (self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2]) / w;
        Point::new(x, y)
    }
}

/// Solve an 8x8 system in place by Gaussian elimination with partial pivoting
fn solve_linear_system(a: &mut [[f32; 8]; 8], b: &mut [f32; 8]) -> Option<[f32; 8]> {
    let n = 8;

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_val = a[col][col].abs();
        for row in (col + 1)..n {
            if a[row][col].abs() > pivot_val {
                pivot_val = a[row][col].abs();
                pivot_row = row;
            }
        }
        if pivot_val < PIVOT_EPS {
            return None;
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            b[row] -= factor * b[col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = [0.0f32; 8];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[row][k] * x[k];
        }
        if a[row][row].abs() < PIVOT_EPS {
            return None;
        }
        x[row] = sum / a[row][row];
    }

    Some(x)
}

/// Signed area of a polygon via the shoelace formula; positive when the
/// points wind clockwise in image coordinates (y grows downward)
pub fn signed_area(points: &[Point]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum * 0.5
}

/// Internal angle at vertex `b` of the polygon corner a-b-c, in degrees
pub fn corner_angle_deg(a: &Point, b: &Point, c: &Point) -> f32 {
    let v1 = Point::new(a.x - b.x, a.y - b.y);
    let v2 = Point::new(c.x - b.x, c.y - b.y);
    let dot = v1.x * v2.x + v1.y * v2.y;
    let cross = v1.x * v2.y - v1.y * v2.x;
    cross.atan2(dot).abs().to_degrees()
}

/// Perpendicular distance from `p` to the line through `a` and `b`
pub fn point_line_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return p.distance(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}
