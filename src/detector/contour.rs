//! Boundary contour tracing over the contrast-stretched buffer
//!
//! The buffer is binarized at the fixed midpoint threshold (contrast
//! stretching upstream guarantees the dark/light split lands near it) and
//! dark-region boundaries are walked with Moore neighbor tracing. Tracing is
//! a single pass: every boundary pixel is visited at most once per frame.

use crate::config::DetectorConfig;
use crate::models::{PointI, RasterBuffer};

/// Midpoint of the stretched 0..=255 range; pixels below are foreground
pub(crate) const BINARY_THRESHOLD: u8 = 128;

/// Ordered boundary points of one traced dark region, implicitly closed
pub type Contour = Vec<PointI>;

/// Neighbor offsets in clockwise order (image coordinates, y down):
/// E, SE, S, SW, W, NW, N, NE
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Trace the boundaries of all dark regions in the buffer.
///
/// Contours shorter than `min_contour_perimeter` are dropped as noise. An
/// empty result means the frame holds nothing marker-like; that is the
/// routine outcome, not a failure.
pub fn trace_contours(buffer: &RasterBuffer, config: &DetectorConfig) -> Vec<Contour> {
    // A constant buffer has no edges; a shape-free frame (all dark just as
    // much as all light) traces nothing
    let bytes = buffer.as_bytes();
    match (bytes.iter().min(), bytes.iter().max()) {
        (Some(min), Some(max)) if min != max => {}
        _ => return Vec::new(),
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut visited = vec![false; width * height];
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if !is_dark(buffer, x as i32, y as i32) {
                continue;
            }
            // Boundary start: dark pixel whose west neighbor is light
            if is_dark(buffer, x as i32 - 1, y as i32) {
                continue;
            }
            if visited[y * width + x] {
                continue;
            }

            let contour = trace_from(buffer, &mut visited, PointI::new(x as i32, y as i32));
            if contour.len() >= config.min_contour_perimeter {
                contours.push(contour);
            }
        }
    }

    contours
}

/// Moore neighbor tracing with a clockwise turn preference.
///
/// `entry_dir` is the index of the last move onto the current pixel; the
/// scan resumes just past the backtrack neighbor so the walk hugs the
/// region boundary.
fn trace_from(buffer: &RasterBuffer, visited: &mut [bool], start: PointI) -> Contour {
    let width = buffer.width() as usize;
    let mut contour = vec![start];
    visited[start.y as usize * width + start.x as usize] = true;

    // The raster scan reaches the start pixel heading east
    let Some((first, first_dir)) = next_boundary_move(buffer, start, 0) else {
        return contour; // isolated pixel
    };

    let mut current = first;
    let mut entry_dir = first_dir;
    // Worst case the boundary touches every pixel; anything longer is a bug
    let max_steps = 4 * buffer.total_size();

    for _ in 0..max_steps {
        if current == start {
            // Closed: the walk would leave the start the same way it
            // originally did
            match next_boundary_move(buffer, start, entry_dir) {
                Some((next, _)) if next == first => break,
                None => break,
                _ => {}
            }
        }

        contour.push(current);
        visited[current.y as usize * width + current.x as usize] = true;

        let Some((next, dir)) = next_boundary_move(buffer, current, entry_dir) else {
            break;
        };
        current = next;
        entry_dir = dir;
    }

    contour
}

/// First dark neighbor scanning clockwise from just past the backtrack cell
fn next_boundary_move(
    buffer: &RasterBuffer,
    from: PointI,
    entry_dir: usize,
) -> Option<(PointI, usize)> {
    for i in 0..8 {
        let dir = (entry_dir + 5 + i) % 8;
        let (dx, dy) = NEIGHBORS[dir];
        let nx = from.x + dx;
        let ny = from.y + dy;
        if is_dark(buffer, nx, ny) {
            return Some((PointI::new(nx, ny), dir));
        }
    }
    None
}

/// Out-of-bounds pixels count as light background
#[inline]
fn is_dark(buffer: &RasterBuffer, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 || x >= buffer.width() as i32 || y >= buffer.height() as i32 {
        return false;
    }
    buffer.pixel_at(x as usize, y as usize) < BINARY_THRESHOLD
}
