// Contour extraction (marching squares) and filled-band classification

use std::collections::{HashMap, VecDeque};

use crate::ir::Field;

/// A straight piece of an iso-line, in data coordinates.
pub type Segment = [(f64, f64); 2];

/// All iso-line segments of `field` at `level`.
///
/// Each grid cell is classified by which of its four corners lie at or
/// above the level; crossings are linearly interpolated along the cell
/// edges. Cells touching a NaN are skipped.
pub fn march_squares(field: &Field, level: f64) -> Vec<Segment> {
    let (rows, cols) = field.z.dim();
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for j in 0..rows - 1 {
        for i in 0..cols - 1 {
            // a: (x0, y0)  b: (x1, y0)  c: (x1, y1)  d: (x0, y1)
            let a = field.z[[j, i]];
            let b = field.z[[j, i + 1]];
            let c = field.z[[j + 1, i + 1]];
            let d = field.z[[j + 1, i]];
            if a.is_nan() || b.is_nan() || c.is_nan() || d.is_nan() {
                continue;
            }

            let case = (a >= level) as u8
                | ((b >= level) as u8) << 1
                | ((c >= level) as u8) << 2
                | ((d >= level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let (x0, x1) = (field.xs[i], field.xs[i + 1]);
            let (y0, y1) = (field.ys[j], field.ys[j + 1]);
            let ab = || interpolate((x0, y0), (x1, y0), a, b, level);
            let bc = || interpolate((x1, y0), (x1, y1), b, c, level);
            let dc = || interpolate((x0, y1), (x1, y1), d, c, level);
            let ad = || interpolate((x0, y0), (x0, y1), a, d, level);

            match case {
                1 | 14 => segments.push([ad(), ab()]),
                2 | 13 => segments.push([ab(), bc()]),
                3 | 12 => segments.push([ad(), bc()]),
                4 | 11 => segments.push([bc(), dc()]),
                5 => {
                    segments.push([ad(), ab()]);
                    segments.push([bc(), dc()]);
                }
                6 | 9 => segments.push([ab(), dc()]),
                7 | 8 => segments.push([ad(), dc()]),
                10 => {
                    segments.push([ab(), bc()]);
                    segments.push([ad(), dc()]);
                }
                _ => {}
            }
        }
    }
    segments
}

/// Point on the edge `p..q` where the linear ramp `vp..vq` crosses `level`.
fn interpolate(p: (f64, f64), q: (f64, f64), vp: f64, vq: f64, level: f64) -> (f64, f64) {
    if vp == vq {
        return ((p.0 + q.0) / 2.0, (p.1 + q.1) / 2.0);
    }
    let t = ((level - vp) / (vq - vp)).clamp(0.0, 1.0);
    (p.0 + t * (q.0 - p.0), p.1 + t * (q.1 - p.1))
}

/// Chain segments sharing endpoints into polylines.
///
/// Neighbouring cells compute a shared crossing from the same inputs, so
/// endpoints are matched exactly.
pub fn connect_segments(segments: &[Segment]) -> Vec<Vec<(f64, f64)>> {
    let mut by_point: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    for (i, segment) in segments.iter().enumerate() {
        by_point.entry(point_key(segment[0])).or_default().push(i);
        by_point.entry(point_key(segment[1])).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut line = VecDeque::from([segments[start][0], segments[start][1]]);

        while let Some(&tail) = line.back() {
            match take_neighbour(tail, segments, &by_point, &mut used) {
                Some(next) => line.push_back(next),
                None => break,
            }
        }
        while let Some(&head) = line.front() {
            match take_neighbour(head, segments, &by_point, &mut used) {
                Some(prev) => line.push_front(prev),
                None => break,
            }
        }
        lines.push(line.into_iter().collect());
    }
    lines
}

fn point_key(p: (f64, f64)) -> (u64, u64) {
    (p.0.to_bits(), p.1.to_bits())
}

fn take_neighbour(
    point: (f64, f64),
    segments: &[Segment],
    by_point: &HashMap<(u64, u64), Vec<usize>>,
    used: &mut [bool],
) -> Option<(f64, f64)> {
    let key = point_key(point);
    let candidates = by_point.get(&key)?;
    for &i in candidates {
        if used[i] {
            continue;
        }
        used[i] = true;
        let [p, q] = segments[i];
        return Some(if point_key(p) == key { q } else { p });
    }
    None
}

/// Iso-lines for one level, chained into polylines.
pub fn contour_lines(field: &Field, level: f64) -> Vec<Vec<(f64, f64)>> {
    connect_segments(&march_squares(field, level))
}

/// Index of the level nearest to `v` among `n` levels spanning `[min, max]`.
pub fn band_index(v: f64, min: f64, max: f64, n: usize) -> usize {
    if n <= 1 || !(max > min) {
        return 0;
    }
    let step = (max - min) / (n as f64 - 1.0);
    let index = ((v - min) / step).round();
    index.clamp(0.0, (n - 1) as f64) as usize
}

/// One painted rectangle of a filled contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub band: usize,
}

/// Classify every finite grid node into one of `n` bands; the node's cell
/// reaches half-way to its neighbours.
pub fn band_cells(field: &Field, n: usize) -> Vec<BandCell> {
    let Some((min, max)) = field.value_range() else {
        return Vec::new();
    };
    let x_edges = field.x_edges();
    let y_edges = field.y_edges();

    let mut cells = Vec::with_capacity(field.z.len());
    for ((j, i), &v) in field.z.indexed_iter() {
        if !v.is_finite() {
            continue;
        }
        cells.push(BandCell {
            x0: x_edges[i],
            x1: x_edges[i + 1],
            y0: y_edges[j],
            y1: y_edges[j + 1],
            band: band_index(v, min, max, n),
        });
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn unit_field(z: Array2<f64>) -> Field {
        let (rows, cols) = z.dim();
        let xs = (0..cols).map(|i| i as f64).collect();
        let ys = (0..rows).map(|j| j as f64).collect();
        Field::new(xs, ys, z).unwrap()
    }

    #[test]
    fn test_march_squares_flat() {
        let field = unit_field(Array2::from_elem((3, 3), 5.0));
        assert!(march_squares(&field, 5.0).is_empty());
        assert!(march_squares(&field, 6.0).is_empty());
    }

    #[test]
    fn test_march_squares_peak_forms_closed_ring() {
        let field = unit_field(array![
            [0.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
            [0.0, 0.0, 0.0],
        ]);
        let segments = march_squares(&field, 5.0);
        assert_eq!(segments.len(), 4);

        let lines = connect_segments(&segments);
        assert_eq!(lines.len(), 1);
        let ring = &lines[0];
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_interpolation_uses_coordinates() {
        let z = array![[0.0, 10.0], [0.0, 10.0]];
        let field = Field::new(vec![100.0, 200.0], vec![0.0, 1.0], z).unwrap();
        let segments = march_squares(&field, 2.5);
        assert_eq!(segments.len(), 1);
        for (x, _) in segments[0] {
            assert_eq!(x, 125.0);
        }
    }

    #[test]
    fn test_saddle_emits_two_segments() {
        let field = unit_field(array![[10.0, 0.0], [0.0, 10.0]]);
        assert_eq!(march_squares(&field, 5.0).len(), 2);
    }

    #[test]
    fn test_nan_cells_skipped() {
        let field = unit_field(array![[0.0, f64::NAN], [10.0, 10.0]]);
        assert!(march_squares(&field, 5.0).is_empty());
    }

    #[test]
    fn test_band_index() {
        assert_eq!(band_index(0.0, 0.0, 10.0, 5), 0);
        assert_eq!(band_index(1.2, 0.0, 10.0, 5), 0);
        assert_eq!(band_index(2.4, 0.0, 10.0, 5), 1);
        assert_eq!(band_index(10.0, 0.0, 10.0, 5), 4);
        assert_eq!(band_index(42.0, 0.0, 10.0, 5), 4);
        assert_eq!(band_index(3.0, 3.0, 3.0, 5), 0);
        assert_eq!(band_index(7.0, 0.0, 10.0, 1), 0);
    }

    #[test]
    fn test_band_cells_cover_grid() {
        let field = unit_field(array![[0.0, 5.0], [10.0, f64::NAN]]);
        let cells = band_cells(&field, 3);
        assert_eq!(cells.len(), 3);
        assert_eq!(
            cells[0],
            BandCell { x0: -0.5, x1: 0.5, y0: -0.5, y1: 0.5, band: 0 }
        );
        assert_eq!(cells[1].band, 1);
        assert_eq!(cells[2].band, 2);
        assert_eq!((cells[2].y0, cells[2].y1), (0.5, 1.5));
    }
}
