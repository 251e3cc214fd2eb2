use kurbo::{BezPath, CubicBez, Line, ParamCurve, ParamCurveArclen, PathSeg, Point, QuadBez};
use tracing::trace;
use vector_data::model::{PathCommand, PathData};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Fractional sub-range of a path's total length, all values in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimWindow {
    pub start: f32,
    pub end: f32,
    pub offset: f32,
}

impl TrimWindow {
    pub const FULL: TrimWindow = TrimWindow {
        start: 0.0,
        end: 1.0,
        offset: 0.0,
    };

    pub fn new(start: f32, end: f32, offset: f32) -> Self {
        Self { start, end, offset }
    }

    /// A window covering `[0, 1]` keeps the whole path whatever the offset.
    pub fn is_full(&self) -> bool {
        self.start <= 0.0 && self.end >= 1.0
    }

    /// The window shifted by `offset`, as one or two `(from, to)` fractional ranges.
    fn ranges(&self) -> Vec<(f64, f64)> {
        let wrap = |v: f32| if v > 1.0 { v - 1.0 } else { v };
        let s = wrap(self.start + self.offset) as f64;
        let e = wrap(self.end + self.offset) as f64;
        if s <= e {
            vec![(s, e)]
        } else {
            vec![(s, 1.0), (0.0, e)]
        }
    }
}

impl Default for TrimWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// Renderable geometry generated from path data.
pub trait PathGeometry {
    fn to_bez_path(&self) -> BezPath;

    /// Total arc length over every contour.
    fn length(&self) -> f64;

    /// The part of the path covered by `window`, measured along its total length.
    fn trimmed(&self, window: TrimWindow) -> BezPath;
}

fn point(p: &[f32; 2]) -> Point {
    Point::new(p[0] as f64, p[1] as f64)
}

/// Segments grouped by contour. `Close` contributes the closing line when it has length.
fn contours(path: &PathData) -> Vec<Vec<PathSeg>> {
    let mut contours = Vec::new();
    let mut current: Vec<PathSeg> = Vec::new();
    let mut start = Point::ZERO;
    let mut pen = Point::ZERO;

    for cmd in &path.commands {
        match cmd {
            PathCommand::MoveTo(p) => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                start = point(p);
                pen = start;
            }
            PathCommand::LineTo(p) => {
                let to = point(p);
                current.push(PathSeg::Line(Line::new(pen, to)));
                pen = to;
            }
            PathCommand::QuadTo(p1, p2) => {
                let to = point(p2);
                current.push(PathSeg::Quad(QuadBez::new(pen, point(p1), to)));
                pen = to;
            }
            PathCommand::CubicTo(p1, p2, p3) => {
                let to = point(p3);
                current.push(PathSeg::Cubic(CubicBez::new(pen, point(p1), point(p2), to)));
                pen = to;
            }
            PathCommand::Close => {
                if pen != start {
                    current.push(PathSeg::Line(Line::new(pen, start)));
                }
                pen = start;
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

fn push_seg(out: &mut BezPath, seg: PathSeg) {
    match seg {
        PathSeg::Line(l) => out.line_to(l.p1),
        PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
        PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
    }
}

impl PathGeometry for PathData {
    fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut has_pen = false;
        for cmd in &self.commands {
            if !has_pen && !matches!(cmd, PathCommand::MoveTo(_)) {
                path.move_to(Point::ZERO);
            }
            has_pen = true;
            match cmd {
                PathCommand::MoveTo(p) => path.move_to(point(p)),
                PathCommand::LineTo(p) => path.line_to(point(p)),
                PathCommand::QuadTo(p1, p2) => path.quad_to(point(p1), point(p2)),
                PathCommand::CubicTo(p1, p2, p3) => {
                    path.curve_to(point(p1), point(p2), point(p3))
                }
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }

    fn length(&self) -> f64 {
        contours(self)
            .iter()
            .flatten()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .sum()
    }

    fn trimmed(&self, window: TrimWindow) -> BezPath {
        if window.is_full() {
            return self.to_bez_path();
        }

        let contours = contours(self);
        let measured: Vec<Vec<(PathSeg, f64)>> = contours
            .into_iter()
            .map(|c| {
                c.into_iter()
                    .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
                    .collect()
            })
            .collect();
        let total: f64 = measured.iter().flatten().map(|(_, len)| len).sum();

        let mut out = BezPath::new();
        if total <= 0.0 {
            trace!("trim requested on a zero-length path");
            return out;
        }

        for (from, to) in window.ranges() {
            extract(&measured, from * total, to * total, &mut out);
        }
        out
    }
}

/// Appends the part of `contours` between arc lengths `from` and `to`, starting a new sub-path
/// for every contour the range touches.
fn extract(contours: &[Vec<(PathSeg, f64)>], from: f64, to: f64, out: &mut BezPath) {
    if to <= from {
        return;
    }

    let mut walked = 0.0;
    for contour in contours {
        let mut needs_move = true;
        for &(seg, len) in contour {
            let seg_start = walked;
            let seg_end = walked + len;
            walked = seg_end;

            if len <= 0.0 || seg_end <= from || seg_start >= to {
                continue;
            }

            let t0 = if from > seg_start {
                seg.inv_arclen(from - seg_start, ARCLEN_ACCURACY)
            } else {
                0.0
            };
            let t1 = if to < seg_end {
                seg.inv_arclen(to - seg_start, ARCLEN_ACCURACY)
            } else {
                1.0
            };
            if t1 <= t0 {
                continue;
            }

            let piece = seg.subsegment(t0..t1);
            if needs_move {
                out.move_to(piece.start());
                needs_move = false;
            }
            push_seg(out, piece);
        }
        if walked >= to {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn horizontal_line() -> PathData {
        PathData::new().move_to(0.0, 0.0).line_to(100.0, 0.0)
    }

    fn end_points(path: &BezPath) -> Vec<(f64, f64)> {
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some((p.x.round(), p.y.round())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_full_window_is_untrimmed() {
        let path = horizontal_line();
        assert_eq!(path.trimmed(TrimWindow::FULL), path.to_bez_path());
        assert_eq!(
            path.trimmed(TrimWindow::new(0.0, 1.0, 0.3)),
            path.to_bez_path()
        );
    }

    #[test]
    fn test_middle_half() {
        let trimmed = horizontal_line().trimmed(TrimWindow::new(0.25, 0.75, 0.0));
        assert_eq!(end_points(&trimmed), vec![(25.0, 0.0), (75.0, 0.0)]);
    }

    #[test]
    fn test_offset_wraps_around() {
        let trimmed = horizontal_line().trimmed(TrimWindow::new(0.5, 1.0, 0.25));
        // [0.75, 1.0] then [0.0, 0.25]
        assert_eq!(
            end_points(&trimmed),
            vec![(75.0, 0.0), (100.0, 0.0), (0.0, 0.0), (25.0, 0.0)]
        );
    }

    #[test]
    fn test_empty_window() {
        let trimmed = horizontal_line().trimmed(TrimWindow::new(0.4, 0.4, 0.0));
        assert!(trimmed.elements().is_empty());
    }

    #[test]
    fn test_trim_spans_contours_and_close() {
        // Square with perimeter 400, followed by a separate 100 long line.
        let path = PathData::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .line_to(100.0, 100.0)
            .line_to(0.0, 100.0)
            .close()
            .move_to(200.0, 0.0)
            .line_to(300.0, 0.0);
        assert!((path.length() - 500.0).abs() < 1e-6);

        // Last 50 of the square's closing edge plus the first 50 of the line.
        let trimmed = path.trimmed(TrimWindow::new(0.7, 0.9, 0.0));
        assert_eq!(
            end_points(&trimmed),
            vec![(0.0, 50.0), (0.0, 0.0), (200.0, 0.0), (250.0, 0.0)]
        );
    }

    #[test]
    fn test_curved_trim_length() {
        let path = PathData::new()
            .move_to(0.0, 0.0)
            .cubic_to(30.0, 50.0, 70.0, 50.0, 100.0, 0.0);
        let whole = path.length();
        let half = path.trimmed(TrimWindow::new(0.0, 0.5, 0.0));
        let half_len: f64 = half.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum();
        assert!((half_len - whole / 2.0).abs() < 0.05, "{half_len} vs {whole}");
    }

    #[test]
    fn test_missing_move_to_starts_at_origin() {
        let path = PathData::new().line_to(10.0, 0.0);
        let bez = path.to_bez_path();
        assert_eq!(bez.elements()[0], PathEl::MoveTo(Point::ZERO));
        assert!((bez.bounding_box().width() - 10.0).abs() < 1e-9);
    }
}
