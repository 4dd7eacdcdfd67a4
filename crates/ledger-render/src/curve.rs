#![allow(clippy::too_many_arguments)]

//! Path-data generators for the curve shapes the visualizations draw.

use crate::model::LayoutPoint;
use crate::util::fmt_into;

fn emit_cmd_pair(out: &mut String, cmd: char, x: f64, y: f64) {
    out.push(cmd);
    fmt_into(out, x);
    out.push(',');
    fmt_into(out, y);
}

fn emit_cmd_cubic(out: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
    out.push('C');
    fmt_into(out, x1);
    out.push(',');
    fmt_into(out, y1);
    out.push(',');
    fmt_into(out, x2);
    out.push(',');
    fmt_into(out, y2);
    out.push(',');
    fmt_into(out, x);
    out.push(',');
    fmt_into(out, y);
}

pub fn curve_linear_path_d(points: &[LayoutPoint]) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(16));
    for (i, p) in points.iter().enumerate() {
        emit_cmd_pair(&mut out, if i == 0 { 'M' } else { 'L' }, p.x, p.y);
    }
    out
}

/// Open cardinal spline. `tension` 0 is Catmull-Rom-like, 1 collapses to straight lines.
pub fn curve_cardinal_path_d(points: &[LayoutPoint], tension: f64) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(64));
    if points.is_empty() {
        return out;
    }

    let k = (1.0 - tension) / 6.0;

    let mut p = 0u8;
    let mut x0 = f64::NAN;
    let mut y0 = f64::NAN;
    let mut x1 = f64::NAN;
    let mut y1 = f64::NAN;
    let mut x2 = f64::NAN;
    let mut y2 = f64::NAN;

    fn cardinal_point(
        out: &mut String,
        k: f64,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    ) {
        let c1x = x1 + k * (x2 - x0);
        let c1y = y1 + k * (y2 - y0);
        let c2x = x2 + k * (x1 - x);
        let c2y = y2 + k * (y1 - y);
        emit_cmd_cubic(out, c1x, c1y, c2x, c2y, x2, y2);
    }

    for pt in points {
        let (x, y) = (pt.x, pt.y);
        match p {
            0 => {
                p = 1;
                emit_cmd_pair(&mut out, 'M', x, y);
            }
            1 => {
                p = 2;
                x1 = x;
                y1 = y;
            }
            2 => {
                p = 3;
                cardinal_point(&mut out, k, x0, y0, x1, y1, x2, y2, x, y);
            }
            _ => {
                cardinal_point(&mut out, k, x0, y0, x1, y1, x2, y2, x, y);
            }
        }

        x0 = x1;
        x1 = x2;
        x2 = x;
        y0 = y1;
        y1 = y2;
        y2 = y;
    }

    match p {
        2 => emit_cmd_pair(&mut out, 'L', x2, y2),
        3 => cardinal_point(&mut out, k, x0, y0, x1, y1, x2, y2, x1, y1),
        _ => {}
    }

    out
}

/// Monotone cubic interpolation in x; never overshoots between samples.
pub fn curve_monotone_x_path_d(points: &[LayoutPoint]) -> String {
    fn sign(v: f64) -> f64 {
        if v < 0.0 { -1.0 } else { 1.0 }
    }

    fn slope3(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        let h0 = x1 - x0;
        let h1 = x2 - x1;
        let denom0 = if h0 != 0.0 {
            h0
        } else if h1 < 0.0 {
            -0.0
        } else {
            0.0
        };
        let denom1 = if h1 != 0.0 {
            h1
        } else if h0 < 0.0 {
            -0.0
        } else {
            0.0
        };
        let s0 = (y1 - y0) / denom0;
        let s1 = (y2 - y1) / denom1;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let v = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if v.is_finite() { v } else { 0.0 }
    }

    fn slope2(x0: f64, y0: f64, x1: f64, y1: f64, t: f64) -> f64 {
        let h = x1 - x0;
        if h != 0.0 {
            (3.0 * (y1 - y0) / h - t) / 2.0
        } else {
            t
        }
    }

    fn hermite_segment(out: &mut String, x0: f64, y0: f64, x1: f64, y1: f64, t0: f64, t1: f64) {
        let dx = (x1 - x0) / 3.0;
        emit_cmd_cubic(out, x0 + dx, y0 + dx * t0, x1 - dx, y1 - dx * t1, x1, y1);
    }

    let mut out = String::with_capacity(points.len().saturating_mul(64));
    if points.is_empty() {
        return out;
    }

    let mut point_state: u8 = 0;
    let mut x0 = f64::NAN;
    let mut y0 = f64::NAN;
    let mut x1 = f64::NAN;
    let mut y1 = f64::NAN;
    let mut t0 = f64::NAN;

    for p in points {
        let (x, y) = (p.x, p.y);
        if x == x1 && y == y1 {
            continue;
        }

        let mut t1 = f64::NAN;
        match point_state {
            0 => {
                point_state = 1;
                emit_cmd_pair(&mut out, 'M', x, y);
            }
            1 => {
                point_state = 2;
            }
            2 => {
                point_state = 3;
                t1 = slope3(x0, y0, x1, y1, x, y);
                let t0_local = slope2(x0, y0, x1, y1, t1);
                hermite_segment(&mut out, x0, y0, x1, y1, t0_local, t1);
            }
            _ => {
                t1 = slope3(x0, y0, x1, y1, x, y);
                hermite_segment(&mut out, x0, y0, x1, y1, t0, t1);
            }
        }

        x0 = x1;
        y0 = y1;
        x1 = x;
        y1 = y;
        t0 = t1;
    }

    match point_state {
        2 => emit_cmd_pair(&mut out, 'L', x1, y1),
        3 => {
            let t1 = slope2(x0, y0, x1, y1, t0);
            hermite_segment(&mut out, x0, y0, x1, y1, t0, t1);
        }
        _ => {}
    }

    out
}

/// Horizontal flow ribbon centreline: `M x0,y0 C mx,y0 mx,y1 x1,y1`.
pub fn link_horizontal_path_d(x0: f64, y0: f64, x1: f64, y1: f64) -> String {
    let mut out = String::with_capacity(64);
    let mx = (x0 + x1) / 2.0;
    emit_cmd_pair(&mut out, 'M', x0, y0);
    emit_cmd_cubic(&mut out, mx, y0, mx, y1, x1, y1);
    out
}

pub fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Closed annulus sector between `start` and `end` radians, sweeping with increasing angle.
pub fn annulus_sector_path_d(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    let large = if (end - start).abs() > std::f64::consts::PI { 1 } else { 0 };
    let (ox0, oy0) = polar(cx, cy, outer, start);
    let (ox1, oy1) = polar(cx, cy, outer, end);
    let (ix1, iy1) = polar(cx, cy, inner, end);
    let (ix0, iy0) = polar(cx, cy, inner, start);

    let mut out = String::with_capacity(128);
    emit_cmd_pair(&mut out, 'M', ox0, oy0);
    emit_arc(&mut out, outer, large, 1, ox1, oy1);
    emit_cmd_pair(&mut out, 'L', ix1, iy1);
    if inner > 0.0 {
        emit_arc(&mut out, inner, large, 0, ix0, iy0);
    }
    out.push('Z');
    out
}

fn emit_arc(out: &mut String, r: f64, large: u8, sweep: u8, x: f64, y: f64) {
    out.push('A');
    fmt_into(out, r);
    out.push(',');
    fmt_into(out, r);
    out.push_str(",0,");
    out.push(char::from(b'0' + large));
    out.push(',');
    out.push(char::from(b'0' + sweep));
    out.push(',');
    fmt_into(out, x);
    out.push(',');
    fmt_into(out, y);
}
