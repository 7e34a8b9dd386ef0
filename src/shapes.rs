//! Software rasterization of the primitives the tools draw.
//!
//! Outlines are built from round stamps along Bresenham lines, so a shape
//! drawn with width `w` never reaches further than `ceil(w / 2)` pixels
//! outside its geometric bounding box. Filled shapes paint the interior,
//! boundary included, with no extra outline.

use egui::Pos2;
use image::Rgba;

use crate::raster::RasterBuffer;

/// Color and width used for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgba<u8>,
    pub width: u32,
}

impl Pen {
    pub fn new(color: Rgba<u8>, width: u32) -> Self {
        Self { color, width }
    }

    fn radius(&self) -> f32 {
        (self.width.max(1) as f32) / 2.0
    }

    /// Pixels the pen reaches past the point it is drawn at
    pub fn reach(&self) -> i32 {
        self.radius().ceil() as i32
    }
}

#[inline]
fn to_pixel_coords(p: Pos2) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Clip an inclusive coordinate range to `0..len`. `None` when empty.
fn clip_range(lo: i32, hi: i32, len: u32) -> Option<(i32, i32)> {
    let lo = lo.max(0);
    let hi = hi.min(len as i32 - 1);
    (lo <= hi).then_some((lo, hi))
}

/// Paint a filled disc of the pen's diameter centered on (cx, cy)
fn stamp(canvas: &mut RasterBuffer, cx: i32, cy: i32, pen: &Pen) {
    let radius = pen.radius();
    let reach = pen.reach();
    let r2 = radius * radius;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if ((dx * dx + dy * dy) as f32) <= r2 {
                canvas.put_pixel(cx + dx, cy + dy, pen.color);
            }
        }
    }
}

/// Draw a line from `from` to `to` with round caps
pub fn line(canvas: &mut RasterBuffer, from: Pos2, to: Pos2, pen: &Pen) {
    let (mut x0, mut y0) = to_pixel_coords(from);
    let (x1, y1) = to_pixel_coords(to);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(canvas, x0, y0, pen);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Axis-aligned rectangle with opposite corners `a` and `b`
pub fn rectangle(canvas: &mut RasterBuffer, a: Pos2, b: Pos2, pen: &Pen, fill: bool) {
    if fill {
        let (ax, ay) = to_pixel_coords(a);
        let (bx, by) = to_pixel_coords(b);
        let Some((x_lo, x_hi)) = clip_range(ax.min(bx), ax.max(bx), canvas.width()) else {
            return;
        };
        let Some((y_lo, y_hi)) = clip_range(ay.min(by), ay.max(by), canvas.height()) else {
            return;
        };
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                canvas.put_pixel(x, y, pen.color);
            }
        }
        return;
    }

    let top_right = Pos2::new(b.x, a.y);
    let bottom_left = Pos2::new(a.x, b.y);
    line(canvas, a, top_right, pen);
    line(canvas, top_right, b, pen);
    line(canvas, b, bottom_left, pen);
    line(canvas, bottom_left, a, pen);
}

/// Circle around `center`. The outline is centered on the radius.
pub fn circle(canvas: &mut RasterBuffer, center: Pos2, radius: f32, pen: &Pen, fill: bool) {
    let (cx, cy) = to_pixel_coords(center);
    let half = pen.radius().max(0.5);
    let outer = if fill { radius } else { radius + half };
    let reach = outer.ceil() as i32;

    let Some((x_lo, x_hi)) = clip_range(cx - reach, cx + reach, canvas.width()) else {
        return;
    };
    let Some((y_lo, y_hi)) = clip_range(cy - reach, cy + reach, canvas.height()) else {
        return;
    };

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            let inside = if fill {
                distance <= radius
            } else {
                (distance - radius).abs() <= half
            };
            if inside {
                canvas.put_pixel(x, y, pen.color);
            }
        }
    }
}

#[inline]
fn edge(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> i64 {
    (b.0 - a.0) as i64 * (p.1 - a.1) as i64 - (b.1 - a.1) as i64 * (p.0 - a.0) as i64
}

/// Triangle through three vertices
pub fn triangle(canvas: &mut RasterBuffer, vertices: [Pos2; 3], pen: &Pen, fill: bool) {
    if !fill {
        let [a, b, c] = vertices;
        line(canvas, a, b, pen);
        line(canvas, b, c, pen);
        line(canvas, c, a, pen);
        return;
    }

    let [a, b, c] = vertices.map(to_pixel_coords);
    let Some((x_lo, x_hi)) = clip_range(a.0.min(b.0).min(c.0), a.0.max(b.0).max(c.0), canvas.width())
    else {
        return;
    };
    let Some((y_lo, y_hi)) = clip_range(a.1.min(b.1).min(c.1), a.1.max(b.1).max(c.1), canvas.height())
    else {
        return;
    };

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let p = (x, y);
            let e0 = edge(a, b, p);
            let e1 = edge(b, c, p);
            let e2 = edge(c, a, p);
            let inside = (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0);
            if inside {
                canvas.put_pixel(x, y, pen.color);
            }
        }
    }
}
