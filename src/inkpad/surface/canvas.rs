use super::DrawingSurface;
use crate::codec;
use crate::error::Result;
use crate::model::{Color, Point};
use image::{imageops, Rgba, RgbaImage};
use tracing::debug;

// Distance between stamped pen tips along a segment, in pixels.
const STAMP_SPACING: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Stroking { last: Point },
}

/// Headless raster drawing surface.
///
/// Every segment is an independent straight line with round caps, so
/// consecutive segments meet in round joins.
pub struct Canvas {
    raster: RgbaImage,
    stroke_width: f32,
    state: StrokeState,
}

impl Canvas {
    pub fn new(width: u32, height: u32, stroke_width: f32) -> Self {
        Self {
            raster: RgbaImage::new(width, height),
            stroke_width,
            state: StrokeState::Idle,
        }
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// True when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.raster.pixels().all(|p| p[3] == 0)
    }

    fn stamp_segment(&mut self, from: Point, to: Point, ink: Rgba<u8>) {
        let Some((from, to)) = self.clip_to_surface(from, to) else {
            return;
        };
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = ((dx.hypot(dy) / STAMP_SPACING).ceil() as usize).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_tip(from.x + dx * t, from.y + dy * t, ink);
        }
    }

    /// The part of a segment that can leave ink: the raster grown by the pen
    /// radius on every side (Liang-Barsky). `None` when nothing is visible.
    fn clip_to_surface(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        let pad = self.stroke_width / 2.0 + 1.0;
        let (w, h) = self.raster.dimensions();
        let (min_x, min_y) = (-pad, -pad);
        let (max_x, max_y) = (w as f32 + pad, h as f32 + pad);

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        for (p, q) in [
            (-dx, from.x - min_x),
            (dx, max_x - from.x),
            (-dy, from.y - min_y),
            (dy, max_y - from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f32| Point::new(from.x + dx * t, from.y + dy * t);
        Some((at(t0), at(t1)))
    }

    fn stamp_tip(&mut self, cx: f32, cy: f32, ink: Rgba<u8>) {
        let r = self.stroke_width / 2.0;
        let (w, h) = self.raster.dimensions();
        let min_x = ((cx - r).floor() as i64).max(0);
        let max_x = ((cx + r).ceil() as i64).min(w as i64 - 1);
        let min_y = ((cy - r).floor() as i64).max(0);
        let max_y = ((cy + r).ceil() as i64).min(h as i64 - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let fx = px as f32 + 0.5 - cx;
                let fy = py as f32 + 0.5 - cy;
                if fx * fx + fy * fy <= r * r {
                    self.raster.put_pixel(px as u32, py as u32, ink);
                }
            }
        }
    }
}

impl DrawingSurface for Canvas {
    fn begin_stroke(&mut self, at: Point) {
        if !at.is_finite() {
            debug!(?at, "ignoring stroke start at a non-finite point");
            return;
        }
        self.state = StrokeState::Stroking { last: at };
    }

    fn extend_stroke(&mut self, to: Point, color: Color) {
        if !to.is_finite() {
            debug!(?to, "ignoring stroke move to a non-finite point");
            return;
        }
        if let StrokeState::Stroking { last } = self.state {
            self.stamp_segment(last, to, Rgba(color.rgba()));
            self.state = StrokeState::Stroking { last: to };
        }
    }

    fn end_stroke(&mut self) -> bool {
        let was_stroking = self.is_stroking();
        self.state = StrokeState::Idle;
        was_stroking
    }

    fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    fn snapshot(&self) -> Result<String> {
        codec::encode_data_uri(&self.raster)
    }

    fn restore(&mut self, encoded: &str) -> Result<()> {
        let image = codec::decode_data_uri(encoded)?;
        imageops::overlay(&mut self.raster, &image, 0, 0);
        Ok(())
    }

    fn clear(&mut self) {
        let (w, h) = self.raster.dimensions();
        self.raster = RgbaImage::new(w, h);
        self.state = StrokeState::Idle;
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to an empty surface");
            return;
        }
        if self.raster.dimensions() == (width, height) {
            return;
        }
        let previous = std::mem::replace(&mut self.raster, RgbaImage::new(width, height));
        imageops::overlay(&mut self.raster, &previous, 0, 0);
    }

    fn size(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    fn raster(&self) -> &RgbaImage {
        &self.raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(canvas: &mut Canvas, points: &[(f32, f32)], color: Color) {
        let (x, y) = points[0];
        canvas.begin_stroke(Point::new(x, y));
        for &(x, y) in &points[1..] {
            canvas.extend_stroke(Point::new(x, y), color);
        }
        canvas.end_stroke();
    }

    #[test]
    fn stroke_paints_along_segment() {
        let mut canvas = Canvas::new(64, 64, 2.0);
        stroke(&mut canvas, &[(10.0, 10.0), (50.0, 50.0)], Color::Red);

        assert_eq!(canvas.raster().get_pixel(30, 30), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.raster().get_pixel(50, 10)[3], 0);
    }

    #[test]
    fn begin_alone_paints_nothing() {
        let mut canvas = Canvas::new(16, 16, 2.0);
        canvas.begin_stroke(Point::new(8.0, 8.0));
        assert!(canvas.is_stroking());
        assert!(canvas.end_stroke());
        assert!(canvas.is_blank());
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut canvas = Canvas::new(16, 16, 2.0);
        canvas.extend_stroke(Point::new(8.0, 8.0), Color::Black);
        assert!(!canvas.end_stroke());
        assert!(canvas.is_blank());
    }

    #[test]
    fn segments_outside_surface_are_clipped() {
        let mut canvas = Canvas::new(8, 8, 4.0);
        stroke(&mut canvas, &[(-20.0, -20.0), (-5.0, 40.0)], Color::Black);
        assert!(canvas.is_blank());
        stroke(&mut canvas, &[(-4.0, 4.0), (12.0, 4.0)], Color::Black);
        assert!(!canvas.is_blank());
    }

    #[test]
    fn far_off_move_only_paints_visible_part() {
        let mut canvas = Canvas::new(64, 64, 2.0);
        stroke(&mut canvas, &[(10.0, 10.0), (1e12, 10.0)], Color::Black);

        assert_eq!(canvas.raster().get_pixel(30, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.raster().get_pixel(63, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.raster().get_pixel(5, 10)[3], 0);
        assert_eq!(canvas.raster().get_pixel(30, 30)[3], 0);
    }

    #[test]
    fn clipped_segment_stays_near_surface() {
        let canvas = Canvas::new(64, 64, 2.0);
        let (from, to) = canvas
            .clip_to_surface(Point::new(10.0, 10.0), Point::new(1e12, 10.0))
            .unwrap();
        assert_eq!(from, Point::new(10.0, 10.0));
        assert!(to.x < 67.0);
        assert!(canvas
            .clip_to_surface(Point::new(-1e12, -50.0), Point::new(1e12, -50.0))
            .is_none());
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut canvas = Canvas::new(16, 16, 2.0);
        canvas.begin_stroke(Point::new(f32::NAN, 4.0));
        assert!(!canvas.is_stroking());

        canvas.begin_stroke(Point::new(4.0, 4.0));
        canvas.extend_stroke(Point::new(f32::INFINITY, 4.0), Color::Black);
        assert!(canvas.is_stroking());
        assert!(canvas.is_blank());

        canvas.extend_stroke(Point::new(12.0, 4.0), Color::Black);
        assert!(!canvas.is_blank());
    }

    #[test]
    fn snapshot_restores_identical_pixels() {
        let mut canvas = Canvas::new(32, 32, 3.0);
        stroke(&mut canvas, &[(2.0, 2.0), (30.0, 5.0), (5.0, 28.0)], Color::Blue);
        let snap = canvas.snapshot().unwrap();
        let before = canvas.raster().clone();

        canvas.clear();
        assert!(canvas.is_blank());
        canvas.restore(&snap).unwrap();
        assert_eq!(canvas.raster(), &before);
    }

    #[test]
    fn failed_restore_leaves_surface_untouched() {
        let mut canvas = Canvas::new(8, 8, 2.0);
        assert!(canvas.restore("data:image/png;base64,broken").is_err());
        assert!(canvas.is_blank());
    }

    #[test]
    fn resize_preserves_existing_strokes() {
        let mut canvas = Canvas::new(20, 20, 2.0);
        stroke(&mut canvas, &[(2.0, 5.0), (18.0, 5.0)], Color::Green);

        canvas.resize(40, 30);
        assert_eq!(canvas.size(), (40, 30));
        assert_eq!(canvas.raster().get_pixel(10, 5), &Rgba([0, 128, 0, 255]));

        canvas.resize(10, 10);
        assert_eq!(canvas.raster().get_pixel(5, 5), &Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn resize_to_zero_is_ignored() {
        let mut canvas = Canvas::new(20, 20, 2.0);
        canvas.resize(0, 10);
        assert_eq!(canvas.size(), (20, 20));
    }
}
