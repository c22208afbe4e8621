use iced::{Point, Size, Vector};

/// Smallest zoom factor the wheel can reach.
pub const ZOOM_MIN: f32 = 0.1;
/// Largest zoom factor the wheel can reach.
pub const ZOOM_MAX: f32 = 6.5;
/// Scale change applied per wheel tick.
pub const ZOOM_STEP: f32 = 0.1;

/// Position of the media surface inside its viewport.
///
/// The surface sits centered in the container; `translation` is the offset
/// from that centered position and `scale` grows the surface around its own
/// center. All pointer-driven updates go through [`zoom`](Self::zoom) and
/// [`drag`](Self::drag), which keep the invariant that an overflowing
/// surface never reveals empty viewport space past its edges, while a
/// fitting surface stays centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    scale: f32,
    translation: Vector,
    container: Size,
    content: Size,
}

impl ViewportState {
    pub fn new(container: Size, content: Size) -> Self {
        Self {
            scale: 1.0,
            translation: Vector::new(0.0, 0.0),
            container,
            content,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Vector {
        self.translation
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn content(&self) -> Size {
        self.content
    }

    /// The surface size after scaling.
    pub fn scaled(&self) -> Size {
        Size::new(
            self.content.width * self.scale,
            self.content.height * self.scale,
        )
    }

    /// Top-left corner of the scaled surface, in container coordinates.
    pub fn origin(&self) -> Point {
        let scaled = self.scaled();
        Point::new(
            (self.container.width - scaled.width) / 2.0 + self.translation.x,
            (self.container.height - scaled.height) / 2.0 + self.translation.y,
        )
    }

    /// Whether the scaled surface overflows the container on either axis.
    pub fn overflows(&self) -> bool {
        let scaled = self.scaled();
        scaled.width > self.container.width || scaled.height > self.container.height
    }

    /// A new natural media size resets the whole transform.
    pub fn set_content(&mut self, content: Size) {
        self.content = content;
        self.scale = 1.0;
        self.translation = Vector::new(0.0, 0.0);
    }

    /// Container resizes reset the transform as well.
    pub fn resize(&mut self, container: Size) {
        self.container = container;
        self.scale = 1.0;
        self.translation = Vector::new(0.0, 0.0);
    }

    /// One wheel tick. `cursor` is the pointer position in container
    /// coordinates.
    ///
    /// The scale only moves while it stays strictly inside
    /// (`ZOOM_MIN`, `ZOOM_MAX`). Zooming in leaves the translation alone;
    /// zooming out re-clamps both axes: once the surface fits an axis it
    /// snaps back to center, and while it still overflows, the content under
    /// the pointer is held steady without letting an edge back inside the
    /// container.
    pub fn zoom(&mut self, delta: f32, cursor: Point) {
        let step = if delta > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        let previous = self.scale;
        let next = self.scale + step;
        if next > ZOOM_MIN && next < ZOOM_MAX {
            self.scale = next;
        }

        if delta > 0.0 {
            return;
        }

        let ratio = self.scale / previous;
        let center = Point::new(self.container.width / 2.0, self.container.height / 2.0);
        let scaled = self.scaled();

        if scaled.width < self.container.width {
            self.translation.x = 0.0;
        } else {
            let anchored = (cursor.x - center.x) * (1.0 - ratio) + self.translation.x * ratio;
            self.translation.x = clamp_axis(anchored, scaled.width, self.container.width);
        }

        if scaled.height < self.container.height {
            self.translation.y = 0.0;
        } else {
            let anchored = (cursor.y - center.y) * (1.0 - ratio) + self.translation.y * ratio;
            self.translation.y = clamp_axis(anchored, scaled.height, self.container.height);
        }
    }

    /// One pointer-drag step.
    ///
    /// Each axis moves only while the scaled surface covers the container on
    /// that axis, and a step that would pull the covering edge inside the
    /// container is dropped outright rather than clamped.
    pub fn drag(&mut self, delta: Vector) {
        let scaled = self.scaled();
        self.translation.x = drag_axis(
            self.translation.x,
            delta.x,
            scaled.width,
            self.container.width,
        );
        self.translation.y = drag_axis(
            self.translation.y,
            delta.y,
            scaled.height,
            self.container.height,
        );
    }
}

fn clamp_axis(translation: f32, scaled: f32, container: f32) -> f32 {
    let limit = (scaled - container) / 2.0;
    translation.clamp(-limit, limit)
}

fn drag_axis(translation: f32, delta: f32, scaled: f32, container: f32) -> f32 {
    if scaled < container || delta == 0.0 {
        return translation;
    }
    let limit = (scaled - container) / 2.0;
    let proposed = translation + delta;
    if proposed > limit || proposed < -limit {
        return translation;
    }
    proposed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewportState {
        ViewportState::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0))
    }

    fn center() -> Point {
        Point::new(400.0, 300.0)
    }

    #[test]
    fn test_zoom_stays_within_bounds() {
        let mut viewport = state();
        for _ in 0..200 {
            viewport.zoom(1.0, center());
            assert!(viewport.scale() <= ZOOM_MAX);
        }
        assert!((viewport.scale() - ZOOM_MAX).abs() <= ZOOM_STEP + 1e-3);
        for _ in 0..200 {
            viewport.zoom(-1.0, center());
            assert!(viewport.scale() >= ZOOM_MIN);
        }
        assert!((viewport.scale() - ZOOM_MIN).abs() <= ZOOM_STEP + 1e-3);
    }

    #[test]
    fn test_resize_resets_transform() {
        let mut viewport = state();
        for _ in 0..20 {
            viewport.zoom(1.0, Point::new(100.0, 100.0));
        }
        viewport.drag(Vector::new(-30.0, -20.0));
        viewport.resize(Size::new(640.0, 480.0));
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!(viewport.translation(), Vector::new(0.0, 0.0));
        assert_eq!(viewport.container(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_exact_fit_forces_centered_translation() {
        // 400x300 content at scale 2 exactly fills an 800x600 container.
        let mut viewport = state();
        viewport.scale = 2.0;
        viewport.translation = Vector::new(55.0, -40.0);
        viewport.zoom(-1.0, Point::new(10.0, 10.0));
        // One tick out leaves the surface smaller than the container on both
        // axes, so the translation snaps back to center.
        assert_eq!(viewport.translation(), Vector::new(0.0, 0.0));

        let mut viewport = state();
        viewport.scale = 2.1;
        viewport.translation = Vector::new(55.0, -40.0);
        viewport.zoom(-1.0, center());
        // Exactly filling: the clamp window collapses to zero.
        assert!((viewport.scale() - 2.0).abs() < 1e-4);
        assert!(viewport.translation().x.abs() < 1e-3);
        assert!(viewport.translation().y.abs() < 1e-3);
    }

    #[test]
    fn test_drag_requires_overflow() {
        let mut viewport = state();
        // Content fits at scale 1; every drag is rejected.
        viewport.drag(Vector::new(15.0, -8.0));
        assert_eq!(viewport.translation(), Vector::new(0.0, 0.0));
        assert!(!viewport.overflows());
    }

    #[test]
    fn test_drag_never_reveals_container_space() {
        let mut viewport = state();
        viewport.scale = 4.0; // scaled 1600x1200, limits (400, 300)
        for step in [
            Vector::new(250.0, 0.0),
            Vector::new(250.0, 180.0),
            Vector::new(-900.0, 0.0),
            Vector::new(0.0, 400.0),
            Vector::new(-120.0, -650.0),
        ] {
            viewport.drag(step);
            let origin = viewport.origin();
            let scaled = viewport.scaled();
            assert!(origin.x <= 1e-3);
            assert!(origin.y <= 1e-3);
            assert!(origin.x + scaled.width >= viewport.container().width - 1e-3);
            assert!(origin.y + scaled.height >= viewport.container().height - 1e-3);
        }
    }

    #[test]
    fn test_drag_step_past_edge_is_dropped_not_clamped() {
        let mut viewport = state();
        viewport.scale = 4.0;
        viewport.drag(Vector::new(380.0, 0.0));
        assert_eq!(viewport.translation(), Vector::new(380.0, 0.0));
        // 380 + 30 would cross the 400 limit; the whole step is refused.
        viewport.drag(Vector::new(30.0, 0.0));
        assert_eq!(viewport.translation(), Vector::new(380.0, 0.0));
        // The other axis still accepts its part of a mixed step.
        viewport.drag(Vector::new(30.0, 25.0));
        assert_eq!(viewport.translation(), Vector::new(380.0, 25.0));
    }

    #[test]
    fn test_zoom_out_below_fit_recenters_axis() {
        let mut viewport = state();
        viewport.scale = 2.2; // overflows both axes
        viewport.translation = Vector::new(30.0, 20.0);
        viewport.zoom(-1.0, center());
        viewport.zoom(-1.0, center());
        // Now at scale 2.0 the surface no longer overflows; both axes reset.
        assert_eq!(viewport.translation(), Vector::new(0.0, 0.0));
    }

    #[test]
    fn test_zoom_out_keeps_cursor_point_stable_while_overflowing() {
        let mut viewport = state();
        viewport.scale = 4.0;
        viewport.translation = Vector::new(100.0, 0.0);
        let cursor = Point::new(200.0, 300.0);

        // Content coordinate under the cursor before the tick.
        let before = (cursor.x - center().x - viewport.translation().x) / viewport.scale();
        viewport.zoom(-1.0, cursor);
        let after = (cursor.x - center().x - viewport.translation().x) / viewport.scale();

        // Still overflowing and away from the clamp limits, the same content
        // point sits under the pointer.
        assert!((before - after).abs() * viewport.scale() < 1e-2);
    }

    #[test]
    fn test_zoom_at_bounds_leaves_scale_unchanged() {
        let mut viewport = state();
        viewport.scale = ZOOM_MAX - 0.05;
        viewport.zoom(1.0, center());
        assert_eq!(viewport.scale(), ZOOM_MAX - 0.05);

        viewport.scale = ZOOM_MIN + 0.05;
        viewport.zoom(-1.0, center());
        assert_eq!(viewport.scale(), ZOOM_MIN + 0.05);
    }
}
