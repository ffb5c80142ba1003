//! Grid viewport: pan offset and zoom scale.

/// Multiplier applied by one zoom step.
pub const ZOOM_STEP: f64 = 1.2;
/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 3.0;

/// Where the grid is looked at from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Horizontal pan in pixels.
    pub offset_x: f64,
    /// Vertical pan in pixels.
    pub offset_y: f64,
    /// Zoom factor, always within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewState {
    /// Creates a centered, unzoomed view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One step closer.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).min(MAX_SCALE);
    }

    /// One step further out.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).max(MIN_SCALE);
    }

    /// Shifts the view.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Re-centers without touching the zoom.
    pub fn recenter(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Back to the default view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
