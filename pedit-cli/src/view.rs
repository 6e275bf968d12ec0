//! Zoom level and action enablement of the image view

/// Which editor actions the front end should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    pub save: bool,
    pub revert: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub normal_size: bool,
}

/// Presentation state kept next to the editor, never inside it
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    zoom_factor: f64,
    zoom: f64,
    image_size: Option<(u32, u32)>,
}

impl ViewState {
    pub fn new(zoom_factor: f64) -> Self {
        Self {
            zoom_factor,
            zoom: 1.0,
            image_size: None,
        }
    }

    /// A new image is shown at its natural size
    pub fn image_loaded(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.zoom = 1.0;
    }

    /// Track a size change of the current image without touching the zoom
    pub fn image_resized(&mut self, width: u32, height: u32) {
        if self.image_size.is_some() {
            self.image_size = Some((width, height));
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image_size.is_some()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn actions(&self) -> Actions {
        let loaded = self.is_loaded();
        Actions {
            save: loaded,
            revert: loaded,
            zoom_in: loaded,
            zoom_out: loaded,
            normal_size: loaded,
        }
    }

    /// Zoom in by one step, returning the step applied
    pub fn zoom_in(&mut self) -> Option<f64> {
        self.scale_by(1.0 + self.zoom_factor)
    }

    /// Zoom out by one step, returning the step applied
    pub fn zoom_out(&mut self) -> Option<f64> {
        self.scale_by(1.0 - self.zoom_factor)
    }

    pub fn normal_size(&mut self) {
        self.zoom = 1.0;
    }

    /// Size of the image on screen, rounded to whole pixels
    pub fn displayed_size(&self) -> Option<(u32, u32)> {
        self.image_size.map(|(width, height)| {
            (
                (f64::from(width) * self.zoom).round() as u32,
                (f64::from(height) * self.zoom).round() as u32,
            )
        })
    }

    fn scale_by(&mut self, step: f64) -> Option<f64> {
        if !self.is_loaded() {
            return None;
        }
        self.zoom *= step;
        Some(step)
    }
}

/// New scrollbar position after zooming by `step`, keeping the view centred.
///
/// Truncates toward zero like the integer conversion of the scroll value.
pub fn adjust_scrollbar(value: i32, page_step: i32, step: f64) -> i32 {
    (step * f64::from(value) + (step - 1.0) * f64::from(page_step) / 2.0) as i32
}
