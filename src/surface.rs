// ---------------------------------------------------------------------------
// Fit-to-window policy
// ---------------------------------------------------------------------------

/// Uniform scale that fits an image of `image` pixels into `viewport`.
///
/// Images that already fit on both axes are never upscaled. When both axes
/// overflow, the axis with the larger overflow decides the scale.
pub fn fit_scale(image: [u32; 2], viewport: [f32; 2]) -> f32 {
    let [iw, ih] = [image[0] as f32, image[1] as f32];
    let [vw, vh] = viewport;

    let x = vw - iw;
    let y = vh - ih;

    match (x < 0.0, y < 0.0) {
        (true, true) if x < y => vw / iw,
        (true, true) => vh / ih,
        (true, false) => vw / iw,
        (false, true) => vh / ih,
        (false, false) => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Zoom step counter
// ---------------------------------------------------------------------------

/// Counts zoom clicks within `[min, max]`; 0 means "as fitted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomSteps {
    steps: i32,
    min: i32,
    max: i32,
}

impl ZoomSteps {
    pub fn new(min: i32, max: i32) -> Self {
        Self { steps: 0, min, max }
    }

    pub fn steps(&self) -> i32 {
        self.steps
    }

    /// Advance one step towards `max`. Returns `false` at the bound.
    pub fn step_in(&mut self) -> bool {
        if self.steps < self.max {
            self.steps += 1;
            true
        } else {
            false
        }
    }

    /// Advance one step towards `min`. Returns `false` at the bound.
    pub fn step_out(&mut self) -> bool {
        if self.steps > self.min {
            self.steps -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

// ---------------------------------------------------------------------------
// Display surface
// ---------------------------------------------------------------------------

/// What the window presents: the image rectangle and one cumulative scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySurface {
    size: [u32; 2],
    scale: f32,
    revision: u64,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self {
            size: [0, 0],
            scale: 1.0,
            revision: 0,
        }
    }
}

impl DisplaySurface {
    /// Replace the presented rectangle. The scale is kept.
    pub fn rebuild(&mut self, size: [u32; 2]) {
        self.size = size;
        self.revision += 1;
    }

    /// Reset the transform to the fit-to-window scale for `viewport`.
    pub fn fit_to(&mut self, viewport: [f32; 2]) {
        self.scale = fit_scale(self.size, viewport);
    }

    pub fn scale_by(&mut self, factor: f32) {
        self.scale *= factor;
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Bumped on every rebuild so renderers know when to re-upload pixels.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// On-screen size in points.
    pub fn scaled_size(&self) -> [f32; 2] {
        [
            self.size[0] as f32 * self.scale,
            self.size[1] as f32 * self.scale,
        ]
    }
}
