//! Explicit render state carried across calls.
//!
//! Each visual group's create-or-update decision reads its own flag here
//! instead of probing the live scene, so no group's decision depends on a
//! stale read of another group's state.

/// Existence flags per visual group plus the previously bound bar keys.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub x_axis: bool,
    pub y_axis: bool,
    pub grid_x: bool,
    pub grid_y: bool,
    pub label_x: bool,
    pub label_y: bool,
    pub title: bool,
    /// Bar identity keys bound by the previous render, in dataset order.
    pub bound_keys: Vec<String>,
    pub renders: u64,
}

impl RenderState {
    /// True until the first render completes; the reconciler takes the
    /// simplified all-entering path in that case.
    #[must_use]
    pub fn first_render(&self) -> bool {
        self.renders == 0
    }
}
