//! Lifecycle notifications delivered to the view

use snowfall_particles::Visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// The canvas now has these pixel dimensions
    Resized { width: u32, height: u32 },
    VisibilityChanged(Visibility),
    /// The view is torn down; no further frames run
    Destroyed,
}
