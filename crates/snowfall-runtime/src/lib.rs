//! Snowfall Runtime - host-side frame loop
//!
//! Provides the pieces a host GUI normally supplies:
//! - `FrameClock` — fixed refresh-interval pacing
//! - `ViewEvent` — resize, visibility and teardown notifications
//! - `FrameQueue` — post-to-next-tick task queue implementing `FrameScheduler`
//! - `FrameLoop` — drives a `Snowfall` view against a `HostSurface`

mod clock;
mod event;
mod frame_loop;
mod frame_queue;

pub use clock::FrameClock;
pub use event::ViewEvent;
pub use frame_loop::{FrameLoop, HostSurface};
pub use frame_queue::FrameQueue;
