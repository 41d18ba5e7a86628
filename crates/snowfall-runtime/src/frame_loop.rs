//! Drives a snowfall view the way a host display loop would

use std::collections::VecDeque;

use crate::clock::FrameClock;
use crate::event::ViewEvent;
use crate::frame_queue::FrameQueue;
use snowfall_particles::{FrameScheduler, Snowfall, Surface, Visibility};

/// A surface the frame loop can resize and wipe between repaints
pub trait HostSurface: Surface {
    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self);
}

/// Single-threaded loop: lifecycle events, then posted tasks, then repaint
pub struct FrameLoop<S: HostSurface> {
    view: Snowfall,
    surface: S,
    queue: FrameQueue,
    events: VecDeque<ViewEvent>,
    clock: FrameClock,
    frames_drawn: u64,
    running: bool,
}

impl<S: HostSurface> FrameLoop<S> {
    /// Attach `view` to `surface`; the view is sized to the surface immediately
    pub fn new(mut view: Snowfall, surface: S) -> Self {
        view.on_size_changed(surface.width(), surface.height());
        let mut queue = FrameQueue::new();
        queue.request_frame();
        Self {
            view,
            surface,
            queue,
            events: VecDeque::new(),
            clock: FrameClock::new(),
            frames_drawn: 0,
            running: true,
        }
    }

    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Queue a lifecycle event for the next frame.
    ///
    /// Back-to-back resizes collapse into the latest one, so a burst of
    /// layout passes rebuilds the snowflakes only once.
    pub fn dispatch(&mut self, event: ViewEvent) {
        if let (Some(ViewEvent::Resized { .. }), ViewEvent::Resized { .. }) =
            (self.events.back(), &event)
        {
            self.events.pop_back();
        }
        self.events.push_back(event);
    }

    /// Lifecycle events waiting for the next frame
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Run one frame. Returns true if the view was repainted.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
            if !self.running {
                return false;
            }
        }

        self.queue.run_pending(&mut self.view);

        if !self.queue.take_frame_request() {
            return false;
        }
        self.surface.clear();
        self.view.on_draw(&mut self.surface, &mut self.queue);
        self.frames_drawn += 1;
        true
    }

    /// Run `frames` iterations without pacing, as a headless host would
    pub fn run(&mut self, frames: u64) -> u64 {
        let start = self.frames_drawn;
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.frame();
        }
        self.frames_drawn - start
    }

    /// Run frames paced to the clock until `frames` have been presented or the loop stops.
    /// `on_present` sees the surface after every repaint.
    pub fn run_paced<F>(&mut self, frames: u64, mut on_present: F) -> u64
    where
        F: FnMut(u64, &S),
    {
        let start = self.frames_drawn;
        while self.running && self.frames_drawn - start < frames {
            self.clock.tick();
            if !self.clock.should_present() {
                std::thread::sleep(self.clock.until_next_frame());
                continue;
            }
            self.clock.consume_frame();
            if self.frame() {
                on_present(self.frames_drawn, &self.surface);
            } else if !self.queue.is_frame_requested() && self.events.is_empty() {
                log::debug!("No frame requested, leaving the loop");
                break;
            }
        }
        self.frames_drawn - start
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.queue.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn view(&self) -> &Snowfall {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut Snowfall {
        &mut self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn handle_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Resized { width, height } => {
                self.surface.resize(width, height);
                self.view.on_size_changed(width, height);
                if self.view.is_shown() {
                    self.queue.request_frame();
                }
            }
            ViewEvent::VisibilityChanged(visibility) => {
                self.view.on_visibility_changed(visibility);
                if visibility == Visibility::Visible {
                    self.queue.request_frame();
                } else {
                    // hidden views stop the animation until shown again
                    self.queue.cancel();
                }
            }
            ViewEvent::Destroyed => {
                log::info!("Snowfall view destroyed after {} frames", self.frames_drawn);
                self.stop();
            }
        }
    }
}
