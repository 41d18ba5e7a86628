//! Post-to-next-tick task queue

use snowfall_particles::{FrameScheduler, FrameTask, Snowfall};
use std::collections::VecDeque;

/// Tasks posted during a repaint, run in FIFO order before the next one
#[derive(Default)]
pub struct FrameQueue {
    tasks: VecDeque<FrameTask>,
    frame_requested: bool,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the tasks queued so far. Tasks they post wait for the next call.
    pub fn run_pending(&mut self, view: &mut Snowfall) -> usize {
        let pending = std::mem::take(&mut self.tasks);
        let count = pending.len();
        for task in pending {
            task(view);
        }
        count
    }

    /// Consume the repaint request, if any
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Drop queued work and any outstanding repaint request
    pub fn cancel(&mut self) {
        self.tasks.clear();
        self.frame_requested = false;
    }
}

impl FrameScheduler for FrameQueue {
    fn post(&mut self, task: FrameTask) {
        self.tasks.push_back(task);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowfall_particles::SnowfallConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn view() -> Snowfall {
        let config = SnowfallConfig {
            snowflakes_num: 3,
            ..SnowfallConfig::default()
        };
        Snowfall::with_seed(config, None, 0)
    }

    #[test]
    fn tasks_run_in_post_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut queue = FrameQueue::new();
        for i in 0..3 {
            let order = Rc::clone(&order);
            queue.post(Box::new(move |_view: &mut Snowfall| order.borrow_mut().push(i)));
        }
        assert_eq!(queue.pending(), 3);

        let mut view = view();
        assert_eq!(queue.run_pending(&mut view), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn frame_request_is_consumed_once() {
        let mut queue = FrameQueue::new();
        assert!(!queue.take_frame_request());
        queue.request_frame();
        queue.request_frame();
        assert!(queue.is_frame_requested());
        assert!(queue.take_frame_request());
        assert!(!queue.take_frame_request());
    }

    #[test]
    fn cancel_drops_everything() {
        let mut queue = FrameQueue::new();
        queue.post(Box::new(|view: &mut Snowfall| view.advance()));
        queue.request_frame();
        queue.cancel();
        assert_eq!(queue.pending(), 0);
        assert!(!queue.is_frame_requested());
    }
}
