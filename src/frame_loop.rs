//! Explicit per-frame scheduler.
//!
//! The host registers its state and a callback once with `run`, then calls
//! `tick` from its own redraw notification. `stop` cancels the loop and hands
//! the state back; no callback runs after that. A callback that returns
//! `LoopControl::Stop` ends the loop the same way, leaving the state for the
//! host to collect with `stop`.

/// Returned by the frame callback to keep going or end the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

type FrameCallback<S> = Box<dyn FnMut(&mut S, u64) -> LoopControl>;

pub struct FrameLoop<S> {
    state: Option<S>,
    callback: Option<FrameCallback<S>>,
    frame: u64,
    visible: bool,
}

impl<S> Default for FrameLoop<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FrameLoop<S> {
    pub fn new() -> Self {
        Self {
            state: None,
            callback: None,
            frame: 0,
            visible: true,
        }
    }

    /// Register the state and per-frame callback
    ///
    /// Returns `false` (and leaves the running loop alone) if already running.
    pub fn run<F>(&mut self, state: S, callback: F) -> bool
    where
        F: FnMut(&mut S, u64) -> LoopControl + 'static,
    {
        if self.is_running() {
            log::warn!("Frame loop already running; ignoring second registration");
            return false;
        }
        self.state = Some(state);
        self.callback = Some(Box::new(callback));
        self.frame = 0;
        true
    }

    /// Run one frame if the loop is running and the surface is visible
    ///
    /// Returns whether the callback ran.
    pub fn tick(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        let (Some(state), Some(callback)) = (self.state.as_mut(), self.callback.as_mut()) else {
            return false;
        };

        let control = callback(state, self.frame);
        self.frame += 1;
        if control == LoopControl::Stop {
            self.callback = None;
            log::debug!("Frame loop finished after {} frames", self.frame);
        }
        true
    }

    /// Cancel the loop, dropping the callback and returning the state
    pub fn stop(&mut self) -> Option<S> {
        if self.callback.take().is_some() {
            log::debug!("Frame loop stopped after {} frames", self.frame);
        }
        self.state.take()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some() && self.callback.is_some()
    }

    /// Hidden surfaces do not tick
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Frames run since `run`
    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut S> {
        self.state.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_runs_callback_with_frame_numbers() {
        let mut frames = FrameLoop::new();
        frames.run(Vec::new(), |seen: &mut Vec<u64>, n| {
            seen.push(n);
            LoopControl::Continue
        });

        for _ in 0..3 {
            assert!(frames.tick());
        }
        assert_eq!(frames.state(), Some(&vec![0, 1, 2]));
        assert_eq!(frames.frames(), 3);
    }

    #[test]
    fn test_no_frames_after_stop() {
        let mut frames = FrameLoop::new();
        frames.run(0u32, |count, _| {
            *count += 1;
            LoopControl::Continue
        });
        frames.tick();
        frames.tick();

        assert_eq!(frames.stop(), Some(2));
        assert!(!frames.is_running());
        assert!(!frames.tick());
        assert_eq!(frames.stop(), None);
    }

    #[test]
    fn test_callback_can_end_the_loop() {
        let mut frames = FrameLoop::new();
        frames.run(0u32, |count, n| {
            *count += 1;
            if n == 4 {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        });

        let mut ran = 0;
        while frames.tick() {
            ran += 1;
        }
        assert_eq!(ran, 5);
        assert!(!frames.is_running());
        assert_eq!(frames.stop(), Some(5));
    }

    #[test]
    fn test_hidden_surface_skips_ticks() {
        let mut frames = FrameLoop::new();
        frames.run(0u32, |count, _| {
            *count += 1;
            LoopControl::Continue
        });

        frames.set_visible(false);
        assert!(!frames.tick());
        frames.set_visible(true);
        assert!(frames.tick());
        assert_eq!(frames.state_mut().copied(), Some(1));
    }

    #[test]
    fn test_second_registration_is_rejected() {
        let mut frames = FrameLoop::new();
        assert!(frames.run(1u8, |_, _| LoopControl::Continue));
        assert!(!frames.run(2u8, |_, _| LoopControl::Continue));
        assert_eq!(frames.state(), Some(&1));
    }
}
