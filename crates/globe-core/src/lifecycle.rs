//! Liveness state for the per-frame callback.
//!
//! The loop is started once and disposed once. `H` is the platform's frame
//! request handle (the `requestAnimationFrame` id on the web). Every frame
//! callback calls [`FrameLoop::begin_frame`] first and bails out when it
//! returns false, so nothing renders or reschedules after teardown.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Running,
    Disposed,
}

#[derive(Debug)]
pub struct FrameLoop<H> {
    phase: LoopPhase,
    pending: Option<H>,
    frames: u64,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Idle,
            pending: None,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    /// Frames that actually ran.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pending(&self) -> Option<&H> {
        self.pending.as_ref()
    }

    /// `Idle -> Running`. False if the loop was already started or disposed.
    pub fn start(&mut self) -> bool {
        if self.phase != LoopPhase::Idle {
            return false;
        }
        self.phase = LoopPhase::Running;
        true
    }

    /// Record the next requested frame. Ignored unless running.
    pub fn schedule(&mut self, next: H) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.pending = Some(next);
        true
    }

    /// Top of a frame callback: the pending request has fired. Returns
    /// whether the frame should run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Stop the loop. Returns the outstanding frame request to cancel; later
    /// calls return `None`.
    pub fn teardown(&mut self) -> Option<H> {
        if self.phase == LoopPhase::Disposed {
            return None;
        }
        self.phase = LoopPhase::Disposed;
        self.pending.take()
    }
}

/// The globe mounted automatically at startup, keyed by its container id.
///
/// Holds at most one entry. A later explicit mount on the same container
/// evicts it so two render loops never share a container.
#[derive(Debug)]
pub struct MountSlot<T> {
    entry: Option<(String, T)>,
}

impl<T> Default for MountSlot<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> MountSlot<T> {
    pub fn container(&self) -> Option<&str> {
        self.entry.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Store `value` for `container_id`, returning whatever it displaced.
    pub fn fill(&mut self, container_id: &str, value: T) -> Option<T> {
        self.entry
            .replace((container_id.to_string(), value))
            .map(|(_, v)| v)
    }

    pub fn take(&mut self) -> Option<T> {
        self.entry.take().map(|(_, v)| v)
    }

    /// Take the entry only when it belongs to `container_id`.
    pub fn take_for(&mut self, container_id: &str) -> Option<T> {
        if self.container() == Some(container_id) {
            self.take()
        } else {
            None
        }
    }
}
