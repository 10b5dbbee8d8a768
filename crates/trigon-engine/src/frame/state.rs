/// Lifecycle state of the frame loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameState {
    /// Rendering one frame per step.
    Running,
    /// Quit observed; resources are released on the next step.
    QuitRequested,
    /// Resources released. Absorbing.
    Terminated,
}

impl FrameState {
    #[inline]
    pub fn is_terminated(self) -> bool {
        self == FrameState::Terminated
    }
}
