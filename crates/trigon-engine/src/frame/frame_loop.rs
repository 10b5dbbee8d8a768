use std::time::Duration;

use crate::core::Scene;
use crate::driver::{Driver, DriverErrorCode};
use crate::time::FrameClock;

use super::FrameState;

/// Window-side collaborator of the loop.
pub trait Presenter {
    /// Drains pending window events without blocking; `true` once the user
    /// asked to quit.
    fn poll_quit_intent(&mut self) -> bool;

    /// Swaps the back buffer to the screen. May block on vsync.
    fn present_frame(&mut self) -> anyhow::Result<()>;
}

/// A per-frame problem the loop does not act on.
#[derive(Debug)]
pub enum FrameFault {
    /// Driver error flag raised after the draw.
    Driver {
        frame_index: u64,
        code: DriverErrorCode,
    },
    /// Presentation failed.
    Present {
        frame_index: u64,
        error: anyhow::Error,
    },
}

/// Totals reported once the loop terminates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u64,
    pub elapsed: Duration,
}

type FaultObserver<'o> = Box<dyn FnMut(FrameFault) + 'o>;

/// Drives a [`Scene`] until the presenter reports a quit intent.
///
/// Draw and present failures are ignored unless a fault observer is
/// installed with [`FrameLoop::with_fault_observer`].
pub struct FrameLoop<'o> {
    state: FrameState,
    scene: Option<Scene>,
    clock: FrameClock,
    observer: Option<FaultObserver<'o>>,
}

impl<'o> FrameLoop<'o> {
    /// Starts in `Running`; only a fully built scene can get here.
    pub fn new(scene: Scene) -> Self {
        Self {
            state: FrameState::Running,
            scene: Some(scene),
            clock: FrameClock::new(),
            observer: None,
        }
    }

    /// Checks the driver error flag after every draw and forwards present
    /// failures to `observer`.
    pub fn with_fault_observer(mut self, observer: impl FnMut(FrameFault) + 'o) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    #[inline]
    pub fn state(&self) -> FrameState {
        self.state
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.clock.frames()
    }

    /// Advances the state machine by one transition.
    pub fn step<D, P>(&mut self, driver: &D, presenter: &mut P) -> FrameState
    where
        D: Driver + ?Sized,
        P: Presenter + ?Sized,
    {
        match self.state {
            FrameState::Running => {
                if presenter.poll_quit_intent() {
                    log::info!("quit requested after {} frame(s)", self.clock.frames());
                    self.state = FrameState::QuitRequested;
                } else {
                    self.render_frame(driver, presenter);
                }
            }
            FrameState::QuitRequested => {
                if let Some(scene) = self.scene.take() {
                    scene.release(driver);
                }
                self.state = FrameState::Terminated;
            }
            FrameState::Terminated => {}
        }
        self.state
    }

    /// Steps until `Terminated`, then reports the totals.
    pub fn run<D, P>(mut self, driver: &D, presenter: &mut P) -> FrameReport
    where
        D: Driver + ?Sized,
        P: Presenter + ?Sized,
    {
        while !self.step(driver, presenter).is_terminated() {}

        let report = FrameReport {
            frames: self.clock.frames(),
            elapsed: self.clock.elapsed(),
        };
        log::info!(
            "rendered {} frame(s) in {:.2}s (avg {:.1} fps)",
            report.frames,
            report.elapsed.as_secs_f64(),
            self.clock.average_fps()
        );
        report
    }

    fn render_frame<D, P>(&mut self, driver: &D, presenter: &mut P)
    where
        D: Driver + ?Sized,
        P: Presenter + ?Sized,
    {
        let Some(scene) = self.scene.as_ref() else { return };
        let ft = self.clock.tick();

        scene.draw(driver);
        let presented = presenter.present_frame();
        log::trace!("frame {} ({:.3} ms)", ft.frame_index, ft.dt * 1000.0);

        let Some(observer) = self.observer.as_mut() else { return };
        if let Some(code) = driver.error() {
            observer(FrameFault::Driver {
                frame_index: ft.frame_index,
                code,
            });
        }
        if let Err(error) = presented {
            observer(FrameFault::Present {
                frame_index: ft.frame_index,
                error,
            });
        }
    }
}
