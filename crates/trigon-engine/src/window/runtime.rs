use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

/// Non-blocking event polling on top of a `winit` event loop.
pub struct WindowRuntime {
    event_loop: EventLoop<()>,
    watcher: QuitWatcher,
}

impl WindowRuntime {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        Ok(Self {
            event_loop,
            watcher: QuitWatcher::default(),
        })
    }

    #[inline]
    pub fn event_loop(&self) -> &EventLoop<()> {
        &self.event_loop
    }

    /// Dispatches pending events without waiting. Sticky: once a quit was
    /// seen this keeps returning `true` without pumping again.
    pub fn poll_quit_intent(&mut self) -> bool {
        if self.watcher.quit {
            return true;
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.watcher);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with {code}");
            self.watcher.quit = true;
        }

        self.watcher.quit
    }
}

#[derive(Debug, Default)]
struct QuitWatcher {
    quit: bool,
}

impl ApplicationHandler for QuitWatcher {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if is_quit_event(&event) {
            log::debug!("quit intent: {event:?}");
            self.quit = true;
        }
    }
}

/// Close requests and Escape presses count as quit intent.
fn is_quit_event(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::CloseRequested => true,
        WindowEvent::KeyboardInput { event, .. } => {
            event.state == ElementState::Pressed
                && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
        }
        _ => false,
    }
}
