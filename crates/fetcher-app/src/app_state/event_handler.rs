//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::WindowId;

use super::core::FetcherApp;
use super::types::MAIN_PANE;

/// Host-level shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyAction {
    /// Step back in the page's history.
    Back,
    OpenDevtools,
}

/// `Escape` or `Alt+Left` go back; `F12` opens devtools.
pub(super) fn key_action(key: &Key, modifiers: ModifiersState) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::Escape) => Some(KeyAction::Back),
        Key::Named(NamedKey::ArrowLeft) if modifiers.alt_key() => Some(KeyAction::Back),
        Key::Named(NamedKey::F12) => Some(KeyAction::OpenDevtools),
        _ => None,
    }
}

impl ApplicationHandler for FetcherApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) || !self.create_main_webview() {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.sync_webview_bounds();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_webview_bounds();
            }

            WindowEvent::Focused(true) => {
                self.focus_main_webview();
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl FetcherApp {
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let Some(action) = key_action(&event.logical_key, self.modifiers) else {
            return;
        };

        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(MAIN_PANE)) else {
            return;
        };

        match action {
            KeyAction::Back => {
                if let Err(e) = handle.go_back() {
                    tracing::warn!(pane_id = %MAIN_PANE, error = %e, "Back navigation failed");
                }
            }
            KeyAction::OpenDevtools => {
                if self.config.page.devtools {
                    handle.open_devtools();
                } else {
                    tracing::debug!("Devtools disabled in config");
                }
            }
        }
    }
}
