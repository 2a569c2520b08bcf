//! Turns input events into camera changes and window requests.

use log::{debug, info};

use crate::{
    camera::Camera,
    input::{Action, ButtonState, InputEvent, Key},
    screen::Position,
    surface::{DisplaySurface, SavedGeometry},
};

/// An active primary-button drag.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    last_cursor: Position,
}

#[derive(Debug, Default)]
pub struct Controller {
    camera: Camera,
    drag: Option<DragSession>,
    /// Windowed geometry to go back to; `Some` exactly while fullscreen.
    windowed: Option<SavedGeometry>,
    /// Keys seen pressed and not yet released. OS auto-repeat shows up as further
    /// presses of a held key.
    held: [bool; Key::COUNT],
}

impl Controller {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            drag: None,
            windowed: None,
            held: [false; Key::COUNT],
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn handle<S: DisplaySurface>(&mut self, event: InputEvent, surface: &mut S) {
        match event {
            InputEvent::Scroll { dy } => {
                let viewport = surface.viewport_size();
                if !viewport.is_empty() {
                    self.camera.zoom_at(surface.cursor_position(), viewport, dy);
                }
            }
            InputEvent::PrimaryButton(ButtonState::Pressed) => {
                self.drag = Some(DragSession {
                    last_cursor: surface.cursor_position(),
                });
            }
            InputEvent::PrimaryButton(ButtonState::Released) => {
                self.drag = None;
            }
            InputEvent::CursorMoved(position) => {
                let viewport = surface.viewport_size();
                if let Some(drag) = &mut self.drag {
                    if viewport.is_empty() {
                        return;
                    }
                    self.camera.pan(
                        position.x - drag.last_cursor.x,
                        position.y - drag.last_cursor.y,
                        viewport,
                    );
                    drag.last_cursor = position;
                    debug!("panned to {:?}", self.camera.center());
                }
            }
            InputEvent::Key {
                key,
                state: ButtonState::Pressed,
            } => {
                if std::mem::replace(&mut self.held[key.index()], true) {
                    return;
                }
                self.apply(key.action(), surface);
            }
            InputEvent::Key {
                key,
                state: ButtonState::Released,
            } => self.held[key.index()] = false,
        }
    }

    fn apply<S: DisplaySurface>(&mut self, action: Action, surface: &mut S) {
        match action {
            Action::Exit => {
                info!("exit requested");
                surface.request_close();
            }
            Action::ToggleFullscreen => match self.windowed.take() {
                None => {
                    let geometry = surface.enter_fullscreen();
                    info!("entered fullscreen, saved {:?}", geometry);
                    self.windowed = Some(geometry);
                }
                Some(geometry) => {
                    info!("leaving fullscreen, restoring {:?}", geometry);
                    surface.restore_geometry(geometry);
                }
            },
            Action::IncreaseIterations => self.camera.increase_iterations(),
            Action::DecreaseIterations => self.camera.decrease_iterations(),
        }
    }
}
