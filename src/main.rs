use log::{error, warn};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod camera;
mod colour;
mod command_encoder;
mod config;
mod controller;
mod display;
mod error;
mod escape;
mod frame;
mod input;
mod pixel;
mod renderer;
mod screen;
mod surface;

use camera::Camera;
use controller::Controller;
use display::Display;
use input::InputEvent;

fn create_display(event_loop: &EventLoop<()>) -> Result<Display, error::Error> {
    let window = WindowBuilder::new()
        .with_title(config::WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT))
        .build(event_loop)?;
    Display::new(window)
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new();
    let mut display = match create_display(&event_loop) {
        Ok(display) => display,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };
    let mut controller = Controller::new(Camera::default());

    event_loop.run(move |event, _, control_flow| {
        // Poll: a new frame is requested as soon as the previous events are handled.
        match event {
            Event::MainEventsCleared => {
                display.window().request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == display.window().id() => {
                match &event {
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    WindowEvent::Resized(size) => display.resize(*size),
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        display.resize(**new_inner_size)
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        display.track_cursor((*position).into())
                    }
                    _ => {}
                }

                if let Some(input) = InputEvent::from_window_event(&event) {
                    controller.handle(input, &mut display);
                }
                if display.close_requested() {
                    control_flow.set_exit();
                }
            }
            Event::RedrawRequested(window_id) if window_id == display.window().id() => {
                match frame::synchronize(controller.camera(), &mut display) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        display.reconfigure()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("out of GPU memory");
                        control_flow.set_exit();
                    }
                    Err(err) => warn!("skipping frame: {:?}", err),
                }
            }
            _ => {}
        }
    });
}
