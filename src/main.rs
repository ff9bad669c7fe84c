use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use glam::{Mat4, Vec3};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use cellview::cli::Cli;
use cellview::config::{PhysicalScale, ViewerSettings};
use cellview::core::{
    intersect_plane, CameraController, Key, MeasurementSession, MouseMode, PlaneHit, Stopwatch,
    ViewportState, WinitInput,
};
use cellview::loaders;
use cellview::renderer::{FrameParams, Renderer};
use cellview::scene::PLANE_SIZE;

const WINDOW_TITLE: &str = "cellview";
const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 800;

struct App {
    settings_path: PathBuf,
    settings: ViewerSettings,
    scale: PhysicalScale,
    volume_path: Option<PathBuf>,
    channel_stride: u32,
    images_per_channel: u32,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    input: WinitInput,
    camera: CameraController,
    viewport: ViewportState,
    measurement: MeasurementSession,
    stopwatch: Stopwatch,
}

impl App {
    fn new(cli: Cli) -> Self {
        let settings = ViewerSettings::load(&cli.settings).unwrap_or_else(|e| {
            log::warn!("Failed to load settings: {e:#}");
            ViewerSettings::default()
        });

        let volume_path = cli.volume.clone().or_else(|| settings.volume_path.clone());
        let metadata_path = cli
            .metadata
            .clone()
            .or_else(|| settings.metadata_path.clone());

        let mut scale = settings.physical_scale.unwrap_or_default();
        let mut channel_stride = settings.channel_stride.unwrap_or(1);
        let mut images_per_channel = settings.images_per_channel.unwrap_or(0);

        // Acquisition metadata wins over settings for whatever it specifies.
        if let Some(path) = &metadata_path {
            match loaders::load_metadata(path) {
                Ok(meta) => {
                    if meta.channel_count > 0 {
                        channel_stride = meta.channel_count;
                    }
                    if meta.images_per_channel > 0 {
                        images_per_channel = meta.images_per_channel;
                    }
                    if meta.image_width > 0.0 {
                        scale = PhysicalScale {
                            width: meta.image_width,
                            height: meta.image_height,
                            depth: meta.image_depth,
                        };
                    }
                }
                Err(e) => log::warn!("Failed to load metadata: {e:#}"),
            }
        }

        let mut camera = CameraController::new(scale);
        if let Some(speeds) = settings.speed_modifiers {
            camera.set_speeds(speeds);
        }

        Self {
            settings_path: cli.settings,
            settings,
            scale,
            volume_path,
            channel_stride,
            images_per_channel,
            window: None,
            renderer: None,
            input: WinitInput::new(),
            camera,
            viewport: ViewportState::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            measurement: MeasurementSession::new(),
            stopwatch: Stopwatch::new(),
        }
    }

    fn volume_extent(&self) -> Vec3 {
        Vec3::new(1.0, self.scale.height_ratio(), self.scale.depth_ratio())
    }

    /// Intersect the cursor ray with the current cross-section plane.
    fn cursor_plane_hit(&self) -> Option<PlaneHit> {
        let cursor = self.input.cursor()?;
        intersect_plane(
            cursor,
            self.viewport.size(),
            self.viewport.projection(),
            self.camera.view_matrix(),
            self.camera.position(),
            self.camera.plane_position(),
            self.camera.plane_normal(),
        )
    }

    fn save_settings(&mut self) {
        self.settings.speed_modifiers = Some(self.camera.speeds());
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("Failed to save settings: {e:#}");
        }
    }

    fn plane_model(&self) -> Mat4 {
        let mut model = self.camera.orientation();
        model.w_axis = self.camera.plane_position().extend(1.0);
        model * Mat4::from_scale(Vec3::splat(PLANE_SIZE))
    }

    fn redraw(&mut self) {
        let dt = self.stopwatch.tick();
        self.camera.update(dt, self.input.keys_mut());

        let space_held = self.input.keys().is_down(Key::Space);
        let delta = self.input.cursor_delta();
        if delta != glam::Vec2::ZERO {
            if self.camera.mode() == MouseMode::Measure {
                if let Some(hit) = self.cursor_plane_hit() {
                    self.measurement.update(hit.point);
                }
            } else {
                self.camera.drag(delta, space_held);
            }
        }

        let ticks = self.input.wheel_ticks();
        if ticks != 0.0 {
            self.camera.wheel(
                ticks,
                self.input.keys().is_down(Key::Shift),
                self.input.keys().is_down(Key::Control),
            );
        }
        self.input.reset_deltas();

        // Gather everything read from self before the renderer is mutably
        // borrowed below.
        let params = FrameParams {
            view: self.camera.view_matrix(),
            projection: self.viewport.projection(),
            plane_model: self.plane_model(),
            measurement: self
                .measurement
                .has_measurement()
                .then(|| (self.measurement.start_point(), self.measurement.end_point())),
            camera_position: self.camera.position() * self.scale.width,
            measured_distance: self
                .measurement
                .has_measurement()
                .then(|| self.measurement.physical_distance(self.scale.width)),
        };

        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };

        match renderer.render(window, &params) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = window.inner_size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
            }
            Err(e) => log::warn!("Render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut renderer =
            match pollster::block_on(Renderer::new(window.clone(), self.volume_extent())) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {e}");
                    event_loop.exit();
                    return;
                }
            };

        if let Some(path) = self.volume_path.clone() {
            match loaders::load_volume(
                &path,
                &self.settings.channels,
                self.channel_stride,
                self.images_per_channel,
            ) {
                Ok(volume) => {
                    log::info!(
                        "Loaded volume {}x{}x{}",
                        volume.width,
                        volume.height,
                        volume.depth
                    );
                    renderer.upload_volume(&volume);
                }
                Err(e) => log::error!("Failed to load volume: {e:#}"),
            }
        }

        let size = window.inner_size();
        self.viewport.resize(size.width, size.height);
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.stopwatch.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (self.window.as_ref(), self.renderer.as_mut()) {
            (Some(window), Some(renderer)) => renderer.handle_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.save_settings();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.viewport.resize(size.width, size.height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ if consumed => {}
            event => {
                let buttons_changed = self.input.process_event(&event);

                if self.input.keys().is_down(Key::Escape) {
                    self.save_settings();
                    event_loop.exit();
                    return;
                }

                if buttons_changed {
                    let previous = self.camera.mode();
                    let mode = self
                        .camera
                        .set_mouse_mode(self.input.buttons(), self.input.keys().is_down(Key::Space));
                    if mode != previous {
                        if previous == MouseMode::Measure {
                            self.measurement.end();
                        }
                        match mode {
                            MouseMode::Orbit => {
                                let pivot = self.cursor_plane_hit().map(|hit| hit.point);
                                self.camera.begin_orbit(pivot);
                            }
                            MouseMode::Measure => {
                                if let Some(hit) = self.cursor_plane_hit() {
                                    self.measurement.begin(hit.point);
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut app = App::new(cli);
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
