use anyhow::{Context, Result};
use clap::Parser;
use litscene_input::{Action, Key, KeyboardState, MovementController};
use litscene_render::{FrameBatch, SceneRenderer};
use litscene_render_wgpu::WgpuRenderer;
use litscene_scene::{Scene, SceneConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "litscene-desktop", about = "Lit sphere scene with keyboard-driven camera and object")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Window title
    #[arg(long, default_value = "litscene")]
    title: String,
}

const CONTROLS: &[&str] = &[
    "A - Move camera left (-X)",
    "D - Move camera right (+X)",
    "W - Move camera forward (-Z)",
    "S - Move camera backward (+Z)",
    "Space - Move camera up (+Y)",
    "Shift - Move camera down (-Y)",
    "J - Move object left (-X)",
    "L - Move object right (+X)",
    "I - Move object forward (-Z)",
    "K - Move object backward (+Z)",
    "Q - Exit application",
];

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::Space => Some(Key::Space),
        KeyCode::ShiftLeft => Some(Key::LeftShift),
        KeyCode::KeyJ => Some(Key::J),
        KeyCode::KeyL => Some(Key::L),
        KeyCode::KeyI => Some(Key::I),
        KeyCode::KeyK => Some(Key::K),
        KeyCode::KeyQ => Some(Key::Q),
        _ => None,
    }
}

/// Application state.
struct AppState {
    config: SceneConfig,
    scene: Scene,
    renderer: SceneRenderer,
    keyboard: KeyboardState,
    movement: MovementController,
}

impl AppState {
    fn new(config: SceneConfig) -> Self {
        let scene = Scene::from_config(&config);

        tracing::info!("initial {}", scene.describe_positions());
        tracing::info!("controls:");
        for line in CONTROLS {
            tracing::info!("  {line}");
        }

        Self {
            config,
            scene,
            renderer: SceneRenderer::new(),
            keyboard: KeyboardState::new(),
            movement: MovementController::new(),
        }
    }

    /// Apply one frame of held-key movement.
    fn update(&mut self) {
        let snapshot = self.keyboard.snapshot();
        let movement = self.movement.update(
            &snapshot,
            self.scene.camera.speed,
            self.scene.object.speed,
        );

        for action in movement.actions() {
            match action {
                Action::MoveCamera(delta) => self.scene.camera.translate(delta),
                Action::MoveObject(delta) => self.scene.object.translate(delta),
                Action::Quit | Action::Noop => {}
            }
        }

        if movement.moved {
            tracing::info!(
                key = self.movement.last_key(),
                "{}",
                self.scene.describe_positions()
            );
        }
    }

    fn build_frame(&mut self) -> Option<FrameBatch> {
        let mut batch = FrameBatch::new();
        match self.renderer.render_frame(&mut batch, &self.scene) {
            Ok(()) => Some(batch),
            Err(e) => {
                tracing::error!("failed to build frame: {e}");
                None
            }
        }
    }
}

/// GPU objects created once the window exists.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("litscene_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn present(&self, batch: &FrameBatch) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, batch);
        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
}

impl GpuApp {
    fn new(config: SceneConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.state.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                self.state.config.window_width,
                self.state.config.window_height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match Gpu::new(window) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.scene.camera.set_aspect(size.width, size.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
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
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    self.state
                        .scene
                        .camera
                        .set_aspect(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.keyboard.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let Some(key) = map_key(code) else {
                    return;
                };
                if let Some(Action::Quit) = self
                    .state
                    .keyboard
                    .handle(key, key_state == ElementState::Pressed)
                {
                    tracing::info!("quit requested");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                self.state.update();

                let Some(gpu) = &self.gpu else {
                    return;
                };
                if let Some(batch) = self.state.build_frame() {
                    gpu.present(&batch);
                }
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("litscene-desktop starting");

    let config = SceneConfig {
        window_width: cli.width,
        window_height: cli.height,
        window_title: cli.title,
        ..SceneConfig::default()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn every_bound_key_has_a_code() {
        let codes = [
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::Space,
            KeyCode::ShiftLeft,
            KeyCode::KeyJ,
            KeyCode::KeyL,
            KeyCode::KeyI,
            KeyCode::KeyK,
            KeyCode::KeyQ,
        ];
        let mapped: Vec<Key> = codes.iter().filter_map(|c| map_key(*c)).collect();
        assert_eq!(mapped, Key::ALL.to_vec());
        assert_eq!(map_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn held_keys_move_scene_each_update() {
        let mut state = AppState::new(SceneConfig::default());
        state.keyboard.handle(Key::D, true);
        state.keyboard.handle(Key::J, true);
        state.update();
        state.update();

        let cam = state.scene.camera.position;
        let obj = state.scene.object.position;
        assert!((cam - Vec3::new(0.2, 2.0, 6.0)).length() < 1e-5);
        assert!((obj - Vec3::new(-2.2, 1.0, 1.0)).length() < 1e-5);
        assert_eq!(state.movement.last_key(), "J (-X, object left)");
    }

    #[test]
    fn frame_builds_for_default_scene() {
        let mut state = AppState::new(SceneConfig::default());
        let batch = state.build_frame().expect("frame");
        assert!(!batch.lit_triangles.is_empty());
    }
}
