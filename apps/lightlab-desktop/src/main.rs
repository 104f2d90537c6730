use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use lightlab_common::NodeId;
use lightlab_driver::{DemoConfig, DemoScene, FrameDriver, MonotonicClock};
use lightlab_input::{Action, PointerButton};
use lightlab_render::Viewport;
use lightlab_render_wgpu::WgpuRenderer;
use lightlab_scene::SceneError;
use lightlab_tools::{DebugPanel, SceneInspector};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll counted as one wheel line.
const PIXELS_PER_LINE: f64 = 50.0;

#[derive(Parser)]
#[command(name = "lightlab-desktop", about = "Interactive lighting demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config overriding the demo defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Everything that survives a lost GPU context.
struct AppState {
    driver: FrameDriver<MonotonicClock>,
    panel: DebugPanel,
    helpers: Vec<NodeId>,
    show_helpers: bool,
    show_panel: bool,
    viewport: Viewport,
    pointer: Option<PointerButton>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl AppState {
    fn new(config: &DemoConfig) -> Result<Self> {
        let demo = DemoScene::build(config)?;
        let panel = demo.debug_panel();
        let helpers = demo.helpers.clone();
        let viewport = Viewport::new(config.viewport.width, config.viewport.height, 1.0)
            .with_max_pixel_ratio(config.viewport.max_pixel_ratio);
        Ok(Self {
            driver: demo.into_driver(MonotonicClock::new()),
            panel,
            helpers,
            show_helpers: config.helpers.visible,
            show_panel: true,
            viewport,
            pointer: None,
            cursor: None,
        })
    }

    /// Track a new window size and keep the camera's aspect in step with it.
    fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) -> Result<(), SceneError> {
        let logical: LogicalSize<u32> = physical.to_logical(scale_factor);
        self.viewport
            .resize(logical.width, logical.height, scale_factor as f32);
        let aspect = self.viewport.aspect();
        let camera = self.driver.camera();
        self.driver.scene_mut().camera_mut(camera)?.set_aspect(aspect);
        Ok(())
    }

    fn camera_action(&mut self, action: Action) {
        let height = self.viewport.render_size().1 as f32;
        if let Some(controls) = self.driver.controls_mut() {
            controls.handle(action, height);
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let previous = self.cursor.replace(position);
        let (Some(button), Some(previous)) = (self.pointer, previous) else {
            return;
        };
        let dx = (position.x - previous.x) as f32;
        let dy = (position.y - previous.y) as f32;
        self.camera_action(Action::from_drag(button, dx, dy));
    }

    fn set_helpers_visible(&mut self, visible: bool) {
        for id in &self.helpers {
            if let Err(e) = self.driver.scene_mut().set_visible(*id, visible) {
                tracing::warn!("cannot toggle helper {id}: {e}");
            }
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::Window::new(self.panel.title.as_str())
            .default_width(260.0)
            .show(ctx, |ui| {
                for index in 0..self.panel.sliders().len() {
                    let slider = &self.panel.sliders()[index];
                    let (name, range, step) = (slider.name.clone(), slider.min..=slider.max, slider.step);
                    let Ok(mut value) = self.panel.value(self.driver.scene(), index) else {
                        continue;
                    };
                    let response = ui.add(
                        egui::Slider::new(&mut value, range)
                            .step_by(step as f64)
                            .text(name),
                    );
                    if response.changed() {
                        if let Err(e) = self.panel.set(self.driver.scene_mut(), index, value) {
                            tracing::warn!("slider {index} rejected: {e}");
                        }
                    }
                }

                ui.separator();
                if ui.checkbox(&mut self.show_helpers, "Light helpers").changed() {
                    self.set_helpers_visible(self.show_helpers);
                }

                ui.separator();
                let timer = self.driver.timer();
                ui.label(format!(
                    "{:.0} fps  ({:.2} ms max)",
                    timer.fps(),
                    timer.max().as_secs_f64() * 1000.0
                ));
                let (w, h) = self.viewport.render_size();
                ui.label(format!(
                    "Render: {w}x{h} @ {:.2}x",
                    self.viewport.pixel_ratio()
                ));
                let summary = SceneInspector::summary(self.driver.scene());
                ui.label(format!(
                    "Nodes: {}  Lights: {}  Meshes: {}",
                    summary.nodes, summary.lights, summary.meshes
                ));
                ui.small("LMB: orbit | RMB: pan | wheel: zoom | H: panel");
            });
    }
}

/// GPU resources tied to the window.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct App {
    state: AppState,
    initial_size: LogicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl App {
    fn new(state: AppState) -> Self {
        let initial_size = LogicalSize::new(state.viewport.width, state.viewport.height);
        Self {
            state,
            initial_size,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Lights")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lightlab_device"),
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
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
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

        self.state.resize(size, window.scale_factor())?;
        let (width, height) = self.state.viewport.render_size();
        let renderer = WgpuRenderer::new(&device, surface_format, width, height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width,
            height,
            "GPU initialized"
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resized(&mut self, new_size: PhysicalSize<u32>) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.config.width = new_size.width.max(1);
        gpu.config.height = new_size.height.max(1);
        gpu.surface.configure(&gpu.device, &gpu.config);

        if let Err(e) = self.state.resize(new_size, gpu.window.scale_factor()) {
            tracing::error!("resize failed: {e}");
            return;
        }
        let (width, height) = self.state.viewport.render_size();
        gpu.renderer.resize(&gpu.device, width, height);
    }

    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // UI edits land in the scene before the frame is driven.
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost; reconfiguring");
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        let mut frame = gpu.renderer.frame(&gpu.device, &gpu.queue, &view);
        if let Err(e) = self.state.driver.tick(&mut frame) {
            tracing::error!("frame failed: {e}");
        }

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
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
        if let Some(gpu) = self.gpu.as_mut() {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resized(new_size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && matches!(event.logical_key.as_ref(), Key::Character("h"))
                {
                    self.state.show_panel = !self.state.show_panel;
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Middle => PointerButton::Middle,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return,
                };
                self.state.pointer = match state {
                    ElementState::Pressed => Some(button),
                    ElementState::Released => None,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.pointer_moved(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
                };
                self.state.camera_action(Action::from_scroll(lines));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
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

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    tracing::info!("lightlab-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(AppState::new(&config)?);
    event_loop.run_app(&mut app)?;

    Ok(())
}
