use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use scrollscape_controls::{OrbitControls, ScrollTracker};
use scrollscape_render_wgpu::GpuRenderer;
use scrollscape_scene::{Camera, Scene, Showcase, ShowcaseConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "scrollscape-viewer", about = "Scrollscape desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Texture asset directory
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,

    /// Starfield seed
    #[arg(long, default_value = "1")]
    star_seed: u64,

    /// Scrollable page length in pixels
    #[arg(long, default_value = "2000.0")]
    page_extent: f32,

    /// Start with the grid and light helpers hidden
    #[arg(long)]
    no_helpers: bool,
}

/// Application state independent of the GPU.
struct ViewerState {
    scene: Scene,
    camera: Camera,
    showcase: Showcase,
    orbit: OrbitControls,
    scroll: ScrollTracker,
    show_overlay: bool,
    show_helpers: bool,
    last_frame: Instant,
    frame_ms: f32,
}

impl ViewerState {
    fn new(cli: &Cli) -> Self {
        let config = ShowcaseConfig {
            star_seed: cli.star_seed,
            ..ShowcaseConfig::default()
        };
        let (scene, camera, showcase) = Showcase::build(&config);
        let scroll = ScrollTracker::new(cli.page_extent);

        Self {
            scene,
            camera,
            showcase,
            orbit: OrbitControls::new(),
            scroll,
            show_overlay: true,
            show_helpers: !cli.no_helpers,
            last_frame: Instant::now(),
            frame_ms: 0.0,
        }
    }

    /// Per-frame work: fixed torus spin, then pending orbit input.
    fn frame(&mut self) {
        self.showcase.advance_frame(&mut self.scene);
        self.orbit.update(&mut self.camera);
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let t = match delta {
            MouseScrollDelta::LineDelta(_, y) => self.scroll.scroll_lines(y),
            MouseScrollDelta::PixelDelta(pos) => self.scroll.scroll_pixels(pos.y as f32),
        };
        self.showcase
            .apply_scroll(&mut self.scene, &mut self.camera, t);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            KeyCode::F1 => {
                self.show_overlay = !self.show_overlay;
            }
            KeyCode::Home => {
                self.jump_to_top();
            }
            KeyCode::End => {
                self.jump_to_end();
            }
            _ => {}
        }
    }

    fn jump_to_top(&mut self) {
        self.scroll.reset();
        self.showcase
            .apply_scroll(&mut self.scene, &mut self.camera, self.scroll.offset());
    }

    fn jump_to_end(&mut self) {
        let extent = self.scroll.page_extent;
        let t = self.scroll.scroll_pixels(-2.0 * extent);
        self.showcase
            .apply_scroll(&mut self.scene, &mut self.camera, t);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        egui::SidePanel::left("showcase_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Scrollscape");
                ui.separator();
                ui.label(format!(
                    "Scroll: {:.0} / {:.0}",
                    self.scroll.offset(),
                    -self.scroll.page_extent
                ));
                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    self.camera.position.x, self.camera.position.y, self.camera.position.z
                ));
                ui.label(format!("Yaw: {:.4} rad", self.camera.rotation.y));
                ui.label(format!(
                    "Objects: {}  Stars: {}",
                    self.scene.object_count(),
                    self.showcase.star_count()
                ));
                ui.label(format!("Frame: {:.1} ms", self.frame_ms));
                ui.separator();

                ui.checkbox(&mut self.show_helpers, "Grid and light helpers");
                ui.horizontal(|ui| {
                    if ui.button("Back to top").clicked() {
                        self.jump_to_top();
                    }
                    if ui.button("Page end").clicked() {
                        self.jump_to_end();
                    }
                });

                ui.separator();
                ui.small("F1: Toggle panel | LMB drag: Orbit | Wheel: Scroll the page");
            });
    }
}

struct GpuApp {
    state: ViewerState,
    assets_dir: PathBuf,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<GpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: ViewerState::new(cli),
            assets_dir: cli.assets_dir.clone(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Scrollscape")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("scrollscape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.set_aspect(size.width, size.height);

        let mut renderer = GpuRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.state.scene,
            &self.assets_dir,
        );
        renderer.set_helpers_enabled(self.state.show_helpers);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.camera.set_aspect(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state
                    .orbit
                    .set_dragging(btn_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                // Next frame first; an early return below must not stall the loop.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }

                let now = Instant::now();
                self.state.frame_ms = (now - self.state.last_frame).as_secs_f32() * 1000.0;
                self.state.last_frame = now;

                self.state.frame();

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
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

                if let Some(renderer) = &mut self.renderer {
                    renderer.set_helpers_enabled(self.state.show_helpers);
                    renderer.render(device, queue, &view, &self.state.camera, &self.state.scene);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
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
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state
                .orbit
                .handle_drag(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("scrollscape-viewer starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use scrollscape_scene::show::{CAMERA_DOLLY_RATE, CAMERA_TRUCK_RATE, CAMERA_YAW_RATE};
    use winit::dpi::PhysicalPosition;

    fn state() -> ViewerState {
        ViewerState::new(&Cli::parse_from(["scrollscape-viewer"]))
    }

    #[test]
    fn first_frame_views_from_the_built_camera() {
        // No scroll response fires at startup; only registration happens.
        let state = state();
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 30.0));
        assert_eq!(state.camera.rotation, Vec3::ZERO);
        assert_eq!(state.scroll.offset(), 0.0);

        let moon = state.scene.object(state.showcase.moon()).unwrap();
        assert_eq!(moon.transform.rotation, Vec3::ZERO);
        let avatar = state.scene.object(state.showcase.avatar()).unwrap();
        assert_eq!(avatar.transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn first_wheel_event_snaps_to_the_current_offset() {
        let mut state = state();
        state.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, -120.0,
        )));
        assert_eq!(state.scroll.offset(), -120.0);
        assert_eq!(state.camera.position.z, -120.0 * CAMERA_DOLLY_RATE);
        assert_eq!(state.camera.position.x, -120.0 * CAMERA_TRUCK_RATE);
        assert_eq!(state.camera.rotation.y, -120.0 * CAMERA_YAW_RATE);
    }

    #[test]
    fn home_key_jumps_back_to_the_top() {
        let mut state = state();
        state.handle_scroll(MouseScrollDelta::LineDelta(0.0, -5.0));
        state.handle_key(KeyCode::Home, true);
        assert_eq!(state.scroll.offset(), 0.0);
        assert_eq!(state.camera.position.z, 0.0);
    }
}
