//! liquid-scale: a draggable liquid boundary with percentage labels.
//!
//! A quadratic curve splits the canvas into two colours. Dragging bends the
//! curve through its control point; releasing springs the edges back level.
//! Rendered with vello on a winit window; `--replay` runs headless.

mod config_watcher;
mod curve;
mod gesture;
mod layout;
mod logging;
mod percent;
mod replay;
mod scene;
mod spring;
mod state_machine;
mod text;
mod tokens;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use vello::kurbo::{Affine, Point, Size};
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, Renderer, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window};

use vello::wgpu;

use config_watcher::ConfigWatcher;
use gesture::{PanEvent, PanRecognizer, PointerId};
use layout::ScreenLayout;
use state_machine::scale_sm::LiquidScale;
use text::TextRenderer;
use tokens::{PaletteTokens, ScaleTokens};

/// Liquid scale
#[derive(Parser, Debug)]
#[command(name = "liquid-scale", version, about = "Draggable liquid scale")]
struct Args {
    /// Start in windowed mode instead of fullscreen
    #[arg(short, long)]
    windowed: bool,

    /// Window width in logical pixels (windowed mode)
    #[arg(long, default_value_t = 390)]
    width: u32,

    /// Window height in logical pixels (windowed mode)
    #[arg(long, default_value_t = 844)]
    height: u32,

    /// Path to scale.toml (default: ~/.config/liquid-scale/scale.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not reload scale.toml when it changes
    #[arg(long)]
    no_watch: bool,

    /// Run a JSON gesture script without a window and print one JSON line per step
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Events injected into the winit loop from other threads.
#[derive(Debug)]
enum AppEvent {
    TokensReloaded(ScaleTokens),
}

#[derive(Debug)]
enum RenderState {
    Active {
        surface: Box<RenderSurface<'static>>,
        valid_surface: bool,
        window: Arc<Window>,
    },
    Suspended(Option<Arc<Window>>),
}

struct App {
    context: RenderContext,
    renderers: Vec<Option<Renderer>>,
    state: RenderState,
    scene: Scene,
    start_time: Instant,
    windowed: bool,
    window_size: (u32, u32),
    scale_factor: f64,
    tokens: ScaleTokens,
    layout: ScreenLayout,
    liquid: LiquidScale,
    pan: PanRecognizer,
    text: TextRenderer,
}

impl App {
    fn new(args: &Args, tokens: ScaleTokens) -> Self {
        let window = Size::new(args.width as f64, args.height as f64);
        let layout = ScreenLayout::new(window, &tokens.chrome);
        let liquid = LiquidScale::new(layout.canvas_size(), &tokens);
        let text = TextRenderer::load();
        if !text.has_font() {
            warn!(target: "render", "no system font found, using block glyphs");
        }

        Self {
            context: RenderContext::new(),
            renderers: vec![],
            state: RenderState::Suspended(None),
            scene: Scene::new(),
            start_time: Instant::now(),
            windowed: args.windowed,
            window_size: (args.width, args.height),
            scale_factor: 1.0,
            tokens,
            layout,
            liquid,
            pan: PanRecognizer::new(),
            text,
        }
    }

    fn now(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Recompute the layout for a physical window size and resize the
    /// controller's canvas if it changed.
    fn relayout(&mut self, width: u32, height: u32) {
        let logical = Size::new(
            width as f64 / self.scale_factor,
            height as f64 / self.scale_factor,
        );
        self.layout = ScreenLayout::new(logical, &self.tokens.chrome);
        if self.layout.canvas_size() != self.liquid.canvas() {
            self.reset_liquid();
        }
    }

    /// Level the liquid for the current canvas. Any pan in progress is
    /// dropped with it, since the controller is back in Idle.
    fn reset_liquid(&mut self) {
        if let Some(owner) = self.pan.active() {
            info!(target: "gesture", ?owner, "pan dropped by reset");
        }
        self.pan.reset();
        self.liquid.resize(self.layout.canvas_size());
    }

    fn to_logical(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.scale_factor, y / self.scale_factor)
    }

    /// Forward a pan to the controller in canvas coordinates.
    fn dispatch_pan(&mut self, pan: PanEvent) {
        let local = PanEvent {
            location: self.layout.to_canvas(pan.location),
            ..pan
        };
        let now = self.now();
        self.liquid.handle_pan(&local, now);
    }

    fn handle_touch(&mut self, touch: Touch) -> bool {
        let id = PointerId::Touch(touch.id);
        let location = self.to_logical(touch.location.x, touch.location.y);
        let pan = match touch.phase {
            TouchPhase::Started if self.liquid.accepts_input() => self.pan.press(id, location),
            TouchPhase::Started => None,
            TouchPhase::Moved => self.pan.motion(id, location),
            TouchPhase::Ended => self.pan.release(id, location),
            TouchPhase::Cancelled => self.pan.cancel(id),
        };
        match pan {
            Some(pan) => {
                self.dispatch_pan(pan);
                true
            }
            None => false,
        }
    }

    fn render(&mut self) {
        let RenderState::Active {
            surface,
            valid_surface,
            window,
        } = &mut self.state
        else {
            return;
        };
        if !*valid_surface {
            return;
        }

        if !self.liquid.refresh_paused() {
            let now = self.start_time.elapsed().as_secs_f64();
            self.liquid.tick(now);
        }

        self.scene.reset();
        scene::render_screen(
            &mut self.scene,
            Affine::scale(self.scale_factor),
            &self.layout,
            &self.liquid,
            &self.tokens,
            &self.text,
        );

        let device_handle = &self.context.devices[surface.dev_id];
        let Some(renderer) = self.renderers[surface.dev_id].as_mut() else {
            return;
        };

        if let Err(e) = renderer.render_to_texture(
            &device_handle.device,
            &device_handle.queue,
            &self.scene,
            &surface.target_view,
            &vello::RenderParams {
                base_color: PaletteTokens::color(self.tokens.palette.canvas),
                width: surface.config.width,
                height: surface.config.height,
                antialiasing_method: AaConfig::Msaa16,
            },
        ) {
            error!(target: "render", "failed to render to surface: {e}");
            return;
        }

        let surface_texture = match surface.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                warn!(target: "render", "failed to get surface texture: {e}");
                return;
            }
        };

        let mut encoder = device_handle
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Surface Blit"),
            });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
        );
        device_handle.queue.submit([encoder.finish()]);
        surface_texture.present();
        if let Err(e) = device_handle.device.poll(wgpu::PollType::Poll) {
            warn!(target: "render", "device poll failed: {e}");
        }

        // Keep frames coming only while the spring is running.
        if !self.liquid.refresh_paused() {
            window.request_redraw();
        }
    }

    fn request_redraw(&self) {
        if let RenderState::Active { window, .. } = &self.state {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RenderState::Suspended(cached_window) = &mut self.state else {
            return;
        };

        let window = match cached_window.take() {
            Some(window) => window,
            None => match create_window(event_loop, self.windowed, self.window_size) {
                Ok(window) => window,
                Err(e) => {
                    error!("{e:#}");
                    event_loop.exit();
                    return;
                }
            },
        };

        let size = window.inner_size();
        let surface_future = self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        );
        let surface = match pollster::block_on(surface_future) {
            Ok(surface) => surface,
            Err(e) => {
                error!(target: "render", "error creating surface: {e}");
                event_loop.exit();
                return;
            }
        };

        self.renderers
            .resize_with(self.context.devices.len(), || None);
        if self.renderers[surface.dev_id].is_none() {
            match create_renderer(&self.context, &surface) {
                Ok(renderer) => self.renderers[surface.dev_id] = Some(renderer),
                Err(e) => {
                    error!(target: "render", "{e:#}");
                    event_loop.exit();
                    return;
                }
            }
        }

        self.scale_factor = window.scale_factor();
        self.relayout(size.width, size.height);
        info!(
            target: "render",
            width = size.width,
            height = size.height,
            scale_factor = self.scale_factor,
            "surface ready"
        );

        window.request_redraw();
        self.state = RenderState::Active {
            surface: Box::new(surface),
            valid_surface: true,
            window,
        };
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let RenderState::Active { window, .. } = &self.state {
            self.state = RenderState::Suspended(Some(window.clone()));
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::TokensReloaded(tokens) => {
                self.tokens = tokens;
                self.liquid.reconfigure(&self.tokens);
                if let RenderState::Active { surface, .. } = &self.state {
                    let (w, h) = (surface.config.width, surface.config.height);
                    self.relayout(w, h);
                }
                self.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &self.state {
            RenderState::Active { window, .. } if window.id() == window_id => {}
            _ => return,
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            // Press 'R' to level the liquid again
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(ref c),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if c.as_str() == "r" || c.as_str() == "R" => {
                self.reset_liquid();
                self.request_redraw();
            }

            WindowEvent::Resized(size) => {
                if let RenderState::Active {
                    surface,
                    valid_surface,
                    ..
                } = &mut self.state
                {
                    if size.width != 0 && size.height != 0 {
                        self.context
                            .resize_surface(surface, size.width, size.height);
                        *valid_surface = true;
                    } else {
                        *valid_surface = false;
                    }
                }
                self.relayout(size.width, size.height);
                self.request_redraw();
            }

            // A drag that loses focus never sees its release.
            WindowEvent::Focused(false) if self.pan.is_active() => {
                let ended = self.pan.active().and_then(|owner| self.pan.cancel(owner));
                if let Some(pan) = ended {
                    self.dispatch_pan(pan);
                    self.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let location = self.to_logical(position.x, position.y);
                if let Some(pan) = self.pan.motion(PointerId::Mouse, location) {
                    self.dispatch_pan(pan);
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(location) = self.pan.hover_location() else {
                    return;
                };
                let pan = match state {
                    ElementState::Pressed if self.liquid.accepts_input() => {
                        self.pan.press(PointerId::Mouse, location)
                    }
                    ElementState::Pressed => None,
                    ElementState::Released => self.pan.release(PointerId::Mouse, location),
                };
                if let Some(pan) = pan {
                    self.dispatch_pan(pan);
                    self.request_redraw();
                }
            }

            WindowEvent::Touch(touch) => {
                if self.handle_touch(touch) {
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.render(),

            _ => {}
        }
    }
}

/// Only the windowed app seeds `~/.config` with a commented default file.
fn writes_default_config(args: &Args) -> bool {
    args.config.is_none() && !args.print_config && args.replay.is_none()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(config_watcher::default_config_path);
    if writes_default_config(&args) {
        if let Err(e) = config_watcher::ensure_default_config(
            &config_path,
            &config_watcher::default_config_content(),
        ) {
            warn!(target: "config", path = %config_path.display(), "cannot write default config: {e}");
        }
    }
    let tokens = config_watcher::load_or_default(&config_path);

    if args.print_config {
        print!("{}", tokens.to_toml());
        return Ok(());
    }

    if let Some(script) = &args.replay {
        let stdout = std::io::stdout();
        return replay::run_file(script, &tokens, &mut stdout.lock());
    }

    info!("liquid-scale v{}", env!("CARGO_PKG_VERSION"));

    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    // Held for the lifetime of the event loop; dropping it stops watching.
    let _watcher = if args.no_watch {
        None
    } else {
        let proxy = event_loop.create_proxy();
        match ConfigWatcher::start(config_path, move |tokens| {
            let _ = proxy.send_event(AppEvent::TokensReloaded(tokens));
        }) {
            Ok(watcher) => {
                info!(target: "config", path = %watcher.path().display(), "hot reload enabled");
                Some(watcher)
            }
            Err(e) => {
                warn!(target: "config", "hot reload disabled: {e:#}");
                None
            }
        }
    };

    let mut app = App::new(&args, tokens);
    event_loop.run_app(&mut app).context("running event loop")?;

    Ok(())
}

fn create_window(
    event_loop: &ActiveEventLoop,
    windowed: bool,
    (width, height): (u32, u32),
) -> Result<Arc<Window>> {
    let mut attr = Window::default_attributes().with_title("liquid-scale");

    if !windowed {
        attr = attr.with_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        attr = attr.with_inner_size(winit::dpi::LogicalSize::new(width, height));
    }

    let window = event_loop
        .create_window(attr)
        .context("creating window")?;
    Ok(Arc::new(window))
}

fn create_renderer(render_cx: &RenderContext, surface: &RenderSurface<'_>) -> Result<Renderer> {
    Renderer::new(
        &render_cx.devices[surface.dev_id].device,
        RendererOptions::default(),
    )
    .map_err(|e| anyhow::anyhow!("creating renderer: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_written_only_for_the_window() {
        let windowed = Args::try_parse_from(["liquid-scale", "--windowed"]).unwrap();
        assert!(writes_default_config(&windowed));

        let replay = Args::try_parse_from(["liquid-scale", "--replay", "drag.json"]).unwrap();
        assert!(!writes_default_config(&replay));

        let print = Args::try_parse_from(["liquid-scale", "--print-config"]).unwrap();
        assert!(!writes_default_config(&print));

        let explicit = Args::try_parse_from(["liquid-scale", "--config", "/tmp/scale.toml"]).unwrap();
        assert!(!writes_default_config(&explicit));
    }
}
