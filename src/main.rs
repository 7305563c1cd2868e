//! Hue Bricks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use glam::Vec2;
    use hue_bricks::renderer::{RenderState, ShapeBatch};
    use hue_bricks::sim::GameState;
    use hue_bricks::{InputEvent, Settings, run_frame};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        batch: ShapeBatch,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            Self {
                state: GameState::new(settings),
                batch: ShapeBatch::default(),
                render_state: None,
            }
        }

        /// Tick, then draw the frame
        fn frame(&mut self) {
            let outcome = run_frame(&mut self.state, &mut self.batch);
            if outcome.bricks_destroyed > 0 {
                log::debug!("{} bricks left", self.state.bricks.live_count());
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        if let Err(e) = start().await {
            log::error!("Hue Bricks failed to start: {e}");
        }
    }

    async fn start() -> Result<(), hue_bricks::Error> {
        log::info!("Hue Bricks starting...");

        let window = web_sys::window().ok_or_else(|| platform_err("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| platform_err("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| platform_err("no canvas"))?
            .dyn_into()
            .map_err(|_| platform_err("#canvas is not a canvas"))?;

        // The canvas backing size is the field size
        let width = canvas.width();
        let height = canvas.height();
        let stored = Settings::load();
        // Write back so the stored copy always holds every field
        stored.save();
        let settings = stored.with_field_size(width as f32, height as f32);
        settings.validate()?;

        let game = Rc::new(RefCell::new(Game::new(&settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(gpu_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(gpu_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            Vec2::new(settings.field_width, settings.field_height),
        )
        .await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);
        log::info!("Hue Bricks running!");
        Ok(())
    }

    fn gpu_err(e: impl std::fmt::Display) -> hue_bricks::Error {
        hue_bricks::Error::Gpu(e.to_string())
    }

    fn platform_err(msg: &str) -> hue_bricks::Error {
        hue_bricks::Error::Platform(msg.to_string())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move - paddle follows the pointer's x relative to the canvas
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let field_left = canvas_clone.get_bounding_client_rect().left() as f32;
                game.borrow_mut().state.handle_input(InputEvent::PointerMove {
                    x: event.client_x() as f32,
                    field_left,
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click anywhere - launch
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.handle_input(InputEvent::Click);
            });
            let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless runner (about a minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 3_600;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), hue_bricks::Error> {
    use hue_bricks::renderer::ShapeBatch;
    use hue_bricks::sim::GameState;
    use hue_bricks::{InputEvent, Settings, run_frame};

    env_logger::init();
    log::info!("Hue Bricks (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_from(std::path::Path::new(&path))?,
        None => Settings::default(),
    };
    settings.validate()?;

    let mut state = GameState::new(&settings);
    let mut batch = ShapeBatch::default();
    let total = state.bricks.live_count();

    state.handle_input(InputEvent::Click);

    let mut destroyed = 0;
    let mut paddle_hits = 0;
    for frame in 1..=HEADLESS_FRAMES {
        // Track the ball slightly off-center so it leaves at an angle
        let target = state.ball.pos.x - state.paddle.rect.w * 0.3;
        state.handle_input(InputEvent::PointerMove {
            x: target,
            field_left: 0.0,
        });

        let outcome = run_frame(&mut state, &mut batch);
        destroyed += outcome.bricks_destroyed;
        paddle_hits += u32::from(outcome.paddle_hit);

        if frame % 600 == 0 {
            log::info!(
                "frame {frame}: {} / {total} bricks left, {} vertices",
                state.bricks.live_count(),
                batch.vertices().len()
            );
        }
    }

    println!(
        "Simulated {HEADLESS_FRAMES} frames: {destroyed} of {total} bricks destroyed, \
         {paddle_hits} paddle contacts, {} bricks left",
        state.bricks.live_count()
    );
    Ok(())
}
