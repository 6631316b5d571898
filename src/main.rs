//! Highway Dodge entry point
//!
//! On the web this wires keyboard events and animation frames to the
//! simulation and writes the HUD. Natively it runs headless autopilot
//! sessions from the command line.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use serde::Serialize;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent};

    use highway_dodge::Settings;
    use highway_dodge::Tuning;
    use highway_dodge::sim::{InputState, Simulation};
    use highway_dodge::ui::{HudText, LoadingScreen};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        input: InputState,
        settings: Settings,
        /// Crash already shown, so the panel is only toggled once
        game_over_shown: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                sim: Simulation::new(seed, Tuning::default()),
                input: InputState::default(),
                settings,
                game_over_shown: false,
            }
        }

        /// Run one simulation tick and push results to the page
        fn frame(&mut self, document: &Document) {
            let output = self.sim.tick(&self.input);
            for event in &output.events {
                call_scene_hook("onEvent", event);
            }
            let pose = self.settings.car_pose(&self.sim.state.vehicle);
            call_scene_hook("onPose", &pose);

            let hud = HudText::from_readout(&output.readout, self.settings.near_miss_banner);
            self.update_hud(document, &hud);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document, hud: &HudText) {
            if let Some(el) = document.get_element_by_id("speed") {
                el.set_text_content(Some(&hud.speed));
            }
            if let Some(el) = document.get_element_by_id("gear") {
                el.set_text_content(Some(&hud.gear));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = html_element(document, "rpm") {
                let _ = el.style().set_property("width", &hud.rpm_width);
            }
            if let Some(el) = html_element(document, "skill-action") {
                if let Some(label) = hud.banner {
                    el.set_text_content(Some(label));
                    let _ = el.style().set_property("opacity", "1");
                } else {
                    let _ = el.style().set_property("opacity", "0");
                }
            }
            if hud.game_over != self.game_over_shown {
                if let Some(el) = html_element(document, "game-over") {
                    let display = if hud.game_over { "flex" } else { "none" };
                    let _ = el.style().set_property("display", display);
                }
                self.game_over_shown = hud.game_over;
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.sim.reset(seed);
            self.input.clear();
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// Hand a JSON payload to the page's renderer, if it registered
    /// `window.highwayDodge.<name>(json)`. Scene events go to `onEvent`,
    /// the per-frame car pose to `onPose`.
    fn call_scene_hook<T: Serialize>(name: &str, payload: &T) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let hook = js_sys::Reflect::get(&window, &JsValue::from_str("highwayDodge"))
            .ok()
            .filter(|obj| obj.is_object())
            .and_then(|obj| js_sys::Reflect::get(&obj, &JsValue::from_str(name)).ok())
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

        let Some(hook) = hook else {
            return;
        };
        match serde_json::to_string(payload) {
            Ok(json) => {
                if let Err(e) = hook.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Scene hook {name} failed: {:?}", e);
                }
            }
            Err(e) => log::warn!("Could not encode payload for {name}: {e}"),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to run");
            return;
        };

        let settings = Settings::load();

        // The loading page has no game container, only a progress bar
        if document.get_element_by_id("game-container").is_none() {
            if document.get_element_by_id("percentage").is_some() {
                log::info!("Highway Dodge loading screen");
                let screen = LoadingScreen::new(settings.loading_duration_ms);
                request_loading_frame(Rc::new(RefCell::new(screen)));
            }
            return;
        }

        log::info!("Highway Dodge starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());

        request_animation_frame(game);

        log::info!("Highway Dodge running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game {
                    input, settings, ..
                } = &mut *g;
                input.apply_key(&settings.controls, &event.code(), pressed);
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys would stick if released while the page is hidden
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut()>::new(move || {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            game.borrow_mut().frame(&document);
        }
        request_animation_frame(game);
    }

    fn request_loading_frame(screen: Rc<RefCell<LoadingScreen>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            loading_loop(screen, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn loading_loop(screen: Rc<RefCell<LoadingScreen>>, time: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let progress = screen.borrow_mut().frame(time);
        if let Some(el) = document.get_element_by_id("percentage") {
            el.set_text_content(Some(&format!("{}%", progress.label)));
        }
        if let Some(el) = document
            .query_selector(".progress-line")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el
                .style()
                .set_property("width", &format!("{}%", progress.percent));
        }

        if progress.finished {
            let next_page = screen.borrow().next_page.clone();
            log::info!("Loading finished, opening {next_page}");
            let _ = window.location().set_href(&next_page);
        } else {
            request_loading_frame(screen);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::{Parser, Subcommand};
    use serde::Serialize;

    use highway_dodge::Tuning;
    use highway_dodge::sim::{Simulation, autopilot_input};
    use highway_dodge::ui::HudText;

    #[derive(Parser, Debug)]
    #[command(name = "highway-dodge")]
    #[command(about = "Headless runner for the Highway Dodge simulation")]
    pub struct Cli {
        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand, Debug)]
    enum Commands {
        /// Drive one session with the autopilot
        Run {
            #[arg(long, default_value_t = 1)]
            seed: u64,
            #[arg(long, default_value_t = 3_600)]
            max_ticks: u64,
            /// JSON tuning file (missing fields use defaults)
            #[arg(long)]
            tuning: Option<PathBuf>,
            /// Write the run summary as JSON
            #[arg(long)]
            output: Option<PathBuf>,
            /// Log the HUD every N ticks (0 = never)
            #[arg(long, default_value_t = 600)]
            report_every: u64,
        },
        /// Print the default tuning as JSON
        Tuning,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        score: u64,
        near_misses: u32,
        crashed: bool,
        final_speed: u32,
    }

    pub fn run(cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Run {
                seed,
                max_ticks,
                tuning,
                output,
                report_every,
            } => {
                if max_ticks == 0 {
                    return Err(anyhow!("max_ticks must be > 0"));
                }
                let tuning = match tuning {
                    Some(path) => Tuning::from_json_file(&path)
                        .with_context(|| format!("loading tuning from {}", path.display()))?,
                    None => Tuning::default(),
                };

                let summary = run_session(seed, max_ticks, tuning, report_every);
                log::info!(
                    "Session over after {} ticks: score {}, {} near misses{}",
                    summary.ticks,
                    summary.score,
                    summary.near_misses,
                    if summary.crashed { ", crashed" } else { "" }
                );

                let json = serde_json::to_string_pretty(&summary)?;
                match output {
                    Some(path) => {
                        fs::write(&path, json)
                            .with_context(|| format!("writing summary to {}", path.display()))?;
                        log::info!("Summary written to {}", path.display());
                    }
                    None => println!("{json}"),
                }
                Ok(())
            }
            Commands::Tuning => {
                println!("{}", serde_json::to_string_pretty(&Tuning::default())?);
                Ok(())
            }
        }
    }

    fn run_session(seed: u64, max_ticks: u64, tuning: Tuning, report_every: u64) -> RunSummary {
        let mut sim = Simulation::new(seed, tuning);
        let mut last = sim.readout();

        while sim.state.time_ticks < max_ticks && !sim.state.is_crashed() {
            let input = autopilot_input(&sim.state, sim.tuning());
            last = sim.tick(&input).readout;

            if report_every > 0 && sim.state.time_ticks % report_every == 0 {
                let hud = HudText::from_readout(&last, true);
                log::info!(
                    "tick {}: {} mph, gear {}, rpm {}, score {}",
                    sim.state.time_ticks,
                    hud.speed,
                    hud.gear,
                    hud.rpm_width,
                    hud.score
                );
            }
        }

        RunSummary {
            seed,
            ticks: sim.state.time_ticks,
            score: last.score,
            near_misses: sim.state.near_misses,
            crashed: last.crashed,
            final_speed: last.speed,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Highway Dodge (native) starting...");

    native::run(native::Cli::parse())
}
