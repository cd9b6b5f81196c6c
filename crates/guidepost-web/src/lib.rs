pub mod cookies;
pub mod runner;

pub use cookies::CookieStore;
pub use runner::GuideRunner;

/// Generate all `#[wasm_bindgen]` exports for a guide-enabled game.
///
/// Generates the `thread_local!` runner storage, a `with_runner()` helper
/// and the full wasm-bindgen surface (init, tick, inputs, marker and
/// buffer accessors), since wasm-bindgen cannot export generic structs.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod level;
///
/// guidepost_web::export_guide!(level::airport_config, "airport-quest");
/// ```
///
/// # Arguments
///
/// - `$config_fn`: path to a function returning the `GuideConfig`
/// - `$name`: a string literal used in log messages
#[macro_export]
macro_rules! export_guide {
    ($config_fn:path, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GuideRunner<$crate::CookieStore>>> =
                RefCell::new(None);
        }

        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::GuideRunner<$crate::CookieStore>) -> R,
        ) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Guide not initialized. Call guide_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn guide_init(viewport_w: f32, viewport_h: f32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = $config_fn();
            let Some(store) = $crate::CookieStore::attach() else {
                log::error!("{}: no browser document, guide disabled", $name);
                return;
            };
            match $crate::GuideRunner::new(&config, store, viewport_w, viewport_h) {
                Ok(mut runner) => {
                    runner.init();
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    log::info!("{}: initialized", $name);
                }
                Err(err) => {
                    log::error!("{}: invalid objective config: {err}", $name);
                }
            }
        }

        #[wasm_bindgen]
        pub fn guide_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn guide_objective_completed(id: &str) {
            with_runner(|r| r.objective_completed(id));
        }

        #[wasm_bindgen]
        pub fn guide_refresh() {
            with_runner(|r| r.refresh());
        }

        #[wasm_bindgen]
        pub fn guide_viewport_changed(width: f32, height: f32) {
            with_runner(|r| r.viewport_changed(width, height));
        }

        #[wasm_bindgen]
        pub fn guide_set_suppressed(on: bool) {
            with_runner(|r| r.set_suppressed(on));
        }

        #[wasm_bindgen]
        pub fn guide_reset() {
            with_runner(|r| r.reset());
        }

        // ---- Marker accessors ----

        #[wasm_bindgen]
        pub fn guide_marker_x() -> f32 {
            with_runner(|r| r.marker_x())
        }

        #[wasm_bindgen]
        pub fn guide_marker_y() -> f32 {
            with_runner(|r| r.marker_y())
        }

        #[wasm_bindgen]
        pub fn guide_marker_scale() -> f32 {
            with_runner(|r| r.marker_scale())
        }

        #[wasm_bindgen]
        pub fn guide_marker_alpha() -> f32 {
            with_runner(|r| r.marker_alpha())
        }

        #[wasm_bindgen]
        pub fn guide_marker_rotation() -> f32 {
            with_runner(|r| r.marker_rotation())
        }

        #[wasm_bindgen]
        pub fn guide_marker_visible() -> bool {
            with_runner(|r| r.marker_visible())
        }

        // ---- Progress accessors ----

        #[wasm_bindgen]
        pub fn guide_current_step() -> i32 {
            with_runner(|r| r.current_step())
        }

        #[wasm_bindgen]
        pub fn guide_is_terminal() -> bool {
            with_runner(|r| r.is_terminal())
        }

        #[wasm_bindgen]
        pub fn guide_completed_count() -> u32 {
            with_runner(|r| r.summary().completed as u32)
        }

        #[wasm_bindgen]
        pub fn guide_total_count() -> u32 {
            with_runner(|r| r.summary().total as u32)
        }

        #[wasm_bindgen]
        pub fn guide_percent() -> f32 {
            with_runner(|r| r.summary().percent)
        }

        // ---- Flat buffer accessors ----

        #[wasm_bindgen]
        pub fn guide_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn guide_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn guide_sounds_ptr() -> *const u8 {
            with_runner(|r| r.sounds_ptr())
        }

        #[wasm_bindgen]
        pub fn guide_sounds_len() -> u32 {
            with_runner(|r| r.sounds_len())
        }
    };
}
