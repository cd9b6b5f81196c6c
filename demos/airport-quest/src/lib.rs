use wasm_bindgen::prelude::*;

pub mod level;

guidepost_web::export_guide!(level::airport_config, "airport-quest");
