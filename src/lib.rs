//! Valentine page core crate.
//!
//! The page asks one question and only accepts one answer: the "No" button
//! runs away from the pointer (and from keyboard focus) while "Yes" grows a
//! little every time it does. Saying yes opens the celebration: success
//! hearts and a pixelated fireworks video. An optional song can be toggled.
//!
//! Geometry, placement, hearts, song and celebration state are plain Rust and
//! tested natively; `page` is the thin web-sys layer on top.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod celebration;
pub mod config;
pub mod evade;
pub mod geometry;
pub mod hearts;
mod page;

pub use page::PageError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Keepsake content shown above the question
// -----------------------------------------------------------------------------

pub const LOVE_NOTES: &[&str] = &[
    "You make my bad days better.",
    "Every moment with you feels like home.",
    "Your laugh is my favorite sound.",
    "You make ordinary days feel like magic.",
];

/// (title, note) pairs for the memory cards.
pub const MEMORIES: &[(&str, &str)] = &[
    ("First Adventure", "The day everything felt new and warm."),
    ("Laughs & Late Nights", "When time disappeared and we just talked."),
    ("Little Traditions", "Coffee, inside jokes, and tiny rituals."),
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Bind the page. Call once after the markup is in the document.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    page::start()
}
