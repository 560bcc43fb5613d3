//! Browser-side companion to the Vitrine catalog server.
//!
//! The listing page works without this crate: every control is a plain
//! form field or link. Once loaded, the module intercepts submits and
//! pagination/sorting clicks, re-fetches the three HTML fragments as
//! JSON over the same URL with `ajax=1`, swaps them in with keyed
//! enter/exit transitions, and keeps the address bar shareable via
//! `history.replaceState`.
//!
//! The crate splits into pure planning modules that compile and test on
//! any target, and a `wasm32`-only DOM driver:
//!
//! - [`reload`]: fetch/history URL derivation and response handling
//! - [`transitions`]: keyed diff of the product grid
//! - [`slider`]: price slider bounds and snapping

pub mod reload;
pub mod slider;
pub mod transitions;

#[cfg(target_arch = "wasm32")]
mod dom;

/// Module entry point; the host page loads this as an ES module and
/// wasm-bindgen calls it once instantiation finishes.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    dom::mount();
}
