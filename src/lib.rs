//! View-state and animation sequencing for the folio single-page site.
//!
//! Everything here is independent of the DOM so it can be exercised natively;
//! the wasm binary binds it to the browser.

pub mod active_section;
pub mod config;
pub mod contact;
pub mod content;
pub mod disclosure;
pub mod easing;
pub mod geometry;
pub mod intro;
pub mod media;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod session;
pub mod telemetry;
pub mod timeline;
pub mod visibility;
