//! Map viewer engine: pan/zoom viewport and pin interaction.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive core of the lore map: translating raw pointer, wheel and key
//! events into pin hover/selection/placement/drag intents, maintaining the
//! affine viewport that maps image pixels to screen pixels, hit-testing pins,
//! and drawing the pin overlay. The host JavaScript layer wires DOM events to
//! the engine, draws the map image, and persists the coordinate updates the
//! engine requests via [`engine::Action`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Pin records and the draw-ordered pin store |
//! | [`camera`] | Affine viewport: fit, pan, pointer-anchored zoom, coordinate conversions |
//! | [`animate`] | Eased transform tweening for programmatic viewport moves |
//! | [`input`] | Input event types and the interaction mode union |
//! | [`hit`] | Screen-space hit-testing against placed pins |
//! | [`persist`] | Bookkeeping for coordinate updates awaiting the data source |
//! | [`render`] | Pin overlay rendering onto a 2D canvas context |
//! | [`consts`] | Shared numeric constants (zoom limits, radii, thresholds) |

pub mod animate;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod persist;
pub mod render;
