//! MaskPaint — paint a free-form region over an uploaded image with a round
//! brush and export the canvas as a white-on-black PNG mask, aligned
//! pixel-for-pixel with the displayed surface.
//!
//! The crate is split along the tool's moving parts:
//! - [`surface`] owns the pixel buffer (the paintable canvas).
//! - [`painter`] turns pointer events into stroke segments on the surface.
//! - [`compositor`] fits and draws an uploaded bitmap under future strokes.
//! - [`mask`] freezes the surface into an exportable PNG artifact.
//! - [`app`] is the egui shell wiring these together; [`io`] and [`logger`]
//!   cover dialogs/codecs and the session log.

pub mod app;
pub mod compositor;
pub mod io;
pub mod logger;
pub mod mask;
pub mod painter;
pub mod surface;
