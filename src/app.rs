//! Application shell — one egui window wiring the surface, paint
//! controller, compositor, and mask extractor to the user.
//!
//! Layout follows the original tool: a control bar on top, the paintable
//! canvas in a 3:2 rectangle spanning the page width, and (once an image
//! has been uploaded or a mask generated) an "Original Image" /
//! "Mask Image" gallery underneath with Save and Clear actions.

use std::thread::JoinHandle;

use eframe::egui;
use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, Vec2, pos2, vec2};
use image::RgbaImage;

use crate::compositor;
use crate::io::{self, LoadError};
use crate::mask::MaskArtifact;
use crate::painter::{BRUSH_WIDTH_MAX, BRUSH_WIDTH_MIN, PaintController};
use crate::surface::Surface;
use crate::{log_err, log_info, log_warn};

/// Canvas aspect ratio (width / height), matching the 3:2 canvas box of the
/// original layout.  Height follows from the available width, so showing
/// the result gallery below never resizes (and thus never clears) the
/// surface; only a window-width change does.
const CANVAS_ASPECT: f32 = 1.5;

pub struct MaskPaintApp {
    surface: Surface,
    controller: PaintController,

    /// Texture of the uploaded image, kept for side-by-side display only;
    /// the editable pixels live in the surface.
    original_texture: Option<TextureHandle>,

    mask: Option<MaskArtifact>,
    mask_texture: Option<TextureHandle>,
    show_results: bool,

    canvas_texture: Option<TextureHandle>,
    surface_dirty: bool,

    /// In-flight decode of an uploaded file.  Pointer and resize events are
    /// not blocked while this is pending; when it completes it clears and
    /// repaints the surface — last completed operation wins.
    pending_load: Option<JoinHandle<Result<RgbaImage, LoadError>>>,
}

impl MaskPaintApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            surface: Surface::new(0, 0),
            controller: PaintController::new(),
            original_texture: None,
            mask: None,
            mask_texture: None,
            show_results: false,
            canvas_texture: None,
            surface_dirty: true,
            pending_load: None,
        }
    }

    /// Pick a file and start decoding it off-thread.  Cancelled dialog or
    /// no selection: no-op.  A second upload while one is pending replaces
    /// the pending handle; the orphaned thread's result is dropped.
    fn begin_image_load(&mut self) {
        let Some(path) = io::pick_image() else {
            return;
        };
        log_info!("loading image: {}", path.display());
        if self.pending_load.is_some() {
            log_warn!("previous image load still pending; replacing it");
        }
        self.pending_load = Some(std::thread::spawn(move || io::load_image(&path)));
    }

    /// Apply a finished decode: composite into the surface and retain the
    /// original for the gallery.  A failed decode leaves the surface and
    /// the displayed original unchanged.
    fn poll_image_load(&mut self, ctx: &egui::Context) {
        let finished = self
            .pending_load
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            if self.pending_load.is_some() {
                ctx.request_repaint();
            }
            return;
        }
        let Some(handle) = self.pending_load.take() else {
            return;
        };
        match handle.join() {
            Ok(Ok(img)) => {
                log_info!("image decoded ({}x{}), compositing", img.width(), img.height());
                compositor::composite_base(&mut self.surface, &img);
                self.surface_dirty = true;
                self.original_texture = Some(ctx.load_texture(
                    "original",
                    color_image(&img),
                    TextureOptions::LINEAR,
                ));
                self.show_results = true;
            }
            Ok(Err(e)) => {
                // Silent in the UI; the surface stays untouched
                log_warn!("image load failed: {}", e);
            }
            Err(_) => {
                log_err!("image load thread panicked");
            }
        }
    }

    /// Freeze the current surface into a mask artifact for the gallery.
    fn generate_mask(&mut self, ctx: &egui::Context) {
        match MaskArtifact::extract(&self.surface) {
            Ok(artifact) => {
                log_info!(
                    "mask extracted ({}x{}, {} bytes)",
                    artifact.width(),
                    artifact.height(),
                    artifact.png_bytes().len()
                );
                self.mask_texture = if artifact.width() > 0 && artifact.height() > 0 {
                    Some(ctx.load_texture(
                        "mask",
                        color_image(artifact.pixels()),
                        TextureOptions::LINEAR,
                    ))
                } else {
                    None
                };
                self.mask = Some(artifact);
                self.show_results = true;
            }
            Err(e) => log_err!("mask extraction failed: {}", e),
        }
    }

    fn save_mask_to_disk(&mut self) {
        let Some(mask) = &self.mask else {
            return;
        };
        match io::save_mask(mask.png_bytes()) {
            Ok(Some(path)) => log_info!("mask saved to {}", path.display()),
            Ok(None) => {} // dialog cancelled
            Err(e) => log_err!("mask save failed: {}", e),
        }
    }

    /// Drop the artifact and hide the gallery.  The surface is untouched.
    fn discard_mask(&mut self) {
        self.mask = None;
        self.mask_texture = None;
        self.show_results = false;
    }

    fn controls_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Upload Image").clicked() {
                self.begin_image_load();
            }
            ui.separator();
            ui.label("Brush Size");
            ui.add(
                egui::Slider::new(
                    &mut self.controller.brush_width,
                    BRUSH_WIDTH_MIN..=BRUSH_WIDTH_MAX,
                )
                .suffix("px"),
            );
            ui.separator();
            if ui.button("Generate Mask").clicked() {
                self.generate_mask(ctx);
            }
            if ui.button("Clear").clicked() {
                self.surface.clear();
                self.surface_dirty = true;
            }
        });
    }

    /// The paintable canvas: a 3:2 box spanning the available width, with a
    /// surface buffer allocated in physical pixels behind it.
    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width().max(1.0);
        let size = vec2(width, width / CANVAS_ASPECT);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

        // One buffer pixel = one rendered pixel: scale the logical rect by
        // the display's pixels-per-point.  A size change reallocates the
        // buffer and discards content.
        let ppp = ui.ctx().pixels_per_point();
        let buf_w = (rect.width() * ppp).round() as u32;
        let buf_h = (rect.height() * ppp).round() as u32;
        if (buf_w, buf_h) != (self.surface.width(), self.surface.height()) {
            self.surface.resize(buf_w, buf_h);
            self.surface_dirty = true;
            log_info!("surface resized to {}x{}", buf_w, buf_h);
        }

        self.handle_pointer(rect, &response);
        self.refresh_canvas_texture(ui.ctx());

        if let Some(texture) = &self.canvas_texture {
            ui.painter().image(
                texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            ui.painter().rect_filled(rect, 0.0, Color32::BLACK);
        }
    }

    /// Drive the Idle/Drawing state machine from this frame's drag state.
    /// Leaving the canvas rectangle ends the stroke like a release; the
    /// still-held drag then feeds moves to an Idle controller, which
    /// ignores them (no resume within the same gesture).
    fn handle_pointer(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.pointer_down(pos, rect, &self.surface);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                if !rect.contains(pos) {
                    self.controller.pointer_leave();
                } else if self.controller.pointer_move(pos, rect, &mut self.surface) {
                    self.surface_dirty = true;
                    response.ctx.request_repaint();
                }
            }
        }
        if response.drag_released() {
            self.controller.pointer_up();
        }
    }

    /// Re-upload the surface to its GPU texture when its pixels changed.
    fn refresh_canvas_texture(&mut self, ctx: &egui::Context) {
        if self.surface.is_empty() {
            self.canvas_texture = None;
            self.surface_dirty = false;
            return;
        }
        if !self.surface_dirty && self.canvas_texture.is_some() {
            return;
        }
        let img = color_image(self.surface.pixels());
        match &mut self.canvas_texture {
            Some(texture) => texture.set(img, TextureOptions::NEAREST),
            None => {
                self.canvas_texture = Some(ctx.load_texture("canvas", img, TextureOptions::NEAREST))
            }
        }
        self.surface_dirty = false;
    }

    /// "Original Image" and "Mask Image" side by side, with Save / Clear on
    /// the mask card.
    fn results_ui(&mut self, ui: &mut egui::Ui) {
        let mut save_clicked = false;
        let mut clear_clicked = false;

        ui.columns(2, |columns| {
            if let Some(texture) = &self.original_texture {
                columns[0].vertical(|ui| {
                    ui.strong("Original Image");
                    fitted_image(ui, texture);
                });
            }
            if let Some(texture) = &self.mask_texture {
                columns[1].vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.strong("Mask Image");
                        if ui.button("Save").clicked() {
                            save_clicked = true;
                        }
                        if ui.button("Clear").clicked() {
                            clear_clicked = true;
                        }
                    });
                    fitted_image(ui, texture);
                });
            }
        });

        if save_clicked {
            self.save_mask_to_disk();
        }
        if clear_clicked {
            self.discard_mask();
        }
    }
}

impl eframe::App for MaskPaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_load(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls_ui(ctx, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.canvas_ui(ui);
                if self.show_results
                    && (self.original_texture.is_some() || self.mask_texture.is_some())
                {
                    ui.add_space(12.0);
                    self.results_ui(ui);
                }
            });
        });
    }
}

/// Converts an RgbaImage to egui's ColorImage format.
fn color_image(img: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    )
}

/// Show a texture scaled to the available column width, preserving aspect.
fn fitted_image(ui: &mut egui::Ui, texture: &TextureHandle) {
    let size: Vec2 = texture.size_vec2();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = ui.available_width() / size.x;
    ui.add(egui::Image::new(egui::load::SizedTexture::new(
        texture.id(),
        size * scale,
    )));
}
