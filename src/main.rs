// Windows release builds get the GUI subsystem so no console window flashes
// up behind the app; debug builds keep the console for panic output.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use maskpaint::app::MaskPaintApp;
use maskpaint::logger;

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_title("MaskPaint"),
        ..Default::default()
    };

    eframe::run_native(
        "MaskPaint",
        options,
        Box::new(|cc| Box::new(MaskPaintApp::new(cc))),
    )
}
