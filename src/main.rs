// src/main.rs
//
// Calculatrice à ruban — point d'entrée natif
// -------------------------------------------
// But:
// - options de fenêtre + lancement eframe, rien d'autre
// - toute la logique vit dans app/ (état + vue) et noyau/ (ruban + moteur)

use eframe::egui;

mod app;
mod noyau;

use app::AppCalc;

/// Titre de la fenêtre.
const TITRE_APP: &str = "Calculatrice à ruban";

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([380.0, 600.0])
            .with_min_inner_size([340.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}
