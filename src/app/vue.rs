// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// Objectifs :
// - écran : historique (lecture infixe du ruban) + valeur courante + mémoire
// - clavier complet routé vers les méthodes de etat.rs
// - aucun état propre à la vue : tout vit dans AppCalc

use eframe::egui;

use super::etat::AppCalc;

/// Rangées du clavier scientifique (symboles passés tels quels au ruban).
const RANGEES_SCIENTIFIQUES: [[&str; 5]; 4] = [
    ["x²", "x³", "xʸ", "eˣ", "10ˣ"],
    ["x⁻¹", "√", "ln", "log", "x!"],
    ["sin", "cos", "tan", "sinh", "cosh"],
    ["tanh", "π", "e", "rand", "±"],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // densité "calculatrice"
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice à ruban");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_clavier_scientifique(ui);
                ui.add_space(8.0);
                self.ui_clavier_principal(ui);

                ui.add_space(8.0);
                self.ui_ruban(ui);
            });
    }

    /* ------------------------ Écran ------------------------ */

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        // lecture infixe du ruban ("7+√(9) …" pendant l'attente)
        Self::champ_monospace(ui, "ecran_historique", &self.historique, 1);

        // valeur courante, ou message de garde à sa place
        Self::champ_monospace(ui, "ecran_valeur", &self.affichage, 2);

        let memoire = match self.memoire {
            Some(v) => format!("M = {v}"),
            None => "M = (vide)".to_string(),
        };
        ui.monospace(memoire);
    }

    /* ------------------------ Claviers ------------------------ */

    fn ui_clavier_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("clavier_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in RANGEES_SCIENTIFIQUES {
                    for symbole in rangee {
                        self.bouton_symbole(ui, symbole);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_clavier_principal(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("clavier_principal")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
                self.bouton_action(
                    ui,
                    "⌫",
                    "Efface un chiffre ; sinon annule la dernière frappe du ruban",
                    Action::Annuler,
                );
                self.bouton_action(ui, "→M", "Mémorise la valeur affichée", Action::Memoriser);
                self.bouton_action(
                    ui,
                    "M",
                    "Insère la mémoire (relue à chaque rejeu)",
                    Action::RappelMemoire,
                );
                ui.end_row();

                self.bouton_chiffre(ui, '7');
                self.bouton_chiffre(ui, '8');
                self.bouton_chiffre(ui, '9');
                self.bouton_symbole(ui, "÷");
                ui.end_row();

                self.bouton_chiffre(ui, '4');
                self.bouton_chiffre(ui, '5');
                self.bouton_chiffre(ui, '6');
                self.bouton_symbole(ui, "×");
                ui.end_row();

                self.bouton_chiffre(ui, '1');
                self.bouton_chiffre(ui, '2');
                self.bouton_chiffre(ui, '3');
                self.bouton_symbole(ui, "-");
                ui.end_row();

                self.bouton_chiffre(ui, '0');
                self.bouton_chiffre(ui, '.');
                self.bouton_symbole(ui, "=");
                self.bouton_symbole(ui, "+");
                ui.end_row();
            });
    }

    /// Le rouleau : frappes enregistrées, dans l'ordre.
    fn ui_ruban(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Ruban")
            .default_open(false)
            .show(ui, |ui| {
                if self.ruban.est_vide() {
                    ui.monospace("(vide)");
                    return;
                }

                let frappes: Vec<String> =
                    self.ruban.elements().iter().map(|e| e.to_string()).collect();
                ui.monospace(frappes.join(" "));
                ui.monospace(format!("{} frappes", self.ruban.longueur()));
            });
    }

    /* ------------------------ Boutons ------------------------ */

    fn bouton_symbole(&mut self, ui: &mut egui::Ui, symbole: &str) {
        let resp = ui.add_sized([52.0, 30.0], egui::Button::new(symbole));
        if resp.clicked() {
            self.touche_operation(symbole);
        }
    }

    fn bouton_chiffre(&mut self, ui: &mut egui::Ui, chiffre: char) {
        let resp = ui.add_sized([52.0, 30.0], egui::Button::new(chiffre.to_string()));
        if resp.clicked() {
            self.touche_chiffre(chiffre);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([52.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ResetTotal => self.reset_total(),
                Action::Annuler => self.touche_annuler(),
                Action::Memoriser => self.memoriser(),
                Action::RappelMemoire => self.touche_memoire(),
            }
        }
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, lignes: usize) {
        // Affichage lecture seule stable, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        lignes as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ResetTotal,
    Annuler,
    Memoriser,
    RappelMemoire,
}
