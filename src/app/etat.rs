//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder le ruban, la saisie chiffre à chiffre, la case mémoire,
//! et les chaînes d'affichage dérivées du dernier rejeu.
//!
//! Contrats :
//! - Aucun calcul ici : tout passe par noyau::Ruban::evaluer.
//! - Les affichages sont REDÉRIVÉS après chaque frappe qui touche le ruban
//!   ou la mémoire (jamais mis à jour incrémentalement).
//! - Les liaisons sont reconstruites à chaque rejeu : changer M et rejouer
//!   suffit à refléter la nouvelle valeur dans un ruban déjà enregistré.

use crate::noyau::{Liaisons, Ruban};

/// Nom de la case mémoire (la seule variable du clavier).
pub const NOM_MEMOIRE: &str = "M";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- saisie en cours (chiffres tapés, pas encore sur le ruban) ---
    pub saisie: String,
    pub en_frappe: bool,

    // --- modèle ---
    pub ruban: Ruban,
    pub memoire: Option<f64>,

    // --- sorties dérivées du dernier rejeu ---
    pub affichage: String,  // valeur courante OU message de garde
    pub historique: String, // description infixe + " …" / " ="

    // dernière valeur posée (cible de →M quand on ne tape pas)
    derniere_valeur: f64,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            saisie: String::new(),
            en_frappe: false,
            ruban: Ruban::nouveau(),
            memoire: None,
            affichage: "0".to_string(), // écran au démarrage
            historique: String::new(),
            derniere_valeur: 0.0,
        }
    }
}

impl AppCalc {
    /* ------------------------ Touches chiffres ------------------------ */

    /// Chiffre ou point : construit la saisie affichée.
    /// Un seul point accepté ; le premier chiffre remplace l'écran.
    pub fn touche_chiffre(&mut self, chiffre: char) {
        if self.en_frappe {
            if chiffre != '.' || !self.saisie.contains('.') {
                self.saisie.push(chiffre);
            }
        } else {
            self.saisie = if chiffre == '.' {
                "0.".to_string()
            } else {
                chiffre.to_string()
            };
            self.en_frappe = true;
        }
        self.affichage = self.saisie.clone();
    }

    /* ------------------------ Touches opérations ------------------------ */

    /// Symbole du clavier : pousse d'abord la saisie en cours comme
    /// opérande, puis le symbole, puis rejoue le ruban.
    pub fn touche_operation(&mut self, symbole: &str) {
        self.poser_saisie();
        self.ruban.pousser_operation(symbole);
        self.actualiser();
    }

    /// M : référence à la mémoire (liaison tardive, relue à chaque rejeu).
    /// Une saisie en cours est abandonnée, la variable prend sa place.
    pub fn touche_memoire(&mut self) {
        self.en_frappe = false;
        self.saisie.clear();
        self.ruban.pousser_variable(NOM_MEMOIRE);
        self.actualiser();
    }

    /// →M : mémorise la valeur affichée, puis rejoue (un ruban contenant M
    /// reflète la nouvelle valeur immédiatement).
    pub fn memoriser(&mut self) {
        self.memoire = Some(self.valeur_courante());
        self.en_frappe = false;
        self.actualiser();
    }

    /// ⌫ : en cours de frappe, efface un chiffre ;
    /// sinon, annule la dernière frappe du ruban.
    pub fn touche_annuler(&mut self) {
        if self.en_frappe {
            self.saisie.pop();
            if self.saisie.is_empty() {
                self.en_frappe = false;
                self.actualiser();
            } else {
                self.affichage = self.saisie.clone();
            }
        } else {
            self.ruban.annuler();
            self.actualiser();
        }
    }

    /// AC : remise à zéro totale (ruban + saisie + mémoire).
    pub fn reset_total(&mut self) {
        self.ruban.effacer();
        self.saisie.clear();
        self.en_frappe = false;
        self.memoire = None;
        self.derniere_valeur = 0.0;
        self.actualiser();
    }

    /* ------------------------ Rejeu et affichage ------------------------ */

    /// Valeur sous les doigts : la saisie en cours si on tape,
    /// sinon la dernière valeur posée par un rejeu.
    pub fn valeur_courante(&self) -> f64 {
        if self.en_frappe {
            self.saisie.parse().unwrap_or(0.0)
        } else {
            self.derniere_valeur
        }
    }

    fn poser_saisie(&mut self) {
        if self.en_frappe {
            let valeur = self.saisie.parse().unwrap_or(0.0);
            self.ruban.pousser_operande(valeur);
            self.derniere_valeur = valeur;
            self.en_frappe = false;
            self.saisie.clear();
        }
    }

    fn liaisons(&self) -> Liaisons {
        match self.memoire {
            Some(v) => Liaisons::from([(NOM_MEMOIRE.to_string(), v)]),
            None => Liaisons::new(),
        }
    }

    /// Rejoue tout le ruban et redérive les chaînes d'affichage.
    /// Le message de garde remplace la valeur à l'écran ; la description
    /// reste visible dans l'historique.
    fn actualiser(&mut self) {
        let bilan = self.ruban.evaluer(&self.liaisons());

        if let Some(valeur) = bilan.resultat {
            self.derniere_valeur = valeur;
        }

        self.affichage = match (&bilan.erreur, bilan.resultat) {
            (Some(message), _) => message.clone(),
            (None, Some(valeur)) => format!("{valeur}"),
            // attente de second opérande : l'écran garde la dernière valeur
            (None, None) => format!("{}", self.derniere_valeur),
        };

        self.historique = match &bilan.description {
            Some(d) if bilan.en_attente => format!("{d} …"),
            Some(d) => format!("{d} ="),
            None => String::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frappe_point_et_chiffres() {
        let mut app = AppCalc::default();
        app.touche_chiffre('.');
        app.touche_chiffre('5');
        app.touche_chiffre('.'); // second point refusé
        app.touche_chiffre('5');
        assert_eq!(app.affichage, "0.55");
    }

    #[test]
    fn suite_7_plus_9_egal() {
        let mut app = AppCalc::default();
        app.touche_chiffre('7');
        app.touche_operation("+");
        assert_eq!(app.historique, "7+ …");
        assert_eq!(app.affichage, "7"); // l'écran garde le 7 pendant l'attente

        app.touche_chiffre('9');
        app.touche_operation("=");
        assert_eq!(app.historique, "7+9 =");
        assert_eq!(app.affichage, "16");
    }

    #[test]
    fn garde_affichee_a_la_place_de_la_valeur() {
        let mut app = AppCalc::default();
        app.touche_chiffre('1');
        app.touche_operation("±");
        app.touche_operation("√");
        assert_eq!(app.affichage, "racine carrée d'un nombre négatif");
        assert_eq!(app.historique, "√(-(1)) =");
    }

    #[test]
    fn memoire_liaison_tardive() {
        let mut app = AppCalc::default();

        // 9 + M = avec M vide : 9, l'historique garde le nom
        app.touche_chiffre('9');
        app.touche_operation("+");
        app.touche_memoire();
        app.touche_operation("=");
        assert_eq!(app.affichage, "9");
        assert_eq!(app.historique, "9+M =");

        // 7 →M : le même ruban se rejoue avec M = 7
        app.touche_chiffre('7');
        app.memoriser();
        assert_eq!(app.affichage, "16");
        assert_eq!(app.historique, "9+7 =");
    }

    #[test]
    fn annuler_frappe_puis_ruban() {
        let mut app = AppCalc::default();
        app.touche_chiffre('4');
        app.touche_chiffre('2');
        app.touche_annuler(); // efface le 2 de la saisie
        assert_eq!(app.affichage, "4");

        app.touche_operation("+");
        app.touche_chiffre('1');
        app.touche_operation("=");
        app.touche_annuler(); // retire le "=" du ruban
        assert_eq!(app.historique, "4+1 …");
    }

    #[test]
    fn reset_total_remet_l_ecran_a_zero() {
        let mut app = AppCalc::default();
        app.touche_chiffre('8');
        app.touche_operation("x²");
        app.memoriser();
        app.reset_total();

        assert_eq!(app.affichage, "0");
        assert_eq!(app.historique, "");
        assert!(app.ruban.est_vide());
        assert!(app.memoire.is_none());
    }
}
