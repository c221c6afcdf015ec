// src/noyau/ruban.rs

use std::collections::HashMap;
use std::fmt;

use super::moteur::{evaluer, Bilan};

/// Valeurs courantes des variables nommées, fournies à CHAQUE évaluation.
/// Une variable absente de la table vaut 0.
pub type Liaisons = HashMap<String, f64>;

/// Une frappe enregistrée sur le ruban.
///
/// C'est le SEUL état persistant du noyau : une suite ordonnée d'éléments,
/// qui grandit d'un élément par action, rétrécit d'un élément par annulation,
/// et se vide d'un coup au reset. L'évaluation ne l'écrit jamais.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Nombre saisi tel quel (ex: 7, 0.5).
    Operande(f64),

    /// Référence à une variable nommée (ex: "M").
    /// NOTE: la valeur est relue dans les Liaisons à chaque évaluation,
    /// jamais figée au moment de la frappe.
    Variable(String),

    /// Symbole d'opération (ex: "+", "√", "π", "=").
    /// Un symbole absent de la table d'opérations est inerte.
    Operation(String),
}

impl fmt::Display for Element {
    /// Forme brute de la frappe, telle qu'enregistrée (pour relire le ruban).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Operande(v) => write!(f, "{v}"),
            Element::Variable(nom) => write!(f, "{nom}"),
            Element::Operation(s) => write!(f, "{s}"),
        }
    }
}

/// Le ruban : journal des frappes, à la manière du rouleau de papier
/// d'une calculatrice de bureau.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ruban {
    elements: Vec<Element>,
}

impl Ruban {
    pub fn nouveau() -> Self {
        Self::default()
    }

    /* ------------------------ Enregistrement ------------------------ */

    /// Enregistre un opérande numérique.
    pub fn pousser_operande(&mut self, valeur: f64) {
        self.elements.push(Element::Operande(valeur));
    }

    /// Enregistre une référence de variable (liaison tardive).
    pub fn pousser_variable(&mut self, nom: impl Into<String>) {
        self.elements.push(Element::Variable(nom.into()));
    }

    /// Enregistre un symbole d'opération.
    pub fn pousser_operation(&mut self, symbole: impl Into<String>) {
        self.elements.push(Element::Operation(symbole.into()));
    }

    /// Annule la dernière frappe. Sans effet sur un ruban vide.
    pub fn annuler(&mut self) {
        self.elements.pop();
    }

    /// Vide le ruban (reset).
    pub fn effacer(&mut self) {
        self.elements.clear();
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn est_vide(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn longueur(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Rejoue tout le ruban avec les liaisons courantes.
    ///
    /// Rejouer depuis zéro à chaque appel garantit qu'annulation, reset et
    /// changement de valeur d'une variable sont toujours pris en compte,
    /// sans cache à invalider. Le coût est proportionnel à la longueur du
    /// ruban, bornée par la cadence de frappe humaine.
    pub fn evaluer(&self, liaisons: &Liaisons) -> Bilan {
        evaluer(&self.elements, liaisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruban_pousser_et_annuler() {
        let mut r = Ruban::nouveau();
        assert!(r.est_vide());

        r.pousser_operande(7.0);
        r.pousser_operation("+");
        r.pousser_variable("M");
        assert_eq!(r.longueur(), 3);
        assert_eq!(r.elements()[2], Element::Variable("M".into()));

        r.annuler();
        assert_eq!(r.longueur(), 2);

        r.effacer();
        assert!(r.est_vide());
    }

    #[test]
    fn annuler_sur_ruban_vide_sans_effet() {
        let mut r = Ruban::nouveau();
        r.annuler();
        assert!(r.est_vide());
    }
}
