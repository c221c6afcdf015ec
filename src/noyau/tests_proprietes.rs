//! Campagne propriétés : invariants de rejeu + balayage aléatoire borné.
//!
//! But : marteler le moteur sans faire chauffer la machine.
//! - RNG déterministe (graine fixe), budget temps global
//! - rubans arbitraires : le rejeu ne doit JAMAIS paniquer
//! - rejouer deux fois le même ruban donne le même bilan
//!   ("rand" exclu du balayage : tirage différent à chaque rejeu)
//! - annuler la dernière frappe == ne l'avoir jamais enregistrée

use std::time::{Duration, Instant};

use super::ruban::{Element, Liaisons, Ruban};
use super::{evaluer, Bilan};

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    etat: u64,
}

impl Rng {
    fn nouveau(graine: u64) -> Self {
        Self { etat: graine }
    }

    fn suivant(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.etat = self.etat.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.etat >> 32) as u32
    }

    fn indice(&mut self, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            self.suivant() as usize % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(depart: Instant, max: Duration) {
    if depart.elapsed() > max {
        panic!("budget temps dépassé: {max:?}");
    }
}

/* ------------------------ Générateur de rubans ------------------------ */

/// Symboles du balayage. "rand" exclu (non déterministe par nature),
/// "@@" volontairement hors table (doit rester inerte).
const SYMBOLES: &[&str] = &[
    "π", "e", "√", "cos", "sin", "tan", "ln", "log", "x²", "x³", "x⁻¹", "±", "x!", "×", "÷",
    "+", "-", "xʸ", "=", "@@",
];

const OPERANDES: &[f64] = &[0.0, 1.0, -1.0, 0.5, 7.0, -9.0, 1e-9, 1e6];

fn element_arbitraire(rng: &mut Rng) -> Element {
    match rng.indice(4) {
        0 => Element::Operande(OPERANDES[rng.indice(OPERANDES.len())]),
        1 => {
            let nom = if rng.indice(2) == 0 { "M" } else { "x" };
            Element::Variable(nom.to_string())
        }
        _ => Element::Operation(SYMBOLES[rng.indice(SYMBOLES.len())].to_string()),
    }
}

fn ruban_arbitraire(rng: &mut Rng, longueur: usize) -> Vec<Element> {
    (0..longueur).map(|_| element_arbitraire(rng)).collect()
}

/// Égalité de bilans qui tolère NaN (NaN == NaN pour le rejeu).
fn memes_bilans(a: &Bilan, b: &Bilan) -> bool {
    let memes_resultats = match (a.resultat, b.resultat) {
        (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
        (None, None) => true,
        _ => false,
    };
    memes_resultats
        && a.en_attente == b.en_attente
        && a.description == b.description
        && a.erreur == b.erreur
}

/* ------------------------ Invariants dirigés ------------------------ */

#[test]
fn prop_rejeu_identique_deux_fois() {
    let mut r = Ruban::nouveau();
    r.pousser_operande(7.0);
    r.pousser_operation("+");
    r.pousser_operande(9.0);
    r.pousser_operation("√");

    let liaisons = Liaisons::new();
    let avant = r.clone();

    let b1 = r.evaluer(&liaisons);
    let b2 = r.evaluer(&liaisons);
    assert!(memes_bilans(&b1, &b2));

    // le rejeu n'écrit jamais dans le ruban
    assert_eq!(r, avant);
}

#[test]
fn prop_annuler_equivaut_a_ne_pas_frapper() {
    let liaisons = Liaisons::new();

    let mut long = Ruban::nouveau();
    long.pousser_operande(7.0);
    long.pousser_operation("+");
    long.pousser_operande(9.0);
    long.pousser_operation("=");
    long.pousser_operation("√"); // frappe de trop
    long.annuler();

    let mut court = Ruban::nouveau();
    court.pousser_operande(7.0);
    court.pousser_operation("+");
    court.pousser_operande(9.0);
    court.pousser_operation("=");

    assert!(memes_bilans(&long.evaluer(&liaisons), &court.evaluer(&liaisons)));
}

#[test]
fn prop_liaison_tardive() {
    // même ruban, valeur de M changée entre deux rejeux
    let mut r = Ruban::nouveau();
    r.pousser_variable("M");
    r.pousser_operation("x²");

    let b1 = r.evaluer(&Liaisons::from([("M".to_string(), 3.0)]));
    let b2 = r.evaluer(&Liaisons::from([("M".to_string(), 5.0)]));

    assert_eq!(b1.resultat, Some(9.0));
    assert_eq!(b2.resultat, Some(25.0));

    // non liée : retombe à 0, libellé = nom
    let b3 = r.evaluer(&Liaisons::new());
    assert_eq!(b3.resultat, Some(0.0));
    assert_eq!(b3.description.as_deref(), Some("(M)²"));
}

/* ------------------------ Balayage aléatoire borné ------------------------ */

#[test]
fn balayage_sans_panique_et_deterministe() {
    let depart = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::nouveau(0xC0FFEE);
    let liaisons = Liaisons::from([("M".to_string(), 2.0)]);

    for tour in 0..400 {
        let longueur = rng.indice(24);
        let elements = ruban_arbitraire(&mut rng, longueur);

        let b1 = evaluer(&elements, &liaisons);
        let b2 = evaluer(&elements, &liaisons);
        assert!(
            memes_bilans(&b1, &b2),
            "rejeu non déterministe au tour {tour}: {elements:?}"
        );

        budget(depart, max);
    }
}

#[test]
fn balayage_annulation_en_cascade() {
    let depart = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::nouveau(42);
    let liaisons = Liaisons::new();

    for _ in 0..100 {
        let elements = ruban_arbitraire(&mut rng, 16);

        let mut r = Ruban::nouveau();
        for e in &elements {
            match e {
                Element::Operande(v) => r.pousser_operande(*v),
                Element::Variable(nom) => r.pousser_variable(nom.clone()),
                Element::Operation(s) => r.pousser_operation(s.clone()),
            }
        }

        // annule tout, frappe par frappe : chaque étape doit coïncider
        // avec le rejeu du préfixe correspondant
        for n in (0..elements.len()).rev() {
            r.annuler();
            let attendu = evaluer(&elements[..n], &liaisons);
            assert!(memes_bilans(&r.evaluer(&liaisons), &attendu));
        }
        assert!(r.est_vide());

        budget(depart, max);
    }
}
