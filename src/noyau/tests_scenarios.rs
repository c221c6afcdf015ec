//! Campagne scénarios : rejeu de suites de frappes complètes, bout en bout.
//!
//! Chaque scénario déroule le ruban comme l'utilisateur au clavier
//! (opérandes, symboles, =) et vérifie le triplet observable :
//! résultat / en_attente / description. Les lettres a..k suivent la
//! progression canonique d'une calculatrice quatre opérations étendue.

use std::f64::consts::PI;

use super::ruban::{Liaisons, Ruban};
use super::Bilan;

/// Construit un ruban à partir de frappes littérales :
/// ce qui se lit comme un f64 devient un opérande, le reste un symbole.
fn ruban(touches: &[&str]) -> Ruban {
    let mut r = Ruban::nouveau();
    for t in touches {
        match t.parse::<f64>() {
            Ok(v) => r.pousser_operande(v),
            Err(_) => r.pousser_operation(*t),
        }
    }
    r
}

fn rejouer(touches: &[&str]) -> Bilan {
    ruban(touches).evaluer(&Liaisons::new())
}

fn assert_description(b: &Bilan, attendu: &str) {
    assert_eq!(b.description.as_deref(), Some(attendu));
}

fn assert_resultat(b: &Bilan, attendu: f64) {
    let obtenu = b.resultat.unwrap_or(f64::NAN);
    assert!(
        (obtenu - attendu).abs() < 1e-9,
        "résultat attendu {attendu}, obtenu {obtenu}"
    );
}

/* ------------------------ Progression canonique a..k ------------------------ */

#[test]
fn scenario_a_binaire_en_suspens() {
    // a. 7 + : "7+ ..." (7 encore affiché côté UI)
    let b = rejouer(&["7", "+"]);
    assert_description(&b, "7+");
    assert!(b.en_attente);
    assert_eq!(b.resultat, None);
}

#[test]
fn scenario_b_operande_tape_mais_pas_pousse() {
    // b. 7 + 9 (le 9 est dans la saisie, pas encore sur le ruban)
    let b = rejouer(&["7", "+"]);
    assert_description(&b, "7+");
    assert!(b.en_attente);
}

#[test]
fn scenario_c_egal_resout() {
    // c. 7 + 9 = : "7+9", 16
    let b = rejouer(&["7", "+", "9", "="]);
    assert_description(&b, "7+9");
    assert!(!b.en_attente);
    assert_resultat(&b, 16.0);
}

#[test]
fn scenario_d_unaire_sur_resultat_pose() {
    // d. 7 + 9 = √ : "√(7+9)", 4
    let b = rejouer(&["7", "+", "9", "=", "√"]);
    assert_description(&b, "√(7+9)");
    assert!(!b.en_attente);
    assert_resultat(&b, 4.0);
}

#[test]
fn scenario_e_enchainement_apres_unaire() {
    // e. 7 + 9 = √ + 2 = : "√(7+9)+2", 6
    let b = rejouer(&["7", "+", "9", "=", "√", "+", "2", "="]);
    assert_description(&b, "√(7+9)+2");
    assert!(!b.en_attente);
    assert_resultat(&b, 6.0);
}

#[test]
fn scenario_f_unaire_sur_second_operande() {
    // f. 7 + 9 √ : "7+√(9)", 3 affiché, + toujours en attente
    let b = rejouer(&["7", "+", "9", "√"]);
    assert_description(&b, "7+√(9)");
    assert!(b.en_attente);
    assert_resultat(&b, 3.0);
}

#[test]
fn scenario_g_puis_egal() {
    // g. 7 + 9 √ = : "7+√(9)", 10
    let b = rejouer(&["7", "+", "9", "√", "="]);
    assert_description(&b, "7+√(9)");
    assert!(!b.en_attente);
    assert_resultat(&b, 10.0);
}

#[test]
fn scenario_h_chaine_longue() {
    // h. 7 + 9 = + 6 = + 3 = : "7+9+6+3", 25
    let b = rejouer(&["7", "+", "9", "=", "+", "6", "+", "3", "="]);
    assert_description(&b, "7+9+6+3");
    assert!(!b.en_attente);
    assert_resultat(&b, 25.0);
}

#[test]
fn scenario_i_nouvel_operande_remplace_le_pose() {
    // i. 7 + 9 = √ 6 + 3 = : le 6 écrase le √(7+9) posé, d'où "6+3", 9
    let b = rejouer(&["7", "+", "9", "=", "√", "6", "+", "3", "="]);
    assert_description(&b, "6+3");
    assert!(!b.en_attente);
    assert_resultat(&b, 9.0);
}

#[test]
fn scenario_j_saisie_non_poussee_apres_egal() {
    // j. 5 + 6 = puis 73 tapé sans opération : le ruban reste "5+6"
    let b = rejouer(&["5", "+", "6", "="]);
    assert_description(&b, "5+6");
    assert_resultat(&b, 11.0);
}

#[test]
fn scenario_k_constante_comme_operande() {
    // k. 4 × π = : "4×π", 12.566370614359172
    let b = rejouer(&["4", "×", "π", "="]);
    assert_description(&b, "4×π");
    assert!(!b.en_attente);
    assert_resultat(&b, 4.0 * PI);
}

/* ------------------------ Scénarios complémentaires ------------------------ */

#[test]
fn scenario_constantes_et_unaires_composees() {
    // e x² : "(e)²", e²
    let b = rejouer(&["e", "x²"]);
    assert_description(&b, "(e)²");
    assert_resultat(&b, std::f64::consts::E * std::f64::consts::E);
}

#[test]
fn scenario_negation_et_puissance() {
    // 2 ± x³ : "(-(2))³", -8
    let b = rejouer(&["2", "±", "x³"]);
    assert_description(&b, "(-(2))³");
    assert_resultat(&b, -8.0);
}

#[test]
fn scenario_garde_visible_resultat_affichable() {
    // -1 √ : erreur consultative, mais un résultat (NaN) existe toujours
    let b = rejouer(&["-1", "√"]);
    assert_eq!(
        b.erreur.as_deref(),
        Some("racine carrée d'un nombre négatif")
    );
    assert!(b.resultat.is_some());
    assert_description(&b, "√(-1)");
}

#[test]
fn scenario_factorielle_en_chaine() {
    // 3 x! + 4 x! = : "(3)!+(4)!", 30
    let b = rejouer(&["3", "x!", "+", "4", "x!", "="]);
    assert_description(&b, "(3)!+(4)!");
    assert_resultat(&b, 30.0);
}

#[test]
fn scenario_division_puis_inverse() {
    // 10 ÷ 4 = x⁻¹ : "(10÷4)⁻¹", 0.4
    let b = rejouer(&["10", "÷", "4", "=", "x⁻¹"]);
    assert_description(&b, "(10÷4)⁻¹");
    assert_resultat(&b, 0.4);
}

#[test]
fn scenario_variable_memoire() {
    // 9 + M = avec M lié à 1 puis 6 : même ruban, deux bilans
    let mut r = Ruban::nouveau();
    r.pousser_operande(9.0);
    r.pousser_operation("+");
    r.pousser_variable("M");
    r.pousser_operation("=");

    let b = r.evaluer(&Liaisons::from([("M".to_string(), 1.0)]));
    assert_resultat(&b, 10.0);
    assert_description(&b, "9+1");

    let b = r.evaluer(&Liaisons::from([("M".to_string(), 6.0)]));
    assert_resultat(&b, 15.0);
    assert_description(&b, "9+6");
}
