// src/noyau/table.rs
//
// Table d'opérations du clavier
// -----------------------------
// Registre FIXE : symbole -> variante d'opération (fonction de calcul +
// fonction de libellé + garde de domaine éventuelle).
// - construite par un match exhaustif, jamais modifiée
// - lookup en temps constant, sans effet de bord
// - un symbole inconnu renvoie None (la frappe est ignorée, jamais une erreur)

use std::f64::consts::{E, PI};

/* ------------------------ Signatures des opérations ------------------------ */

pub type Calcul1 = fn(f64) -> f64;
pub type Calcul2 = fn(f64, f64) -> f64;

/// Libellé unaire : enveloppe la description de l'opérande (ex: "√(9)").
pub type Libelle1 = fn(&str) -> String;

/// Libellé binaire : joint les deux descriptions (ex: "7+9").
/// L'ordre des arguments compte (÷, -, xʸ).
pub type Libelle2 = fn(&str, &str) -> String;

/// Garde de domaine : message d'erreur consultatif, ou None si l'opérande
/// est acceptable. Évaluée AVANT la fonction de calcul.
pub type Garde1 = fn(f64) -> Option<String>;
pub type Garde2 = fn(f64, f64) -> Option<String>;

/// Une opération du clavier.
#[derive(Clone, Copy)]
pub enum Operation {
    /// Valeur fixe (π, e). Le symbole lui-même sert de libellé.
    Constante(f64),

    /// Zéro argument (rand). Libellé fixe.
    SansOperande(fn() -> f64, &'static str),

    /// Un argument : consomme l'accumulateur courant.
    Unaire(Calcul1, Libelle1, Option<Garde1>),

    /// Deux arguments : fige le premier opérande et attend le second.
    Binaire(Calcul2, Libelle2, Option<Garde2>),

    /// Force la résolution de l'opération binaire en attente.
    Egal,
}

/// Retrouve l'opération associée à un symbole du clavier.
pub fn operation(symbole: &str) -> Option<Operation> {
    use Operation::*;

    let op = match symbole {
        // --- constantes ---
        "π" => Constante(PI),
        "e" => Constante(E),

        // --- unaires : fonctions mathématiques ---
        "√" => Unaire(|x| x.sqrt(), |d| format!("√({d})"), Some(garde_racine)),
        "cos" => Unaire(|x| x.cos(), |d| format!("cos({d})"), None),
        "sin" => Unaire(|x| x.sin(), |d| format!("sin({d})"), None),
        "tan" => Unaire(|x| x.tan(), |d| format!("tan({d})"), None),
        "sinh" => Unaire(|x| x.sinh(), |d| format!("sinh({d})"), None),
        "cosh" => Unaire(|x| x.cosh(), |d| format!("cosh({d})"), None),
        "tanh" => Unaire(|x| x.tanh(), |d| format!("tanh({d})"), None),
        "ln" => Unaire(|x| x.ln(), |d| format!("ln({d})"), Some(garde_logarithme)),
        "log" => Unaire(|x| x.log10(), |d| format!("log({d})"), Some(garde_logarithme)),
        "eˣ" => Unaire(|x| x.exp(), |d| format!("e^({d})"), None),
        "10ˣ" => Unaire(|x| 10.0f64.powf(x), |d| format!("10^({d})"), None),

        // --- unaires : touches de mise en forme ---
        "x²" => Unaire(|x| x.powi(2), |d| format!("({d})²"), None),
        "x³" => Unaire(|x| x.powi(3), |d| format!("({d})³"), None),
        "x⁻¹" => Unaire(|x| 1.0 / x, |d| format!("({d})⁻¹"), Some(garde_inverse)),
        "±" => Unaire(|x| -x, |d| format!("-({d})"), None),
        "x!" => Unaire(factorielle, |d| format!("({d})!"), Some(garde_factorielle)),

        // --- binaires ---
        "×" => Binaire(|a, b| a * b, |a, b| format!("{a}×{b}"), None),
        "÷" => Binaire(|a, b| a / b, |a, b| format!("{a}÷{b}"), Some(garde_division)),
        "+" => Binaire(|a, b| a + b, |a, b| format!("{a}+{b}"), None),
        "-" => Binaire(|a, b| a - b, |a, b| format!("{a}-{b}"), None),
        "xʸ" => Binaire(|a, b| a.powf(b), |a, b| format!("{a}^{b}"), None),

        // --- divers ---
        "rand" => SansOperande(aleatoire, "rand()"),
        "=" => Egal,

        _ => return None,
    };

    Some(op)
}

/* ------------------------ Fonctions numériques ------------------------ */

/// Factorielle façon clavier x! : produit décroissant de pas 1 jusqu'à 1.
///
/// - op1 <= 1 (y compris négatif) : 1
/// - argument non entier accepté : 2.5! = 2.5 × 1.5 = 3.75
/// - au-delà de 170 le produit déborde f64 ; on renvoie l'infini tout de
///   suite (pour n immense, n - 1.0 == n et la boucle n'avancerait plus)
pub fn factorielle(x: f64) -> f64 {
    if x > 170.0 {
        return f64::INFINITY;
    }

    let mut n = x;
    let mut produit = 1.0;
    while n > 1.0 {
        produit *= n;
        n -= 1.0;
    }
    produit
}

/// Tirage uniforme dans [0, 1).
fn aleatoire() -> f64 {
    rand::random::<f64>()
}

/* ------------------------ Gardes de domaine ------------------------ */

/// Garde-fou : en-dessous de cette magnitude, un diviseur est traité comme
/// nul (absorbe le bruit flottant au lieu d'un test exact à 0).
pub const QUASI_ZERO: f64 = 1e-8;

fn garde_racine(x: f64) -> Option<String> {
    if x < 0.0 {
        Some("racine carrée d'un nombre négatif".to_string())
    } else {
        None
    }
}

fn garde_division(_premier: f64, diviseur: f64) -> Option<String> {
    if diviseur.abs() < QUASI_ZERO {
        Some("division par zéro".to_string())
    } else {
        None
    }
}

fn garde_inverse(x: f64) -> Option<String> {
    if x.abs() < QUASI_ZERO {
        Some("division par zéro".to_string())
    } else {
        None
    }
}

fn garde_logarithme(x: f64) -> Option<String> {
    if x <= 0.0 {
        Some("logarithme d'un nombre négatif ou nul".to_string())
    } else {
        None
    }
}

fn garde_factorielle(x: f64) -> Option<String> {
    if x < 0.0 {
        Some("factorielle d'un nombre négatif".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYMBOLES: &[&str] = &[
        "π", "e", "√", "cos", "sin", "tan", "sinh", "cosh", "tanh", "ln", "log", "eˣ", "10ˣ",
        "x²", "x³", "x⁻¹", "±", "x!", "×", "÷", "+", "-", "xʸ", "rand", "=",
    ];

    #[test]
    fn table_totale_sur_les_symboles_du_clavier() {
        for s in SYMBOLES {
            assert!(operation(s).is_some(), "symbole absent de la table: {s:?}");
        }
    }

    #[test]
    fn symbole_inconnu_inerte() {
        assert!(operation("%").is_none());
        assert!(operation("PI").is_none()); // sensible à la casse, pas de normalisation
        assert!(operation("").is_none());
    }

    #[test]
    fn factorielle_valeurs() {
        assert_eq!(factorielle(0.0), 1.0);
        assert_eq!(factorielle(1.0), 1.0);
        assert_eq!(factorielle(5.0), 120.0);
        assert_eq!(factorielle(-3.0), 1.0);
        assert_eq!(factorielle(2.5), 3.75); // 2.5 × 1.5
        assert_eq!(factorielle(171.0), f64::INFINITY);
    }

    #[test]
    fn gardes_de_domaine() {
        assert!(garde_racine(-1.0).is_some());
        assert!(garde_racine(0.0).is_none());

        // quasi-zéro, pas zéro exact
        assert!(garde_division(1.0, 0.0).is_some());
        assert!(garde_division(1.0, 1e-9).is_some());
        assert!(garde_division(1.0, 1e-7).is_none());
        assert!(garde_inverse(1e-9).is_some());

        assert!(garde_logarithme(0.0).is_some());
        assert!(garde_logarithme(-2.0).is_some());
        assert!(garde_logarithme(10.0).is_none());

        assert!(garde_factorielle(-1.0).is_some());
        assert!(garde_factorielle(4.0).is_none());
    }

    #[test]
    fn libelles_unaires_et_binaires() {
        let Some(Operation::Unaire(_, libelle, _)) = operation("√") else {
            panic!("√ devrait être unaire");
        };
        assert_eq!(libelle("9"), "√(9)");

        let Some(Operation::Binaire(_, libelle, _)) = operation("×") else {
            panic!("× devrait être binaire");
        };
        assert_eq!(libelle("4", "π"), "4×π");
    }
}
