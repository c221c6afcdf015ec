//! Noyau — moteur d'évaluation (rejeu du ruban)
//!
//! Un pli PUR, de gauche à droite, sur les éléments enregistrés :
//!   opérande / variable -> accumulateur (valeur + libellé)
//!   symbole             -> dispatch exhaustif sur la table d'opérations
//!
//! Tout l'état du pli (accumulateur, opération en attente, dernière erreur)
//! vit dans des locales : rien ne survit entre deux appels. Rejouer depuis
//! zéro rend annulation, reset et changement de liaison toujours justes,
//! sans cache à invalider.
//!
//! Pas d'analyse de précédence : UNE seule opération binaire en attente,
//! résolue à l'arrivée du binaire suivant ou de "=" (calculatrice quatre
//! opérations, pas un parseur de formules). C'est ce qui fait lire
//! `7 + 9 √` comme « √ sur la dernière valeur », le + restant en attente.

use super::ruban::{Element, Liaisons};
use super::table::{operation, Calcul2, Garde2, Libelle2, Operation};

/// Issue d'un rejeu complet du ruban. Jamais persistée : recalculée à
/// chaque appel à partir du ruban et des liaisons courantes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bilan {
    /// Valeur de l'accumulateur final, s'il existe.
    pub resultat: Option<f64>,

    /// true ssi une opération binaire reste en attente de second opérande.
    pub en_attente: bool,

    /// Lecture infixe de l'expression rejouée (ex: "7+√(9)").
    pub description: Option<String>,

    /// Dernier message de garde levé pendant le rejeu (consultatif :
    /// le calcul continue, seule une nouvelle garde peut le remplacer).
    pub erreur: Option<String>,
}

/// Paire (valeur, libellé) portée le long du pli.
#[derive(Clone, Debug)]
struct Accumulateur {
    valeur: f64,
    texte: String,
}

impl Accumulateur {
    fn nombre(valeur: f64) -> Self {
        Self {
            valeur,
            texte: format!("{valeur}"),
        }
    }
}

/// Opération binaire figée avec son premier opérande, en attente du second.
struct OperationEnAttente {
    calcul: Calcul2,
    libelle: Libelle2,
    garde: Option<Garde2>,
    premier: Accumulateur,
}

impl OperationEnAttente {
    fn appliquer(&self, second: &Accumulateur) -> Accumulateur {
        Accumulateur {
            valeur: (self.calcul)(self.premier.valeur, second.valeur),
            texte: (self.libelle)(&self.premier.texte, &second.texte),
        }
    }
}

/// Rejoue les éléments de gauche à droite avec les liaisons courantes.
///
/// Règles du pli :
/// - opérande : remplace l'accumulateur
/// - variable : relue dans les liaisons (absente => 0, libellé = nom)
/// - unaire sans accumulateur, symbole inconnu : frappes ignorées
/// - binaire : résout d'abord l'attente courante, puis fige l'accumulateur
///   comme premier opérande
/// - "=" : résout l'attente (sans attente ou sans accumulateur : inerte)
pub fn evaluer(elements: &[Element], liaisons: &Liaisons) -> Bilan {
    let mut acc: Option<Accumulateur> = None;
    let mut attente: Option<OperationEnAttente> = None;
    let mut erreur: Option<String> = None;

    for element in elements {
        match element {
            Element::Operande(v) => acc = Some(Accumulateur::nombre(*v)),

            Element::Variable(nom) => {
                acc = Some(match liaisons.get(nom) {
                    Some(v) => Accumulateur::nombre(*v),
                    // non liée : vaut 0, le libellé garde le nom
                    None => Accumulateur {
                        valeur: 0.0,
                        texte: nom.clone(),
                    },
                });
            }

            Element::Operation(symbole) => {
                let Some(op) = operation(symbole) else {
                    continue; // symbole hors table : inerte
                };

                match op {
                    Operation::Constante(v) => {
                        acc = Some(Accumulateur {
                            valeur: v,
                            texte: symbole.clone(),
                        });
                    }

                    Operation::SansOperande(calcul, libelle) => {
                        acc = Some(Accumulateur {
                            valeur: calcul(),
                            texte: libelle.to_string(),
                        });
                    }

                    Operation::Unaire(calcul, libelle, garde) => {
                        if let Some(a) = acc.take() {
                            if let Some(garde) = garde {
                                if let Some(msg) = garde(a.valeur) {
                                    erreur = Some(msg);
                                }
                            }
                            // la garde ne bloque pas : le calcul s'applique
                            // quand même (NaN assumé)
                            acc = Some(Accumulateur {
                                valeur: calcul(a.valeur),
                                texte: libelle(&a.texte),
                            });
                        }
                    }

                    Operation::Binaire(calcul, libelle, garde) => {
                        resoudre(&mut attente, &mut acc, &mut erreur);
                        if let Some(premier) = acc.take() {
                            attente = Some(OperationEnAttente {
                                calcul,
                                libelle,
                                garde,
                                premier,
                            });
                        }
                    }

                    Operation::Egal => resoudre(&mut attente, &mut acc, &mut erreur),
                }
            }
        }
    }

    let description = match (&attente, &acc) {
        (Some(p), Some(a)) => Some((p.libelle)(&p.premier.texte, &a.texte)),
        (Some(p), None) => Some((p.libelle)(&p.premier.texte, "")),
        (None, Some(a)) => Some(a.texte.clone()),
        (None, None) => None,
    };

    Bilan {
        resultat: acc.as_ref().map(|a| a.valeur),
        en_attente: attente.is_some(),
        description,
        erreur,
    }
}

/// Résout l'opération en attente avec l'accumulateur courant comme second
/// opérande. S'il manque l'un des deux, ne touche à rien.
fn resoudre(
    attente: &mut Option<OperationEnAttente>,
    acc: &mut Option<Accumulateur>,
    erreur: &mut Option<String>,
) {
    match (attente.take(), acc.take()) {
        (Some(p), Some(a)) => {
            if let Some(garde) = p.garde {
                if let Some(msg) = garde(p.premier.valeur, a.valeur) {
                    *erreur = Some(msg);
                }
            }
            *acc = Some(p.appliquer(&a));
        }
        (p, a) => {
            *attente = p;
            *acc = a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frappes rapides : un f64 devient un opérande, le reste un symbole.
    fn frappes(touches: &[&str]) -> Vec<Element> {
        touches
            .iter()
            .map(|t| match t.parse::<f64>() {
                Ok(v) => Element::Operande(v),
                Err(_) => Element::Operation(t.to_string()),
            })
            .collect()
    }

    fn rejouer(touches: &[&str]) -> Bilan {
        evaluer(&frappes(touches), &Liaisons::new())
    }

    fn assert_proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "attendu {b}, obtenu {a}");
    }

    /* ------------------------ Pli de base ------------------------ */

    #[test]
    fn operande_seul() {
        let b = rejouer(&["7"]);
        assert_eq!(b.resultat, Some(7.0));
        assert!(!b.en_attente);
        assert_eq!(b.description.as_deref(), Some("7"));
        assert!(b.erreur.is_none());
    }

    #[test]
    fn ruban_vide() {
        let b = rejouer(&[]);
        assert_eq!(b, Bilan::default());
    }

    #[test]
    fn binaire_en_attente() {
        // 7 + : attente, description "7+"
        let b = rejouer(&["7", "+"]);
        assert!(b.en_attente);
        assert_eq!(b.resultat, None);
        assert_eq!(b.description.as_deref(), Some("7+"));
    }

    #[test]
    fn chaine_binaire_resolution_immediate() {
        // le second + résout le premier avant de se mettre en attente
        let b = rejouer(&["7", "+", "9", "+", "6", "="]);
        assert_eq!(b.resultat, Some(22.0));
        assert!(!b.en_attente);
        assert_eq!(b.description.as_deref(), Some("7+9+6"));
    }

    #[test]
    fn unaire_interrompt_sans_resoudre() {
        // √ s'applique à 9, le + reste en attente
        let b = rejouer(&["7", "+", "9", "√"]);
        assert!(b.en_attente);
        assert_eq!(b.description.as_deref(), Some("7+√(9)"));
        assert_proche(b.resultat.unwrap_or(f64::NAN), 3.0);
    }

    #[test]
    fn egal_repete_idempotent() {
        let une_fois = rejouer(&["7", "+", "9", "="]);
        let trois_fois = rejouer(&["7", "+", "9", "=", "=", "="]);
        assert_eq!(une_fois, trois_fois);
    }

    #[test]
    fn ordre_des_operandes_binaires() {
        // non commutatif : premier figé, second courant
        let b = rejouer(&["9", "-", "2", "="]);
        assert_eq!(b.resultat, Some(7.0));
        assert_eq!(b.description.as_deref(), Some("9-2"));

        let b = rejouer(&["2", "xʸ", "10", "="]);
        assert_eq!(b.resultat, Some(1024.0));
        assert_eq!(b.description.as_deref(), Some("2^10"));
    }

    /* ------------------------ Frappes inertes ------------------------ */

    #[test]
    fn symbole_inconnu_ignore() {
        let avec = rejouer(&["7", "???", "+", "2", "="]);
        let sans = rejouer(&["7", "+", "2", "="]);
        assert_eq!(avec, sans);
        assert!(avec.erreur.is_none());
    }

    #[test]
    fn unaire_sans_accumulateur_ignore() {
        // √ en tête de ruban : rien à consommer
        let b = rejouer(&["√", "7"]);
        assert_eq!(b.resultat, Some(7.0));
        assert_eq!(b.description.as_deref(), Some("7"));
        assert!(b.erreur.is_none());
    }

    #[test]
    fn binaire_sans_accumulateur_ignore() {
        let b = rejouer(&["+", "7"]);
        assert!(!b.en_attente);
        assert_eq!(b.resultat, Some(7.0));
    }

    /* ------------------------ Gardes ------------------------ */

    #[test]
    fn garde_racine_negative_calcul_poursuivi() {
        let b = rejouer(&["-1", "√"]);
        assert_eq!(b.erreur.as_deref(), Some("racine carrée d'un nombre négatif"));
        // le calcul s'est appliqué quand même : résultat présent (NaN)
        assert!(b.resultat.is_some_and(f64::is_nan));
        assert_eq!(b.description.as_deref(), Some("√(-1)"));
    }

    #[test]
    fn garde_division_quasi_zero() {
        let b = rejouer(&["1", "÷", "0.000000001", "="]);
        assert_eq!(b.erreur.as_deref(), Some("division par zéro"));
        assert!(b.resultat.is_some());

        // au-dessus du seuil : pas d'erreur
        let b = rejouer(&["1", "÷", "0.001", "="]);
        assert!(b.erreur.is_none());
        assert_proche(b.resultat.unwrap_or(f64::NAN), 1000.0);
    }

    #[test]
    fn derniere_garde_gagne() {
        // √(-1) lève, puis ln(0) sur le même rejeu : on garde le dernier message
        let b = rejouer(&["-1", "√", "±", "-", "0", "ln", "="]);
        assert_eq!(
            b.erreur.as_deref(),
            Some("logarithme d'un nombre négatif ou nul")
        );
    }

    #[test]
    fn erreur_jamais_effacee_par_etape_saine() {
        // la garde lève sur √, les étapes saines suivantes ne nettoient pas
        let b = rejouer(&["-4", "√", "x²", "+", "1", "="]);
        assert_eq!(b.erreur.as_deref(), Some("racine carrée d'un nombre négatif"));
    }

    /* ------------------------ Variables ------------------------ */

    #[test]
    fn variable_non_liee_vaut_zero() {
        let seq = vec![
            Element::Operande(7.0),
            Element::Operation("+".into()),
            Element::Variable("M".into()),
            Element::Operation("=".into()),
        ];
        let b = evaluer(&seq, &Liaisons::new());
        assert_eq!(b.resultat, Some(7.0));
        // non liée : le libellé garde le nom du symbole
        assert_eq!(b.description.as_deref(), Some("7+M"));
    }

    #[test]
    fn variable_liee_affiche_sa_valeur() {
        let seq = vec![
            Element::Operande(7.0),
            Element::Operation("+".into()),
            Element::Variable("M".into()),
            Element::Operation("=".into()),
        ];
        let liaisons = Liaisons::from([("M".to_string(), 2.5)]);
        let b = evaluer(&seq, &liaisons);
        assert_eq!(b.resultat, Some(9.5));
        assert_eq!(b.description.as_deref(), Some("7+2.5"));
    }
}
