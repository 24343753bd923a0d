//! Verdicts and recommendations
//!
//! Builds the French narrative of the report: the headline verdict, the
//! per-user bandwidth summary and the list of recommendations. Wording is
//! driven by the grades and a few raw thresholds.

use crate::core::types::{Grade, GradedMetrics, RawMetrics};

/// Score floors for the headline tiers
const EXCELLENT_SCORE: u8 = 85;
const GOOD_SCORE: u8 = 70;
const AVERAGE_SCORE: u8 = 50;
const WEAK_SCORE: u8 = 30;

/// Score floor for the "keep this setup" closing recommendation
const KEEP_SETUP_SCORE: u8 = 90;

/// Per-user bandwidth under which video calls get a dedicated warning, Mbps
const VIDEO_CALL_FLOOR_MBPS: f64 = 2.0;

/// One-line verdict for the overall score.
pub fn verdict_headline(score: u8) -> &'static str {
    if score >= EXCELLENT_SCORE {
        "Connectivité excellente — votre bureau est bien équipé."
    } else if score >= GOOD_SCORE {
        "Bonne connectivité avec quelques points d'amélioration."
    } else if score >= AVERAGE_SCORE {
        "Connectivité moyenne — certains utilisateurs peuvent rencontrer des limitations."
    } else if score >= WEAK_SCORE {
        "Connectivité faible — des problèmes significatifs doivent être traités."
    } else {
        "Problèmes critiques de connectivité — une action immédiate est recommandée."
    }
}

/// Sentence describing what the per-user bandwidth allows.
pub fn per_user_summary(mbps_per_user: f64, user_count: u32, multi_zone: bool) -> String {
    let context = if multi_zone {
        format!("{} utilisateurs dans votre zone WiFi", user_count)
    } else {
        format!("{} utilisateurs simultanés", user_count)
    };

    if mbps_per_user >= 10.0 {
        format!(
            "Avec {}, chaque personne dispose de {:.2} Mbps — une marge confortable pour toutes les tâches.",
            context, mbps_per_user
        )
    } else if mbps_per_user >= 5.0 {
        format!(
            "Avec {}, chaque personne dispose de {:.2} Mbps — suffisant pour le travail standard, limité pour la vidéo intensive.",
            context, mbps_per_user
        )
    } else if mbps_per_user >= 2.0 {
        format!(
            "Avec {}, chaque personne dispose de {:.2} Mbps — adapté aux appels vidéo, serré pour les tâches gourmandes en données.",
            context, mbps_per_user
        )
    } else if mbps_per_user >= 0.1 {
        format!(
            "Avec {}, chaque personne dispose de {:.2} Mbps — seule la communication de base est supportée. Une mise à niveau est conseillée.",
            context, mbps_per_user
        )
    } else {
        format!(
            "Avec {}, la bande passante par personne est critiquement basse. Une mise à niveau significative est nécessaire.",
            context
        )
    }
}

/// Builds the recommendation list for a finished run.
///
/// Metrics are reviewed in report order. A clean run gets a single positive
/// message, plus a closing note when the score is very high.
pub fn build_recommendations(
    raw: &RawMetrics,
    grades: &GradedMetrics,
    score: u8,
    multi_zone: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match grades.download {
        Grade::Poor => recommendations.push(
            "La vitesse de téléchargement est inférieure à 20 Mbps — contactez votre FAI ou changez votre offre internet.".to_string(),
        ),
        Grade::Fair => recommendations.push(
            "La vitesse de téléchargement est modérée — envisagez une offre supérieure pour un usage intensif.".to_string(),
        ),
        _ => {}
    }

    match grades.upload {
        Grade::Poor => recommendations.push(
            "La vitesse d'envoi est très faible — les visioconférences et transferts de fichiers volumineux seront affectés.".to_string(),
        ),
        Grade::Fair => recommendations.push(
            "La vitesse d'envoi est limitée — les visioconférences avec plusieurs participants peuvent être perturbées.".to_string(),
        ),
        _ => {}
    }

    match grades.latency {
        Grade::Poor => recommendations.push(
            "Latence élevée détectée — vérifiez la congestion réseau ou privilégiez une connexion filaire plutôt que le WiFi.".to_string(),
        ),
        Grade::Fair => recommendations.push(
            "La latence est élevée — les applications temps réel comme la VoIP peuvent être occasionnellement affectées.".to_string(),
        ),
        _ => {}
    }

    if grades.jitter <= Grade::Fair {
        recommendations.push(
            "Une gigue élevée indique une instabilité réseau — cela provoque souvent des coupures audio/vidéo lors des appels.".to_string(),
        );
    }

    match grades.packet_loss {
        Grade::Poor => recommendations.push(
            "Des pertes de paquets importantes ont été détectées — vérifiez les câbles, le firmware du routeur et le signal WiFi.".to_string(),
        ),
        Grade::Fair => recommendations.push(
            "Des pertes de paquets occasionnelles — vérifiez l'emplacement du routeur et réduisez les sources d'interférence.".to_string(),
        ),
        _ => {}
    }

    match grades.consistency {
        Grade::Poor => recommendations.push(
            "La vitesse est très instable — votre connexion est peut-être bridée ou subit une congestion.".to_string(),
        ),
        Grade::Fair => recommendations.push(
            "La vitesse fluctue — envisagez une ligne internet dédiée pour des performances plus prévisibles.".to_string(),
        ),
        _ => {}
    }

    if raw.mbps_per_user < VIDEO_CALL_FLOOR_MBPS && raw.download_mbps > 0.0 {
        let zone_context = if multi_zone {
            format!(" ({} utilisateurs dans la zone)", raw.effective_user_count)
        } else {
            String::new()
        };
        recommendations.push(format!(
            "À {:.2} Mbps par utilisateur{}, la visioconférence sera difficile — augmentez la bande passante ou réduisez le nombre d'utilisateurs simultanés.",
            raw.mbps_per_user, zone_context
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Votre connexion est performante sur toutes les métriques — aucune action immédiate requise.".to_string(),
        );
        if score >= KEEP_SETUP_SCORE {
            recommendations.push(
                "Maintenez votre configuration actuelle et retestez après tout changement d'infrastructure.".to_string(),
            );
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn all_grades(grade: Grade) -> GradedMetrics {
        GradedMetrics {
            download: grade,
            upload: grade,
            latency: grade,
            jitter: grade,
            packet_loss: grade,
            dns: grade,
            consistency: grade,
        }
    }

    #[test]
    fn test_verdict_headline_tiers() {
        assert!(verdict_headline(100).starts_with("Connectivité excellente"));
        assert!(verdict_headline(85).starts_with("Connectivité excellente"));
        assert!(verdict_headline(84).starts_with("Bonne connectivité"));
        assert!(verdict_headline(70).starts_with("Bonne connectivité"));
        assert!(verdict_headline(69).starts_with("Connectivité moyenne"));
        assert!(verdict_headline(50).starts_with("Connectivité moyenne"));
        assert!(verdict_headline(49).starts_with("Connectivité faible"));
        assert!(verdict_headline(30).starts_with("Connectivité faible"));
        assert!(verdict_headline(29).starts_with("Problèmes critiques"));
        assert!(verdict_headline(0).starts_with("Problèmes critiques"));
    }

    #[test]
    fn test_per_user_summary_tiers() {
        assert!(per_user_summary(12.5, 8, false).contains("marge confortable"));
        assert!(per_user_summary(6.0, 8, false).contains("travail standard"));
        assert!(per_user_summary(3.0, 8, false).contains("appels vidéo"));
        assert!(per_user_summary(0.5, 8, false).contains("communication de base"));
        assert!(per_user_summary(0.05, 8, false).contains("critiquement basse"));
    }

    #[test]
    fn test_per_user_summary__context_depends_on_zone() {
        let single = per_user_summary(5.0, 12, false);
        assert!(single.contains("12 utilisateurs simultanés"));

        let zoned = per_user_summary(5.0, 12, true);
        assert!(zoned.contains("12 utilisateurs dans votre zone WiFi"));
    }

    #[test]
    fn test_per_user_summary__two_decimals() {
        assert!(per_user_summary(5.0, 10, false).contains("5.00 Mbps"));
        assert!(per_user_summary(2.345, 10, false).contains("2.35 Mbps"));
    }

    #[test]
    fn test_build_recommendations__all_poor_covers_every_metric() {
        let raw = RawMetrics {
            download_mbps: 5.0,
            mbps_per_user: 0.5,
            effective_user_count: 10,
            ..Default::default()
        };
        let recommendations = build_recommendations(&raw, &all_grades(Grade::Poor), 10, false);

        assert_eq!(recommendations.len(), 7);
        assert!(recommendations[0].contains("téléchargement"));
        assert!(recommendations[1].contains("envoi"));
        assert!(recommendations[2].contains("Latence"));
        assert!(recommendations[3].contains("gigue"));
        assert!(recommendations[4].contains("pertes de paquets"));
        assert!(recommendations[5].contains("instable"));
        assert!(recommendations[6].contains("0.50 Mbps par utilisateur"));
    }

    #[test]
    fn test_build_recommendations__jitter_shares_one_message() {
        let raw = RawMetrics {
            download_mbps: 150.0,
            mbps_per_user: 15.0,
            ..Default::default()
        };
        let fair_jitter = GradedMetrics {
            jitter: Grade::Fair,
            ..all_grades(Grade::Excellent)
        };
        let poor_jitter = GradedMetrics {
            jitter: Grade::Poor,
            ..all_grades(Grade::Excellent)
        };

        let from_fair = build_recommendations(&raw, &fair_jitter, 95, false);
        let from_poor = build_recommendations(&raw, &poor_jitter, 95, false);
        assert_eq!(from_fair, from_poor);
        assert_eq!(from_fair.len(), 1);
        assert!(from_fair[0].contains("gigue"));
    }

    #[test]
    fn test_build_recommendations__clean_run_gets_positive_message() {
        let raw = RawMetrics {
            download_mbps: 150.0,
            mbps_per_user: 15.0,
            ..Default::default()
        };
        let recommendations = build_recommendations(&raw, &all_grades(Grade::Excellent), 95, false);

        assert_eq!(recommendations.len(), 2);
        assert!(recommendations[0].contains("performante sur toutes les métriques"));
        assert!(recommendations[1].contains("Maintenez votre configuration"));
    }

    #[test]
    fn test_build_recommendations__positive_message_without_closing_note() {
        let raw = RawMetrics {
            download_mbps: 150.0,
            mbps_per_user: 15.0,
            ..Default::default()
        };
        let recommendations = build_recommendations(&raw, &all_grades(Grade::Excellent), 87, false);

        assert_eq!(recommendations.len(), 1);
    }

    #[test]
    fn test_build_recommendations__per_user_mentions_zone() {
        let raw = RawMetrics {
            download_mbps: 20.0,
            mbps_per_user: 1.0,
            effective_user_count: 20,
            ..Default::default()
        };
        let recommendations = build_recommendations(&raw, &all_grades(Grade::Excellent), 80, true);

        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].contains("(20 utilisateurs dans la zone)"));
    }

    #[test]
    fn test_build_recommendations__per_user_skipped_without_download() {
        let raw = RawMetrics {
            download_mbps: 0.0,
            mbps_per_user: 0.0,
            ..Default::default()
        };
        let grades = GradedMetrics {
            download: Grade::Poor,
            ..all_grades(Grade::Excellent)
        };
        let recommendations = build_recommendations(&raw, &grades, 40, false);

        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].contains("téléchargement"));
    }
}
