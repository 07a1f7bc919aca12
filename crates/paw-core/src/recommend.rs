//! Recommendation rule engine.
//!
//! Independent threshold rules over the compared set, each producing one
//! actionable suggestion naming the pets it applies to. All rules are
//! evaluated (none are exclusive) in fixed order, and a generic
//! periodic-comparison suggestion always closes the list.

use crate::insight::SENIOR_AGE_MONTHS;
use crate::summary::PetHealth;

/// Concerning percentage above which a veterinary visit is recommended.
pub const VET_CONCERNING_PCT: u32 = 20;

/// Warning percentage above which diet and routine changes are suggested.
pub const DIET_WARNING_PCT: u32 = 30;

/// Weekly logging rate below which more frequent tracking is suggested.
pub const MIN_WEEKLY_LOGS: f64 = 3.0;

/// Pet count at which a shared monitoring plan is suggested.
pub const MULTI_PET_MIN: usize = 3;

/// Separator used when naming multiple pets in one recommendation.
const NAME_SEPARATOR: &str = ", ";

/// Evaluate all recommendation rules in fixed order.
pub fn generate_recommendations(pets: &[PetHealth<'_>]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let concerning = names_matching(pets, |p| p.stats.concerning_percentage > VET_CONCERNING_PCT);
    if !concerning.is_empty() {
        recommendations.push(format!(
            "Schedule a veterinary consultation for {}: a notable share of recent observations \
             is concerning.",
            concerning
        ));
    }

    let warning = names_matching(pets, |p| p.stats.warning_percentage > DIET_WARNING_PCT);
    if !warning.is_empty() {
        recommendations.push(format!(
            "Review diet and daily routine for {}: warning signs keep appearing in their logs.",
            warning
        ));
    }

    let sparse = names_matching(pets, |p| p.stats.average_per_week < MIN_WEEKLY_LOGS);
    if !sparse.is_empty() {
        recommendations.push(format!(
            "Log observations for {} more often; a few entries per week make trends much easier \
             to read.",
            sparse
        ));
    }

    let seniors = names_matching(pets, |p| {
        p.profile
            .age_months
            .map_or(false, |age| age > SENIOR_AGE_MONTHS)
    });
    if !seniors.is_empty() {
        recommendations.push(format!(
            "Keep up regular wellness checkups for {}: senior pets benefit from a steady exam \
             cadence.",
            seniors
        ));
    }

    if pets.len() >= MULTI_PET_MIN {
        recommendations.push(
            "With several pets under comparison, a shared monitoring plan helps keep feeding, \
             exercise, and vet schedules consistent."
                .to_string(),
        );
    }

    recommendations.push(
        "Re-run this comparison periodically to catch changes in your pets' health early."
            .to_string(),
    );

    recommendations
}

fn names_matching(
    pets: &[PetHealth<'_>],
    predicate: impl Fn(&PetHealth<'_>) -> bool,
) -> String {
    pets.iter()
        .filter(|p| predicate(p))
        .map(|p| p.profile.name.as_str())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}
