//! Insight rule engine.
//!
//! Stateless evaluation of fixed threshold rules over the compared set,
//! producing human-readable observations. The health-spread triplet is
//! mutually exclusive and resolved once as [`HealthSpread`]; the remaining
//! rules are independent and additive. Rule order is fixed, so the output
//! list is deterministic for a given input.

use crate::summary::PetHealth;

/// Healthy-percentage spread above which the disparity insight fires.
pub const DISPARITY_SPREAD: u32 = 30;

/// Mean healthy percentage above which the set counts as doing well.
pub const STRONG_MEAN_PCT: f64 = 80.0;

/// Mean healthy percentage below which the set needs attention.
pub const WEAK_MEAN_PCT: f64 = 60.0;

/// Age in months beyond which a pet counts as senior (7 years).
pub const SENIOR_AGE_MONTHS: u32 = 84;

/// Healthy-percentage gap between age groups that flags age-related decline.
pub const AGE_GAP_PCT: f64 = 15.0;

/// Breed-group mean healthy percentage below which the breed insight fires.
pub const BREED_WEAK_MEAN_PCT: f64 = 60.0;

/// Factor between max and min weekly logging rates that flags inconsistency.
pub const FREQUENCY_SPREAD_FACTOR: f64 = 2.0;

/// Resolution of the mutually exclusive health-spread triplet.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HealthSpread {
    /// Spread between best and worst healthy percentage exceeds the bound.
    Disparity { max: u32, min: u32 },
    /// No disparity and the mean is strong.
    Good { mean: f64 },
    /// No disparity and the mean is weak.
    Poor { mean: f64 },
    /// Nothing noteworthy about the spread.
    Balanced,
}

fn resolve_spread(pets: &[PetHealth<'_>]) -> HealthSpread {
    let max = pets.iter().map(|p| p.stats.healthy_percentage).max();
    let min = pets.iter().map(|p| p.stats.healthy_percentage).min();
    let (Some(max), Some(min)) = (max, min) else {
        return HealthSpread::Balanced;
    };

    if max - min > DISPARITY_SPREAD {
        return HealthSpread::Disparity { max, min };
    }

    let mean = mean_healthy(pets);
    if mean > STRONG_MEAN_PCT {
        HealthSpread::Good { mean }
    } else if mean < WEAK_MEAN_PCT {
        HealthSpread::Poor { mean }
    } else {
        HealthSpread::Balanced
    }
}

fn mean_healthy(pets: &[PetHealth<'_>]) -> f64 {
    if pets.is_empty() {
        return 0.0;
    }
    let sum: f64 = pets
        .iter()
        .map(|p| f64::from(p.stats.healthy_percentage))
        .sum();
    sum / pets.len() as f64
}

/// Evaluate all insight rules in fixed order.
pub fn generate_insights(pets: &[PetHealth<'_>]) -> Vec<String> {
    let mut insights = Vec::new();

    match resolve_spread(pets) {
        HealthSpread::Disparity { max, min } => {
            insights.push(format!(
                "There is a large health gap between your pets: the best is at {}% healthy \
                 observations while the lowest is at {}%. The pet at the low end may need a closer look.",
                max, min
            ));
        }
        HealthSpread::Good { mean } => {
            insights.push(format!(
                "Overall your pets are doing well: on average {:.0}% of observations are healthy.",
                mean
            ));
        }
        HealthSpread::Poor { mean } => {
            insights.push(format!(
                "Your pets' health needs attention: only {:.0}% of observations are healthy on average.",
                mean
            ));
        }
        HealthSpread::Balanced => {}
    }

    if let Some(insight) = age_insight(pets) {
        insights.push(insight);
    }
    insights.extend(breed_insights(pets));
    if let Some(insight) = frequency_insight(pets) {
        insights.push(insight);
    }

    insights
}

/// Seniors trailing younger pets by more than the documented gap.
fn age_insight(pets: &[PetHealth<'_>]) -> Option<String> {
    let mut older = Vec::new();
    let mut younger = Vec::new();
    for pet in pets {
        match pet.profile.age_months {
            Some(age) if age > SENIOR_AGE_MONTHS => older.push(*pet),
            Some(_) => younger.push(*pet),
            None => {}
        }
    }
    if older.is_empty() || younger.is_empty() {
        return None;
    }

    let older_avg = mean_healthy(&older);
    let younger_avg = mean_healthy(&younger);
    if older_avg < younger_avg - AGE_GAP_PCT {
        Some(
            "Your senior pets are showing noticeably lower health scores than the younger ones; \
             age-related changes may be worth discussing at the next vet visit."
                .to_string(),
        )
    } else {
        None
    }
}

/// One insight per breed group of two or more pets with a weak group mean.
fn breed_insights(pets: &[PetHealth<'_>]) -> Vec<String> {
    // First-appearance breed order keeps the output stable.
    let mut groups: Vec<(&str, Vec<PetHealth<'_>>)> = Vec::new();
    for pet in pets {
        let Some(breed) = pet.profile.breed.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == breed) {
            Some((_, members)) => members.push(*pet),
            None => groups.push((breed, vec![*pet])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .filter(|(_, members)| mean_healthy(members) < BREED_WEAK_MEAN_PCT)
        .map(|(breed, members)| {
            format!(
                "Your {} {}s are averaging {:.0}% healthy observations; breed-specific factors \
                 may be at play and are worth mentioning to your vet.",
                breed,
                members[0].profile.species,
                mean_healthy(&members)
            )
        })
        .collect()
}

/// Logging frequency varying enough to undermine comparability.
fn frequency_insight(pets: &[PetHealth<'_>]) -> Option<String> {
    let max = pets
        .iter()
        .map(|p| p.stats.average_per_week)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = pets
        .iter()
        .map(|p| p.stats.average_per_week)
        .fold(f64::INFINITY, f64::min);
    if !max.is_finite() || !min.is_finite() {
        return None;
    }

    if max > FREQUENCY_SPREAD_FACTOR * min {
        Some(
            "Logging frequency varies a lot between your pets; tracking them at a similar pace \
             makes comparisons more reliable."
                .to_string(),
        )
    } else {
        None
    }
}
