// src/domain/risk.rs

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

const CLAIM_POINTS: u32 = 10;
const CLAIM_POINTS_CAP: u32 = 30;
const HIGH_VALUE_CLAIM_AMOUNT: f64 = 20_000.0;
const HIGH_VALUE_CLAIM_POINTS: u32 = 5;
const RECENT_WORK_WINDOW_MONTHS: u32 = 24;
const RECENT_WORK_THRESHOLD: usize = 5;
const RECENT_WORK_POINTS: u32 = 15;
const RENTAL_YEARS_THRESHOLD: f64 = 5.0;
const RENTAL_POINTS: u32 = 10;
const OWNERSHIP_CHANGES_THRESHOLD: usize = 4;
const OWNERSHIP_POINTS: u32 = 10;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone)]
pub struct InsuranceClaim {
    pub amount: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RentalPeriod {
    pub start_date: NaiveDate,
    /// `None` while the rental is still active.
    pub end_date: Option<NaiveDate>,
}

/// Everything the score needs, already loaded from the property's child tables.
#[derive(Debug, Clone, Default)]
pub struct RiskInputs {
    pub year_built: Option<i64>,
    pub insurance_claims: Vec<InsuranceClaim>,
    pub work_event_dates: Vec<NaiveDate>,
    pub rental_periods: Vec<RentalPeriod>,
    pub ownership_event_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    pub score: u32,
    pub level: RiskLevel,
}

/// Additive point score in [0, 100], evaluated as of `today`.
pub fn compute_risk_score(inputs: &RiskInputs, today: NaiveDate) -> RiskScore {
    let mut score: u32 = 0;

    let claim_count = inputs.insurance_claims.len() as u32;
    score += (claim_count * CLAIM_POINTS).min(CLAIM_POINTS_CAP);

    let high_value = inputs
        .insurance_claims
        .iter()
        .filter(|c| c.amount.is_some_and(|a| a > HIGH_VALUE_CLAIM_AMOUNT))
        .count() as u32;
    score += high_value * HIGH_VALUE_CLAIM_POINTS;

    let window_start = today
        .checked_sub_months(Months::new(RECENT_WORK_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    let recent_work = inputs
        .work_event_dates
        .iter()
        .filter(|d| **d >= window_start && **d <= today)
        .count();
    if recent_work > RECENT_WORK_THRESHOLD {
        score += RECENT_WORK_POINTS;
    }

    if rental_years(&inputs.rental_periods, today) > RENTAL_YEARS_THRESHOLD {
        score += RENTAL_POINTS;
    }

    if let Some(year_built) = inputs.year_built {
        let age = i64::from(today.year()) - year_built;
        if age > 30 {
            score += 10;
        }
        if age > 50 {
            score += 5;
        }
    }

    if inputs.ownership_event_count > OWNERSHIP_CHANGES_THRESHOLD {
        score += OWNERSHIP_POINTS;
    }

    let score = score.min(MAX_SCORE);
    RiskScore {
        score,
        level: RiskLevel::from_score(score),
    }
}

/// Summed rental duration in years. Open-ended rentals run until `today`.
fn rental_years(periods: &[RentalPeriod], today: NaiveDate) -> f64 {
    let days: i64 = periods
        .iter()
        .map(|p| {
            let end = p.end_date.unwrap_or(today);
            (end - p.start_date).num_days().max(0)
        })
        .sum();
    days as f64 / 365.25
}
