use serde::Serialize;

use super::super::intake::domain::CostRange;

pub(crate) const HIGHLY_ELIGIBLE_THRESHOLD: u8 = 75;
pub(crate) const LIKELY_ELIGIBLE_THRESHOLD: u8 = 50;

/// Eligibility bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    HighlyEligible,
    LikelyEligible,
    RequiresReview,
}

/// How the dashboard should present a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Positive,
    Informational,
    Attention,
}

impl EligibilityStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGHLY_ELIGIBLE_THRESHOLD {
            EligibilityStatus::HighlyEligible
        } else if score >= LIKELY_ELIGIBLE_THRESHOLD {
            EligibilityStatus::LikelyEligible
        } else {
            EligibilityStatus::RequiresReview
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::HighlyEligible => "Highly Eligible",
            EligibilityStatus::LikelyEligible => "Likely Eligible",
            EligibilityStatus::RequiresReview => "Requires Review",
        }
    }

    pub const fn tone(self) -> StatusTone {
        match self {
            EligibilityStatus::HighlyEligible => StatusTone::Positive,
            EligibilityStatus::LikelyEligible => StatusTone::Informational,
            EligibilityStatus::RequiresReview => StatusTone::Attention,
        }
    }

    pub const fn next_steps(self) -> [&'static str; 3] {
        match self {
            EligibilityStatus::HighlyEligible => [
                "Your assessment shows strong potential for government aid approval",
                "Our application specialist will contact you within 1 business day",
                "We'll begin preparing your government application immediately",
            ],
            EligibilityStatus::LikelyEligible => [
                "Your property shows good potential for government aid",
                "Our team will review your case and provide strategic guidance",
                "We may recommend additional documentation to strengthen your application",
            ],
            EligibilityStatus::RequiresReview => [
                "Your case requires detailed review by our specialists",
                "We'll explore alternative aid strategies and program options",
                "Our team will contact you to discuss your specific situation",
            ],
        }
    }
}

/// Potential funding shown next to the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum FundingEstimate {
    Amount(u32),
    ToBeDetermined,
}

impl FundingEstimate {
    pub fn label(self) -> String {
        match self {
            FundingEstimate::Amount(amount) => format_dollars(amount),
            FundingEstimate::ToBeDetermined => "To be determined".to_string(),
        }
    }
}

pub(crate) fn estimate_funding(
    status: EligibilityStatus,
    cost: Option<CostRange>,
) -> FundingEstimate {
    let tiers: [u32; 4] = match status {
        EligibilityStatus::HighlyEligible => [100_000, 75_000, 50_000, 25_000],
        EligibilityStatus::LikelyEligible => [75_000, 50_000, 35_000, 20_000],
        EligibilityStatus::RequiresReview => return FundingEstimate::ToBeDetermined,
    };

    let amount = match cost {
        Some(CostRange::From76kTo100k) => tiers[0],
        Some(CostRange::From51kTo75k) => tiers[1],
        Some(CostRange::From26kTo50k) => tiers[2],
        Some(CostRange::UpTo25k) | None => tiers[3],
    };
    FundingEstimate::Amount(amount)
}

/// `$75,000` style whole-dollar formatting.
pub fn format_dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}
