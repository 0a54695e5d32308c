use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{parse_leading_int, Percent};

/// Score assumed when a band label carries no leading number.
pub const DEFAULT_REPRESENTATIVE_SCORE: u32 = 750;

/// Bureau score bands as offered by the eligibility and lead forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    /// 800 and above
    Exceptional,
    /// 750 to 799
    Excellent,
    /// 700 to 749
    Good,
    /// 650 to 699
    Fair,
    /// 600 to 649
    Poor,
    BelowSixHundred,
    Unknown,
}

impl CreditBand {
    /// Classify a form label ("800+", "750-799", "Below 600", "Don't Know")
    /// or a bare score ("712").
    pub fn parse(label: &str) -> Self {
        match parse_leading_int(label) {
            Some(score) => Self::from_score(score),
            None if label.trim().to_lowercase().starts_with("below") => {
                CreditBand::BelowSixHundred
            }
            None => CreditBand::Unknown,
        }
    }

    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= 800 => CreditBand::Exceptional,
            s if s >= 750 => CreditBand::Excellent,
            s if s >= 700 => CreditBand::Good,
            s if s >= 650 => CreditBand::Fair,
            s if s >= 600 => CreditBand::Poor,
            _ => CreditBand::BelowSixHundred,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditBand::Exceptional => "800+",
            CreditBand::Excellent => "750-799",
            CreditBand::Good => "700-749",
            CreditBand::Fair => "650-699",
            CreditBand::Poor => "600-649",
            CreditBand::BelowSixHundred => "Below 600",
            CreditBand::Unknown => "Unknown",
        }
    }

    /// Indicative annual rate used by the quick eligibility check.
    pub fn quick_check_rate(&self) -> Percent {
        match self {
            CreditBand::Exceptional | CreditBand::Excellent => dec!(8.5),
            CreditBand::Good => dec!(9.5),
            CreditBand::Fair => dec!(10.5),
            CreditBand::Poor => dec!(11.5),
            CreditBand::BelowSixHundred | CreditBand::Unknown => dec!(12.0),
        }
    }
}

impl std::fmt::Display for CreditBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score reported back for a band label: its leading number, or
/// [`DEFAULT_REPRESENTATIVE_SCORE`] when there is none ("Below 600" included).
pub fn representative_score(label: &str) -> u32 {
    parse_leading_int(label)
        .filter(|s| *s > 0)
        .and_then(|s| u32::try_from(s).ok())
        .unwrap_or(DEFAULT_REPRESENTATIVE_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_labels() {
        assert_eq!(CreditBand::parse("800+"), CreditBand::Exceptional);
        assert_eq!(CreditBand::parse("750+"), CreditBand::Excellent);
        assert_eq!(CreditBand::parse("750-799"), CreditBand::Excellent);
        assert_eq!(CreditBand::parse("700-749"), CreditBand::Good);
        assert_eq!(CreditBand::parse("650-699"), CreditBand::Fair);
        assert_eq!(CreditBand::parse("600-649"), CreditBand::Poor);
        assert_eq!(CreditBand::parse("Below 600"), CreditBand::BelowSixHundred);
        assert_eq!(CreditBand::parse("Don't Know"), CreditBand::Unknown);
        assert_eq!(CreditBand::parse(""), CreditBand::Unknown);
    }

    #[test]
    fn test_bare_scores_are_bucketed() {
        assert_eq!(CreditBand::parse("712"), CreditBand::Good);
        assert_eq!(CreditBand::parse("540"), CreditBand::BelowSixHundred);
    }

    #[test]
    fn test_quick_check_rates() {
        assert_eq!(CreditBand::parse("750+").quick_check_rate(), dec!(8.5));
        assert_eq!(CreditBand::parse("800+").quick_check_rate(), dec!(8.5));
        assert_eq!(CreditBand::parse("600-649").quick_check_rate(), dec!(11.5));
        assert_eq!(CreditBand::parse("Below 600").quick_check_rate(), dec!(12.0));
    }

    #[test]
    fn test_representative_score() {
        assert_eq!(representative_score("700-749"), 700);
        assert_eq!(representative_score("750+"), 750);
        assert_eq!(representative_score("Below 600"), 750);
        assert_eq!(representative_score(""), 750);
    }
}
