use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Probabilities below this belong to the Low tier
pub const LOW_RISK_CEILING: f64 = 0.3;

/// Probabilities at or above this belong to the High tier
pub const HIGH_RISK_FLOOR: f64 = 0.6;

/// Probabilities strictly above this are labeled Leave
pub const LEAVE_THRESHOLD: f64 = 0.5;

/// Coarse attrition risk bucket derived from the classifier probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Map an attrition probability to its tier
    ///
    /// Boundary values belong to the lower tier: strictly below 0.3 is Low,
    /// strictly below 0.6 is Medium, everything else is High.
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_CEILING {
            RiskTier::Low
        } else if probability < HIGH_RISK_FLOOR {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Binary attrition outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum AttritionLabel {
    Stay,
    Leave,
}

impl AttritionLabel {
    /// Derive the label from a probability: Leave iff strictly above 0.5
    pub fn from_probability(probability: f64) -> Self {
        if probability > LEAVE_THRESHOLD {
            AttritionLabel::Leave
        } else {
            AttritionLabel::Stay
        }
    }

    /// Single-letter flag used by the corpus file format
    pub fn as_flag(&self) -> &'static str {
        match self {
            AttritionLabel::Leave => "Y",
            AttritionLabel::Stay => "N",
        }
    }

    /// Parse the corpus flag
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "Y" => Some(AttritionLabel::Leave),
            "N" => Some(AttritionLabel::Stay),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_probability(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.29), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.30), RiskTier::Medium);
        assert_eq!(RiskTier::from_probability(0.59), RiskTier::Medium);
        assert_eq!(RiskTier::from_probability(0.60), RiskTier::High);
        assert_eq!(RiskTier::from_probability(1.0), RiskTier::High);
    }

    #[test]
    fn test_tier_is_monotone() {
        let mut previous = RiskTier::Low;
        for step in 0..=100 {
            let tier = RiskTier::from_probability(step as f64 / 100.0);
            let rank = |t: RiskTier| match t {
                RiskTier::Low => 0,
                RiskTier::Medium => 1,
                RiskTier::High => 2,
            };
            assert!(rank(tier) >= rank(previous));
            previous = tier;
        }
    }

    #[test]
    fn test_label_threshold_is_strict() {
        assert_eq!(AttritionLabel::from_probability(0.5), AttritionLabel::Stay);
        assert_eq!(AttritionLabel::from_probability(0.51), AttritionLabel::Leave);
    }

    #[test]
    fn test_flag_round_trip() {
        assert_eq!(AttritionLabel::Leave.as_flag(), "Y");
        assert_eq!(AttritionLabel::Stay.as_flag(), "N");
        assert_eq!(AttritionLabel::from_flag("Y"), Some(AttritionLabel::Leave));
        assert_eq!(AttritionLabel::from_flag("N"), Some(AttritionLabel::Stay));
        assert_eq!(AttritionLabel::from_flag("maybe"), None);
    }
}
