//! Severity color shared by segment metrics, prediction buckets and the
//! ranked-route labels.
//!
//! Three tiers carry meaning (clear / moderate / heavy).  `Neutral` is the
//! color of a degenerate measurement (zero-length or zero-duration step) and
//! ranks like `Clear` wherever colors are compared.

use serde::{Deserialize, Serialize};

/// A three-tier congestion indicator plus a neutral "no data" value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    /// Free-flowing traffic; also the color of the best-ranked route.
    #[default]
    Clear,
    /// Noticeable slowdown; also the color of the alternative route.
    Moderate,
    /// Heavy congestion; also the color of the slowest route.
    Heavy,
    /// No usable measurement.
    Neutral,
}

impl SeverityColor {
    /// 0 = best, 1 = middle, 2 = worst.  `Neutral` ranks as best.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            SeverityColor::Clear | SeverityColor::Neutral => 0,
            SeverityColor::Moderate => 1,
            SeverityColor::Heavy    => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityColor::Clear    => "clear",
            SeverityColor::Moderate => "moderate",
            SeverityColor::Heavy    => "heavy",
            SeverityColor::Neutral  => "neutral",
        }
    }
}

impl std::fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
