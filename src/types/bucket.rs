//! Enumerated bucket identifiers and their human-readable labels
//!
//! Internal logic dispatches on the enums; label text is only rendered for
//! grouping keys and presentation.

use serde::{Deserialize, Serialize};

use super::{SpacingThresholds, VolumeThresholds};

/// How bucket labels are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// `below 4`, `(4, 6]`, `above 10.01` / `≤ 10`, `(10, 20]`, `> 20.01`
    #[default]
    Interval,
    /// Field-team wording: `menor a 4.0 acres`, `Cum <= 10.0`, ...
    Legacy,
}

impl LabelStyle {
    fn number(self, value: f64) -> String {
        // -0.0 + 0.0 == +0.0, so a negative-zero threshold prints as "0"
        let value = value + 0.0;
        match self {
            Self::Interval => format!("{value}"),
            Self::Legacy => {
                // whole numbers keep one decimal place ("4.0")
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
                    format!("{value:.1}")
                } else {
                    format!("{value}")
                }
            }
        }
    }
}

/// Legacy labels start each interior range one hundredth above its lower bound.
const LEGACY_RANGE_STEP: f64 = 0.01;

// ============================================================================
// Spacing
// ============================================================================

/// Acreage bucket, ordered from tightest to widest spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpacingBucket {
    /// `acres <= x1`
    BelowX1,
    /// `x1 < acres <= x2`
    X1ToX2,
    /// `x2 < acres <= x3`
    X2ToX3,
    /// `x3 < acres <= x4`
    X3ToX4,
    /// `acres > x4` (labelled with `x5`), or non-finite acreage
    AboveX5,
}

impl SpacingBucket {
    pub const ALL: [Self; 5] = [
        Self::BelowX1,
        Self::X1ToX2,
        Self::X2ToX3,
        Self::X3ToX4,
        Self::AboveX5,
    ];

    pub fn is_top(self) -> bool {
        self == Self::AboveX5
    }

    pub fn label(self, t: &SpacingThresholds, style: LabelStyle) -> String {
        let n = |v: f64| style.number(v);
        match style {
            LabelStyle::Interval => match self {
                Self::BelowX1 => format!("below {}", n(t.x1)),
                Self::X1ToX2 => format!("({}, {}]", n(t.x1), n(t.x2)),
                Self::X2ToX3 => format!("({}, {}]", n(t.x2), n(t.x3)),
                Self::X3ToX4 => format!("({}, {}]", n(t.x3), n(t.x4)),
                Self::AboveX5 => format!("above {}", n(t.x5)),
            },
            LabelStyle::Legacy => match self {
                Self::BelowX1 => format!("menor a {} acres", n(t.x1)),
                Self::X1ToX2 => format!("{} a {} acres", n(t.x1 + LEGACY_RANGE_STEP), n(t.x2)),
                Self::X2ToX3 => format!("{} a {} acres", n(t.x2 + LEGACY_RANGE_STEP), n(t.x3)),
                Self::X3ToX4 => format!("{} a {} acres", n(t.x3 + LEGACY_RANGE_STEP), n(t.x4)),
                Self::AboveX5 => format!("mayor a {} acres", n(t.x5)),
            },
        }
    }
}

// ============================================================================
// Volume
// ============================================================================

/// Cumulative-production bucket, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VolumeBucket {
    /// `cum <= y1`
    AtMostY1,
    /// `y1 < cum <= y2`
    Y1ToY2,
    /// `cum > y2` (labelled with `y3`)
    AboveY3,
}

impl VolumeBucket {
    pub const ALL: [Self; 3] = [Self::AtMostY1, Self::Y1ToY2, Self::AboveY3];

    pub fn is_top(self) -> bool {
        self == Self::AboveY3
    }

    pub fn label(self, t: &VolumeThresholds, style: LabelStyle) -> String {
        let n = |v: f64| style.number(v);
        match style {
            LabelStyle::Interval => match self {
                Self::AtMostY1 => format!("≤ {}", n(t.y1)),
                Self::Y1ToY2 => format!("({}, {}]", n(t.y1), n(t.y2)),
                Self::AboveY3 => format!("> {}", n(t.y3)),
            },
            LabelStyle::Legacy => match self {
                Self::AtMostY1 => format!("Cum <= {}", n(t.y1)),
                Self::Y1ToY2 => format!("{} < Cum <= {}", n(t.y1 + LEGACY_RANGE_STEP), n(t.y2)),
                Self::AboveY3 => format!("Cum > {}", n(t.y3)),
            },
        }
    }
}
