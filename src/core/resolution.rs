use std::fmt;

use serde::{Deserialize, Serialize};

/// Sampling fidelity tier. Ordered from coarsest to finest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Preview,
    Normal,
    High,
    Full,
}

impl Resolution {
    pub const ALL: [Self; 4] = [Self::Preview, Self::Normal, Self::High, Self::Full];

    /// Maximum number of points per series; `None` means unlimited.
    #[must_use]
    pub const fn point_budget(self) -> Option<usize> {
        match self {
            Self::Preview => Some(500),
            Self::Normal => Some(2_000),
            Self::High => Some(5_000),
            Self::Full => None,
        }
    }

    /// Next finer tier, or `None` at `Full`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Preview => Some(Self::Normal),
            Self::Normal => Some(Self::High),
            Self::High => Some(Self::Full),
            Self::Full => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Resolution;

    #[test]
    fn tiers_upgrade_in_budget_order() {
        let mut tier = Resolution::Preview;
        let mut budgets = vec![tier.point_budget()];
        while let Some(next) = tier.next() {
            assert!(next > tier);
            tier = next;
            budgets.push(tier.point_budget());
        }
        assert_eq!(budgets, vec![Some(500), Some(2_000), Some(5_000), None]);
    }
}
