use serde::{Deserialize, Serialize};

use crate::core::AxisRange;

/// Unit of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    #[must_use]
    pub const fn millis_per_unit(self) -> f64 {
        match self {
            Self::Milliseconds => 1.0,
            Self::Seconds => 1_000.0,
        }
    }
}

/// Axis semantic used to partition zoom propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Time(TimeUnit),
    Parameter,
}

impl AxisKind {
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Self::Time(_))
    }

    /// Whether zoom state may flow between charts of these kinds.
    #[must_use]
    pub const fn shares_axis_with(self, other: Self) -> bool {
        self.is_time() == other.is_time()
    }

    /// Re-expresses `range` from this axis' units in `target`'s units.
    ///
    /// Returns `None` for kinds that do not share an axis.
    #[must_use]
    pub fn convert_range(self, range: AxisRange, target: Self) -> Option<AxisRange> {
        match (self, target) {
            (Self::Time(from), Self::Time(to)) => {
                Some(range.scaled(from.millis_per_unit() / to.millis_per_unit()))
            }
            (Self::Parameter, Self::Parameter) => Some(range),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisKind, TimeUnit};
    use crate::core::AxisRange;

    #[test]
    fn milliseconds_convert_to_seconds() {
        let range = AxisRange::new(1_000.0, 5_000.0).expect("range");
        let converted = AxisKind::Time(TimeUnit::Milliseconds)
            .convert_range(range, AxisKind::Time(TimeUnit::Seconds))
            .expect("time to time");
        assert_eq!((converted.min, converted.max), (1.0, 5.0));
    }

    #[test]
    fn time_never_converts_to_parameter() {
        let range = AxisRange::new(0.0, 1.0).expect("range");
        assert!(
            AxisKind::Time(TimeUnit::Milliseconds)
                .convert_range(range, AxisKind::Parameter)
                .is_none()
        );
    }
}
