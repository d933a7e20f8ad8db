use crate::core::types::AxisRange;
use crate::error::{ChartError, ChartResult};

/// Linear mapping between one data-space axis and a pixel extent.
///
/// Vertical scales are `inverted`: pixel `0` is the top edge and maps to the
/// domain maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    inverted: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            inverted: false,
        })
    }

    pub fn from_range(range: AxisRange) -> ChartResult<Self> {
        Self::new(range.min, range.max)
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, extent_px: u32) -> ChartResult<f64> {
        validate_extent(extent_px)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        let normalized = if self.inverted {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(normalized * f64::from(extent_px))
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: u32) -> ChartResult<f64> {
        validate_extent(extent_px)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(extent_px);
        let normalized = if self.inverted {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(self.domain_start + normalized * span)
    }

    /// Data-space distance covered by one pixel.
    pub fn units_per_pixel(self, extent_px: u32) -> ChartResult<f64> {
        validate_extent(extent_px)?;
        Ok((self.domain_end - self.domain_start) / f64::from(extent_px))
    }
}

fn validate_extent(extent_px: u32) -> ChartResult<()> {
    if extent_px == 0 {
        return Err(ChartError::InvalidData(
            "pixel extent must be > 0".to_owned(),
        ));
    }
    Ok(())
}
