//! "What if I invested the discount?" projection.
//!
//! Takes the money saved by a discount, sets aside a share of it as a virtual
//! investment, and compounds that share annually.

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GrowthError {
    #[error("price must be a positive number")]
    InvalidPrice,

    #[error("discount must be greater than 0 and at most 100 percent")]
    InvalidDiscount,

    #[error("invest share must be in (0, 1]")]
    InvalidInvestShare,

    #[error("annual return must be a finite rate greater than -1")]
    InvalidAnnualReturn,

    #[error("projection horizon must be at least one year")]
    InvalidYears,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Assumptions behind a what-if projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrowthAssumptions")]
pub struct GrowthAssumptions {
    invest_share: f64,
    annual_return: f64,
    years: u32,
}

impl GrowthAssumptions {
    /// # Errors
    ///
    /// Returns `GrowthError` if any assumption is out of range.
    pub fn new(invest_share: f64, annual_return: f64, years: u32) -> Result<Self, GrowthError> {
        if !invest_share.is_finite() || invest_share <= 0.0 || invest_share > 1.0 {
            return Err(GrowthError::InvalidInvestShare);
        }
        if !annual_return.is_finite() || annual_return <= -1.0 {
            return Err(GrowthError::InvalidAnnualReturn);
        }
        if years == 0 {
            return Err(GrowthError::InvalidYears);
        }
        Ok(Self {
            invest_share,
            annual_return,
            years,
        })
    }

    #[must_use]
    pub fn invest_share(&self) -> f64 {
        self.invest_share
    }

    #[must_use]
    pub fn annual_return(&self) -> f64 {
        self.annual_return
    }

    #[must_use]
    pub fn years(&self) -> u32 {
        self.years
    }
}

#[derive(Deserialize)]
struct RawGrowthAssumptions {
    invest_share: f64,
    annual_return: f64,
    years: u32,
}

impl TryFrom<RawGrowthAssumptions> for GrowthAssumptions {
    type Error = GrowthError;

    fn try_from(raw: RawGrowthAssumptions) -> Result<Self, Self::Error> {
        Self::new(raw.invest_share, raw.annual_return, raw.years)
    }
}

impl Default for GrowthAssumptions {
    /// 10% of the savings invested at 8% a year for 10 years.
    fn default() -> Self {
        Self {
            invest_share: 0.10,
            annual_return: 0.08,
            years: 10,
        }
    }
}

//
// ─── PROJECTION ────────────────────────────────────────────────────────────────
//

/// Result of a what-if projection, in the price's currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIf {
    pub saved: f64,
    pub invested: f64,
    pub future_value: f64,
}

/// Project the future value of investing part of a discount.
///
/// # Errors
///
/// Returns `GrowthError::InvalidPrice` for a non-positive price and
/// `GrowthError::InvalidDiscount` for a discount outside `(0, 100]`.
pub fn project(
    price: f64,
    discount_percent: f64,
    assumptions: &GrowthAssumptions,
) -> Result<WhatIf, GrowthError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(GrowthError::InvalidPrice);
    }
    if !discount_percent.is_finite() || discount_percent <= 0.0 || discount_percent > 100.0 {
        return Err(GrowthError::InvalidDiscount);
    }

    let saved = price * (discount_percent / 100.0);
    let invested = saved * assumptions.invest_share;
    let years = i32::try_from(assumptions.years).unwrap_or(i32::MAX);
    let future_value = invested * (1.0 + assumptions.annual_return).powi(years);

    Ok(WhatIf {
        saved,
        invested,
        future_value,
    })
}
