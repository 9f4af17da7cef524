use rand::Rng;
use rand::seq::IndexedRandom;

use quest_core::growth::{self, GrowthAssumptions, GrowthError, WhatIf};

/// Encouragement shown alongside a projection.
pub const MOTIVATIONAL_MESSAGES: [&str; 4] = [
    "You're investing in yourself! 💜",
    "Saving is winning! 🏆",
    "That's not spending, that's smart money moves! ✨",
    "Financial self-care is the best self-care! 💅",
];

#[derive(Debug, Clone, PartialEq)]
pub struct WhatIfReport {
    pub projection: WhatIf,
    pub message: &'static str,
}

/// Discount-to-investment calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatIfService {
    assumptions: GrowthAssumptions,
}

impl WhatIfService {
    #[must_use]
    pub fn new(assumptions: GrowthAssumptions) -> Self {
        Self { assumptions }
    }

    #[must_use]
    pub fn assumptions(&self) -> GrowthAssumptions {
        self.assumptions
    }

    /// # Errors
    ///
    /// Returns `GrowthError` for a non-positive price or a discount outside `(0, 100]`.
    pub fn calculate(
        &self,
        price: f64,
        discount_percent: f64,
    ) -> Result<WhatIfReport, GrowthError> {
        self.calculate_with_rng(price, discount_percent, &mut rand::rng())
    }

    /// Same as [`WhatIfService::calculate`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `GrowthError` for a non-positive price or a discount outside `(0, 100]`.
    pub fn calculate_with_rng<R: Rng + ?Sized>(
        &self,
        price: f64,
        discount_percent: f64,
        rng: &mut R,
    ) -> Result<WhatIfReport, GrowthError> {
        let projection = growth::project(price, discount_percent, &self.assumptions)?;
        let message = MOTIVATIONAL_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(MOTIVATIONAL_MESSAGES[0]);
        Ok(WhatIfReport {
            projection,
            message,
        })
    }
}
