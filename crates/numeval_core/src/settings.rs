use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::order::{MagnitudeOrder, NumericOrder};
use crate::traits::Smaller;

/// How reductions treat complex operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexOrder {
    /// Comparing a complex number fails with an unsupported-type error.
    #[default]
    Reject,
    /// Rank by modulus, then by argument.
    MagnitudeThenArgument,
}

/// Settings controlling evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalSettings {
    pub complex_order: ComplexOrder,
    /// Whether ranges built through the engine include their stop value.
    pub inclusive_ranges: bool,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            complex_order: ComplexOrder::Reject,
            inclusive_ranges: true,
        }
    }
}

impl EvalSettings {
    /// Comparator selected by `complex_order`.
    pub fn comparator(&self) -> Arc<dyn Smaller> {
        match self.complex_order {
            ComplexOrder::Reject => Arc::new(NumericOrder),
            ComplexOrder::MagnitudeThenArgument => Arc::new(MagnitudeOrder),
        }
    }
}
