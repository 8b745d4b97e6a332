//! Monthly/yearly pricing toggle.
//!
//! Prices are display strings supplied by the page; this module only decides
//! which one to show and what the period label and savings badge should be.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Billing cycle selected by the toggle. Starts monthly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BillingCycle {
    /// Billed each month.
    #[default]
    Monthly,
    /// Billed once a year.
    Yearly,
}

impl BillingCycle {
    /// The other cycle.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }

    /// Label shown next to a price.
    pub const fn period_label(self) -> &'static str {
        match self {
            Self::Monthly => "/month",
            Self::Yearly => "/year",
        }
    }

    /// Savings badges are only shown for yearly billing.
    pub const fn shows_savings(self) -> bool {
        matches!(self, Self::Yearly)
    }
}

/// Both prices for one plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanPrice {
    /// Plan name.
    #[serde(default)]
    pub name: String,
    /// Price text for monthly billing.
    pub monthly: String,
    /// Price text for yearly billing.
    pub yearly: String,
    /// Savings note, shown only for yearly billing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
}

impl PlanPrice {
    /// Price text for `cycle`.
    pub fn display(&self, cycle: BillingCycle) -> &str {
        match cycle {
            BillingCycle::Monthly => &self.monthly,
            BillingCycle::Yearly => &self.yearly,
        }
    }

    /// Savings note to show for `cycle`, if any.
    pub fn visible_savings(&self, cycle: BillingCycle) -> Option<&str> {
        if cycle.shows_savings() {
            self.savings.as_deref()
        } else {
            None
        }
    }
}
