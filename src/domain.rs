use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub cent_amount: i64,
    pub fraction_digits: u32,
    pub currency_code: String,
}

impl Money {
    /// Decimal amount, `centAmount / 10^fractionDigits`, computed in floating point.
    pub fn amount(&self) -> f64 {
        self.cent_amount as f64 / 10f64.powi(self.fraction_digits as i32)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency_code, self.amount())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub variant: ProductVariant,
    pub price: Price,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

impl LineItem {
    pub fn sku(&self) -> Option<&str> {
        self.variant.sku.as_deref()
    }
}

// Cart as returned by the commerce platform; fields this service never reads are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub version: u64,
    pub total_price: Money,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}
