//! Wire projections of the backend entities
//!
//! Field names follow the backend's JSON. Several fields have two spellings in
//! the wild (`portfolioID` on entities, `portfolioId` on DTOs), so both are
//! accepted.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Portfolio as listed by `GET /api/portfolios`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(rename = "portfolioId", alias = "portfolioID")]
    pub portfolio_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_value: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_cost: Decimal,
    /// Trusted as sent; never recomputed from value and cost
    #[serde(default, deserialize_with = "zero_if_null")]
    pub gain_loss: Decimal,
    /// Flattened owner name (DTO shape)
    #[serde(default)]
    pub user_name: Option<String>,
    /// Nested owner (entity shape)
    #[serde(default)]
    pub user: Option<OwnerRef>,
}

/// Owner of a portfolio in the entity shape.
///
/// The backend serialises each user once per response; later occurrences are
/// just the user's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Full(Owner),
    Id(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Portfolio {
    /// Owner display name, if the server sent one
    pub fn owner_name(&self) -> Option<&str> {
        if let Some(name) = self.user_name.as_deref() {
            return Some(name);
        }
        match &self.user {
            Some(OwnerRef::Full(owner)) => owner.full_name.as_deref().or(owner.username.as_deref()),
            _ => None,
        }
    }

    /// Replace id-only owner references with the full owner seen earlier in the
    /// same response.
    pub fn resolve_owners(portfolios: &mut [Portfolio]) {
        let mut seen: HashMap<i64, Owner> = HashMap::new();
        for portfolio in portfolios.iter() {
            if let Some(OwnerRef::Full(owner)) = &portfolio.user {
                if let Some(id) = owner.id {
                    seen.entry(id).or_insert_with(|| owner.clone());
                }
            }
        }
        for portfolio in portfolios.iter_mut() {
            if let Some(OwnerRef::Id(id)) = portfolio.user {
                if let Some(owner) = seen.get(&id) {
                    portfolio.user = Some(OwnerRef::Full(owner.clone()));
                }
            }
        }
    }
}

/// Backend amounts are nullable decimals; missing and null both read as zero
fn zero_if_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Stock as listed by `GET /api/stocks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(rename = "stockID", alias = "stockId")]
    pub stock_id: i64,
    pub symbol: String,
    pub company_name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_price: Decimal,
    #[serde(default)]
    pub sector: Option<String>,
}

impl Stock {
    /// Label used in the stock selector
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.symbol, self.company_name)
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Buy
    }
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction as listed by `GET /test/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: i64,
    /// ISO local date-time, formatted for display by the caller
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub portfolio_name: String,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub stock_symbol: String,
    #[serde(default)]
    pub stock_name: String,
    pub quantity: i64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price_per_share: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub fees: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub net_amount: Option<Decimal>,
}

/// Body of the create-buy and create-sell calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub portfolio_id: i64,
    pub stock_id: i64,
    pub quantity: i64,
    pub price_per_share: f64,
    pub fees: f64,
}
