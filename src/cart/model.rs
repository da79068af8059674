//! Server cart snapshot as returned by the cart endpoints.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque variant identifier.
///
/// The cart API sends variant ids as JSON numbers while page markup carries
/// them as attribute strings; both decode to the same textual id so lookups
/// compare strings only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for VariantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => VariantId(n.to_string()),
            RawId::Text(s) => VariantId(s),
        })
    }
}

/// One cart line. Lines with quantity 0 are never present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub variant_id: VariantId,
    pub quantity: u32,
    pub product_title: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Line total in minor currency units.
    pub final_line_price: u64,
}

/// Authoritative cart state.
///
/// Every fetch or update produces a new snapshot that replaces the previous
/// one wholesale; nothing is merged client side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub item_count: u32,
    /// Cart total in minor currency units.
    pub total_price: u64,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Quantity per variant, the lookup every quantity control reads from.
    pub fn quantities(&self) -> HashMap<&str, u32> {
        self.items
            .iter()
            .map(|item| (item.variant_id.as_str(), item.quantity))
            .collect()
    }

    /// Quantity for one variant, 0 when it has no line.
    pub fn quantity_of(&self, variant_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.variant_id.as_str() == variant_id)
            .map_or(0, |item| item.quantity)
    }

    /// Whether `item_count` matches the sum of line quantities.
    pub fn is_consistent(&self) -> bool {
        let units: u64 = self.items.iter().map(|item| u64::from(item.quantity)).sum();
        units == u64::from(self.item_count)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
