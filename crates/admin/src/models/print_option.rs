//! Print option groups: variation axes and quantity-tier price matrices.
//!
//! A group bundles the choices a customer makes on a print product's ordering
//! page. Quantity is always the tier axis. Every other axis (paper size, paper
//! type, finishing, ...) is a [`VariationAttribute`] whose values carry one
//! price per quantity tier and, optionally, a [`DesignArea`] describing the
//! printable layout for that choice.
//!
//! ```text
//!                    tiers →   100     250     500
//! Paper Size   A6            12.00   20.00   32.00
//!              A5            18.00   30.00   48.00
//! Finishing    None           0.00    0.00    0.00
//!              Gloss          4.00    8.00   14.00
//! ```

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use pressroom_core::{Money, PrintOptionGroupId, PublishStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named bundle of product variation axes with per-attribute pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptionGroup {
    pub id: PrintOptionGroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(flatten)]
    pub configuration: PrintConfiguration,
    pub created_at: DateTime<Utc>,
}

/// The editable tree of a print option group: quantity tiers and attributes.
///
/// This is the JSON document edited on the group form and through the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrintConfiguration {
    /// Orderable quantities, strictly increasing.
    pub quantity_tiers: Vec<u32>,
    /// Variation axes other than quantity.
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,
}

/// Kind of variation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    PaperSize,
    PaperType,
    Finishing,
    Custom,
}

impl AttributeKind {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PaperSize => "Paper Size",
            Self::PaperType => "Paper Type",
            Self::Finishing => "Finishing",
            Self::Custom => "Custom",
        }
    }
}

/// One variation axis (e.g. "Paper Size") and its selectable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAttribute {
    pub name: String,
    pub kind: AttributeKind,
    pub values: Vec<AttributeValue>,
}

/// A selectable value of an attribute with its tier prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub label: String,
    /// One price per quantity tier, in tier order.
    pub prices: Vec<Money>,
    /// Print layout for this choice (usually set on paper sizes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_area: Option<DesignArea>,
}

/// Printable layout settings, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignArea {
    pub width_mm: Decimal,
    pub height_mm: Decimal,
    #[serde(default)]
    pub bleed_mm: Decimal,
    #[serde(default)]
    pub safe_margin_mm: Decimal,
}

impl DesignArea {
    /// Canvas size including bleed on every edge.
    #[must_use]
    pub fn canvas_size(&self) -> (Decimal, Decimal) {
        let bleed = self.bleed_mm * Decimal::TWO;
        (self.width_mm + bleed, self.height_mm + bleed)
    }

    /// Area where text and key artwork must stay.
    #[must_use]
    pub fn safe_size(&self) -> (Decimal, Decimal) {
        let margin = self.safe_margin_mm * Decimal::TWO;
        (self.width_mm - margin, self.height_mm - margin)
    }

    /// `"85 × 55 mm (bleed 3, safe 4); canvas 91 × 61, safe area 77 × 47"`
    #[must_use]
    pub fn describe(&self) -> String {
        let (canvas_w, canvas_h) = self.canvas_size();
        let (safe_w, safe_h) = self.safe_size();
        format!(
            "{} × {} mm (bleed {}, safe {}); canvas {} × {}, safe area {} × {}",
            self.width_mm.normalize(),
            self.height_mm.normalize(),
            self.bleed_mm.normalize(),
            self.safe_margin_mm.normalize(),
            canvas_w.normalize(),
            canvas_h.normalize(),
            safe_w.normalize(),
            safe_h.normalize()
        )
    }
}

/// A configuration invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintOptionError {
    #[error("at least one quantity tier is required")]
    NoTiers,
    #[error("quantity tiers must be positive and strictly increasing")]
    TiersNotIncreasing,
    #[error("attribute #{0} needs a name")]
    UnnamedAttribute(usize),
    #[error("attribute '{0}' is defined more than once")]
    DuplicateAttribute(String),
    #[error("attribute '{0}' needs at least one value")]
    EmptyAttribute(String),
    #[error("attribute '{0}' has a value without a label")]
    UnlabeledValue(String),
    #[error("attribute '{attribute}' lists value '{value}' more than once")]
    DuplicateValue { attribute: String, value: String },
    #[error("'{attribute}: {value}' has {found} prices but there are {expected} quantity tiers")]
    PriceCountMismatch {
        attribute: String,
        value: String,
        expected: usize,
        found: usize,
    },
    #[error("design area for '{attribute}: {value}' is invalid: {reason}")]
    InvalidDesignArea {
        attribute: String,
        value: String,
        reason: &'static str,
    },
}

/// Why a quote could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("quantity {0} is not offered; choose one of {1:?}")]
    UnsupportedQuantity(u32, Vec<u32>),
    #[error("no selection for '{0}'")]
    MissingSelection(String),
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("'{value}' is not a value of '{attribute}'")]
    UnknownValue { attribute: String, value: String },
    #[error("'{attribute}: {value}' has no price for quantity {quantity}")]
    MissingPrice {
        attribute: String,
        value: String,
        quantity: u32,
    },
}

/// A priced line of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub attribute: String,
    pub value: String,
    pub price: Money,
}

/// Price for a quantity and one value per attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub quantity: u32,
    pub lines: Vec<QuoteLine>,
    pub total: Money,
}

impl PrintConfiguration {
    /// Check every configuration invariant, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns the [`PrintOptionError`] for the first invariant that fails.
    pub fn validate(&self) -> Result<(), PrintOptionError> {
        if self.quantity_tiers.is_empty() {
            return Err(PrintOptionError::NoTiers);
        }
        let increasing = self.quantity_tiers.first().is_some_and(|first| *first > 0)
            && self.quantity_tiers.windows(2).all(|w| matches!(w, [a, b] if a < b));
        if !increasing {
            return Err(PrintOptionError::TiersNotIncreasing);
        }

        let mut seen_attributes = HashSet::new();
        for (index, attribute) in self.attributes.iter().enumerate() {
            let name = attribute.name.trim();
            if name.is_empty() {
                return Err(PrintOptionError::UnnamedAttribute(index + 1));
            }
            if !seen_attributes.insert(name.to_lowercase()) {
                return Err(PrintOptionError::DuplicateAttribute(name.to_string()));
            }
            if attribute.values.is_empty() {
                return Err(PrintOptionError::EmptyAttribute(name.to_string()));
            }

            let mut seen_values = HashSet::new();
            for value in &attribute.values {
                let label = value.label.trim();
                if label.is_empty() {
                    return Err(PrintOptionError::UnlabeledValue(name.to_string()));
                }
                if !seen_values.insert(label.to_lowercase()) {
                    return Err(PrintOptionError::DuplicateValue {
                        attribute: name.to_string(),
                        value: label.to_string(),
                    });
                }
                if value.prices.len() != self.quantity_tiers.len() {
                    return Err(PrintOptionError::PriceCountMismatch {
                        attribute: name.to_string(),
                        value: label.to_string(),
                        expected: self.quantity_tiers.len(),
                        found: value.prices.len(),
                    });
                }
                if let Some(area) = &value.design_area {
                    check_design_area(area).map_err(|reason| {
                        PrintOptionError::InvalidDesignArea {
                            attribute: name.to_string(),
                            value: label.to_string(),
                            reason,
                        }
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Price a quantity with one selected value per attribute.
    ///
    /// Attribute and value names match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] if the quantity is not a tier, an attribute is
    /// left unselected, a selection names something that doesn't exist, or
    /// the chosen value has no price at that tier.
    pub fn quote(
        &self,
        quantity: u32,
        selections: &BTreeMap<String, String>,
    ) -> Result<Quote, QuoteError> {
        let tier = self
            .quantity_tiers
            .iter()
            .position(|t| *t == quantity)
            .ok_or_else(|| QuoteError::UnsupportedQuantity(quantity, self.quantity_tiers.clone()))?;

        for selected in selections.keys() {
            if self.find_attribute(selected).is_none() {
                return Err(QuoteError::UnknownAttribute(selected.clone()));
            }
        }

        let mut lines = Vec::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            let choice = selections
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(attribute.name.trim()))
                .map(|(_, value)| value)
                .ok_or_else(|| QuoteError::MissingSelection(attribute.name.clone()))?;

            let value = attribute
                .values
                .iter()
                .find(|v| v.label.trim().eq_ignore_ascii_case(choice.trim()))
                .ok_or_else(|| QuoteError::UnknownValue {
                    attribute: attribute.name.clone(),
                    value: choice.clone(),
                })?;

            let price = value.prices.get(tier).copied().ok_or_else(|| QuoteError::MissingPrice {
                attribute: attribute.name.clone(),
                value: value.label.clone(),
                quantity,
            })?;
            lines.push(QuoteLine {
                attribute: attribute.name.clone(),
                value: value.label.clone(),
                price,
            });
        }

        let total = lines.iter().map(|line| line.price).sum();
        Ok(Quote {
            quantity,
            lines,
            total,
        })
    }

    /// Find an attribute by name, case-insensitively.
    #[must_use]
    pub fn find_attribute(&self, name: &str) -> Option<&VariationAttribute> {
        self.attributes
            .iter()
            .find(|a| a.name.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Cheapest possible price at every tier (lowest value of each attribute).
    #[must_use]
    pub fn starting_prices(&self) -> Vec<(u32, Money)> {
        self.quantity_tiers
            .iter()
            .enumerate()
            .map(|(tier, quantity)| {
                let total: Money = self
                    .attributes
                    .iter()
                    .filter_map(|a| a.values.iter().filter_map(|v| v.prices.get(tier)).min())
                    .copied()
                    .sum();
                (*quantity, total)
            })
            .collect()
    }

    /// Number of distinct product variants the group describes, saturating
    /// at `usize::MAX`.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.attributes
            .iter()
            .map(|a| a.values.len())
            .fold(self.quantity_tiers.len(), usize::saturating_mul)
    }
}

fn check_design_area(area: &DesignArea) -> Result<(), &'static str> {
    if area.width_mm <= Decimal::ZERO || area.height_mm <= Decimal::ZERO {
        return Err("width and height must be greater than zero");
    }
    if area.bleed_mm < Decimal::ZERO || area.safe_margin_mm < Decimal::ZERO {
        return Err("bleed and safe margin cannot be negative");
    }
    let half = area.width_mm.min(area.height_mm) / Decimal::TWO;
    if area.bleed_mm >= half || area.safe_margin_mm >= half {
        return Err("bleed and safe margin must be less than half the smaller side");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(cents: u32) -> Money {
        Money::from_cents(cents)
    }

    fn value(label: &str, prices: &[u32]) -> AttributeValue {
        AttributeValue {
            label: label.to_string(),
            prices: prices.iter().copied().map(money).collect(),
            design_area: None,
        }
    }

    fn flyers() -> PrintConfiguration {
        PrintConfiguration {
            quantity_tiers: vec![100, 250, 500],
            attributes: vec![
                VariationAttribute {
                    name: "Paper Size".to_string(),
                    kind: AttributeKind::PaperSize,
                    values: vec![
                        value("A6", &[1_200, 2_000, 3_200]),
                        value("A5", &[1_800, 3_000, 4_800]),
                    ],
                },
                VariationAttribute {
                    name: "Finishing".to_string(),
                    kind: AttributeKind::Finishing,
                    values: vec![value("None", &[0, 0, 0]), value("Gloss", &[400, 800, 1_400])],
                },
            ],
        }
    }

    fn select(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_valid_configuration() {
        assert_eq!(flyers().validate(), Ok(()));
        assert_eq!(flyers().variant_count(), 12);
    }

    #[test]
    fn test_tiers_must_increase() {
        let mut config = flyers();
        config.quantity_tiers = vec![100, 100, 500];
        assert_eq!(config.validate(), Err(PrintOptionError::TiersNotIncreasing));

        config.quantity_tiers = vec![0, 100, 500];
        assert_eq!(config.validate(), Err(PrintOptionError::TiersNotIncreasing));

        config.quantity_tiers.clear();
        assert_eq!(config.validate(), Err(PrintOptionError::NoTiers));
    }

    #[test]
    fn test_price_count_must_match_tiers() {
        let mut config = flyers();
        config.attributes[0].values[1].prices.pop();
        assert!(matches!(
            config.validate(),
            Err(PrintOptionError::PriceCountMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = flyers();
        config.attributes[1].name = "paper size".to_string();
        assert_eq!(
            config.validate(),
            Err(PrintOptionError::DuplicateAttribute("paper size".to_string()))
        );

        let mut config = flyers();
        config.attributes[0].values[1].label = "a6".to_string();
        assert!(matches!(
            config.validate(),
            Err(PrintOptionError::DuplicateValue { .. })
        ));
    }

    #[test]
    fn test_design_area_limits() {
        let mut config = flyers();
        config.attributes[0].values[0].design_area = Some(DesignArea {
            width_mm: Decimal::new(105, 0),
            height_mm: Decimal::new(148, 0),
            bleed_mm: Decimal::new(3, 0),
            safe_margin_mm: Decimal::new(5, 0),
        });
        assert_eq!(config.validate(), Ok(()));

        config.attributes[0].values[0].design_area = Some(DesignArea {
            width_mm: Decimal::new(10, 0),
            height_mm: Decimal::new(148, 0),
            bleed_mm: Decimal::new(5, 0),
            safe_margin_mm: Decimal::ZERO,
        });
        assert!(matches!(
            config.validate(),
            Err(PrintOptionError::InvalidDesignArea { .. })
        ));
    }

    #[test]
    fn test_design_area_sizes() {
        let area = DesignArea {
            width_mm: Decimal::new(85, 0),
            height_mm: Decimal::new(55, 0),
            bleed_mm: Decimal::new(3, 0),
            safe_margin_mm: Decimal::new(4, 0),
        };
        assert_eq!(area.canvas_size(), (Decimal::new(91, 0), Decimal::new(61, 0)));
        assert_eq!(area.safe_size(), (Decimal::new(77, 0), Decimal::new(47, 0)));
        assert_eq!(
            area.describe(),
            "85 × 55 mm (bleed 3, safe 4); canvas 91 × 61, safe area 77 × 47"
        );
    }

    #[test]
    fn test_quote_sums_selected_values_at_tier() {
        let quote = flyers()
            .quote(250, &select(&[("paper size", "a5"), ("Finishing", "Gloss")]))
            .unwrap();
        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].price, money(3_000));
        assert_eq!(quote.total, money(3_800));
    }

    #[test]
    fn test_quote_rejects_missing_tier_price() {
        let mut config = flyers();
        config.attributes[1].values[1].prices.truncate(1);
        assert_eq!(
            config.quote(250, &select(&[("Paper Size", "A5"), ("Finishing", "Gloss")])),
            Err(QuoteError::MissingPrice {
                attribute: "Finishing".to_string(),
                value: "Gloss".to_string(),
                quantity: 250,
            })
        );
    }

    #[test]
    fn test_oversized_prices_do_not_deserialize() {
        let json = r#"{
            "quantity_tiers": [100],
            "attributes": [{
                "name": "Size",
                "kind": "paper_size",
                "values": [{ "label": "A5", "prices": ["40000000000000000000000000000"] }]
            }]
        }"#;
        assert!(serde_json::from_str::<PrintConfiguration>(json).is_err());
    }

    #[test]
    fn test_quote_at_price_ceiling() {
        let mut config = flyers();
        for attribute in &mut config.attributes {
            for value in &mut attribute.values {
                value.prices = vec![Money::MAX; 3];
            }
        }
        let quote = config
            .quote(500, &select(&[("Paper Size", "A6"), ("Finishing", "None")]))
            .unwrap();
        assert_eq!(quote.total.to_string(), "$2000000000.00");
        assert_eq!(config.starting_prices()[0].1, quote.total);
    }

    #[test]
    fn test_variant_count_saturates() {
        let wide = PrintConfiguration {
            quantity_tiers: vec![100, 250],
            attributes: (0..70)
                .map(|i| VariationAttribute {
                    name: format!("Axis {i}"),
                    kind: AttributeKind::Custom,
                    values: vec![value("A", &[1, 2]), value("B", &[1, 2])],
                })
                .collect(),
        };
        assert_eq!(wide.variant_count(), usize::MAX);
    }

    #[test]
    fn test_quote_errors() {
        let config = flyers();
        assert!(matches!(
            config.quote(300, &select(&[("Paper Size", "A5"), ("Finishing", "None")])),
            Err(QuoteError::UnsupportedQuantity(300, _))
        ));
        assert_eq!(
            config.quote(100, &select(&[("Paper Size", "A5")])),
            Err(QuoteError::MissingSelection("Finishing".to_string()))
        );
        assert_eq!(
            config.quote(
                100,
                &select(&[("Paper Size", "A5"), ("Finishing", "None"), ("Color", "Red")])
            ),
            Err(QuoteError::UnknownAttribute("Color".to_string()))
        );
        assert!(matches!(
            config.quote(100, &select(&[("Paper Size", "A3"), ("Finishing", "None")])),
            Err(QuoteError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_starting_prices() {
        let prices = flyers().starting_prices();
        assert_eq!(prices, vec![(100, money(1_200)), (250, money(2_000)), (500, money(3_200))]);
    }

    #[test]
    fn test_configuration_json_shape() {
        let json = serde_json::to_value(flyers()).unwrap();
        assert_eq!(json["quantity_tiers"][2], 500);
        assert_eq!(json["attributes"][0]["kind"], "paper_size");
        assert_eq!(json["attributes"][1]["values"][1]["prices"][0], "4.00");
    }
}
