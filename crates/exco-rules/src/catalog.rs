//! # Rule Catalog
//!
//! The static rule set every shipment is checked against:
//!
//! - **Restricted items**: destination country → goods it will not accept.
//! - **Conflicting destinations**: origin country → destinations it may not
//!   ship to.
//! - **Item conflicts**: sets of goods that may not share a parcel.
//! - **Weight bounds**: per-container minimum and maximum weight.
//!
//! ## Loading
//!
//! A catalog is authored as a loosely-typed [`CatalogDocument`] (YAML or
//! JSON) and converted into a [`RuleCatalog`] by [`RuleCatalog::from_document`],
//! which validates every name and rule. After that the catalog is read-only;
//! there are no mutators.
//!
//! ## Determinism
//!
//! Countries and item sets are stored in ordered collections. Restricted
//! items iterate in sorted order; item conflicts iterate in declaration
//! order. Evaluation order of violations follows from this.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use exco_core::{Country, ItemSet, WeightBounds};
use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::parser::{self, Format};

/// The built-in catalog, embedded at compile time.
pub const DEFAULT_CATALOG_YAML: &str = include_str!("../catalog/default.yaml");

/// Catalog as authored on disk, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Per-container weight limits. Defaults to 1–30 kg.
    #[serde(default)]
    pub weight_bounds: WeightBounds,
    /// Destination → restricted goods.
    #[serde(default)]
    pub restricted_items: BTreeMap<String, Vec<String>>,
    /// Origin → forbidden destinations.
    #[serde(default)]
    pub conflicting_destinations: BTreeMap<String, Vec<String>>,
    /// Goods that may not travel together.
    #[serde(default)]
    pub item_conflicts: Vec<Vec<String>>,
}

/// A validated, read-only rule catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCatalog {
    weight_bounds: WeightBounds,
    restricted_items: BTreeMap<Country, ItemSet>,
    conflicting_destinations: BTreeMap<Country, BTreeSet<Country>>,
    item_conflicts: Vec<ItemSet>,
}

impl RuleCatalog {
    /// The built-in catalog.
    pub fn builtin() -> RulesResult<Self> {
        let doc: CatalogDocument = parser::parse_typed(DEFAULT_CATALOG_YAML, Format::Yaml)?;
        Self::from_document(doc)
    }

    /// Load and validate a catalog file (YAML, or JSON by `.json` extension).
    pub fn load(path: &Path) -> RulesResult<Self> {
        let doc: CatalogDocument = parser::load_typed(path)?;
        let catalog = Self::from_document(doc)?;
        tracing::info!(path = %path.display(), "loaded rule catalog");
        Ok(catalog)
    }

    /// Validate an authored document into a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidRule`] if any name is blank, a country
    /// appears twice after trimming, an origin forbids itself, or an item
    /// conflict names fewer than two distinct goods or repeats another.
    pub fn from_document(doc: CatalogDocument) -> RulesResult<Self> {
        let restricted_items = restricted_from(doc.restricted_items)?;
        let conflicting_destinations = conflicts_from(doc.conflicting_destinations)?;
        let item_conflicts = item_conflicts_from(doc.item_conflicts)?;

        tracing::debug!(
            restricted = restricted_items.len(),
            routes = conflicting_destinations.len(),
            item_conflicts = item_conflicts.len(),
            min_kg = doc.weight_bounds.min_kg(),
            max_kg = doc.weight_bounds.max_kg(),
            "validated rule catalog"
        );

        Ok(Self {
            weight_bounds: doc.weight_bounds,
            restricted_items,
            conflicting_destinations,
            item_conflicts,
        })
    }

    /// Per-container weight limits.
    pub fn bounds(&self) -> WeightBounds {
        self.weight_bounds
    }

    /// Goods `country` will not accept, if it restricts any.
    pub fn restricted_in(&self, country: &Country) -> Option<&ItemSet> {
        self.restricted_items.get(country)
    }

    /// Destinations `origin` may not ship to, if any.
    pub fn forbidden_recipients(&self, origin: &Country) -> Option<&BTreeSet<Country>> {
        self.conflicting_destinations.get(origin)
    }

    /// Whether shipping from `origin` to `destination` is forbidden.
    pub fn is_conflicting_route(&self, origin: &Country, destination: &Country) -> bool {
        self.forbidden_recipients(origin)
            .is_some_and(|forbidden| forbidden.contains(destination))
    }

    /// Item conflict sets in declaration order.
    pub fn item_conflicts(&self) -> &[ItemSet] {
        &self.item_conflicts
    }

    /// Every country the catalog mentions, sorted.
    pub fn countries(&self) -> BTreeSet<&Country> {
        self.restricted_items
            .keys()
            .chain(self.conflicting_destinations.keys())
            .chain(self.conflicting_destinations.values().flatten())
            .collect()
    }
}

fn invalid(section: &'static str, rule: impl Into<String>, detail: impl ToString) -> RulesError {
    RulesError::InvalidRule {
        section,
        rule: rule.into(),
        detail: detail.to_string(),
    }
}

fn restricted_from(raw: BTreeMap<String, Vec<String>>) -> RulesResult<BTreeMap<Country, ItemSet>> {
    const SECTION: &str = "restricted_items";
    let mut out = BTreeMap::new();
    for (name, items) in raw {
        let country = Country::new(&name).map_err(|e| invalid(SECTION, name.as_str(), e))?;
        let items = ItemSet::from_tags(&items).map_err(|e| invalid(SECTION, name.as_str(), e))?;
        if out.insert(country, items).is_some() {
            return Err(invalid(SECTION, name, "country listed twice"));
        }
    }
    Ok(out)
}

fn conflicts_from(
    raw: BTreeMap<String, Vec<String>>,
) -> RulesResult<BTreeMap<Country, BTreeSet<Country>>> {
    const SECTION: &str = "conflicting_destinations";
    let mut out = BTreeMap::new();
    for (name, destinations) in raw {
        let origin = Country::new(&name).map_err(|e| invalid(SECTION, name.as_str(), e))?;
        let destinations = destinations
            .iter()
            .map(Country::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| invalid(SECTION, name.as_str(), e))?;
        if destinations.contains(&origin) {
            return Err(invalid(SECTION, name, "origin lists itself as a destination"));
        }
        if out.insert(origin, destinations).is_some() {
            return Err(invalid(SECTION, name, "origin listed twice"));
        }
    }
    Ok(out)
}

fn item_conflicts_from(raw: Vec<Vec<String>>) -> RulesResult<Vec<ItemSet>> {
    const SECTION: &str = "item_conflicts";
    let mut out: Vec<ItemSet> = Vec::with_capacity(raw.len());
    for (idx, tags) in raw.into_iter().enumerate() {
        let rule = format!("#{idx}");
        let set = ItemSet::from_tags(&tags).map_err(|e| invalid(SECTION, rule.as_str(), e))?;
        if set.len() < 2 {
            return Err(invalid(SECTION, rule, "a conflict needs at least two distinct items"));
        }
        if out.contains(&set) {
            return Err(invalid(SECTION, rule, format!("duplicates conflict {{{set}}}")));
        }
        out.push(set);
    }
    Ok(out)
}
