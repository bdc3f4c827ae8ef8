//! Inventory events accepted by the inventory service.

// self
use crate::_prelude::*;

/// Price bounds attached to a product; prices are decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
	/// Lowest price the product may be sold for.
	pub min_accepted_price: Option<String>,
	/// Highest price the product may be sold for.
	pub max_accepted_price: String,
	/// Average price the pricer should aim for.
	pub average_target_price: Option<String>,
	/// Price charged at the box office.
	pub box_office_price: Option<String>,
}

/// Payload of [`InventoryEvent::ProductCreated`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
	/// Caller-side product identifier.
	pub product_reference: String,
	/// Human-readable product name.
	pub name: String,
	/// Units available, when tracked.
	pub availability: Option<i64>,
	/// Initial pricing bounds.
	pub pricing: ProductPricing,
}

/// Payload of [`InventoryEvent::ProductPricingChanged`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricingChanged {
	/// Caller-side product identifier.
	pub product_reference: String,
	/// Replacement pricing bounds.
	pub pricing: ProductPricing,
}

/// Payload of [`InventoryEvent::ProductRemoved`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRemoved {
	/// Caller-side product identifier.
	pub product_reference: String,
}

/// Payload of [`InventoryEvent::ProductAvailabilityChanged`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAvailabilityChanged {
	/// Caller-side product identifier.
	pub product_reference: String,
	/// Day the availability applies to (`YYYY-MM-DD`).
	pub event_date: String,
	/// Time slot within the day, if the product is timed.
	pub start_time: Option<String>,
	/// Units available.
	pub availability: i64,
}

/// Event posted to the inventory service, encoded as `{ "type": ..., "payload": ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum InventoryEvent {
	/// A product became available for pricing.
	ProductCreated(ProductCreated),
	/// A product's pricing bounds changed.
	ProductPricingChanged(ProductPricingChanged),
	/// A product was withdrawn.
	ProductRemoved(ProductRemoved),
	/// Availability for a date/time slot changed.
	ProductAvailabilityChanged(ProductAvailabilityChanged),
}
