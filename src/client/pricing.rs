//! Real-time pricing request and response shapes.

// self
use crate::_prelude::*;

/// Product line in a [`PricingRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequestProduct {
	/// Caller-side product identifier.
	pub product_reference: String,
	/// Quantity to price.
	pub number_of_items: u32,
}

/// Real-time pricing query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
	/// Visitor cookie used to keep prices stable per visitor.
	pub cookie_id: String,
	/// Visitor IP address, if known.
	pub ip: Option<String>,
	/// Start of the priced range.
	#[serde(with = "time::serde::rfc3339")]
	pub date_from: OffsetDateTime,
	/// End of the priced range.
	#[serde(with = "time::serde::rfc3339")]
	pub date_to: OffsetDateTime,
	/// IANA timezone of the venue.
	pub timezone: String,
	/// Products to price.
	pub products: Vec<PricingRequestProduct>,
	/// Time slots to price, for timed products.
	pub times: Option<Vec<String>>,
}

/// Priced product line in a [`PricingResponseItem`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponseProduct {
	/// Caller-side product identifier.
	pub product_reference: String,
	/// Quantity priced.
	pub number_of_items: u32,
	/// Decimal price string.
	pub price: String,
}

/// Prices for one date (and optional time slot).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponseItem {
	/// Priced date.
	pub price_date: String,
	/// Priced time slot, if any.
	pub price_time: Option<String>,
	/// Priced products.
	pub products: Vec<PricingResponseProduct>,
}

/// Real-time pricing answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResponse {
	/// Prices per date/time slot.
	pub prices: Vec<PricingResponseItem>,
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn request_dates_serialize_as_rfc3339() {
		let request = PricingRequest {
			cookie_id: "cookie".into(),
			ip: None,
			date_from: datetime!(2024-05-01 00:00 UTC),
			date_to: datetime!(2024-05-02 12:30 UTC),
			timezone: "Europe/Amsterdam".into(),
			products: vec![PricingRequestProduct {
				product_reference: "ticket-1".into(),
				number_of_items: 2,
			}],
			times: None,
		};
		let value = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(value["cookieId"], "cookie");
		assert_eq!(value["dateFrom"], "2024-05-01T00:00:00Z");
		assert_eq!(value["dateTo"], "2024-05-02T12:30:00Z");
		assert_eq!(value["products"][0]["numberOfItems"], 2);
		assert!(value["ip"].is_null());
	}
}
