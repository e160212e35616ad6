use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ API Models ============

/// A customer or lead record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Server-assigned identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, free-form.
    pub phone_number: String,
    /// Postal address.
    pub address: String,
    /// How the customer found the business.
    #[serde(default)]
    pub referral_source: Option<String>,
    /// Service price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Contact frequency in days.
    #[serde(default)]
    pub contact_frequency: Option<i32>,
    /// Service start date (server date-time or `YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Service start time (`HH:MM` or `HH:MM:SS`).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub estimated_duration: Option<i32>,
    /// Whether the record is still a lead.
    pub is_lead: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Images attached to the customer. Absent on some list responses.
    #[serde(default)]
    pub images: Vec<CustomerImage>,
}

/// An image owned by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerImage {
    pub id: i64,
    pub customer_id: i64,
    /// Embedded payload as a `data:` URI.
    pub image_data: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(with = "timestamp")]
    pub uploaded_at: DateTime<Utc>,
}

/// Payload for creating or updating a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_frequency: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<i32>,
    pub is_lead: bool,
}

/// A single image to upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImage {
    pub image_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Body of the batch upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadRequest {
    pub images: Vec<UploadImage>,
}

impl Customer {
    /// "Lead" or "Customer", as shown on badges.
    pub fn kind_label(&self) -> &'static str {
        if self.is_lead {
            "Lead"
        } else {
            "Customer"
        }
    }
}

/// Lenient timestamp (de)serialization.
///
/// The API emits ISO-8601 date-times, sometimes without an offset. Offset-less
/// values are taken as UTC. Output is always RFC 3339.
pub mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
