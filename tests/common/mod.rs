#![allow(dead_code)]

use customer_desk::api_client::CustomerApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client pointed at the mock server's `/api` prefix.
pub fn client_for(server: &MockServer) -> CustomerApiClient {
    CustomerApiClient::new(format!("{}/api", server.uri())).unwrap()
}

pub fn customer_json(id: i64, name: &str, is_lead: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phoneNumber": format!("555-01{:02}", id),
        "address": "12 Harbor Way",
        "referralSource": "Google",
        "price": 150.0,
        "contactFrequency": 14,
        "startDate": "2024-04-02T00:00:00",
        "startTime": "09:00",
        "estimatedDuration": 45,
        "isLead": is_lead,
        "createdAt": "2024-03-01T10:00:00",
        "updatedAt": "2024-03-02T11:30:00",
        "images": []
    })
}

pub fn image_json(id: i64, customer_id: i64, file_name: Option<&str>) -> Value {
    json!({
        "id": id,
        "customerId": customer_id,
        "imageData": "data:image/png;base64,aGk=",
        "fileName": file_name,
        "contentType": "image/png",
        "uploadedAt": "2024-03-05T08:00:00Z"
    })
}

pub fn images_json(customer_id: i64, ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| image_json(*id, customer_id, None))
            .collect(),
    )
}
