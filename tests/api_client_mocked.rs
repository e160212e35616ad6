/// Integration tests for the REST client against a mocked API
mod common;

use common::{client_for, customer_json, image_json, images_json};
use customer_desk::errors::AppError;
use customer_desk::models::{CreateCustomer, UploadImage};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload() -> CreateCustomer {
    CreateCustomer {
        name: "Dana Park".to_string(),
        email: "dana@example.com".to_string(),
        phone_number: "555-0199".to_string(),
        address: "4 Pine Ct".to_string(),
        referral_source: Some("Referral".to_string()),
        price: Some(0.0),
        contact_frequency: Some(30),
        start_date: None,
        start_time: None,
        estimated_duration: Some(60),
        is_lead: true,
    }
}

#[tokio::test]
async fn test_list_customers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            customer_json(1, "Ana Lima", true),
            customer_json(2, "Ben Ortiz", false)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let customers = client_for(&server).list_customers().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].name, "Ana Lima");
    assert!(customers[0].is_lead);
    assert_eq!(customers[1].contact_frequency, Some(14));
}

#[tokio::test]
async fn test_list_leads_and_customers_only_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/leads"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([customer_json(1, "Ana Lima", true)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/customers/customers-only"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([customer_json(2, "Ben Ortiz", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let leads = client.list_leads().await.unwrap();
    let converted = client.list_customers_only().await.unwrap();
    assert!(leads.iter().all(|c| c.is_lead));
    assert!(converted.iter().all(|c| !c.is_lead));
}

#[tokio::test]
async fn test_get_customer_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_customer(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_create_customer_sends_camel_case_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .and(body_json(json!({
            "name": "Dana Park",
            "email": "dana@example.com",
            "phoneNumber": "555-0199",
            "address": "4 Pine Ct",
            "referralSource": "Referral",
            "price": 0.0,
            "contactFrequency": 30,
            "estimatedDuration": 60,
            "isLead": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_json(31, "Dana Park", true)))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server).create_customer(&payload()).await.unwrap();
    assert_eq!(created.id, 31);
}

#[tokio::test]
async fn test_update_customer_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/customers/31"))
        .and(body_partial_json(json!({ "isLead": true, "name": "Dana Park" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(31, "Dana Park", true)))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client_for(&server)
        .update_customer(31, &payload())
        .await
        .unwrap();
    assert_eq!(updated.id, 31);
}

#[tokio::test]
async fn test_delete_customer_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/customers/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).delete_customer(8).await.is_ok());
}

#[tokio::test]
async fn test_server_error_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/customers/8"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_customer(8).await.unwrap_err();
    match err {
        AppError::ApiStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_external_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_customers().await.unwrap_err();
    assert!(matches!(err, AppError::ExternalApiError(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_external_error() {
    let client = customer_desk::api_client::CustomerApiClient::new("http://127.0.0.1:9/api").unwrap();
    let err = client.list_customers().await.unwrap_err();
    assert!(matches!(err, AppError::ExternalApiError(_)));
}

#[tokio::test]
async fn test_image_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/3/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images_json(3, &[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/customers/3/images/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/customers/3/images"))
        .and(body_json(json!({
            "imageData": "data:image/png;base64,aGk=",
            "fileName": "hi.png",
            "contentType": "image/png"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(image_json(9, 3, Some("hi.png"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/customers/3/images/batch"))
        .respond_with(ResponseTemplate::new(201).set_body_json(images_json(3, &[10, 11])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/customers/3/images/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.list_images(3).await.unwrap().len(), 2);
    assert_eq!(client.image_count(3).await.unwrap(), 2);

    let single = UploadImage {
        image_data: "data:image/png;base64,aGk=".to_string(),
        file_name: Some("hi.png".to_string()),
        content_type: Some("image/png".to_string()),
    };
    let stored = client.upload_image(3, &single).await.unwrap();
    assert_eq!(stored.map(|image| image.id), Some(9));

    let batch = ["a.png", "b.png"]
        .iter()
        .map(|name| UploadImage {
            image_data: "data:image/png;base64,aGk=".to_string(),
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
        })
        .collect();
    assert_eq!(client.upload_images(3, batch).await.unwrap().len(), 2);

    let requests = server.received_requests().await.unwrap();
    let batch_request = requests
        .iter()
        .find(|r| r.url.path() == "/api/customers/3/images/batch")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&batch_request.body).unwrap();
    assert_eq!(body["images"].as_array().unwrap().len(), 2);
    assert_eq!(body["images"][1]["fileName"], "b.png");

    assert!(client.delete_image(3, 9).await.is_ok());
}

#[tokio::test]
async fn test_upload_success_does_not_depend_on_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/customers/3/images"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/customers/3/images/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let image = UploadImage {
        image_data: "data:image/png;base64,aGk=".to_string(),
        file_name: None,
        content_type: None,
    };
    assert_eq!(client.upload_image(3, &image).await.unwrap(), None);
    assert!(client
        .upload_images(3, vec![image.clone(), image])
        .await
        .unwrap()
        .is_empty());
}
