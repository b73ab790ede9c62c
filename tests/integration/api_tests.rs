//! API integration tests
//!
//! These run against a live server on localhost:8080 with an account
//! `admin` / `admin` flagged both staff and superuser.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs do not collide on usernames or plates
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}{}", prefix, nanos % 1_000_000_000_000)
}

async fn login(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", username);
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn admin_token(client: &Client) -> String {
    login(client, "admin", "admin").await
}

/// Register a fresh customer and return its token
async fn customer_token(client: &Client) -> String {
    let username = unique("cust");
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password1": "secret-pass",
            "password2": "secret-pass"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    login(client, &username, "secret-pass").await
}

async fn create_vehicle(client: &Client, token: &str, total_cars: i32) -> i64 {
    let response = client
        .post(format!("{}/vehicles", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "category": "Sedan",
            "ac_type": "AC",
            "registration_number": unique("MH12"),
            "price": "1000.00",
            "price_per_hour": "100.00",
            "price_per_km": "10.00",
            "fuel_type": "petrol",
            "total_cars": total_cars
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No vehicle id")
}

async fn fleet_count(client: &Client, vehicle_id: i64) -> i64 {
    let body: Value = client
        .get(format!("{}/vehicles/{}", BASE_URL, vehicle_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["total_cars"].as_i64().expect("No total_cars")
}

fn driver_booking(vehicle_id: i64, hours: i64) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "start_datetime": "2030-01-01T09:00:00Z",
        "expected_return_datetime": "2030-01-01T19:00:00Z",
        "drive_mode": "with_driver",
        "hours_used": hours,
        "distance_km": "20"
    })
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_register_and_fetch_profile() {
    let client = Client::new();
    let token = customer_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_staff"], false);

    let response = client
        .get(format!("{}/customers/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_register_password_mismatch() {
    let client = Client::new();
    let username = unique("mismatch");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password1": "secret-pass",
            "password2": "other-pass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_booking_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&driver_booking(1, 10))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_self_drive_without_credentials_is_rejected() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 1).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&customer)
        .json(&json!({
            "vehicle_id": vehicle_id,
            "start_datetime": "2030-01-01T09:00:00Z",
            "expected_return_datetime": "2030-01-01T12:00:00Z",
            "drive_mode": "self_drive",
            "hours_used": 3,
            "distance_km": 20
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "MissingCredentials");

    // Nothing reserved
    assert_eq!(fleet_count(&client, vehicle_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_booking_and_return_flow() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 2).await;

    // Book with a driver for 10 hours
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&customer)
        .json(&driver_booking(vehicle_id, 10))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let booking: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(booking["total_amount"], "1500.00");
    assert_eq!(booking["advance_payment"], "300.00");
    assert_eq!(booking["pending_payment"], "1200.00");
    assert_eq!(fleet_count(&client, vehicle_id).await, 1);

    let booking_id = booking["id"].as_i64().expect("No booking id");

    // Customers cannot settle returns
    let response = client
        .post(format!("{}/staff/returns/{}", BASE_URL, booking_id))
        .bearer_auth(&customer)
        .json(&json!({ "damage_reported": true, "damage_fee": "75.5" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Staff records the return with a damage fee
    let response = client
        .post(format!("{}/staff/returns/{}", BASE_URL, booking_id))
        .bearer_auth(&admin)
        .json(&json!({ "damage_reported": true, "damage_fee": "75.5" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let outcome: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(outcome["status"], "returned");
    assert_eq!(outcome["booking"]["total_amount"], "1575.50");
    assert_eq!(outcome["booking"]["pending_payment"], "1275.50");
    assert_eq!(fleet_count(&client, vehicle_id).await, 2);

    // Same submission again: same totals, no extra unit
    let response = client
        .post(format!("{}/staff/returns/{}", BASE_URL, booking_id))
        .bearer_auth(&admin)
        .json(&json!({ "damage_reported": true, "damage_fee": 75.5 }))
        .send()
        .await
        .expect("Failed to send request");
    let outcome: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(outcome["status"], "already_returned");
    assert_eq!(outcome["booking"]["total_amount"], "1575.50");
    assert_eq!(outcome["booking"]["pending_payment"], "1275.50");
    assert_eq!(fleet_count(&client, vehicle_id).await, 2);

    // Quick return on a returned booking changes nothing
    let response = client
        .post(format!("{}/staff/returns/{}/quick", BASE_URL, booking_id))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    let outcome: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(outcome["status"], "already_returned");
    assert_eq!(fleet_count(&client, vehicle_id).await, 2);

    // The customer sees it among returned bookings
    let returned: Value = client
        .get(format!("{}/bookings/returned", BASE_URL))
        .bearer_auth(&customer)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(returned
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|b| b["id"].as_i64() == Some(booking_id)));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_reservations_of_last_unit() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 1).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        let token = customer.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(format!("{}/bookings", BASE_URL))
                .bearer_auth(token)
                .json(&driver_booking(vehicle_id, 5))
                .send()
                .await
                .expect("Failed to send request")
                .status()
        }));
    }

    let mut created = 0;
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => exhausted += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(exhausted, 7);
    assert_eq!(fleet_count(&client, vehicle_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_fare_quote_applies_minimum_block() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 1).await;

    let response = client
        .post(format!("{}/bookings/fare-quote", BASE_URL))
        .bearer_auth(&customer)
        .json(&json!({
            "vehicle_id": vehicle_id,
            "drive_mode": "self_drive",
            "hours_used": "3",
            "distance_km": 20
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let fare: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fare["billed_hours"], 4);
    assert_eq!(fare["total"], "400.00");
    assert_eq!(fare["advance"], "80.00");
    assert_eq!(fare["pending"], "320.00");
    assert_eq!(fleet_count(&client, vehicle_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_oversized_distance_is_rejected_without_reserving() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 1).await;

    let response = client
        .post(format!("{}/bookings/fare-quote", BASE_URL))
        .bearer_auth(&customer)
        .json(&json!({
            "vehicle_id": vehicle_id,
            "drive_mode": "self_drive",
            "distance_km": "79228162514264337593543950335"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut booking = driver_booking(vehicle_id, 4);
    booking["distance_km"] = json!("1000000000");
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&customer)
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
    assert_eq!(fleet_count(&client, vehicle_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_customer_bookings_latest_start_first() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 2).await;

    // booked in the opposite order of their start times
    let mut ids = Vec::new();
    for (start, end) in [
        ("2031-06-01T09:00:00Z", "2031-06-01T19:00:00Z"),
        ("2030-06-01T09:00:00Z", "2030-06-01T19:00:00Z"),
    ] {
        let mut booking = driver_booking(vehicle_id, 10);
        booking["start_datetime"] = json!(start);
        booking["expected_return_datetime"] = json!(end);
        let response = client
            .post(format!("{}/bookings", BASE_URL))
            .bearer_auth(&customer)
            .json(&booking)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        ids.push(body["id"].as_i64().expect("No booking id"));
    }

    let list: Value = client
        .get(format!("{}/bookings", BASE_URL))
        .bearer_auth(&customer)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let listed: Vec<i64> = list["bookings"]
        .as_array()
        .expect("No bookings array")
        .iter()
        .filter_map(|b| b["id"].as_i64())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
#[ignore]
async fn test_non_numeric_damage_fee_reads_as_zero() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let customer = customer_token(&client).await;
    let vehicle_id = create_vehicle(&client, &admin, 1).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&customer)
        .json(&driver_booking(vehicle_id, 10))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking: Value = response.json().await.expect("Failed to parse response");
    let booking_id = booking["id"].as_i64().expect("No booking id");

    let response = client
        .post(format!("{}/staff/returns/{}", BASE_URL, booking_id))
        .bearer_auth(&admin)
        .json(&json!({ "damage_reported": true, "damage_fee": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let outcome: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(outcome["status"], "returned");
    assert_eq!(outcome["booking"]["damage_fee"], "0.00");
    assert_eq!(outcome["booking"]["total_amount"], "1500.00");
}

#[tokio::test]
#[ignore]
async fn test_dashboard_requires_superuser() {
    let client = Client::new();
    let customer = customer_token(&client).await;

    let response = client
        .get(format!("{}/admin/dashboard", BASE_URL))
        .bearer_auth(&customer)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = admin_token(&client).await;
    let body: Value = client
        .get(format!("{}/admin/dashboard", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(body["total_bookings"].is_number());
    assert!(body["total_revenue"].is_string());
}
