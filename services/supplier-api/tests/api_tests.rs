//! End-to-end API tests.
//!
//! These drive a running instance over HTTP and are ignored by default:
//! start the service (and its PostgreSQL) first, then run
//! `cargo test -- --ignored`. Override the target with `VENDORA_API_URL`.

use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("VENDORA_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn supplier_payload(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": "555-0100",
        "address": "1 Factory Way",
        "city": "Detroit",
        "country": "USA",
        "category": "Parts",
        "status": "active",
        "rating": 4.0,
        "payment_terms": "Net 30",
        "tags": ["e2e", "preferred"],
        "primary_contact": {"name": "Jane Smith", "email": "jane@example.com", "phone": null}
    })
}

#[tokio::test]
#[ignore] // Requires a running service
async fn supplier_crud_round_trip() {
    let client = reqwest::Client::new();
    let base = base_url();
    let email = format!("crud-{}@example.com", uuid::Uuid::new_v4().simple());

    // Create
    let created: Value = client
        .post(format!("{base}/api/v1/suppliers"))
        .json(&supplier_payload("E2E Supplier", &email))
        .send()
        .await
        .expect("create request")
        .error_for_status()
        .expect("201")
        .json()
        .await
        .expect("create body");
    let id = created["supplier"]["id"].as_str().expect("id").to_string();
    assert_eq!(created["supplier"]["last_order"], Value::Null);

    // Read
    let fetched: Value = client
        .get(format!("{base}/api/v1/suppliers/{id}"))
        .send()
        .await
        .expect("get request")
        .json()
        .await
        .expect("get body");
    assert_eq!(fetched["supplier"]["email"].as_str(), Some(email.as_str()));

    // Update
    let updated: Value = client
        .put(format!("{base}/api/v1/suppliers/{id}"))
        .json(&json!({"status": "inactive"}))
        .send()
        .await
        .expect("update request")
        .json()
        .await
        .expect("update body");
    assert_eq!(updated["supplier"]["status"].as_str(), Some("inactive"));

    // Soft delete
    let delete_status = client
        .delete(format!("{base}/api/v1/suppliers/{id}"))
        .send()
        .await
        .expect("delete request")
        .status();
    assert!(delete_status.is_success());

    // Audit lookup still finds the record; a second delete is a 404.
    let audit = client
        .get(format!("{base}/api/v1/suppliers/{id}"))
        .send()
        .await
        .expect("audit get");
    assert!(audit.status().is_success());

    let second_delete = client
        .delete(format!("{base}/api/v1/suppliers/{id}"))
        .send()
        .await
        .expect("second delete");
    assert_eq!(second_delete.status().as_u16(), 404);
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_a_conflict() {
    let client = reqwest::Client::new();
    let base = base_url();
    let email = format!("dup-{}@example.com", uuid::Uuid::new_v4().simple());

    let first = client
        .post(format!("{base}/api/v1/suppliers"))
        .json(&supplier_payload("First", &email))
        .send()
        .await
        .expect("first create");
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(format!("{base}/api/v1/suppliers"))
        .json(&supplier_payload("Second", &email))
        .send()
        .await
        .expect("second create");
    assert_eq!(second.status().as_u16(), 409);

    let body: Value = second.json().await.expect("conflict body");
    assert_eq!(body["code"].as_str(), Some("CONFLICT"));
}

#[tokio::test]
#[ignore]
async fn validation_reports_every_field() {
    let client = reqwest::Client::new();
    let base = base_url();

    let response = client
        .post(format!("{base}/api/v1/suppliers"))
        .json(&json!({
            "name": "  ",
            "email": "not-an-email",
            "category": "Parts",
            "status": "archived",
            "payment_terms": "Net 90",
            "primary_contact": {"name": "Jane", "email": null, "phone": null}
        }))
        .send()
        .await
        .expect("create request");
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["code"].as_str(), Some("VALIDATION_ERROR"));
    let details = body["details"].as_object().expect("field map");
    assert!(details.contains_key("name"));
    assert!(details.contains_key("email"));
    assert!(details.contains_key("status"));
    assert!(details.contains_key("payment_terms"));
}

#[tokio::test]
#[ignore]
async fn default_categories_cannot_be_renamed_or_deleted() {
    let client = reqwest::Client::new();
    let base = base_url();

    let rename = client
        .put(format!("{base}/api/v1/suppliers/categories/Parts"))
        .json(&json!({"new_name": "Components"}))
        .send()
        .await
        .expect("rename request");
    assert_eq!(rename.status().as_u16(), 409);

    let delete = client
        .delete(format!("{base}/api/v1/suppliers/categories/Parts"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(delete.status().as_u16(), 409);

    // The defaults stay listed either way.
    let categories: Value = client
        .get(format!("{base}/api/v1/suppliers/categories"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    let names: Vec<&str> = categories["categories"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert!(names.contains(&"Parts"));
}

#[tokio::test]
#[ignore]
async fn stats_shape_is_stable() {
    let client = reqwest::Client::new();
    let base = base_url();

    let stats: Value = client
        .get(format!("{base}/api/v1/suppliers/stats"))
        .send()
        .await
        .expect("stats request")
        .json()
        .await
        .expect("stats body");

    assert!(stats["total_suppliers"].is_u64());
    assert!(stats["active_suppliers"].is_u64());
    assert!(stats["total_value"].is_number());
    assert!(stats["avg_rating"].is_number());
    assert!(
        stats["active_suppliers"].as_u64() <= stats["total_suppliers"].as_u64()
    );
}
