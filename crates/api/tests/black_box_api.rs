use reqwest::StatusCode;
use serde_json::Value;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod (in-memory backend), bound to an ephemeral port.
        let app = acme_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client that surfaces redirects instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn list_invoices(client: &reqwest::Client, base_url: &str) -> Vec<Value> {
    let res = client
        .get(format!("{}/dashboard/invoices", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["items"].as_array().unwrap().clone()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let srv = TestServer::spawn().await;

    let res = client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_invoice_redirects_to_the_listing() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .form(&[("customerId", "c1"), ("amount", "10"), ("status", "pending")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "/dashboard/invoices"
    );

    let items = list_invoices(&client, &srv.base_url).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["customerId"], "c1");
    assert_eq!(items[0]["amountCents"], 1000);
    assert_eq!(items[0]["status"], "pending");
}

#[tokio::test]
async fn create_invoice_with_missing_fields_returns_field_errors() {
    let srv = TestServer::spawn().await;

    let res = client()
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .form(&[("customerId", ""), ("amount", ""), ("status", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
    assert_eq!(
        body["errors"]["customerId"][0],
        "Please select a customer."
    );
    assert_eq!(
        body["errors"]["amount"][0],
        "Please enter an amount greater than $0."
    );
    assert_eq!(
        body["errors"]["status"][0],
        "Please select an invoice status."
    );
}

#[tokio::test]
async fn update_invoice_overwrites_the_listed_row() {
    let srv = TestServer::spawn().await;
    let client = client();

    client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .form(&[("customerId", "c1"), ("amount", "10"), ("status", "pending")])
        .send()
        .await
        .unwrap();

    let items = list_invoices(&client, &srv.base_url).await;
    let id = items[0]["id"].as_str().unwrap().to_string();
    let date = items[0]["date"].clone();

    let res = client
        .post(format!("{}/dashboard/invoices/{}", srv.base_url, id))
        .form(&[("customerId", "c2"), ("amount", "5"), ("status", "paid")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let items = list_invoices(&client, &srv.base_url).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_str().unwrap(), id);
    assert_eq!(items[0]["customerId"], "c2");
    assert_eq!(items[0]["amountCents"], 500);
    assert_eq!(items[0]["status"], "paid");
    assert_eq!(items[0]["date"], date);
}

#[tokio::test]
async fn single_invoice_fetch_and_missing_row() {
    let srv = TestServer::spawn().await;
    let client = client();

    client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .form(&[("customerId", "c1"), ("amount", "10"), ("status", "pending")])
        .send()
        .await
        .unwrap();

    let items = list_invoices(&client, &srv.base_url).await;
    let id = items[0]["id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/dashboard/invoices/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"].as_str().unwrap(), id);
    assert_eq!(body["amountCents"], 1000);

    let res = client
        .get(format!(
            "{}/dashboard/invoices/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_invoice_removes_the_row() {
    let srv = TestServer::spawn().await;
    let client = client();

    client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .form(&[("customerId", "c1"), ("amount", "10"), ("status", "pending")])
        .send()
        .await
        .unwrap();

    let items = list_invoices(&client, &srv.base_url).await;
    let id = items[0]["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/dashboard/invoices/{}/delete", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    assert!(list_invoices(&client, &srv.base_url).await.is_empty());
}

#[tokio::test]
async fn garbage_invoice_ids_are_rejected() {
    let srv = TestServer::spawn().await;

    let res = client()
        .post(format!("{}/dashboard/invoices/not-a-uuid/delete", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn customer_directory_offers_selector_options() {
    let srv = TestServer::spawn().await;

    let res = client()
        .get(format!("{}/dashboard/customers", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        assert!(item["id"].is_string());
        assert!(item["name"].is_string());
    }
}
