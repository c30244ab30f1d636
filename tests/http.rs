use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct PendingForm {
    date: String,
    distance: String,
}

#[derive(Debug, Deserialize)]
struct AggregatedEntry {
    date: String,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct StoreSnapshot {
    form: PendingForm,
    entries: Vec<AggregatedEntry>,
}

impl StoreSnapshot {
    fn distance_for(&self, date: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.date == date)
            .map(|entry| entry.distance)
    }
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/entries")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_steps_tracker"))
        .env("PORT", port.to_string())
        .env("APP_HOST", "127.0.0.1")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn set_field(client: &Client, server: &TestServer, field: &str, value: &str) -> StatusCode {
    client
        .put(format!("{}/api/form/{field}", server.base_url))
        .json(&serde_json::json!({ "value": value }))
        .send()
        .await
        .unwrap()
        .status()
}

async fn api_post(
    client: &Client,
    server: &TestServer,
    path: &str,
    body: serde_json::Value,
) -> StoreSnapshot {
    client
        .post(format!("{}{path}", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn submit_entry(client: &Client, server: &TestServer, date: &str, distance: &str) -> StoreSnapshot {
    assert!(set_field(client, server, "date", date).await.is_success());
    assert!(set_field(client, server, "distance", distance).await.is_success());
    api_post(client, server, "/api/submit", serde_json::json!({})).await
}

#[tokio::test]
async fn http_submit_aggregates_same_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    submit_entry(&client, &server, "2021-06-10", "3").await;
    let snapshot = submit_entry(&client, &server, "2021-06-10", "4").await;

    assert_eq!(snapshot.distance_for("10.06.21"), Some(7.0));
    assert!(snapshot.form.date.is_empty());
    assert!(snapshot.form.distance.is_empty());

    api_post(&client, &server, "/api/remove", serde_json::json!({ "date": "10.06.21" })).await;
}

#[tokio::test]
async fn http_rejects_negative_distance() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let snapshot = submit_entry(&client, &server, "2021-07-01", "-5").await;
    assert_eq!(snapshot.distance_for("01.07.21"), None);
    assert_eq!(snapshot.form.distance, "-5");
    assert_eq!(snapshot.form.date, "2021-07-01");
}

#[tokio::test]
async fn http_unknown_field_is_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let status = set_field(&client, &server, "km", "5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_edit_loads_total_into_form() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    submit_entry(&client, &server, "2022-03-05", "3").await;
    submit_entry(&client, &server, "2022-03-05", "4").await;

    let snapshot = api_post(&client, &server, "/api/edit", serde_json::json!({ "date": "05.03.22" })).await;
    assert_eq!(snapshot.distance_for("05.03.22"), None);
    assert_eq!(snapshot.form.date, "2022-03-05");
    assert_eq!(snapshot.form.distance, "7");

    let snapshot = api_post(&client, &server, "/api/submit", serde_json::json!({})).await;
    assert_eq!(snapshot.distance_for("05.03.22"), Some(7.0));

    api_post(&client, &server, "/api/remove", serde_json::json!({ "date": "05.03.22" })).await;
}

#[tokio::test]
async fn http_html_form_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/submit", server.base_url))
        .form(&[("date", "2023-11-20"), ("distance", "12.5")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let page = response.text().await.unwrap();
    assert!(page.contains("<div>20.11.23</div>"));
    assert!(page.contains("<div>12.5</div>"));

    let response = client
        .post(format!("{}/entries/delete", server.base_url))
        .form(&[("date", "20.11.23")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(!response.text().await.unwrap().contains("<div>20.11.23</div>"));
}

#[tokio::test]
async fn http_html_edit_prefills_form_with_total() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for distance in ["3", "4"] {
        let response = client
            .post(format!("{}/submit", server.base_url))
            .form(&[("date", "2020-08-14"), ("distance", distance)])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let response = client
        .post(format!("{}/entries/edit", server.base_url))
        .form(&[("date", "14.08.20")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let page = response.text().await.unwrap();
    assert!(page.contains(r#"value="2020-08-14""#));
    assert!(page.contains(r#"value="7""#));
    assert!(!page.contains("<div>14.08.20</div>"));

    let snapshot: StoreSnapshot = client
        .get(format!("{}/api/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot.distance_for("14.08.20"), None);

    let snapshot = api_post(&client, &server, "/api/submit", serde_json::json!({})).await;
    assert_eq!(snapshot.distance_for("14.08.20"), Some(7.0));

    api_post(&client, &server, "/api/remove", serde_json::json!({ "date": "14.08.20" })).await;
}
