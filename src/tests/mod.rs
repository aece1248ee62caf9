use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::{ClientOptions, FactsClient};
use crate::controller::{self, Action, PageController, Response};
use crate::view::RecordingView;

pub(crate) struct CannedResponse {
    status: u16,
    body: String,
    delay: Duration,
}

impl CannedResponse {
    pub(crate) fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub(crate) struct CannedServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl CannedServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read_request_target(stream: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(|s| s.to_string())
}

pub(crate) async fn serve_canned<F>(respond: F) -> CannedServer
where
    F: Fn(&str) -> CannedResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let seen = Arc::clone(&requests);
    let handle = tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let seen = Arc::clone(&seen);
            let respond = Arc::clone(&respond);
            tokio::spawn(async move {
                let target = match read_request_target(&mut stream).await {
                    Some(target) => target,
                    None => return,
                };
                seen.lock().unwrap().push(target.clone());
                let canned = respond(&target);
                if !canned.delay.is_zero() {
                    tokio::time::sleep(canned.delay).await;
                }
                let reason = if canned.status == 200 { "OK" } else { "Error" };
                let raw = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    canned.status,
                    reason,
                    canned.body.len(),
                    canned.body
                );
                let _ = stream.write_all(raw.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    CannedServer {
        addr,
        requests,
        handle,
    }
}

fn query_param<'a>(target: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = target.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == name).then_some(v)
    })
}

// five pages of 2 records each; record text names its page
fn paged_facts(target: &str) -> CannedResponse {
    let page: u64 = query_param(target, "page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let body = format!(
        r#"{{"records":[
            {{"text":"fact {page}a","upvotes":{page},"user":{{"name":{{"first":"Ada","last":"Cat"}}}}}},
            {{"text":"fact {page}b","upvotes":0}}
        ],
        "_pagination":{{"total_count":10,"current_page":{page},"per_page":2,"total_pages":5}}}}"#
    );
    CannedResponse::json(&body)
}

fn client_for(server: &CannedServer) -> FactsClient {
    FactsClient::new(
        &server.url("/api/facts"),
        &server.url("/autocomplete"),
        &ClientOptions::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn dispatch_renders_snapshot_from_api() {
    let server = serve_canned(paged_facts).await;
    let client = client_for(&server);
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();

    assert!(controller::dispatch(&mut controller, &client, &mut view, Action::GoTo(3)).await);

    let snap = view.current().unwrap();
    assert_eq!(snap.facts.len(), 2);
    assert_eq!(snap.facts[0].text, "fact 3a");
    assert_eq!(snap.facts[0].author_name, "Ada Cat");
    assert_eq!(snap.facts[1].author_name, " ");
    assert_eq!(snap.pagination.range.start, 5);
    assert_eq!(snap.pagination.range.end, 6);
    assert_eq!(snap.pagination.window(), vec![1, 2, 3, 4, 5]);
    assert_eq!(server.requests(), vec!["/api/facts?page=3&per-page=2".to_string()]);
}

#[tokio::test]
async fn search_then_navigation_keeps_query() {
    let server = serve_canned(paged_facts).await;
    let client = client_for(&server);
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();

    controller::dispatch(
        &mut controller,
        &client,
        &mut view,
        Action::Search(Some(" whiskers ".to_string())),
    )
    .await;
    controller::dispatch(&mut controller, &client, &mut view, Action::Next).await;
    controller::dispatch(&mut controller, &client, &mut view, Action::SetPerPage(4)).await;

    assert_eq!(
        server.requests(),
        vec![
            "/api/facts?page=1&per-page=2&q=whiskers".to_string(),
            "/api/facts?page=2&per-page=2&q=whiskers".to_string(),
            "/api/facts?page=1&per-page=4".to_string(),
        ]
    );
    assert_eq!(view.snapshots.len(), 3);
    assert_eq!(view.snapshots[1].query.as_deref(), Some("whiskers"));
}

#[tokio::test]
async fn slower_older_response_does_not_overwrite_newer_page() {
    let server = serve_canned(|target: &str| {
        let resp = paged_facts(target);
        if query_param(target, "page") == Some("2") {
            resp.delayed(Duration::from_millis(300))
        } else {
            resp
        }
    })
    .await;
    let client = Arc::new(client_for(&server));
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();
    let (tx, mut rx) = mpsc::channel::<Response>(4);

    for action in [Action::GoTo(2), Action::GoTo(4)] {
        let request = controller.plan(action).request.unwrap();
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(controller::execute(&client, request).await).await;
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some(response) = rx.recv().await {
        applied.push(controller::present(&mut view, controller.accept(response)));
    }

    assert_eq!(applied, vec![true, false]);
    assert_eq!(view.snapshots.len(), 1);
    assert_eq!(view.current().unwrap().pagination.current_page, 4);
    assert_eq!(controller.pagination().unwrap().current_page, 4);
}

#[tokio::test]
async fn failed_request_keeps_previous_snapshot() {
    let server = serve_canned(|target: &str| {
        if query_param(target, "page") == Some("2") {
            CannedResponse::status(503, "{}")
        } else {
            paged_facts(target)
        }
    })
    .await;
    let client = client_for(&server);
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();

    controller::dispatch(&mut controller, &client, &mut view, Action::Reload).await;
    controller::dispatch(&mut controller, &client, &mut view, Action::Next).await;

    assert_eq!(view.snapshots.len(), 1);
    assert_eq!(view.errors.len(), 1);
    assert!(view.errors[0].contains("503"));
    assert_eq!(controller.pagination().unwrap().current_page, 1);
}

#[tokio::test]
async fn typing_shows_split_suggestions_and_pick_fills_search() {
    let server = serve_canned(|target: &str| {
        if target.starts_with("/autocomplete") {
            CannedResponse::json(r#"["cat naps","cat nip"]"#)
        } else {
            paged_facts(target)
        }
    })
    .await;
    let client = client_for(&server);
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();

    controller::dispatch(
        &mut controller,
        &client,
        &mut view,
        Action::Type("cat n".to_string()),
    )
    .await;
    assert_eq!(view.suggestions.len(), 2);
    assert_eq!(view.suggestions[1].matched_prefix, "cat n");
    assert_eq!(view.suggestions[1].remainder, "ip");

    controller::dispatch(&mut controller, &client, &mut view, Action::Pick(1)).await;
    assert!(view.suggestions.is_empty());
    assert_eq!(controller.search_field(), "cat nip");

    controller::dispatch(&mut controller, &client, &mut view, Action::Search(None)).await;
    assert_eq!(
        server.requests(),
        vec![
            "/autocomplete?q=cat+n".to_string(),
            "/api/facts?page=1&per-page=2&q=cat+nip".to_string(),
        ]
    );
}

#[tokio::test]
async fn preset_search_is_sent_with_first_request() {
    let server = serve_canned(paged_facts).await;
    let client = client_for(&server);
    let mut controller = PageController::new(2);
    let mut view = RecordingView::default();

    controller.preset_search("  tabby ");
    controller::dispatch(&mut controller, &client, &mut view, Action::GoTo(2)).await;
    assert_eq!(
        server.requests(),
        vec!["/api/facts?page=2&per-page=2&q=tabby".to_string()]
    );
}
