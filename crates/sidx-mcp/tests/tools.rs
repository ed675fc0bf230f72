use rmcp::ClientHandler;
use rmcp::model::{CallToolRequestParam, ClientInfo, Implementation};
use rmcp::service::ServiceExt;
use sidx_mcp::SidxServer;

/// Minimal client handler for testing
#[derive(Clone)]
struct TestClient;

impl ClientHandler for TestClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo {
            client_info: Implementation {
                name: "test-client".into(),
                version: "0.1.0".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn fixture_index() -> String {
    format!(
        "{}/../searchindex/tests/fixtures/search-index.js",
        env!("CARGO_MANIFEST_DIR")
    )
}

async fn call_tool(tool: impl Into<String>, args: serde_json::Value) -> (String, bool) {
    let tool: String = tool.into();
    let server = SidxServer::new();
    let client = TestClient;

    // Create bidirectional in-memory transport using duplex streams
    let (client_io, server_io) = tokio::io::duplex(4096);

    let server_handle = tokio::spawn(async move {
        let _ = server.serve(server_io).await.unwrap().waiting().await;
    });

    let client_service = client.serve(client_io).await.unwrap();

    let request = CallToolRequestParam {
        name: tool.into(),
        arguments: Some(args.as_object().cloned().unwrap_or_default()),
        meta: None,
        task: None,
    };

    let result = client_service.call_tool(request).await.unwrap();

    let is_error = result.is_error.unwrap_or(false);
    let output = result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect::<Vec<_>>()
        .join("\n");

    drop(client_service);
    server_handle.abort();

    (output, is_error)
}

#[tokio::test]
async fn lookup_index_with_query() {
    let (output, is_error) = call_tool(
        "lookup_index",
        serde_json::json!({
            "index": fixture_index(),
            "query": "fn:"
        }),
    )
    .await;
    assert!(!is_error, "{output}");
    insta::assert_snapshot!(output, @r"
    fn           electron_phonon_scattering_2d::create_ensemble
    fn           electron_phonon_scattering_2d::probability::probability
    ");
}

#[tokio::test]
async fn lookup_index_without_query_lists_everything() {
    let (output, is_error) = call_tool(
        "lookup_index",
        serde_json::json!({ "index": fixture_index() }),
    )
    .await;
    assert!(!is_error, "{output}");
    assert_eq!(output.lines().count(), 66);
}

#[tokio::test]
async fn show_item_detail() {
    let (output, is_error) = call_tool(
        "show_item",
        serde_json::json!({
            "index": fixture_index(),
            "symbol": "probability::probability"
        }),
    )
    .await;
    assert!(!is_error, "{output}");
    insta::assert_snapshot!(output, @r"
    fn           electron_phonon_scattering_2d::probability::probability
      signature: fn probability(f64, t, f64) -> f64

    Calculates $\int\limits_{BZ} \delta(E(p)-E) d^{2} p$
    ");
}

#[tokio::test]
async fn lookup_missing_index() {
    let (output, is_error) = call_tool(
        "lookup_index",
        serde_json::json!({ "index": "/nonexistent/search-index.js" }),
    )
    .await;
    assert!(is_error, "lookup_index should fail for a missing file");
    insta::assert_snapshot!(output, @"Failed to read search index at /nonexistent/search-index.js: No such file or directory (os error 2)");
}
