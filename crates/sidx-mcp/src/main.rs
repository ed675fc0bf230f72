use rmcp::service::ServiceExt;
use sidx_mcp::SidxServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr
    sidx::logging::init_tracing();

    let server = SidxServer::new();
    let transport = rmcp::transport::stdio();
    server.serve(transport).await?.waiting().await?;
    Ok(())
}
