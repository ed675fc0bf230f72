use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Clone)]
pub struct SidxServer {
    tool_router: ToolRouter<Self>,
}

impl Default for SidxServer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct LookupIndexParams {
    /// Index to read: path to search-index.js, a documentation directory, or an http(s) URL
    pub index: String,
    /// Optional query (e.g. "energy", "struct:", "material::energy", "f64 -> f64"). Without it, every item is listed.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct ShowItemParams {
    /// Index to read: path to search-index.js, a documentation directory, or an http(s) URL
    pub index: String,
    /// Item name, optionally qualified (e.g. "Material::energy")
    pub symbol: String,
}

/// Run the CLI off the async runtime and wrap its output as a tool result.
async fn run_sidx(args: Vec<String>) -> Result<CallToolResult, McpError> {
    tracing::debug!(?args, "running sidx");
    let result = tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        sidx::run_cli(&args)
    })
    .await
    .map_err(|e| McpError::internal_error(e.to_string(), None))?;

    match result {
        Ok(output) => Ok(CallToolResult::success(vec![Content::text(output)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e)])),
    }
}

fn base_args(index: String) -> Vec<String> {
    vec![
        "--color".to_string(),
        "never".to_string(),
        "--index".to_string(),
        index,
    ]
}

#[tool_router]
impl SidxServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search a rustdoc search index (search-index.js). Without a query, lists every item. Queries match item names, `module::Type::name` paths, `kind:` filters, or signatures like `f64, point -> f64`."
    )]
    async fn lookup_index(
        &self,
        params: Parameters<LookupIndexParams>,
    ) -> Result<CallToolResult, McpError> {
        let LookupIndexParams { index, query } = params.0;
        let mut args = base_args(index);
        match query {
            Some(query) => args.extend(["search".to_string(), query]),
            None => args.push("list".to_string()),
        }
        run_sidx(args).await
    }

    #[tool(
        description = "Show one item of a rustdoc search index: kind, qualified path, owner, signature and summary."
    )]
    async fn show_item(
        &self,
        params: Parameters<ShowItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let ShowItemParams { index, symbol } = params.0;
        let mut args = base_args(index);
        args.extend(["show".to_string(), symbol]);
        run_sidx(args).await
    }
}

impl ServerHandler for SidxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "sidx".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_context = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_context).await
    }
}
