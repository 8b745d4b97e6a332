//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the essay counters, the submit gate, the feedback provider and the
//! site's email/blog helpers over stdio, so an assistant can check a draft
//! the same way the CLI does.
//!
//! Each `#[tool]` method delegates to `essay_check_core`; none of them hold
//! business logic of their own.

use std::time::Duration;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use essay_check_core::blog::{self, BlogPost, CategoryFilter};
use essay_check_core::feedback::{FeedbackProvider, TemplateFeedbackProvider};
use essay_check_core::{EssaySettings, Gate, forms, gating, metrics};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for tools that take essay text.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct EssayParams {
    /// The essay text.
    pub text: String,
}

/// Parameters for the `validate_email` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ValidateEmailParams {
    /// Address to check.
    pub email: String,
}

/// Parameters for the `filter_posts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FilterPostsParams {
    /// Posts to filter.
    pub posts: Vec<BlogPost>,
    /// Case-insensitive search over title and excerpt.
    #[serde(default)]
    pub search: String,
    /// Category slug, or "all".
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "all".to_string()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing essay checks to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    settings: EssaySettings,
    provider: TemplateFeedbackProvider,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Server with default settings and no feedback delay.
    pub fn new() -> Self {
        Self::with_settings(EssaySettings::default(), Duration::ZERO, None)
    }

    /// Server using the given counters, gate and feedback delay.
    pub fn with_settings(
        settings: EssaySettings,
        feedback_delay: Duration,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            settings,
            provider: TemplateFeedbackProvider::new(feedback_delay),
            max_input_bytes,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(())
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Word, character and sentence counts with reading time.
    #[tool(
        description = "Count words, characters and sentences in an essay. Returns average words per sentence and estimated reading time."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compute_metrics(
        &self,
        Parameters(params): Parameters<EssayParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let report = metrics::compute_metrics_with(&params.text, &self.settings.analytics);

        tracing::info!(
            tool = "compute_metrics",
            words = report.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Whether the essay passes the submit gate.
    #[tool(
        description = "Check whether an essay is long enough to submit. Returns status \"open\" or \"blocked\" with a reason."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_submission(
        &self,
        Parameters(params): Parameters<EssayParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let gate = gating::check_submission(&params.text, &self.settings.policy);

        tracing::info!(
            tool = "check_submission",
            open = gate.is_open(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&gate)?)]))
    }

    /// Feedback for an essay that passes the submit gate.
    #[tool(
        description = "Generate writing feedback (grammar, style, clarity, suggestions). Fails if the essay is too short to submit."
    )]
    async fn generate_feedback(
        &self,
        Parameters(params): Parameters<EssayParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "generate_feedback",
            provider = self.provider.name(),
            "executing MCP tool"
        );
        self.check_size(&params.text)?;

        if let Gate::Blocked(reason) = gating::check_submission(&params.text, &self.settings.policy)
        {
            tracing::info!(tool = "generate_feedback", %reason, "submission blocked");
            return Ok(CallToolResult::error(vec![Content::text(reason.to_string())]));
        }

        let items = self
            .provider
            .feedback(&params.text)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        tracing::info!(
            tool = "generate_feedback",
            items = items.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&items)?)]))
    }

    /// Check an email address against the site's pattern.
    #[tool(description = "Check whether an email address is well formed.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn validate_email(
        &self,
        Parameters(params): Parameters<ValidateEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let valid = forms::validate_email(&params.email);
        tracing::info!(tool = "validate_email", valid, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &serde_json::json!({ "email": params.email, "valid": valid }),
        )?)]))
    }

    /// Search and category filter over blog posts.
    #[tool(
        description = "Filter blog posts by a case-insensitive search term and a category (\"all\" for every category)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", category = %params.category))]
    fn filter_posts(
        &self,
        Parameters(params): Parameters<FilterPostsParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = CategoryFilter::parse(&params.category);
        let visible = blog::filter_posts(&params.posts, &params.search, &filter);

        tracing::info!(
            tool = "filter_posts",
            visible = visible.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &visible,
        )?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Count essay words, check the {}-word submit gate and request feedback.",
                env!("CARGO_PKG_NAME"),
                self.settings.policy.min_words,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn essay(words: usize) -> String {
        "word ".repeat(words)
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_instructions_mention_gate() {
        let server = ProjectServer::new();
        let instructions = ServerHandler::get_info(&server)
            .instructions
            .expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
        assert!(instructions.contains("50-word"));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");

        let json = json_of(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = ProjectServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: default_format(),
            }))
            .expect("get_info should succeed");

        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn compute_metrics_tool_counts() {
        let server = ProjectServer::new();
        let result = server
            .compute_metrics(Parameters(EssayParams {
                text: "One two three. Four five.".to_string(),
            }))
            .expect("compute_metrics should succeed");

        let json = json_of(&result);
        assert_eq!(json["word_count"], 5);
        assert_eq!(json["sentence_count"], 2);
        assert_eq!(json["reading_time"]["minutes"], 1);
    }

    #[test]
    fn check_submission_tool_reports_gate() {
        let server = ProjectServer::new();
        let blocked = server
            .check_submission(Parameters(EssayParams { text: essay(49) }))
            .expect("check_submission should succeed");
        assert_eq!(json_of(&blocked)["status"], "blocked");

        let open = server
            .check_submission(Parameters(EssayParams { text: essay(50) }))
            .expect("check_submission should succeed");
        assert_eq!(json_of(&open)["status"], "open");
    }

    #[tokio::test]
    async fn generate_feedback_tool_returns_items() {
        let server = ProjectServer::new();
        let result = server
            .generate_feedback(Parameters(EssayParams { text: essay(60) }))
            .await
            .expect("generate_feedback should succeed");

        assert!(!result.is_error.unwrap_or(false));
        let json = json_of(&result);
        assert_eq!(json.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn generate_feedback_tool_rejects_short_essay() {
        let server = ProjectServer::new();
        let result = server
            .generate_feedback(Parameters(EssayParams { text: essay(10) }))
            .await
            .expect("tool call should complete");

        assert!(result.is_error.unwrap_or(false));
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains("at least 50 words"));
    }

    #[test]
    fn oversized_input_is_refused() {
        let server = ProjectServer::with_settings(EssaySettings::default(), Duration::ZERO, Some(8));
        let result = server.compute_metrics(Parameters(EssayParams { text: essay(10) }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_email_tool_works() {
        let server = ProjectServer::new();
        let result = server
            .validate_email(Parameters(ValidateEmailParams {
                email: "student@college.edu".to_string(),
            }))
            .expect("validate_email should succeed");
        assert_eq!(json_of(&result)["valid"], true);
    }

    #[test]
    fn filter_posts_tool_filters() {
        let server = ProjectServer::new();
        let posts = vec![
            BlogPost {
                title: "Essay Tips".into(),
                excerpt: "Start early".into(),
                category: "essays".into(),
            },
            BlogPost {
                title: "Campus Tour".into(),
                excerpt: "Visit us".into(),
                category: "campus".into(),
            },
        ];
        let result = server
            .filter_posts(Parameters(FilterPostsParams {
                posts,
                search: "ESSAY".into(),
                category: default_category(),
            }))
            .expect("filter_posts should succeed");

        let json = json_of(&result);
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["title"], "Essay Tips");
    }
}
