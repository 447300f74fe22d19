// src/mcp/dispatch.rs
//! MCP method names as a typed vocabulary.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpMethod {
    Initialize,
    ListTools,
    CallTool,
    Ping,
    /// Any `notifications/*` message. Never answered.
    Notification(String),
    Unknown(String),
}

impl McpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::ListTools => "tools/list",
            Self::CallTool => "tools/call",
            Self::Ping => "ping",
            Self::Notification(name) | Self::Unknown(name) => name.as_str(),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Notification(_))
    }
}

impl From<&str> for McpMethod {
    fn from(s: &str) -> Self {
        match s {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ListTools,
            "tools/call" => Self::CallTool,
            "ping" => Self::Ping,
            n if n.starts_with("notifications/") => Self::Notification(n.to_string()),
            unknown => Self::Unknown(unknown.to_string()),
        }
    }
}

impl fmt::Display for McpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
