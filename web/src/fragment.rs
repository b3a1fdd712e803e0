//! HTML fragments placed into the page shell.
//!
//! Every value that came from the authorization server, the API or the browser is
//! escaped before it is interpolated.

use domain::jwt::TokenInspection;
use domain::protected_api::ApiCall;
use serde_json::Value;

const BACK_LINK: &str = r#"<a href="/" class="btn btn-sm btn-light border">Back</a>"#;

/// Errors of the OAuth flow that are shown to the user as a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The callback arrived without an authorization code.
    MissingCode { error_description: Option<String> },
    /// The token endpoint did not hand out an access token.
    TokenExchangeFailed { hint: Option<String> },
    /// An API call was requested without a session token.
    MissingSessionToken,
}

impl Notice {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            Notice::MissingCode { error_description } => {
                html.push_str(&alert("danger", "No code provided"));
                if let Some(description) = error_description {
                    html.push_str(&alert("danger", &format!("Error: {description}")));
                }
            }
            Notice::TokenExchangeFailed { hint } => {
                html.push_str(&alert("danger", "No access token provided"));
                if let Some(hint) = hint {
                    html.push_str(&alert("danger", &format!("Error: {hint}")));
                }
            }
            Notice::MissingSessionToken => {
                html.push_str(&alert("warning", "No access token provided"));
            }
        }
        html.push_str(BACK_LINK);
        html
    }
}

/// Home page content for a browser holding a token: actions plus the decoded token.
pub fn token_inspection(inspection: &TokenInspection) -> String {
    let mut html = String::new();
    html.push_str(r#"<p><a href="/api" class="btn btn-sm btn-primary">Test API Call</a></p>"#);
    html.push_str(r#"<p><a href="/logout" class="btn btn-sm btn-light border">Logout</a></p>"#);
    html.push_str(&format!(
        "<p>JWT Header</p><pre>{}</pre>",
        pretty(inspection.header.as_ref())
    ));
    html.push_str(&format!(
        "<p>JWT Payload</p><pre>{}</pre>",
        pretty(inspection.payload.as_ref())
    ));
    html
}

/// Result of a protected API call: where it went, with what, and what came back.
pub fn api_result(call: &ApiCall, access_token: &str) -> String {
    let mut html = alert("info", &format!("Calling API on {}", call.endpoint));
    html.push_str(&format!(
        r#"<p>With access token <textarea class="form-control">{}</textarea></p>"#,
        html_escape(access_token)
    ));
    html.push_str(&format!(
        "<p>Response</p><pre>{}</pre>",
        pretty(Some(&call.response))
    ));
    html.push_str(BACK_LINK);
    html
}

fn alert(level: &str, message: &str) -> String {
    format!(
        r#"<p class="alert alert-{level}">{}</p>"#,
        html_escape(message)
    )
}

fn pretty(value: Option<&Value>) -> String {
    value
        .and_then(|value| serde_json::to_string_pretty(value).ok())
        .map(|json| html_escape(&json))
        .unwrap_or_default()
}

/// Escape text for use in HTML element content and attribute values.
pub fn html_escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}
