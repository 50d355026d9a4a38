//! Request construction: URL, body and headers for one API call.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::auth::TokenManager;
use crate::error::Result;
use crate::response::text;
use crate::serialize::serialize;
use crate::transport::{HttpMethod, HttpRequest};

/// Builds requests against one host, authenticated through a token manager
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    host: &'a str,
    tokens: &'a TokenManager,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(host: &'a str, tokens: &'a TokenManager) -> Self {
        Self { host, tokens }
    }

    /// Build the request for `method` + `path` with `params`.
    ///
    /// May refresh the access token, which is a network call of its own.
    pub async fn build(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Value,
        serialize_fields: &[&str],
    ) -> Result<HttpRequest> {
        let params = serialize(params, serialize_fields);

        let url = self.url_for(method, path, &params);
        let body = body_for(method, &params);

        let token = self.tokens.ensure_token().await?;
        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), token.authorization()),
        ];

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn url_for(&self, method: HttpMethod, path: &str, params: &Value) -> String {
        let (path, consumed) = render_path(path, params);
        let query = if method == HttpMethod::Get {
            query_string(params, &consumed)
        } else {
            String::new()
        };

        if query.is_empty() {
            format!("{}{}", self.host, path)
        } else {
            format!("{}{}?{}", self.host, path, query)
        }
    }
}

/// Substitute `{{name}}` placeholders from `params`.
///
/// Values are percent-encoded so they stay inside one path segment. Missing
/// and null values render as the empty string. Returns the rendered path and
/// the names of the placeholders it consumed.
pub fn render_path(template: &str, params: &Value) -> (String, BTreeSet<String>) {
    let mut rendered = String::with_capacity(template.len());
    let mut consumed = BTreeSet::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        rendered.push_str(&rest[..start]);

        let name = rest[start + 2..start + 2 + len].trim();
        match params.get(name) {
            Some(Value::Null) | None => {}
            Some(value) => rendered.push_str(&urlencoding::encode(&text(value))),
        }
        consumed.insert(name.to_string());

        rest = &rest[start + 2 + len + 2..];
    }
    rendered.push_str(rest);

    (rendered, consumed)
}

/// Form-encode every parameter not consumed by the path.
///
/// Arrays repeat their key, `null` encodes as an empty value and nested
/// objects encode as JSON text.
pub fn query_string(params: &Value, consumed: &BTreeSet<String>) -> String {
    let Some(object) = params.as_object() else {
        return String::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in object.iter().filter(|(key, _)| !consumed.contains(*key)) {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push(encode_pair(key, item));
                }
            }
            other => pairs.push(encode_pair(key, other)),
        }
    }

    pairs.join("&")
}

fn encode_pair(key: &str, value: &Value) -> String {
    let value = match value {
        Value::Null => String::new(),
        other => text(other),
    };
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(&value))
}

/// Request body: none for GET or absent params, raw for strings, JSON otherwise.
pub fn body_for(method: HttpMethod, params: &Value) -> Option<String> {
    if method == HttpMethod::Get {
        return None;
    }
    match params {
        Value::Null => None,
        Value::String(raw) => Some(raw.clone()),
        other => Some(other.to_string()),
    }
}
