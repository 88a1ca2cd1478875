//! HTTP implementation of the directory client.
//!
//! Thin translation layer: build the request, check transport status, check
//! the application envelope, decode the payload. Upstream reports most
//! application failures through an `errcode` field carried alongside the
//! payload in an HTTP 200 response, so both levels are classified here.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{DirectoryError, DirectoryResult};

use super::api::DirectoryApi;
use super::types::{Credentials, Department, IssuedToken, User, UserSummary};

/// Production endpoint of the upstream API.
pub const DEFAULT_BASE_URL: &str = "https://oapi.dingtalk.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const USER_PAGE_SIZE: usize = 100;

// Upstream application error codes with a fixed meaning.
const CODE_OK: i64 = 0;
const CODE_SYSTEM_BUSY: i64 = -1;
const CODE_INVALID_CREDENTIAL: i64 = 40001;
const CODE_INVALID_TOKEN: i64 = 40014;
const CODE_TOKEN_EXPIRED: i64 = 42001;
const CODE_DEPARTMENT_NOT_FOUND: i64 = 60003;
const CODE_USER_NOT_FOUND: i64 = 60121;
const CODE_FLOW_CONTROL: i64 = 90018;

/// reqwest-backed [`DirectoryApi`] implementation.
///
/// Cheap to clone; the inner connection pool is shared. The base URL is
/// injectable so tests can point the client at a local stub server.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

#[derive(Debug, Deserialize)]
struct DepartmentListBody {
    #[serde(default)]
    department: Vec<Department>,
}

#[derive(Debug, Deserialize)]
struct UserListBody {
    #[serde(rename = "hasMore", default)]
    has_more: bool,
    #[serde(default)]
    userlist: Vec<UserSummary>,
}

impl HttpDirectoryClient {
    /// Create a client against the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> DirectoryResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("dingtalk-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| DirectoryError::protocol("client_init", err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET round trip: transport check, envelope check, payload decode.
    ///
    /// `department_id`/`user_id` give not-found envelope codes a subject to
    /// attach to. The query string is never logged: it carries the token.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, String)],
        department_id: Option<i64>,
        user_id: Option<&str>,
    ) -> DirectoryResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {path} ({operation})");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| classify_transport_error(operation, &err))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(&response);
            warn!("{operation}: upstream flow control (HTTP 429, retry after {retry_after:?})");
            return Err(DirectoryError::rate_limited(operation, retry_after));
        }
        if status.is_server_error() {
            return Err(DirectoryError::transient(
                operation,
                format!("upstream returned HTTP {status}"),
            ));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DirectoryError::auth(
                operation,
                i64::from(status.as_u16()),
                "request rejected at transport level",
            ));
        }
        if !status.is_success() {
            return Err(DirectoryError::protocol(
                operation,
                format!("unexpected HTTP status {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|err| DirectoryError::transient(operation, err.to_string()))?;
        let envelope: Envelope = serde_json::from_str(&body).map_err(|err| {
            DirectoryError::protocol(operation, format!("undecodable response body: {err}"))
        })?;
        if envelope.errcode != CODE_OK {
            return Err(classify_errcode(
                operation,
                envelope.errcode,
                envelope.errmsg,
                department_id,
                user_id,
            ));
        }
        serde_json::from_str(&body).map_err(|err| {
            DirectoryError::protocol(operation, format!("response missing expected fields: {err}"))
        })
    }
}

impl DirectoryApi for HttpDirectoryClient {
    async fn fetch_token(&self, credentials: &Credentials) -> DirectoryResult<IssuedToken> {
        let query = [
            ("appkey", credentials.app_key.clone()),
            ("appsecret", credentials.app_secret.clone()),
        ];
        self.get_json("fetch_token", "/gettoken", &query, None, None)
            .await
    }

    async fn list_departments(
        &self,
        token: &str,
        department_id: Option<i64>,
        include_children: bool,
    ) -> DirectoryResult<Vec<Department>> {
        let mut query = vec![("access_token", token.to_string())];
        if let Some(id) = department_id {
            query.push(("id", id.to_string()));
        }
        query.push(("fetch_child", include_children.to_string()));
        let body: DepartmentListBody = self
            .get_json(
                "list_departments",
                "/v1/department/list",
                &query,
                department_id,
                None,
            )
            .await?;
        Ok(body.department)
    }

    async fn list_users(&self, token: &str, department_id: i64) -> DirectoryResult<Vec<UserSummary>> {
        let mut users = Vec::new();
        let mut offset: usize = 0;
        loop {
            let query = [
                ("access_token", token.to_string()),
                ("department_id", department_id.to_string()),
                ("offset", offset.to_string()),
                ("size", USER_PAGE_SIZE.to_string()),
            ];
            let page: UserListBody = self
                .get_json(
                    "list_users",
                    "/v1/user/simplelist",
                    &query,
                    Some(department_id),
                    None,
                )
                .await?;
            let fetched = page.userlist.len();
            debug!("list_users: department {department_id} offset {offset} returned {fetched}");
            users.extend(page.userlist);
            // Stop on an empty page even if upstream keeps claiming more
            if !page.has_more || fetched == 0 {
                break;
            }
            offset += fetched;
        }
        Ok(users)
    }

    async fn get_user(&self, token: &str, user_id: &str) -> DirectoryResult<User> {
        let query = [
            ("access_token", token.to_string()),
            ("userid", user_id.to_string()),
        ];
        self.get_json("get_user", "/v1/user/get", &query, None, Some(user_id))
            .await
    }
}

fn classify_transport_error(operation: &'static str, err: &reqwest::Error) -> DirectoryError {
    if err.is_timeout() {
        DirectoryError::transient(operation, "request timed out")
    } else if err.is_connect() {
        DirectoryError::transient(operation, format!("connection failed: {err}"))
    } else {
        DirectoryError::transient(operation, err.to_string())
    }
}

fn parse_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn classify_errcode(
    operation: &'static str,
    code: i64,
    message: String,
    department_id: Option<i64>,
    user_id: Option<&str>,
) -> DirectoryError {
    match code {
        CODE_INVALID_CREDENTIAL | CODE_INVALID_TOKEN | CODE_TOKEN_EXPIRED => {
            DirectoryError::auth(operation, code, message)
        }
        CODE_DEPARTMENT_NOT_FOUND => match department_id {
            Some(id) => DirectoryError::department_not_found(id),
            None => DirectoryError::protocol(
                operation,
                format!("upstream reported a missing department: {message}"),
            ),
        },
        CODE_USER_NOT_FOUND => match user_id {
            Some(id) => DirectoryError::user_not_found(id),
            None => DirectoryError::protocol(
                operation,
                format!("upstream reported a missing user: {message}"),
            ),
        },
        CODE_FLOW_CONTROL => DirectoryError::rate_limited(operation, None),
        CODE_SYSTEM_BUSY => DirectoryError::transient(operation, "upstream busy"),
        other => DirectoryError::protocol(
            operation,
            format!("unexpected upstream error {other}: {message}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_codes_map_to_auth() {
        for code in [40001, 40014, 42001] {
            let err = classify_errcode("list_users", code, "rejected".into(), None, None);
            assert!(err.is_auth(), "code {code} should classify as auth");
        }
    }

    #[test]
    fn test_not_found_needs_a_subject() {
        let with_dept = classify_errcode("list_users", 60003, "no dept".into(), Some(9), None);
        assert_eq!(with_dept.department_id(), Some(9));

        let without = classify_errcode("list_users", 60003, "no dept".into(), None, None);
        assert_eq!(without.code(), "PROTOCOL_ERROR");

        let user = classify_errcode("get_user", 60121, "no user".into(), None, Some("u7"));
        assert_eq!(user.code(), "USER_NOT_FOUND");
    }

    #[test]
    fn test_flow_control_and_busy_codes() {
        assert!(classify_errcode("x", 90018, "busy".into(), None, None).is_retryable());
        assert!(classify_errcode("x", -1, "busy".into(), None, None).is_retryable());
    }

    #[test]
    fn test_unknown_code_is_protocol_error() {
        let err = classify_errcode("list_departments", 71006, "odd".into(), Some(1), None);
        assert_eq!(err.code(), "PROTOCOL_ERROR");
        assert!(err.to_string().contains("71006"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpDirectoryClient::new("http://localhost:9999/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
    }
}
