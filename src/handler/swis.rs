//! SWIS query and invoke handlers
//!
//! The query route picks one canned payload by substring checks on the
//! `parameters.name` and `query` fields. Invoke verbs ignore their body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::fixtures;
use crate::http;
use crate::logger;

const TEST_NAME_MARKER: &str = "test";
const DEV_QA_NFS_FILTER: &str = r#"DisplayName == "DEV/QA NFS""#;
const DEV_QA_NFS2_FILTER: &str = r#"DisplayName == "DEV/QA NFS2""#;

/// Body of `POST .../Json/Query`
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

impl QueryRequest {
    /// `parameters.name`, only when it is a string
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameters.as_ref()?.get("name")?.as_str()
    }

    fn query_contains(&self, needle: &str) -> bool {
        self.query.as_deref().is_some_and(|q| q.contains(needle))
    }
}

/// Which canned query response a request selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFixture {
    TestSubnet,
    DevQaNfs,
    DevQaNfs2,
    Empty,
}

impl QueryFixture {
    /// First matching rule wins; a missing field never matches
    pub fn select(req: &QueryRequest) -> Self {
        if req
            .parameter_name()
            .is_some_and(|name| name.contains(TEST_NAME_MARKER))
        {
            Self::TestSubnet
        } else if req.query_contains(DEV_QA_NFS_FILTER) {
            Self::DevQaNfs
        } else if req.query_contains(DEV_QA_NFS2_FILTER) {
            Self::DevQaNfs2
        } else {
            Self::Empty
        }
    }

    pub const fn payload(self) -> &'static str {
        match self {
            Self::TestSubnet => fixtures::TEST_SUBNET,
            Self::DevQaNfs => fixtures::DEV_QA_NFS,
            Self::DevQaNfs2 => fixtures::DEV_QA_NFS2,
            Self::Empty => fixtures::EMPTY_RESULTS,
        }
    }
}

/// Answer a query from its raw body
pub fn handle_query(body: &[u8]) -> Response<Full<Bytes>> {
    let req: QueryRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!("Rejected query body: {e}"));
            return http::build_400_response(&format!("Invalid JSON: {e}"));
        }
    };

    match &req.parameters {
        Some(params) => logger::log_info(&format!(
            "[Query] parameters: {}",
            Value::Object(params.clone())
        )),
        None => logger::log_info("[Query] parameters: none"),
    }

    http::build_json_response(QueryFixture::select(&req).payload())
}

pub fn handle_get_first_available_ip() -> Response<Full<Bytes>> {
    http::build_json_response(fixtures::FIRST_AVAILABLE_IP)
}

pub fn handle_change_ip_status() -> Response<Full<Bytes>> {
    http::build_json_response(fixtures::CHANGE_IP_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn request(body: &str) -> QueryRequest {
        serde_json::from_str(body).unwrap()
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_select_by_parameter_name() {
        let req = request(
            r#"{"query":"SELECT Address FROM IPAM.Subnets WHERE DisplayName == @name","parameters":{"name":"my test subnet"}}"#,
        );
        assert_eq!(QueryFixture::select(&req), QueryFixture::TestSubnet);
    }

    #[test]
    fn test_parameter_name_wins_over_query() {
        let req = request(
            r#"{"query":"WHERE DisplayName == \"DEV/QA NFS\"","parameters":{"name":"test"}}"#,
        );
        assert_eq!(QueryFixture::select(&req), QueryFixture::TestSubnet);
    }

    #[test]
    fn test_select_by_query_filter() {
        let req = request(r#"{"query":"SELECT * FROM IPAM.Subnets WHERE DisplayName == \"DEV/QA NFS\""}"#);
        assert_eq!(QueryFixture::select(&req), QueryFixture::DevQaNfs);

        let req = request(r#"{"query":"SELECT * FROM IPAM.Subnets WHERE DisplayName == \"DEV/QA NFS2\""}"#);
        assert_eq!(QueryFixture::select(&req), QueryFixture::DevQaNfs2);
    }

    #[test]
    fn test_missing_fields_select_empty() {
        assert_eq!(QueryFixture::select(&request("{}")), QueryFixture::Empty);
        assert_eq!(
            QueryFixture::select(&request(r#"{"parameters":{"name":42}}"#)),
            QueryFixture::Empty
        );
        assert_eq!(
            QueryFixture::select(&request(r#"{"query":null,"parameters":null}"#)),
            QueryFixture::Empty
        );
        assert_eq!(
            QueryFixture::select(&request(r#"{"parameters":{"name":"prod"}}"#)),
            QueryFixture::Empty
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let req = request(r#"{"query":"x","parameters":{},"extra":[1,2]}"#);
        assert_eq!(req.parameter_name(), None);
    }

    #[tokio::test]
    async fn test_handle_query_returns_fixture() {
        let resp = handle_query(br#"{"parameters":{"name":"test"}}"#);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, fixtures::TEST_SUBNET);
    }

    #[tokio::test]
    async fn test_handle_query_rejects_bad_json() {
        let resp = handle_query(b"{not json");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

        let resp = handle_query(b"");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invoke_handlers() {
        let ip: Value =
            serde_json::from_str(&body_string(handle_get_first_available_ip()).await).unwrap();
        assert_eq!(ip["DisplayName"], "10.199.152.10");
        assert_eq!(body_string(handle_change_ip_status()).await, "[]");
    }
}
