use crate::application::services::{HttpClient, HttpRequestService};
use crate::domain::entities::{Method as DomainMethod, Request, Response};
use crate::domain::value_objects::{JsonBody, Url};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{Method, Request as HyperRequest};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use log::trace;

/// Plain HTTP/1.1 transport for the car API
pub struct HyperHttpClient {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HyperHttpClient {
    pub fn new() -> Self {
        let connector = HttpConnector::new();
        let client = Client::builder(TokioExecutor::new())
            .build::<HttpConnector, Full<Bytes>>(connector);
        Self { client }
    }

    /// Creates a configured HTTP request service using this client
    pub fn create_request_service(self) -> HttpRequestService {
        HttpRequestService::new(Box::new(self))
    }
}

impl Default for HyperHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let hyper_request = RequestAdapter::to_hyper_request(request)?;
        let hyper_response = self.execute_http_request(hyper_request).await?;
        ResponseAdapter::to_domain_response(hyper_response).await
    }
}

impl HyperHttpClient {
    async fn execute_http_request(
        &self,
        request: HyperRequest<Full<Bytes>>,
    ) -> Result<hyper::Response<hyper::body::Incoming>> {
        self.client
            .request(request)
            .await
            .map_err(|e| anyhow!("HTTP request execution failed: {}", e))
    }
}

/// Adapter for converting domain requests to Hyper requests
struct RequestAdapter;

impl RequestAdapter {
    fn to_hyper_request(domain_request: Request) -> Result<HyperRequest<Full<Bytes>>> {
        let method = MethodAdapter::to_hyper_method(domain_request.method);
        let uri = UriAdapter::to_hyper_uri(&domain_request.url);
        let body = BodyAdapter::to_hyper_body(&domain_request.body);

        let mut builder = HyperRequest::builder().method(method).uri(uri.clone());

        builder = HeaderAdapter::add_headers(builder, &domain_request.headers)?;
        builder = HeaderAdapter::add_json_content_type(builder, &domain_request.body);

        builder
            .body(body)
            .map_err(|e| anyhow!("Failed to build HTTP request: {}", e))
    }
}

/// Adapter for converting domain responses from Hyper responses
struct ResponseAdapter;

impl ResponseAdapter {
    async fn to_domain_response(
        hyper_response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<Response> {
        let status = hyper_response.status();
        let body = Self::extract_response_body(hyper_response).await?;
        trace!("received {} bytes", body.len());

        Ok(Response { status, body })
    }

    async fn extract_response_body(
        response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<String> {
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?
            .to_bytes();

        String::from_utf8(body_bytes.to_vec())
            .map_err(|e| anyhow!("Response body contains invalid UTF-8: {}", e))
    }
}

/// Adapter for converting domain HTTP methods to Hyper methods
struct MethodAdapter;

impl MethodAdapter {
    fn to_hyper_method(domain_method: DomainMethod) -> Method {
        match domain_method {
            DomainMethod::Get => Method::GET,
            DomainMethod::Post => Method::POST,
            DomainMethod::Put => Method::PUT,
            DomainMethod::Delete => Method::DELETE,
        }
    }
}

/// Adapter for converting domain URLs to Hyper URIs
struct UriAdapter;

impl UriAdapter {
    fn to_hyper_uri(domain_url: &Url) -> &hyper::Uri {
        &domain_url.0
    }
}

/// Adapter for converting domain request bodies to Hyper bodies
struct BodyAdapter;

impl BodyAdapter {
    fn to_hyper_body(domain_body: &Option<JsonBody>) -> Full<Bytes> {
        match domain_body {
            Some(json_body) => Full::new(Bytes::from(json_body.0.clone())),
            None => Full::new(Bytes::new()),
        }
    }
}

/// Adapter for handling HTTP headers
struct HeaderAdapter;

impl HeaderAdapter {
    fn add_headers(
        mut builder: http::request::Builder,
        headers: &[(String, String)],
    ) -> Result<http::request::Builder> {
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| anyhow!("Invalid header name '{}': {}", name, e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| anyhow!("Invalid header value for '{}': {}", name, e))?;
            builder = builder.header(name, value);
        }
        Ok(builder)
    }

    fn add_json_content_type(
        builder: http::request::Builder,
        body: &Option<JsonBody>,
    ) -> http::request::Builder {
        if body.is_some() {
            builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        } else {
            builder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::builders::request_builder::RequestBuilder;

    #[test]
    fn adapts_put_with_json_body() {
        let request = RequestBuilder::new()
            .method(DomainMethod::Put)
            .url("http://localhost:3000/api/car/42")
            .unwrap()
            .header("Accept", "application/json")
            .body(JsonBody::new("{\"id\":\"42\"}").unwrap())
            .build()
            .unwrap();

        let hyper_request = RequestAdapter::to_hyper_request(request).unwrap();
        assert_eq!(hyper_request.method(), Method::PUT);
        assert_eq!(hyper_request.uri().path(), "/api/car/42");
        assert_eq!(hyper_request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(hyper_request.headers()["accept"], "application/json");
    }

    #[test]
    fn bodyless_request_has_no_content_type() {
        let request = RequestBuilder::new()
            .method(DomainMethod::Delete)
            .url("http://localhost:3000/api/car/42")
            .unwrap()
            .build()
            .unwrap();

        let hyper_request = RequestAdapter::to_hyper_request(request).unwrap();
        assert_eq!(hyper_request.method(), Method::DELETE);
        assert!(hyper_request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn rejects_invalid_header_name() {
        let request = RequestBuilder::new()
            .method(DomainMethod::Get)
            .url("http://localhost/")
            .unwrap()
            .header("bad header", "x")
            .build()
            .unwrap();
        assert!(RequestAdapter::to_hyper_request(request).is_err());
    }
}
