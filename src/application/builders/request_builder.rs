use crate::domain::entities::{Method, Request};
use crate::domain::value_objects::{JsonBody, Url};
use anyhow::{Result, anyhow};

pub struct RequestBuilder {
    method: Option<Method>,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    body: Option<JsonBody>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            url: None,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url(mut self, raw_url: &str) -> Result<Self> {
        self.url = Some(Url::new(raw_url)?);
        Ok(self)
    }

    /// Sets a header, replacing any earlier value for the same name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: JsonBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<Request> {
        Ok(Request {
            method: self.method.ok_or_else(|| anyhow!("Method is required"))?,
            url: self.url.ok_or_else(|| anyhow!("URL is required"))?,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_method_and_url() {
        assert!(RequestBuilder::new().build().is_err());
        assert!(RequestBuilder::new().method(Method::Get).build().is_err());

        let request = RequestBuilder::new()
            .method(Method::Get)
            .url("http://localhost:3000/api/car")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method, Method::Get);
        assert!(request.body.is_none());
    }

    #[test]
    fn header_replaces_same_name() {
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url("http://localhost/")
            .unwrap()
            .header("Accept", "text/plain")
            .header("accept", "application/json")
            .build()
            .unwrap();
        assert_eq!(
            request.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }
}
