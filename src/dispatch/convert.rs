//! Conversion of parsed requests into transport requests.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Version};

use crate::error_handling::DispatchError;
use crate::scan::{Method, Request};

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Connect => reqwest::Method::CONNECT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Patch => reqwest::Method::PATCH,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Trace => reqwest::Method::TRACE,
    }
}

/// Builds the transport request for `request`.
///
/// Headers keep their order and duplicates. An empty body sends no body.
///
/// # Errors
///
/// Fails when a header name or value is not valid HTTP.
pub fn to_reqwest(client: &Client, request: &Request) -> Result<reqwest::Request, DispatchError> {
    let mut headers = HeaderMap::with_capacity(request.headers().len());
    for header in request.headers() {
        let name = HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|_| DispatchError::InvalidHeaderName(header.name.clone()))?;
        let value = HeaderValue::from_str(&header.value)
            .map_err(|_| DispatchError::InvalidHeaderValue(header.name.clone()))?;
        headers.append(name, value);
    }

    let mut builder = client
        .request(to_reqwest_method(request.method()), request.url().clone())
        .version(Version::HTTP_11)
        .headers(headers);
    if !request.body().is_empty() {
        builder = builder.body(request.body().to_vec());
    }
    Ok(builder.build()?)
}

/// Sends `request` and waits for the response head.
pub async fn send(client: &Client, request: &Request) -> Result<reqwest::Response, DispatchError> {
    let transport = to_reqwest(client, request)?;
    Ok(client.execute(transport).await?)
}
