//! Browser `fetch` transport for the API client.

use async_trait::async_trait;
use magmon_core::{ApiRequest, ApiResponse, Transport};

/// Sends requests with `gloo-net`, giving up after `timeout_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserTransport {
    timeout_ms: u32,
}

impl BrowserTransport {
    #[must_use]
    pub const fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    #[must_use]
    pub const fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

#[cfg(target_arch = "wasm32")]
mod fetch {
    use crate::dom::js_error_message;
    use futures::future::{Either, select};
    use gloo::net::http::{Request, RequestBuilder};
    use gloo::timers::future::TimeoutFuture;
    use magmon_core::{ApiRequest, ApiResponse, FilePart, Method, RequestBody};
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    fn builder(method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
    }

    fn form_data(part: &FilePart) -> Result<FormData, String> {
        let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
        let chunks = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&part.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
            .map_err(|err| js_error_message(&err))?;
        let form = FormData::new().map_err(|err| js_error_message(&err))?;
        form.append_with_blob_and_filename(&part.field, &blob, &part.file_name)
            .map_err(|err| js_error_message(&err))?;
        Ok(form)
    }

    async fn exchange(request: ApiRequest) -> Result<ApiResponse, String> {
        let mut builder = builder(request.method, &request.url);
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(part) => builder.body(JsValue::from(form_data(part)?)),
        }
        .map_err(|err| err.to_string())?;

        let response = prepared.send().await.map_err(|err| err.to_string())?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse::new(status, body))
    }

    pub(super) async fn send(request: ApiRequest, timeout_ms: u32) -> Result<ApiResponse, String> {
        let call = Box::pin(exchange(request));
        let timer = TimeoutFuture::new(timeout_ms);
        match select(call, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(format!("timeout of {timeout_ms}ms exceeded")),
        }
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        #[cfg(target_arch = "wasm32")]
        {
            fetch::send(request, self.timeout_ms).await
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            log::debug!("dropping {} {} outside the browser", request.method, request.url);
            Err("network unavailable outside the browser".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use magmon_core::{Method, RequestBody};

    #[test]
    fn host_builds_report_network_unavailable() {
        let transport = BrowserTransport::new(2500);
        assert_eq!(transport.timeout_ms(), 2500);
        let result = block_on(transport.send(ApiRequest {
            method: Method::Get,
            url: "http://127.0.0.1:5004/api/games".into(),
            bearer: None,
            body: RequestBody::Empty,
        }));
        assert_eq!(result, Err("network unavailable outside the browser".to_string()));
    }
}
