//! Thin `fetch` wrappers. Each returns the HTTP status and body text so the
//! parsing rules stay in `rembg::api`.

use rembg::ApiError;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

pub(super) struct RawResponse {
    pub(super) status: u16,
    pub(super) body: String,
}

fn js_err(what: &str, v: JsValue) -> ApiError {
    let detail = v
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| v.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    ApiError::Network(format!("{what}: {detail}"))
}

pub(super) async fn post_json(url: &str, body: &str) -> Result<RawResponse, ApiError> {
    let headers = web_sys::Headers::new().map_err(|e| js_err("headers", e))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| js_err("headers", e))?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    send(url, &init).await
}

/// Multipart upload. Every file is appended under `field` with its own name.
pub(super) async fn post_files(
    url: &str,
    field: &str,
    files: &[web_sys::File],
    bearer: Option<&str>,
) -> Result<RawResponse, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| js_err("form data", e))?;
    for file in files {
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(|e| js_err("form data", e))?;
    }

    let headers = web_sys::Headers::new().map_err(|e| js_err("headers", e))?;
    if let Some(token) = bearer {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(|e| js_err("headers", e))?;
    }

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&form);
    send(url, &init).await
}

async fn send(url: &str, init: &web_sys::RequestInit) -> Result<RawResponse, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let request = web_sys::Request::new_with_str_and_init(url, init)
        .map_err(|e| js_err("request", e))?;

    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_err("fetch", e))?
        .dyn_into::<web_sys::Response>()
        .map_err(|e| js_err("fetch", e))?;

    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(|e| js_err("body", e))?)
        .await
        .map_err(|e| js_err("body", e))?;

    tracing::debug!(url, status, "response received");
    Ok(RawResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}
