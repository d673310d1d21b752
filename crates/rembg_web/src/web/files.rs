use wasm_bindgen::JsCast;

pub(super) fn download_bytes(filename: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let document = window.document().ok_or("no document".to_string())?;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|_| "blob: failed to create".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "url: create_object_url failed".to_string())?;

    let a = document
        .create_element("a")
        .map_err(|_| "document: create_element failed".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "document: anchor cast failed".to_string())?;

    a.set_href(&url);
    a.set_download(filename);
    a.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Object URL for a local preview thumbnail. Revoke it with [`revoke_preview_url`].
pub(super) fn preview_url(file: &web_sys::File) -> Result<String, String> {
    web_sys::Url::create_object_url_with_blob(file)
        .map_err(|_| "url: create_object_url failed".to_string())
}

pub(super) fn revoke_preview_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

pub(super) fn file_list_to_vec(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
