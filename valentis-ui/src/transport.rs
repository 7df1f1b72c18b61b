use js_sys::Promise;
use valentis_core::api::{ApiRequest, ApiResponse, RequestBody};
use valentis_core::{ApiClient, ClientConfig, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, Response};

/// The client every page pulls from context.
pub type Api = ApiClient<FetchTransport>;

/// Sends requests through the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window not available".to_string())
}

async fn resolve(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(js_error)
}

async fn response_text(response: &Response) -> Result<String, String> {
    let text = resolve(response.text().map_err(js_error)?).await?;
    Ok(text.as_string().unwrap_or_default())
}

impl Transport for FetchTransport {
    type File = File;

    async fn send(&self, request: ApiRequest<File>) -> Result<ApiResponse, String> {
        let url = self.config.url(&request.path);
        let init = RequestInit::new();
        init.set_method(request.method.as_str());

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(value) => {
                let headers = Headers::new().map_err(js_error)?;
                headers
                    .set("Content-Type", "application/json")
                    .map_err(js_error)?;
                init.set_headers(&headers);
                init.set_body(&JsValue::from_str(&value.to_string()));
            }
            RequestBody::Files { field, files } => {
                // The browser writes the multipart boundary header itself.
                let form = FormData::new().map_err(js_error)?;
                for file in files {
                    form.append_with_blob_and_filename(field, file, &file.name())
                        .map_err(js_error)?;
                }
                init.set_body(&form);
            }
        }

        let outgoing = Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
        let response: Response = resolve(window()?.fetch_with_request(&outgoing))
            .await?
            .dyn_into()
            .map_err(js_error)?;
        let body = response_text(&response).await?;
        Ok(ApiResponse {
            status: response.status(),
            body,
        })
    }
}

/// Reads `/config.json` from the serving host; any failure keeps the default base.
pub async fn load_client_config() -> ClientConfig {
    match fetch_client_config().await {
        Ok(config) => {
            log::info!("api base: {}", config.api_base);
            config
        }
        Err(err) => {
            log::warn!("runtime config unavailable, using defaults: {err}");
            ClientConfig::default()
        }
    }
}

async fn fetch_client_config() -> Result<ClientConfig, String> {
    let response: Response = resolve(window()?.fetch_with_str("/config.json"))
        .await?
        .dyn_into()
        .map_err(js_error)?;
    if !response.ok() {
        return Err(format!("status {}", response.status()));
    }
    let body = response_text(&response).await?;
    let config: ClientConfig = serde_json::from_str(&body).map_err(|e| e.to_string())?;
    Ok(ClientConfig::with_api_base(&config.api_base))
}
