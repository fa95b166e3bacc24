// ============================================================================
// TRANSPORTE HTTP - la única parte que toca la red
// ============================================================================

use std::fmt;

use gloo_net::http::Request;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Envío de una petición. `Err` solo para fallos de red.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, String>;
}

/// `fetch` del navegador vía gloo-net
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, String> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| format!("Request build error: {}", e))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        log::info!("📡 [API] Respuesta recibida: {} {}", response.status(), response.status_text());

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Read error: {}", e))?;

        Ok(HttpReply { status, body })
    }
}
