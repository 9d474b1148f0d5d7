//! HTTP/JSON implementation of the service traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ServiceError;
use crate::sanitize::sanitize_markup;
use crate::traits::{
    ContentGenerator, DocumentTransformer, Publisher, ScreenshotService, SectionTransformer,
};
use crate::types::{
    DocumentTransformRequest, GenerateRequest, GeneratedDocument, PublishReceipt, PublishRequest,
    ScreenshotCapture, ScreenshotRequest, SectionTransformRequest,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// All five service traits over one JSON API.
///
/// Every call is bounded by the configured timeout, independently of any
/// connection-level timeout reqwest applies.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpBackend {
    /// Backend against `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Url`] when the base url does not parse.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-call timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, "service call");

        let send = async {
            let response = self.client.post(url.clone()).json(request).send().await?;
            response.error_for_status()?.json::<Resp>().await
        };

        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(decoded)) => Ok(decoded),
            Ok(Err(err)) => {
                tracing::error!(%url, %err, "service call failed");
                Err(ServiceError::Transport(err))
            }
            Err(_) => {
                tracing::error!(%url, timeout = ?self.timeout, "service call timed out");
                Err(ServiceError::Timeout(self.timeout))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateWire {
    success: bool,
    error: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransformWire {
    success: bool,
    error: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenshotWire {
    success: bool,
    error: Option<String>,
    image_url: Option<String>,
    figure_html: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishWire {
    success: bool,
    error: Option<String>,
    post_id: Option<u64>,
    url: Option<String>,
}

fn remote_error(error: Option<String>) -> ServiceError {
    ServiceError::Remote(error.unwrap_or_else(|| "unspecified failure".to_string()))
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, ServiceError> {
    field.ok_or_else(|| ServiceError::Decode(format!("missing field `{name}`")))
}

#[async_trait]
impl ContentGenerator for HttpBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedDocument, ServiceError> {
        let wire: GenerateWire = self.post("generate", &request).await?;
        if !wire.success {
            return Err(remote_error(wire.error));
        }
        Ok(GeneratedDocument {
            title: required(wire.title, "title")?,
            content: sanitize_markup(&required(wire.content, "content")?),
        })
    }
}

#[async_trait]
impl SectionTransformer for HttpBackend {
    async fn transform_section(
        &self,
        request: SectionTransformRequest,
    ) -> Result<String, ServiceError> {
        let wire: TransformWire = self.post("transform/section", &request).await?;
        if !wire.success {
            return Err(remote_error(wire.error));
        }
        Ok(sanitize_markup(&required(wire.content, "content")?))
    }
}

#[async_trait]
impl DocumentTransformer for HttpBackend {
    async fn transform_document(
        &self,
        request: DocumentTransformRequest,
    ) -> Result<String, ServiceError> {
        let wire: TransformWire = self.post("transform/document", &request).await?;
        if !wire.success {
            return Err(remote_error(wire.error));
        }
        Ok(sanitize_markup(&required(wire.content, "content")?))
    }
}

#[async_trait]
impl ScreenshotService for HttpBackend {
    async fn capture(&self, request: ScreenshotRequest) -> Result<ScreenshotCapture, ServiceError> {
        let wire: ScreenshotWire = self.post("screenshot", &request).await?;
        if !wire.success {
            return Err(remote_error(wire.error));
        }
        Ok(ScreenshotCapture {
            image_url: required(wire.image_url, "imageUrl")?,
            figure_html: required(wire.figure_html, "figureHtml")?,
        })
    }
}

#[async_trait]
impl Publisher for HttpBackend {
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt, ServiceError> {
        let wire: PublishWire = self.post("publish", &request).await?;
        if !wire.success {
            return Err(remote_error(wire.error));
        }
        Ok(PublishReceipt {
            post_id: required(wire.post_id, "postId")?,
            url: wire.url,
        })
    }
}
