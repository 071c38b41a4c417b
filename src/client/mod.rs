//! Client layer: issues the gateway request and maps the HTTP outcome to the domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{Delivery, QueryEncoding, SendMessage, ValidationError};

const DEFAULT_ENDPOINT: &str = "https://api.callmebot.com/whatsapp.php";

/// The only status the gateway uses for an accepted request.
const ACCEPTED_STATUS: u16 = 200;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        // The request URL carries the API key; strip it from any error.
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WhatsAppClient`].
///
/// A gateway answer with status 200 is never an error, even when its body describes one;
/// see [`Delivery`].
pub enum WhatsAppError {
    /// HTTP client / transport failure (DNS, TLS, refused connection, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than 200.
    #[error("gateway rejected the message (HTTP {status}): {body}")]
    GatewayRejected { status: u16, body: String },

    /// The configured endpoint, or the URL built from it, is not a valid absolute URL.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl WhatsAppError {
    /// Failure reason suitable for reporting to a caller.
    ///
    /// For [`WhatsAppError::GatewayRejected`] this is the verbatim response body; otherwise it
    /// is the error description.
    pub fn reason(&self) -> String {
        match self {
            Self::GatewayRejected { body, .. } => body.clone(),
            Self::Transport(source) => source.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`WhatsAppClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, or query encoding.
pub struct WhatsAppClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    query_encoding: QueryEncoding,
}

impl Default for WhatsAppClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatsAppClientBuilder {
    /// Create a builder with the default endpoint, encoded queries, and no timeout.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            query_encoding: QueryEncoding::default(),
        }
    }

    /// Override the gateway URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Choose how query values are placed into the URL.
    pub fn query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = encoding;
        self
    }

    /// Build a [`WhatsAppClient`].
    pub fn build(self) -> Result<WhatsAppClient, WhatsAppError> {
        Url::parse(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| WhatsAppError::Transport(Box::new(err)))?;

        Ok(WhatsAppClient {
            endpoint: self.endpoint,
            query_encoding: self.query_encoding,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// CallMeBot WhatsApp client.
///
/// Each [`WhatsAppClient::send`] issues exactly one `GET` to
/// `https://api.callmebot.com/whatsapp.php` (unless overridden). There is no retry and,
/// unless the builder sets one, no timeout.
pub struct WhatsAppClient {
    endpoint: String,
    query_encoding: QueryEncoding,
    http: Arc<dyn HttpTransport>,
}

impl Default for WhatsAppClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatsAppClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`WhatsAppClient::builder`].
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            query_encoding: QueryEncoding::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> WhatsAppClientBuilder {
        WhatsAppClientBuilder::new()
    }

    #[cfg(test)]
    pub(crate) fn with_transport(
        endpoint: impl Into<String>,
        query_encoding: QueryEncoding,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            query_encoding,
            http,
        }
    }

    /// Gateway URL this client sends to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message.
    ///
    /// Errors:
    /// - [`WhatsAppError::Transport`] when no HTTP response was received,
    /// - [`WhatsAppError::GatewayRejected`] for any status other than 200, carrying the body,
    /// - [`WhatsAppError::InvalidUrl`] when the endpoint cannot be parsed.
    pub async fn send(&self, request: &SendMessage) -> Result<Delivery, WhatsAppError> {
        let endpoint = Url::parse(&self.endpoint)?;
        let url =
            crate::transport::encode_send_message_url(&endpoint, request, self.query_encoding)?;

        let response = self.http.get(url).await.map_err(WhatsAppError::Transport)?;

        if response.status != ACCEPTED_STATUS {
            return Err(WhatsAppError::GatewayRejected {
                status: response.status,
                body: response.body,
            });
        }

        Ok(Delivery {
            body: response.body,
        })
    }
}
