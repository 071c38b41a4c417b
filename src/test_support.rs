use std::error::Error as StdError;
use std::io;
use std::sync::{Arc, Mutex};

use url::Url;

use crate::client::{BoxFuture, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
enum Reply {
    Response { status: u16, body: String },
    Fail(String),
}

/// In-memory transport: records every URL and answers with a canned reply.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    urls: Vec<Url>,
    reply: Reply,
}

impl FakeTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Response {
            status,
            body: body.into(),
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                urls: Vec::new(),
                reply,
            })),
        }
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().urls.len()
    }

    pub fn last_url(&self) -> Option<Url> {
        self.state.lock().unwrap().urls.last().cloned()
    }
}

impl HttpTransport for FakeTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let reply = {
                let mut state = self.state.lock().unwrap();
                state.urls.push(url);
                state.reply.clone()
            };
            match reply {
                Reply::Response { status, body } => Ok(HttpResponse { status, body }),
                Reply::Fail(message) => Err(Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    message,
                )) as Box<dyn StdError + Send + Sync>),
            }
        })
    }
}
