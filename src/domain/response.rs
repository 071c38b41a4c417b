/// A message the gateway answered with HTTP 200.
///
/// The gateway also answers some rejections (an unknown API key, for example) with 200 and an
/// explanatory body, so a `Delivery` only means the request was accepted at the HTTP level.
/// Inspect [`Delivery::body`] when real delivery confirmation matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub body: String,
}

impl Delivery {
    /// Verbatim response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
