use reqwest::Method;

/// Per-call request options
///
/// `B` is the body type; it is serialized to JSON when present.
#[derive(Debug, Clone)]
pub struct RequestOptions<B = ()> {
    pub method: Method,
    pub body: Option<B>,
    /// Header overrides, applied after the defaults
    pub headers: Vec<(String, String)>,
}

impl<B> Default for RequestOptions<B> {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl<B> RequestOptions<B> {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
