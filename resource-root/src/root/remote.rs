use crate::error::{BoxError, ResourceRootError};
use crate::root::ResourceRoot;
use crate::{Result, Target};
use tracing::trace;

/// A fetched document.
pub trait HttpResponse {
    fn content(self) -> std::result::Result<Vec<u8>, BoxError>;
    fn text(self) -> std::result::Result<String, BoxError>;
}

/// A client able to fetch a document by identifier (usually a URL).
///
/// Retries, caching and timeouts are the client's business.
pub trait HttpClient {
    type Response: HttpResponse;

    fn get(&self, identifier: &str) -> std::result::Result<Self::Response, BoxError>;
}

/// SUMMARY:
/// Whether a backing client exists for a [`RemoteRoot`].
///
/// DETAILS:
/// `Unavailable` stands in for environments without an HTTP stack and is
/// rejected by [`RemoteRoot::new`].
#[derive(Debug, Clone)]
pub enum Transport<C> {
    Available(C),
    Unavailable,
}

impl<C> From<Option<C>> for Transport<C> {
    #[inline]
    fn from(client: Option<C>) -> Self {
        match client {
            Some(client) => Transport::Available(client),
            None => Transport::Unavailable,
        }
    }
}

/// SUMMARY:
/// A root that delegates every fetch to an injected [`HttpClient`].
///
/// DETAILS:
/// String targets are passed to the client verbatim; segment targets are
/// joined with `/`. There is no resolution, confinement or caching here.
///
/// EXAMPLE:
/// ```rust
/// use resource_root::{BoxError, HttpClient, HttpResponse, RemoteRoot, Transport};
///
/// struct Echo;
/// struct EchoResponse(String);
///
/// impl HttpResponse for EchoResponse {
///     fn content(self) -> Result<Vec<u8>, BoxError> { Ok(self.0.into_bytes()) }
///     fn text(self) -> Result<String, BoxError> { Ok(self.0) }
/// }
///
/// impl HttpClient for Echo {
///     type Response = EchoResponse;
///     fn get(&self, identifier: &str) -> Result<EchoResponse, BoxError> {
///         Ok(EchoResponse(identifier.to_owned()))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = RemoteRoot::new(Transport::Available(Echo))?;
/// assert_eq!(root.text("https://example.com/a")?, "https://example.com/a");
/// assert!(RemoteRoot::<Echo>::new(Transport::Unavailable).is_err());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteRoot<C> {
    client: C,
}

impl<C: HttpClient> RemoteRoot<C> {
    /// ERRORS:
    /// - `ResourceRootError::Configuration`: the transport is `Unavailable`.
    pub fn new(transport: impl Into<Transport<C>>) -> Result<Self> {
        match transport.into() {
            Transport::Available(client) => Ok(Self { client }),
            Transport::Unavailable => Err(ResourceRootError::configuration(
                "no HTTP client is available for the remote root",
            )),
        }
    }

    #[inline]
    pub fn client(&self) -> &C {
        &self.client
    }

    fn fetch(&self, target: &Target<'_>) -> Result<(String, C::Response)> {
        let identifier = target.to_string();
        trace!(identifier = %identifier, "fetching remote resource");
        match self.client.get(&identifier) {
            Ok(response) => Ok((identifier, response)),
            Err(source) => Err(ResourceRootError::remote(identifier, source)),
        }
    }

    pub fn read<'a>(&self, target: impl Into<Target<'a>>) -> Result<Vec<u8>> {
        let (identifier, response) = self.fetch(&target.into())?;
        response
            .content()
            .map_err(|source| ResourceRootError::remote(identifier, source))
    }

    pub fn text<'a>(&self, target: impl Into<Target<'a>>) -> Result<String> {
        let (identifier, response) = self.fetch(&target.into())?;
        response
            .text()
            .map_err(|source| ResourceRootError::remote(identifier, source))
    }
}

impl<C: HttpClient> ResourceRoot for RemoteRoot<C> {
    #[inline]
    fn read(&self, target: Target<'_>) -> Result<Vec<u8>> {
        RemoteRoot::read(self, target)
    }

    #[inline]
    fn text(&self, target: Target<'_>) -> Result<String> {
        RemoteRoot::text(self, target)
    }
}

#[cfg(feature = "http")]
mod reqwest_transport {
    use super::{HttpClient, HttpResponse, RemoteRoot};
    use crate::error::{BoxError, ResourceRootError};
    use crate::Result;
    use reqwest::blocking::{Client, Response};

    impl HttpResponse for Response {
        fn content(self) -> std::result::Result<Vec<u8>, BoxError> {
            Ok(Response::bytes(self)?.to_vec())
        }

        fn text(self) -> std::result::Result<String, BoxError> {
            Ok(Response::text(self)?)
        }
    }

    impl HttpClient for Client {
        type Response = Response;

        fn get(&self, identifier: &str) -> std::result::Result<Response, BoxError> {
            Ok(Client::get(self, identifier).send()?)
        }
    }

    impl RemoteRoot<Client> {
        /// Build a remote root over a default blocking reqwest client.
        ///
        /// ERRORS:
        /// - `ResourceRootError::Configuration`: the client cannot be built
        ///   (e.g. TLS backend init).
        pub fn with_default_client() -> Result<Self> {
            let client = Client::builder().build().map_err(|e| {
                ResourceRootError::configuration(format!("cannot build HTTP client: {e}"))
            })?;
            Ok(Self { client })
        }
    }
}
