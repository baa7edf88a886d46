use crate::authority::{self, UrlAuthority};
use crate::gurl::Gurl;
use crate::token::UnguessableToken;

/// A web origin: a `(scheme, host, port)` tuple, or an opaque origin
/// identified only by an [`UnguessableToken`].
///
/// Equality covers every field, the token included. Two opaque origins are
/// equal only if they carry the same token. This differs from [`Gurl`], whose
/// equality only looks at the spec.
///
/// Opaque origins may still carry the tuple they were derived from; the
/// accessors never reveal it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: u16,
    opaque: Option<UnguessableToken>,
}

impl Origin {
    /// Tuple origin
    pub fn tuple(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            opaque: None,
        }
    }

    /// Opaque origin with the given token
    pub fn opaque(token: UnguessableToken) -> Self {
        Self {
            scheme: String::new(),
            host: String::new(),
            port: 0,
            opaque: Some(token),
        }
    }

    /// Rebuild an origin from its wire fields, e.g. after crossing a process
    /// boundary. Returns `None` for an opaque origin with the reserved zero token.
    pub fn from_parts(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        is_opaque: bool,
        token_high: u64,
        token_low: u64,
    ) -> Option<Self> {
        let opaque = if is_opaque {
            Some(UnguessableToken::from_parts(token_high, token_low)?)
        } else {
            None
        };
        Some(Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            opaque,
        })
    }

    /// Fresh opaque origin minted by the process-wide authority
    pub fn create_opaque() -> Self {
        authority::global().create_opaque_origin()
    }

    /// Origin of `url` as derived by the process-wide authority
    pub fn create(url: &Gurl) -> Self {
        Self::create_with(authority::global(), url)
    }

    /// Origin of `url` as derived by `authority`
    pub fn create_with(authority: &dyn UrlAuthority, url: &Gurl) -> Self {
        authority.origin(url)
    }

    /// Scheme, empty for opaque origins
    pub fn scheme(&self) -> &str {
        if self.is_opaque() { "" } else { &self.scheme }
    }

    /// Host, empty for opaque origins
    pub fn host(&self) -> &str {
        if self.is_opaque() { "" } else { &self.host }
    }

    /// Port, 0 for opaque origins
    pub fn port(&self) -> u16 {
        if self.is_opaque() { 0 } else { self.port }
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some()
    }

    /// Token identifying an opaque origin
    pub fn token(&self) -> Option<UnguessableToken> {
        self.opaque
    }

    pub fn is_same_origin_with(&self, other: &Origin) -> bool {
        self == other
    }
}

impl core::fmt::Display for Origin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_opaque() {
            f.write_str("null")
        } else {
            write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}
