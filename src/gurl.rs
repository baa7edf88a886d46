use core::hash::{Hash, Hasher};

use crate::authority::{self, ParseOutput, UrlAuthority};
use crate::error::Result;
use crate::origin::Origin;
use crate::parsed::{Component, Parsed};
use crate::replacements::Replacements;
use crate::serializer;

/// Immutable URL value backed by a pre-parsed component table
///
/// Construction makes one round trip to a [`UrlAuthority`]; afterwards every
/// component accessor is a plain substring lookup into the cached spec.
///
/// Equality and hashing only look at the spec string. Two values with the
/// same spec compare equal whatever their validity flag or offset table say;
/// do not turn this into a field-wise comparison.
#[derive(Debug, Clone, Default)]
pub struct Gurl {
    spec: String,
    is_valid: bool,
    parsed: Parsed,
}

impl Gurl {
    /// Parse `uri` with the process-wide authority.
    ///
    /// The empty string short-circuits to [`Gurl::empty`] without touching
    /// (or initializing) the authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use gurl::Gurl;
    ///
    /// let url = Gurl::new("HTTPS://Example.com/a?b#c");
    /// assert!(url.is_valid());
    /// assert_eq!(url.spec(), "https://example.com/a?b#c");
    /// assert_eq!(url.host(), "example.com");
    /// assert_eq!(url.query(), "b");
    /// ```
    pub fn new(uri: &str) -> Self {
        if uri.is_empty() {
            return Self::empty();
        }
        Self::parse_with(authority::global(), uri)
    }

    /// Parse `uri` with the given authority
    pub fn parse_with(authority: &dyn UrlAuthority, uri: &str) -> Self {
        if uri.is_empty() {
            return Self::empty();
        }
        authority.parse(uri).into()
    }

    /// The empty URL: empty spec, invalid, every component absent
    pub const fn empty() -> Self {
        Self {
            spec: String::new(),
            is_valid: false,
            parsed: Parsed::EMPTY,
        }
    }

    /// Assemble a URL from authority output.
    ///
    /// Callers are responsible for `parsed` indexing into `spec`; ranges that
    /// do not fit read as empty components.
    pub fn from_parts(spec: String, is_valid: bool, parsed: Parsed) -> Self {
        Self {
            spec,
            is_valid,
            parsed,
        }
    }

    /// `true` when `url` is absent, empty or invalid
    pub fn is_empty_or_invalid(url: Option<&Gurl>) -> bool {
        url.is_none_or(|url| url.is_empty() || !url.is_valid())
    }

    /// The canonical spec.
    ///
    /// Only meaningful for valid URLs. Asking an invalid, non-empty URL for
    /// its spec is a caller bug: it is logged and answered with `""`.
    pub fn spec(&self) -> &str {
        if self.is_valid || self.spec.is_empty() {
            return &self.spec;
        }
        tracing::error!("spec() called on an invalid URL; check is_valid() first");
        ""
    }

    /// The spec if valid, `""` otherwise
    pub fn valid_spec_or_empty(&self) -> &str {
        if self.is_valid { &self.spec } else { "" }
    }

    /// The raw spec, valid or not. For diagnostics only.
    pub fn possibly_invalid_spec(&self) -> &str {
        &self.spec
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_empty(&self) -> bool {
        self.spec.is_empty()
    }

    /// The cached component table
    pub fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    /// Get a component by table entry (zero-copy)
    fn component(&self, component: Component) -> &str {
        if !component.is_nonempty() {
            return "";
        }
        component
            .range()
            .and_then(|range| self.spec.get(range))
            .unwrap_or("")
    }

    /// Scheme without the trailing `:`
    pub fn scheme(&self) -> &str {
        self.component(self.parsed.scheme)
    }

    pub fn username(&self) -> &str {
        self.component(self.parsed.username)
    }

    pub fn password(&self) -> &str {
        self.component(self.parsed.password)
    }

    pub fn host(&self) -> &str {
        self.component(self.parsed.host)
    }

    /// Port exactly as written in the spec.
    ///
    /// No numeric conversion is offered: default ports and unusual port
    /// strings are the authority's call, not a `str::parse` away.
    pub fn port(&self) -> &str {
        self.component(self.parsed.port)
    }

    pub fn path(&self) -> &str {
        self.component(self.parsed.path)
    }

    /// Query without the leading `?`
    pub fn query(&self) -> &str {
        self.component(self.parsed.query)
    }

    /// Fragment (`ref`) without the leading `#`
    #[doc(alias = "ref")]
    pub fn fragment(&self) -> &str {
        self.component(self.parsed.fragment)
    }

    pub fn has_username(&self) -> bool {
        self.parsed.username.is_nonempty()
    }

    pub fn has_password(&self) -> bool {
        self.parsed.password.is_nonempty()
    }

    pub fn has_host(&self) -> bool {
        self.parsed.host.is_nonempty()
    }

    pub fn has_port(&self) -> bool {
        self.parsed.port.is_nonempty()
    }

    /// `true` for a present query, even an empty one (`"http://a.com/?"`)
    pub fn has_query(&self) -> bool {
        self.parsed.query.is_valid()
    }

    /// `true` for a present fragment, even an empty one (`"http://a.com/#"`)
    pub fn has_fragment(&self) -> bool {
        self.parsed.fragment.is_valid()
    }

    /// ASCII case-insensitive scheme comparison against the cached scheme
    pub fn scheme_is(&self, scheme: &str) -> bool {
        self.scheme().eq_ignore_ascii_case(scheme)
    }

    /// Origin derived by the process-wide authority. Not memoized.
    pub fn origin(&self) -> Origin {
        self.origin_with(authority::global())
    }

    pub fn origin_with(&self, authority: &dyn UrlAuthority) -> Origin {
        authority.origin(self)
    }

    /// Whether the host is `domain` or a subdomain of it
    pub fn domain_is(&self, domain: &str) -> bool {
        self.domain_is_with(authority::global(), domain)
    }

    pub fn domain_is_with(&self, authority: &dyn UrlAuthority, domain: &str) -> bool {
        authority.domain_is(self, domain)
    }

    /// New URL with username/password replaced. `self` is left untouched.
    pub fn replace_components(&self, replacements: &Replacements<'_>) -> Gurl {
        self.replace_components_with(authority::global(), replacements)
    }

    pub fn replace_components_with(
        &self,
        authority: &dyn UrlAuthority,
        replacements: &Replacements<'_>,
    ) -> Gurl {
        authority.replace_components(self, replacements)
    }

    /// Encode for persistence; see [`serializer`](crate::serializer)
    pub fn serialize(&self) -> String {
        serializer::serialize(self)
    }

    /// Decode a persisted URL.
    ///
    /// Blobs from another serializer version are re-parsed from their spec;
    /// corrupt blobs become [`Gurl::empty`]. Do not feed untrusted input:
    /// the cached table is trusted as-is.
    pub fn deserialize(text: &str) -> Self {
        serializer::deserialize_or_reparse(text, Gurl::new)
    }

    /// [`Gurl::deserialize`] with an explicit authority for the re-parse path
    pub fn deserialize_with(authority: &dyn UrlAuthority, text: &str) -> Self {
        serializer::deserialize_or_reparse(text, |spec| Gurl::parse_with(authority, spec))
    }

    /// Decode a persisted URL written by the current serializer version only.
    ///
    /// # Errors
    ///
    /// [`DeserializeError::BadVersion`](crate::DeserializeError::BadVersion)
    /// for blobs of another version and
    /// [`DeserializeError::Corrupt`](crate::DeserializeError::Corrupt) for
    /// malformed ones.
    pub fn deserialize_latest_version_only(text: &str) -> Result<Self> {
        serializer::deserialize_latest_version_only(text)
    }
}

impl From<ParseOutput> for Gurl {
    fn from(output: ParseOutput) -> Self {
        Self::from_parts(output.spec, output.is_valid, output.parsed)
    }
}

impl PartialEq for Gurl {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl Eq for Gurl {}

impl Hash for Gurl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spec.hash(state);
    }
}

impl AsRef<str> for Gurl {
    fn as_ref(&self) -> &str {
        &self.spec
    }
}

impl core::fmt::Display for Gurl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.spec)
    }
}
