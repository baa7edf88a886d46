//! The parser authority behind [`Gurl`] and [`Origin`].
//!
//! Value types never parse on their own. They hand the raw input to a
//! [`UrlAuthority`], cache what it returns, and come back only for work
//! that needs a real parser: origin derivation, domain matching and
//! component replacement.
//!
//! A process-wide default authority is created lazily on the first
//! non-empty parse. [`install`] swaps in another one, as long as nobody has
//! used the default yet.

mod standard;

pub use standard::StandardAuthority;

use std::sync::OnceLock;
use std::time::Instant;

use crate::error::InstallError;
use crate::gurl::Gurl;
use crate::origin::Origin;
use crate::parsed::Parsed;
use crate::replacements::Replacements;
use crate::token::UnguessableToken;

/// Everything an authority learns from one parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// Canonical spec when valid, best-effort input otherwise
    pub spec: String,
    pub is_valid: bool,
    pub parsed: Parsed,
}

impl ParseOutput {
    /// Output for input the authority could not parse
    pub fn invalid(spec: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            is_valid: false,
            parsed: Parsed::EMPTY,
        }
    }
}

/// URL parser and canonicalizer consumed by the value types
pub trait UrlAuthority: Send + Sync {
    /// Parse and canonicalize `uri`. Failure is reported through
    /// `is_valid`, never as an error.
    fn parse(&self, uri: &str) -> ParseOutput;

    /// Derive the origin of `url`
    fn origin(&self, url: &Gurl) -> Origin;

    /// Whether the host of `url` is `domain` or one of its subdomains
    fn domain_is(&self, url: &Gurl, domain: &str) -> bool;

    /// Apply username/password replacements, returning a new URL
    fn replace_components(&self, url: &Gurl, replacements: &Replacements<'_>) -> Gurl;

    /// Mint a fresh opaque origin
    fn create_opaque_origin(&self) -> Origin {
        Origin::opaque(UnguessableToken::create())
    }
}

static GLOBAL: OnceLock<Box<dyn UrlAuthority>> = OnceLock::new();

/// Process-wide default authority, created on first use.
///
/// Concurrent first callers block until one of them finishes creating it;
/// afterwards this is a plain load.
pub fn global() -> &'static dyn UrlAuthority {
    if let Some(authority) = GLOBAL.get() {
        return authority.as_ref();
    }

    let started = Instant::now();
    let authority = GLOBAL.get_or_init(|| {
        tracing::debug!("initializing default URL authority");
        Box::new(StandardAuthority::new())
    });
    tracing::debug!(
        blocked_us = started.elapsed().as_micros() as u64,
        "URL authority ready"
    );
    authority.as_ref()
}

/// Make `authority` the process-wide default.
///
/// # Errors
///
/// [`InstallError::AlreadyInitialized`] if the default has already been
/// created or installed.
pub fn install(authority: Box<dyn UrlAuthority>) -> Result<(), InstallError> {
    GLOBAL
        .set(authority)
        .map_err(|_| InstallError::AlreadyInitialized)
}

/// Whether the process-wide authority exists yet
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
