//! Immutable URL and origin value types.
//!
//! A [`Gurl`] caches the canonical spec, validity flag and component offset
//! table produced by a [`UrlAuthority`], so reading a component never goes
//! back to the parser. An [`Origin`] is a `(scheme, host, port)` tuple or an
//! opaque origin identified by an [`UnguessableToken`].

mod error;
mod gurl;
mod origin;
mod parsed;
mod replacements;
#[cfg(feature = "serde")]
mod serde_impl;
mod token;

pub mod authority;
pub mod serializer;

// Public API
pub use authority::{ParseOutput, StandardAuthority, UrlAuthority};
pub use error::{CorruptKind, DeserializeError, InstallError, Result};
pub use gurl::Gurl;
pub use origin::Origin;
pub use parsed::{Component, Parsed};
pub use replacements::{Replacement, Replacements};
pub use token::UnguessableToken;
