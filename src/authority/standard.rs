use std::borrow::Cow;

use url::{Position, Url};

use super::{ParseOutput, UrlAuthority};
use crate::gurl::Gurl;
use crate::origin::Origin;
use crate::parsed::{Component, Parsed};
use crate::replacements::{Replacement, Replacements};

const FILESYSTEM_SCHEME: &str = "filesystem";

/// Authority backed by the WHATWG parser of the `url` crate
///
/// `filesystem:` URLs are parsed as a nested URL: the outer table covers the
/// scheme, the virtual path, query and fragment; the inner table covers the
/// scheme, authority and storage type (`/temporary`, `/persistent`) of the
/// wrapped URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAuthority;

impl StandardAuthority {
    pub const fn new() -> Self {
        Self
    }

    fn output_for(url: &Url) -> ParseOutput {
        if url.scheme() == FILESYSTEM_SCHEME {
            return filesystem_output(url);
        }
        match table_for(url, 0) {
            Some(parsed) => ParseOutput {
                spec: url.as_str().to_owned(),
                is_valid: true,
                parsed,
            },
            None => ParseOutput::invalid(url.as_str()),
        }
    }

    /// Re-parse a cached spec, the way a native parser rebuilds its own URL
    /// object from the managed fields
    fn reparse(url: &Gurl) -> Option<Url> {
        if !url.is_valid() {
            return None;
        }
        Url::parse(url.possibly_invalid_spec()).ok()
    }
}

/// Byte offset of `position` within the serialization of `url`
fn offset(url: &Url, position: Position) -> usize {
    url[..position].len()
}

fn component(
    url: &Url,
    shift: usize,
    present: bool,
    start: Position,
    end: Position,
) -> Option<Component> {
    if !present {
        return Some(Component::ABSENT);
    }
    Component::from_range(shift + offset(url, start)..shift + offset(url, end))
}

/// Component table of a plain (non-nested) URL, shifted by `shift` bytes.
/// `None` when an offset does not fit the table.
fn table_for(url: &Url, shift: usize) -> Option<Parsed> {
    let has_credentials = !url.username().is_empty() || url.password().is_some();
    Some(Parsed {
        scheme: component(url, shift, true, Position::BeforeScheme, Position::AfterScheme)?,
        username: component(
            url,
            shift,
            has_credentials,
            Position::BeforeUsername,
            Position::AfterUsername,
        )?,
        password: component(
            url,
            shift,
            url.password().is_some(),
            Position::BeforePassword,
            Position::AfterPassword,
        )?,
        host: component(
            url,
            shift,
            url.has_authority(),
            Position::BeforeHost,
            Position::AfterHost,
        )?,
        port: component(
            url,
            shift,
            url.port().is_some(),
            Position::BeforePort,
            Position::AfterPort,
        )?,
        path: component(
            url,
            shift,
            !url.path().is_empty(),
            Position::BeforePath,
            Position::AfterPath,
        )?,
        query: component(
            url,
            shift,
            url.query().is_some(),
            Position::BeforeQuery,
            Position::AfterQuery,
        )?,
        fragment: component(
            url,
            shift,
            url.fragment().is_some(),
            Position::BeforeFragment,
            Position::AfterFragment,
        )?,
        ..Parsed::EMPTY
    })
}

/// Parse `filesystem:<inner-url>` into a spec with an inner table
fn filesystem_output(outer: &Url) -> ParseOutput {
    let Some(inner) = Url::parse(outer.path())
        .ok()
        .filter(|inner| !inner.cannot_be_a_base() && inner.scheme() != FILESYSTEM_SCHEME)
    else {
        return ParseOutput::invalid(outer.as_str());
    };

    let prefix = FILESYSTEM_SCHEME.len() + 1;
    let inner_spec = &inner[..Position::AfterPath];
    let mut spec = String::with_capacity(outer.as_str().len());
    spec.push_str(FILESYSTEM_SCHEME);
    spec.push(':');
    spec.push_str(inner_spec);

    let Some(mut inner_table) = table_for(&inner, prefix) else {
        return ParseOutput::invalid(outer.as_str());
    };
    inner_table.query = Component::ABSENT;
    inner_table.fragment = Component::ABSENT;

    // The first path segment is the storage type; the rest is the virtual path
    let inner_path = inner.path();
    let path_start = prefix + offset(&inner, Position::BeforePath);
    let type_len = inner_path[1.min(inner_path.len())..]
        .find('/')
        .map_or(inner_path.len(), |pos| pos + 1);
    let outer_path = if type_len < inner_path.len() {
        Component::from_range(path_start + type_len..path_start + inner_path.len())
    } else {
        Some(Component::ABSENT)
    };
    inner_table.path = if type_len > 0 {
        match Component::from_range(path_start..path_start + type_len) {
            Some(path) => path,
            None => return ParseOutput::invalid(outer.as_str()),
        }
    } else {
        Component::ABSENT
    };

    let mut push_optional = |marker: char, value: Option<&str>| match value {
        Some(value) => {
            spec.push(marker);
            let begin = spec.len();
            spec.push_str(value);
            Component::from_range(begin..spec.len())
        }
        None => Some(Component::ABSENT),
    };
    let query = push_optional('?', outer.query());
    let fragment = push_optional('#', outer.fragment());

    let (Some(scheme), Some(path), Some(query), Some(fragment)) = (
        Component::from_range(0..FILESYSTEM_SCHEME.len()),
        outer_path,
        query,
        fragment,
    ) else {
        return ParseOutput::invalid(outer.as_str());
    };

    ParseOutput {
        spec,
        is_valid: true,
        parsed: Parsed {
            scheme,
            path,
            query,
            fragment,
            inner: Some(Box::new(inner_table)),
            ..Parsed::EMPTY
        },
    }
}

/// Host to compare in [`UrlAuthority::domain_is`]; the wrapped URL's host
/// for `filesystem:`
fn effective_host(url: &Gurl) -> &str {
    let spec = url.possibly_invalid_spec();
    let table = url.parsed().inner().unwrap_or(url.parsed());
    table
        .host
        .range()
        .and_then(|range| spec.get(range))
        .unwrap_or("")
}

fn host_matches(host: &str, domain: &str) -> bool {
    if host.is_empty() || domain.is_empty() {
        return false;
    }

    // "www.google.com." matches "google.com"
    let host = match host.strip_suffix('.') {
        Some(stripped) if !domain.ends_with('.') => stripped,
        _ => host,
    };
    if host.len() < domain.len() {
        return false;
    }

    let split = host.len() - domain.len();
    let Some(suffix) = host.get(split..) else {
        return false;
    };
    if !suffix.eq_ignore_ascii_case(domain) {
        return false;
    }

    domain.starts_with('.') || split == 0 || host.as_bytes()[split - 1] == b'.'
}

impl UrlAuthority for StandardAuthority {
    fn parse(&self, uri: &str) -> ParseOutput {
        match Url::parse(uri) {
            Ok(url) => Self::output_for(&url),
            Err(error) => {
                tracing::trace!(%error, "input is not a valid URL");
                ParseOutput::invalid(uri)
            }
        }
    }

    fn origin(&self, url: &Gurl) -> Origin {
        let Some(parsed) = Self::reparse(url) else {
            return self.create_opaque_origin();
        };

        let parsed = if parsed.scheme() == FILESYSTEM_SCHEME {
            match Url::parse(parsed.path()) {
                Ok(inner) => inner,
                Err(_) => return self.create_opaque_origin(),
            }
        } else {
            parsed
        };

        if parsed.scheme() == "file" {
            return Origin::tuple("file", parsed.host_str().unwrap_or(""), 0);
        }

        match parsed.origin() {
            url::Origin::Tuple(scheme, host, port) => {
                Origin::tuple(scheme, host.to_string(), port)
            }
            url::Origin::Opaque(_) => self.create_opaque_origin(),
        }
    }

    fn domain_is(&self, url: &Gurl, domain: &str) -> bool {
        if !url.is_valid() {
            return false;
        }

        let domain: Cow<'_, str> = if domain.is_ascii() {
            Cow::Borrowed(domain)
        } else {
            match idna::domain_to_ascii(domain) {
                Ok(ascii) => Cow::Owned(ascii),
                Err(_) => return false,
            }
        };

        host_matches(effective_host(url), &domain)
    }

    fn replace_components(&self, url: &Gurl, replacements: &Replacements<'_>) -> Gurl {
        let Some(mut parsed) = Self::reparse(url) else {
            return url.clone();
        };

        let username = match replacements.username() {
            Replacement::Keep => Ok(()),
            Replacement::Set(username) => parsed.set_username(username),
            Replacement::Clear => parsed.set_username(""),
        };
        let password = match replacements.password() {
            Replacement::Keep => Ok(()),
            Replacement::Set(password) => parsed.set_password(Some(password)),
            Replacement::Clear => parsed.set_password(None),
        };
        if username.is_err() || password.is_err() {
            tracing::debug!(scheme = parsed.scheme(), "URL cannot carry credentials");
        }

        Self::output_for(&parsed).into()
    }
}
