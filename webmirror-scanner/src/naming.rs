use crate::error::{NamingError, Result};

/// Outcome of deriving a file name from a locator and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolvable(NamingError),
}

impl Resolution {
    pub fn into_result(self) -> Result<String> {
        match self {
            Resolution::Resolved(name) => Ok(name),
            Resolution::Unresolvable(err) => Err(err.into()),
        }
    }
}

/// Splits `type/subtype[; params]` and returns the subtype, lowercased.
pub fn media_subtype(content_type: &str) -> Option<String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let (kind, subtype) = essence.split_once('/')?;
    let (kind, subtype) = (kind.trim(), subtype.trim());
    if kind.is_empty() || subtype.is_empty() {
        return None;
    }
    Some(subtype.to_string())
}

/// Last `/`-separated segment of the locator, ignoring trailing slashes.
fn base_name(locator: &str) -> &str {
    let trimmed = locator.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Derives the on-disk name for a resource: the locator's final segment cut
/// at the first `?`, with `.subtype` appended when it has no extension.
pub fn resolve(locator: &str, content_type: Option<&str>) -> Resolution {
    let content_type = content_type.unwrap_or("");
    let Some(subtype) = media_subtype(content_type) else {
        return Resolution::Unresolvable(NamingError::InvalidMediaType(content_type.to_string()));
    };

    let name = base_name(locator);
    let name = name.split('?').next().unwrap_or(name);

    if name.is_empty() || name == "." || name == ".." {
        return Resolution::Unresolvable(NamingError::EmptyName(locator.to_string()));
    }

    if name.contains('.') {
        Resolution::Resolved(name.to_string())
    } else {
        Resolution::Resolved(format!("{}.{}", name, subtype))
    }
}
