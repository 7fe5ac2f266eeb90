/// Returns `url` with its password replaced by `***`, for logging.
///
/// Multi-host connection strings are not valid URLs; their user info is
/// redacted by hand. Input without user info is returned as is.
pub(crate) fn redact_url_password(url: &str) -> String {
    if let Ok(mut parsed) = url::Url::parse(url) {
        if parsed.password().is_some() {
            let _ = parsed.set_password(Some("***"));
        }
        return parsed.to_string();
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return url.to_string();
    };

    let user = match rest[..at].split_once(':') {
        Some((user, _)) => format!("{user}:***"),
        None => rest[..at].to_string(),
    };

    format!("{scheme}://{user}{}", &rest[at..])
}
