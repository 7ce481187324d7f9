//! DNS name helpers.

/// Label certbot publishes DNS-01 validations under
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Append the root dot to `name` unless it is already absolute.
///
/// The DNS API stores record set names fully qualified, so every name sent
/// to it goes through here.
#[must_use]
pub fn absolute_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Record name certbot uses for the DNS-01 validation of `domain`
#[must_use]
pub fn validation_name(domain: &str) -> String {
    format!("{ACME_CHALLENGE_LABEL}.{}", domain.trim_end_matches('.'))
}

/// Candidate zone names for `domain`, most specific first.
///
/// `a.b.c` yields `a.b.c`, `b.c`, `c`. A trailing root dot is ignored since
/// zones are looked up by their relative DNS name.
#[must_use]
pub fn zone_candidates(domain: &str) -> Vec<&str> {
    let domain = domain.trim_end_matches('.');
    if domain.is_empty() {
        return Vec::new();
    }

    std::iter::once(domain)
        .chain(
            domain
                .match_indices('.')
                .map(|(i, _)| &domain[i + 1..])
                .filter(|suffix| !suffix.is_empty()),
        )
        .collect()
}
