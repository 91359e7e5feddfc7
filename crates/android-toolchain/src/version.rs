//! Release Version Ordering
//!
//! NDK installs live in directories named after their release (`25.2.9519653`,
//! `21.4`, ...). Names that parse as strict semantic versions are ordered by
//! semver rules; everything else falls back to a dotted numeric comparison.

use std::cmp::Ordering;

/// Compare two version-like strings.
///
/// Both sides are tried as strict `MAJOR.MINOR.PATCH` versions first. If
/// either fails to parse, the strings are compared segment by segment on `.`,
/// each segment read as an integer (non-numeric segments read as zero, missing
/// segments as zero). So `"1.1"` equals `"1.1.0"` and `""` is less than `"1"`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(va), Ok(vb)) => va.cmp(&vb),
        _ => compare_dotted(a, b),
    }
}

/// Dotted numeric comparison, stopping at the first differing segment.
pub fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ord = l.unwrap_or(0).cmp(&r.unwrap_or(0));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Pick the greatest name under [`compare_versions`]. Earlier names win ties.
pub fn newest<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().fold(None, |best, name| match best {
        Some(current) if compare_versions(current, name) != Ordering::Less => Some(current),
        _ => Some(name),
    })
}

fn segments(s: &str) -> impl Iterator<Item = u64> + '_ {
    // An empty string has no segments at all, not one empty segment.
    let source = if s.is_empty() { None } else { Some(s) };
    source
        .into_iter()
        .flat_map(|s| s.split('.'))
        .map(|seg| seg.parse::<u64>().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_to_itself() {
        for s in ["", "1", "1.2", "25.2.9519653", "r21", "abc.def"] {
            assert_eq!(compare_versions(s, s), Ordering::Equal, "{s:?}");
        }
    }

    #[test]
    fn test_dotted_ordering() {
        assert_eq!(compare_versions("1", "2"), Ordering::Less);
        assert_eq!(compare_versions("", "1"), Ordering::Less);
        assert_eq!(compare_versions("2", ""), Ordering::Greater);
        assert_eq!(compare_versions("1.1", "1.2"), Ordering::Less);
        assert_eq!(compare_versions("1.1", "1.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.2.0"), Ordering::Less);
    }

    #[test]
    fn test_semver_prerelease() {
        assert_eq!(compare_versions("1.0.0-beta", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("21.4.7075529", "25.2.9519653"), Ordering::Less);
    }

    #[test]
    fn test_mixed_falls_back() {
        // "20.1" is not strict semver, so both sides use dotted comparison.
        assert_eq!(compare_versions("20.1", "19.5.0"), Ordering::Greater);
        assert_eq!(compare_versions("x.2", "0.2"), Ordering::Equal);
    }

    #[test]
    fn test_newest() {
        assert_eq!(newest(["19.0", "20.1", "19.5"]), Some("20.1"));
        assert_eq!(newest(["1.1", "1.1.0"]), Some("1.1"));
        assert_eq!(newest(Vec::<&str>::new()), None);
    }
}
