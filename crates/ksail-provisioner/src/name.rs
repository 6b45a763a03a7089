//! Cluster name resolution

/// Resolve the cluster name a provisioner operation targets.
///
/// A non-empty `requested` name wins; otherwise the `configured` default is
/// used. An empty result is not rejected here, callers decide whether that
/// is a precondition failure.
pub fn resolve_name<'a>(requested: &'a str, configured: &'a str) -> &'a str {
    if requested.is_empty() {
        configured
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_name_wins() {
        assert_eq!(resolve_name("dev", "ksail-default"), "dev");
        assert_eq!(resolve_name("dev", ""), "dev");
    }

    #[test]
    fn test_falls_back_to_configured() {
        assert_eq!(resolve_name("", "ksail-default"), "ksail-default");
        assert_eq!(resolve_name("", ""), "");
    }

    #[test]
    fn test_resolution_table() {
        let names = ["", "kind", "k3s-default", "my cluster"];
        for requested in names {
            for configured in names {
                let expected = if requested.is_empty() {
                    configured
                } else {
                    requested
                };
                assert_eq!(resolve_name(requested, configured), expected);
            }
        }
    }
}
