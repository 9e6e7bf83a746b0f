//! Property tests for the `cidr` and `semver` format predicates.

use jsv_schema::{is_cidr, is_semver, FormatRegistry};
use proptest::prelude::*;

proptest! {
    #[test]
    fn predicates_never_panic(input in "\\PC*") {
        let _ = is_cidr(&input);
        let _ = is_semver(&input);
    }

    #[test]
    fn ipv4_networks_are_cidr(octets in any::<[u8; 4]>(), prefix in 0u8..=32) {
        let [a, b, c, d] = octets;
        let cidr = format!("{a}.{b}.{c}.{d}/{prefix}");
        prop_assert!(is_cidr(&cidr), "{}", cidr);
    }

    #[test]
    fn ipv4_prefix_beyond_width_is_rejected(octets in any::<[u8; 4]>(), prefix in 33u16..=999) {
        let [a, b, c, d] = octets;
        let cidr = format!("{a}.{b}.{c}.{d}/{prefix}");
        prop_assert!(!is_cidr(&cidr), "{}", cidr);
    }

    #[test]
    fn ipv6_networks_are_cidr(segments in any::<[u16; 8]>(), prefix in 0u8..=128) {
        let addr = std::net::Ipv6Addr::from(segments);
        let cidr = format!("{addr}/{prefix}");
        prop_assert!(is_cidr(&cidr), "{}", cidr);
    }

    #[test]
    fn bare_addresses_are_not_cidr(octets in any::<[u8; 4]>()) {
        let addr = std::net::Ipv4Addr::from(octets);
        prop_assert!(!is_cidr(&addr.to_string()));
    }

    #[test]
    fn release_versions_are_semver(major in any::<u64>(), minor in any::<u64>(), patch in any::<u64>()) {
        let version = format!("{major}.{minor}.{patch}");
        prop_assert!(is_semver(&version), "{}", version);
    }

    #[test]
    fn prerelease_and_build_are_semver(
        core in (0u32..1000, 0u32..1000, 0u32..1000),
        pre in "[a-zA-Z][0-9a-zA-Z-]{0,8}(\\.[a-zA-Z][0-9a-zA-Z-]{0,8}){0,3}",
        build in "[0-9a-zA-Z-]{1,8}(\\.[0-9a-zA-Z-]{1,8}){0,3}",
    ) {
        let version = format!("{}.{}.{}-{pre}+{build}", core.0, core.1, core.2);
        prop_assert!(is_semver(&version), "{}", version);
    }

    #[test]
    fn v_prefix_is_never_semver(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
        let version = format!("v{major}.{minor}.{patch}");
        prop_assert!(!is_semver(&version));
    }

    #[test]
    fn two_component_versions_are_not_semver(major in 0u32..1000, minor in 0u32..1000) {
        let version = format!("{major}.{minor}");
        prop_assert!(!is_semver(&version));
    }

    #[test]
    fn registry_check_agrees_with_predicates(input in "[0-9a-f.:/v+-]{0,24}") {
        let registry = FormatRegistry::with_builtins();
        prop_assert_eq!(registry.check("cidr", &input), Some(is_cidr(&input)));
        prop_assert_eq!(registry.check("semver", &input), Some(is_semver(&input)));
    }
}
