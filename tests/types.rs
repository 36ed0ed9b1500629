// ABOUTME: Integration tests for validated reference types.
// ABOUTME: Property tests for parsing, display, and host scoping.

use limani::types::*;
use proptest::prelude::*;

mod tagged_image {
    use super::*;

    #[test]
    fn accepts_registry_scoped_references() {
        let image = TaggedImage::parse("registry.example.com:5000/ns/app:1.2.3").unwrap();
        assert_eq!(image.name(), "registry.example.com:5000/ns/app");
        assert_eq!(image.tag(), "1.2.3");
    }

    #[test]
    fn scoping_and_unscoping_are_inverse() {
        let image = TaggedImage::parse("ns/app:1.0").unwrap();
        let scoped = image.scoped("localhost:5000");
        assert_eq!(scoped, "localhost:5000/ns/app:1.0");

        let parsed = TaggedImage::parse(&scoped).unwrap();
        assert_eq!(parsed.relative_to("localhost:5000"), image);
    }

    proptest! {
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = TaggedImage::parse(&input);
        }

        #[test]
        fn valid_references_round_trip(
            name in "[a-z0-9]{1,12}(/[a-z0-9]{1,12}){0,2}",
            tag in "[a-zA-Z0-9._-]{1,8}",
        ) {
            let image = TaggedImage::parse(&format!("{name}:{tag}")).unwrap();
            prop_assert_eq!(image.name(), name.as_str());
            prop_assert_eq!(image.tag(), tag.as_str());
            prop_assert_eq!(image.to_string(), format!("{name}:{tag}"));
        }

        #[test]
        fn scoped_references_resolve_back(
            host in "[a-z0-9.]{1,10}(:[0-9]{2,5})?",
            name in "[a-z0-9]{1,12}",
            tag in "[a-z0-9]{1,8}",
        ) {
            let image = TaggedImage::parse(&format!("{name}:{tag}")).unwrap();
            let scoped = TaggedImage::parse(&image.scoped(&host)).unwrap();
            prop_assert_eq!(scoped.relative_to(&host), image);
        }
    }
}

mod digest {
    use super::*;

    #[test]
    fn orders_and_compares_by_value() {
        let a: Digest = "sha256:aaa".parse().unwrap();
        let b: Digest = "sha256:bbb".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "sha256:aaa".parse::<Digest>().unwrap());
    }

    proptest! {
        #[test]
        fn digests_round_trip(
            algo in "[a-z0-9]{1,8}",
            hash in "[a-f0-9]{8,64}",
        ) {
            let text = format!("{algo}:{hash}");
            let digest: Digest = text.parse().unwrap();
            prop_assert_eq!(digest.to_string(), text);
        }

        #[test]
        fn strings_without_separator_are_rejected(input in "[a-f0-9]{0,64}") {
            prop_assert!(input.parse::<Digest>().is_err());
        }
    }
}
