//! Integration tests for starlink-pop
//!
//! These tests verify the complete workflow from reading the test data to a lookup.

use starlink_pop::models::{is_in_subnet_str, AddressError};
use starlink_pop::{classify, load_lookup_data, lookup, Classification, LookupData};
use starlink_pop::config::Config;

fn test_data() -> LookupData {
    LookupData::Files {
        geoip_path: "src/tests/test_data/geoip_test.json".into(),
        pop_path: "src/tests/test_data/pop_test.json".into(),
    }
}

#[tokio::test]
async fn test_full_workflow_with_files() {
    let (dataset, pops) = load_lookup_data(&Config::default(), &test_data())
        .await
        .expect("Failed to read test data");

    // IPv4 client inside the San Jose range
    let result = lookup(Some("203.0.113.10"), &dataset, &pops).expect("Lookup failed");
    assert!(result.matched);
    assert_eq!(result.annotation.as_deref(), Some("pop1.sjc.starlinkisp.net"));
    assert_eq!(result.pop_city.as_deref(), Some("San Jose"));

    // IPv6 client inside the San Jose range
    let result = lookup(Some("2605:59c8:1042::9"), &dataset, &pops).expect("Lookup failed");
    assert_eq!(result.pop_code.as_deref(), Some("sjc"));

    // Range with an unknown PoP code still matches
    let result = lookup(Some("192.0.2.44"), &dataset, &pops).expect("Lookup failed");
    assert!(result.matched);
    assert_eq!(result.pop_city, None);
}

#[tokio::test]
async fn test_classify_with_files() {
    let (dataset, _) = load_lookup_data(&Config::default(), &test_data())
        .await
        .expect("Failed to read test data");

    assert_eq!(
        classify(Some("203.0.113.10"), &dataset).unwrap(),
        Classification {
            matched: true,
            annotation: Some("pop1.sjc.starlinkisp.net".to_string())
        }
    );
    assert_eq!(
        classify(Some("203.0.114.10"), &dataset).unwrap(),
        Classification::no_match()
    );
    // The /33 row before it is skipped, the valid /24 still matches.
    assert_eq!(
        classify(Some("198.51.100.200"), &dataset)
            .unwrap()
            .annotation
            .as_deref(),
        Some("customer.sea.pop.starlinkisp.net")
    );
    assert!(matches!(
        classify(Some("999.1.1.1"), &dataset),
        Err(AddressError::MalformedAddress(_))
    ));
    assert_eq!(classify(None, &dataset).unwrap(), Classification::no_match());
}

#[test]
fn test_membership_examples() {
    assert!(is_in_subnet_str("192.168.1.5", "192.168.1.0/24").unwrap());
    assert!(!is_in_subnet_str("192.168.2.5", "192.168.1.0/24").unwrap());
    assert!(is_in_subnet_str("2606:4700::1", "2606:4700::/32").unwrap());
    assert!(matches!(
        is_in_subnet_str("1::2::3", "::/0"),
        Err(AddressError::MalformedAddress(_))
    ));
}
