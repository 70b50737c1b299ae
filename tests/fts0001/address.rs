//! FidoNet address grammar
//!
//! `zone:network/node[.point][@domain]`

use fidopkt::{Address, PktError, compose_address, parse_address};
use proptest::prelude::*;

#[test]
fn test_parse_node() {
    let addr = parse_address("5:6/7").unwrap();
    assert_eq!(addr.zone, 5);
    assert_eq!(addr.network, 6);
    assert_eq!(addr.node, 7);
    assert_eq!(addr.point, 0);
    assert_eq!(addr.domain, "");
}

#[test]
fn test_parse_point_with_domain() {
    let addr = parse_address("5:6/7.8@fidonet").unwrap();
    assert_eq!(
        addr,
        Address {
            zone: 5,
            network: 6,
            node: 7,
            point: 8,
            domain: "fidonet".to_string(),
        }
    );
}

#[test]
fn test_parse_bad_address() {
    let err = parse_address("bad-address").unwrap_err();
    assert!(matches!(err, PktError::AddressFormat(_)));
    assert!(err.to_string().contains("bad-address"));
}

#[test]
fn test_parse_rejects_partial_addresses() {
    for text in [
        "",
        "1",
        "1:2",
        "1:2/",
        ":2/3",
        "1:/3",
        "1:2/3.",
        "1:2/3.4.5",
        "1:2/3 ",
        " 1:2/3",
        "1:2/3@@fidonet",
    ] {
        assert!(parse_address(text).is_err(), "{text:?} should not parse");
    }
}

#[test]
fn test_parse_limits() {
    assert_eq!(
        parse_address("9999:65535/65535.65535").unwrap(),
        Address::new(9999, 65535, 65535).with_point(65535)
    );
    assert!(parse_address("1:65536/1").is_err());
    assert!(parse_address("1:1/65536").is_err());
    assert!(parse_address("1:1/1.65536").is_err());
    assert!(parse_address("12345:1/1").is_err());
}

#[test]
fn test_from_str() {
    let addr: Address = "2:5020/1042".parse().unwrap();
    assert_eq!(addr, Address::new(2, 5020, 1042));
    assert!("2:5020".parse::<Address>().is_err());
}

#[test]
fn test_compose() {
    assert_eq!(compose_address(&Address::new(2, 5020, 1042)), "2:5020/1042");
    assert_eq!(
        compose_address(&Address::new(2, 5020, 1042).with_point(7)),
        "2:5020/1042.7"
    );
    assert_eq!(
        compose_address(&Address::new(2, 5020, 1042).with_point(7).with_domain("fidonet")),
        "2:5020/1042.7@fidonet"
    );
}

#[test]
fn test_canonical_form() {
    assert_eq!(parse_address("1:2/3.0@").unwrap().to_string(), "1:2/3");
    assert_eq!(parse_address("01:002/0003").unwrap().to_string(), "1:2/3");
}

#[test]
fn test_point_outbound_dir() {
    let addr = parse_address("2:5020/1042.7@fidonet").unwrap();
    assert_eq!(addr.point_outbound_dir(), "139c0412.pnt");
}

#[test]
fn test_checked_rejects_what_parse_rejects() {
    assert!(Address::checked(2, 5020, 1042, 0, "fidonet").is_ok());
    for addr in [
        Address::new(10000, 1, 1),
        Address::new(1, 1, 1).with_domain("FidoNet"),
    ] {
        assert!(matches!(addr.validate(), Err(PktError::AddressFormat(_))));
        assert!(parse_address(&compose_address(&addr)).is_err());
    }
}

proptest! {
    #[test]
    fn prop_compose_then_parse(
        zone in 0u16..=9999,
        network in any::<u16>(),
        node in any::<u16>(),
        point in any::<u16>(),
        domain in "[a-z]{0,12}",
    ) {
        let addr = Address { zone, network, node, point, domain };
        prop_assert_eq!(parse_address(&compose_address(&addr)).unwrap(), addr);
    }

    #[test]
    fn prop_parse_then_compose_is_stable(
        zone in 0u16..=9999,
        network in any::<u16>(),
        node in any::<u16>(),
        point in any::<u16>(),
        domain in "[a-z]{0,12}",
    ) {
        let text = format!("{zone}:{network}/{node}.{point}@{domain}");
        let addr = parse_address(&text).unwrap();
        let canonical = compose_address(&addr);
        prop_assert_eq!(parse_address(&canonical).unwrap(), addr);
    }
}
