// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for zone record mutations.

#[cfg(test)]
mod tests {
    use crate::errors::PanelError;
    use crate::zone::{DnssecRecord, RecordKind, RecordSet, Zone};

    const ZONE: &str = "example.com";

    fn zone_with_name_servers(count: usize) -> Zone {
        let mut zone = Zone::default();
        for i in 0..count {
            zone.add_name_server(ZONE, &format!("ns{i}.example.com"), &format!("192.0.2.{i}"))
                .unwrap();
        }
        zone
    }

    fn ds(key_tag: u16) -> DnssecRecord {
        DnssecRecord::new(key_tag, 8, format!("ABCDEF{key_tag}"))
    }

    // =====================================================
    // Name servers
    // =====================================================

    #[test]
    fn test_add_name_server() {
        let mut zone = zone_with_name_servers(2);

        zone.add_name_server(ZONE, "www.example.com", "1.2.3.4")
            .unwrap();

        assert_eq!(zone.name_servers.len(), 3);
        assert_eq!(
            zone.name_servers.get("www.example.com").map(String::as_str),
            Some("1.2.3.4")
        );
    }

    #[test]
    fn test_add_name_server_at_limit() {
        let mut zone = zone_with_name_servers(5);
        let before = zone.clone();

        let err = zone
            .add_name_server(ZONE, "ns9.example.com", "192.0.2.9")
            .unwrap_err();

        assert!(matches!(
            err,
            PanelError::RecordLimitExceeded {
                kind: RecordKind::NameServer,
                limit: 5,
                ..
            }
        ));
        assert_eq!(zone, before);
    }

    #[test]
    fn test_add_duplicate_name_server() {
        let mut zone = zone_with_name_servers(1);

        let err = zone
            .add_name_server(ZONE, "ns0.example.com", "198.51.100.1")
            .unwrap_err();

        assert_eq!(
            err,
            PanelError::DuplicateRecord {
                zone: ZONE.to_string(),
                kind: RecordKind::NameServer,
                record: "ns0.example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_add_name_server_rejects_bad_ip() {
        let mut zone = Zone::default();

        for ip in ["", "1.2.3", "256.1.1.1", "2001:db8::1", "ns.example.com"] {
            let err = zone.add_name_server(ZONE, "ns1.example.com", ip).unwrap_err();
            assert!(
                matches!(err, PanelError::InvalidRecord { .. }),
                "{ip:?} should be rejected"
            );
        }
        assert!(zone.name_servers.is_empty());
    }

    #[test]
    fn test_add_name_server_rejects_bad_hostname() {
        let mut zone = Zone::default();

        for host in ["", "localhost", "ns1..example.com", "ns1.example.com.", "ns 1.example.com"] {
            let err = zone.add_name_server(ZONE, host, "192.0.2.1").unwrap_err();
            assert!(
                matches!(err, PanelError::InvalidRecord { .. }),
                "{host:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hyphenated_hostname_is_accepted() {
        let mut zone = Zone::default();

        zone.add_name_server(ZONE, "ns-1.my-site.example.com", "192.0.2.1")
            .unwrap();

        assert_eq!(zone.name_servers.len(), 1);
    }

    #[test]
    fn test_update_name_server() {
        let mut zone = zone_with_name_servers(2);

        zone.update_name_server(ZONE, "ns1.example.com", "203.0.113.7")
            .unwrap();

        assert_eq!(zone.name_servers["ns1.example.com"], "203.0.113.7");
        assert_eq!(zone.name_servers.len(), 2);
    }

    #[test]
    fn test_update_missing_name_server() {
        let mut zone = zone_with_name_servers(2);

        let err = zone
            .update_name_server(ZONE, "ns7.example.com", "203.0.113.7")
            .unwrap_err();

        assert!(matches!(err, PanelError::RecordNotFound { .. }));
    }

    #[test]
    fn test_delete_name_server() {
        let mut zone = zone_with_name_servers(3);

        zone.delete_name_server(ZONE, "ns1.example.com", "192.0.2.1")
            .unwrap();

        assert_eq!(zone.name_servers.len(), 2);
        assert!(!zone.name_servers.contains_key("ns1.example.com"));
    }

    #[test]
    fn test_delete_name_server_requires_matching_ip() {
        let mut zone = zone_with_name_servers(3);
        let before = zone.clone();

        let err = zone
            .delete_name_server(ZONE, "ns1.example.com", "192.0.2.99")
            .unwrap_err();

        assert_eq!(
            err,
            PanelError::RecordNotFound {
                zone: ZONE.to_string(),
                kind: RecordKind::NameServer,
                record: "ns1.example.com -> 192.0.2.99".to_string(),
            }
        );
        assert_eq!(zone, before);
    }

    #[test]
    fn test_name_servers_iterate_sorted() {
        let mut zone = Zone::default();
        zone.add_name_server(ZONE, "zz.example.com", "192.0.2.3").unwrap();
        zone.add_name_server(ZONE, "aa.example.com", "192.0.2.1").unwrap();
        zone.add_name_server(ZONE, "mm.example.com", "192.0.2.2").unwrap();

        let hosts: Vec<&str> = zone.name_servers.keys().map(String::as_str).collect();
        assert_eq!(hosts, ["aa.example.com", "mm.example.com", "zz.example.com"]);
    }

    // =====================================================
    // DNSSEC
    // =====================================================

    #[test]
    fn test_add_dnssec() {
        let mut zone = Zone::default();

        zone.add_dnssec(ZONE, ds(1)).unwrap();
        zone.add_dnssec(ZONE, ds(2)).unwrap();

        assert_eq!(zone.dnssec_records, vec![ds(1), ds(2)]);
    }

    #[test]
    fn test_add_duplicate_dnssec() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, ds(1)).unwrap();

        let err = zone.add_dnssec(ZONE, ds(1)).unwrap_err();

        assert!(matches!(
            err,
            PanelError::DuplicateRecord {
                kind: RecordKind::Dnssec,
                ..
            }
        ));
        assert_eq!(zone.dnssec_records.len(), 1);
    }

    #[test]
    fn test_same_key_tag_different_digest_is_not_duplicate() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, DnssecRecord::new(100, 8, "AAAA")).unwrap();

        zone.add_dnssec(ZONE, DnssecRecord::new(100, 8, "BBBB")).unwrap();
        zone.add_dnssec(ZONE, DnssecRecord::new(100, 13, "AAAA")).unwrap();

        assert_eq!(zone.dnssec_records.len(), 3);
    }

    #[test]
    fn test_add_dnssec_at_limit() {
        let mut zone = Zone::default();
        for key_tag in 1..=5 {
            zone.add_dnssec(ZONE, ds(key_tag)).unwrap();
        }

        let err = zone.add_dnssec(ZONE, ds(6)).unwrap_err();

        assert!(matches!(
            err,
            PanelError::RecordLimitExceeded {
                kind: RecordKind::Dnssec,
                limit: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_add_dnssec_rejects_bad_digest() {
        let mut zone = Zone::default();

        assert!(matches!(
            zone.add_dnssec(ZONE, DnssecRecord::new(1, 8, "")),
            Err(PanelError::InvalidRecord { .. })
        ));
        assert!(matches!(
            zone.add_dnssec(ZONE, DnssecRecord::new(1, 8, "AB CD")),
            Err(PanelError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_update_dnssec_keeps_position() {
        let mut zone = Zone::default();
        for key_tag in 1..=3 {
            zone.add_dnssec(ZONE, ds(key_tag)).unwrap();
        }

        zone.update_dnssec(ZONE, &ds(2), ds(20)).unwrap();

        assert_eq!(zone.dnssec_records, vec![ds(1), ds(20), ds(3)]);
    }

    #[test]
    fn test_update_dnssec_to_existing_record() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, ds(1)).unwrap();
        zone.add_dnssec(ZONE, ds(2)).unwrap();

        let err = zone.update_dnssec(ZONE, &ds(1), ds(2)).unwrap_err();

        assert!(matches!(err, PanelError::DuplicateRecord { .. }));
    }

    #[test]
    fn test_update_dnssec_to_itself_is_allowed() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, ds(1)).unwrap();

        zone.update_dnssec(ZONE, &ds(1), ds(1)).unwrap();

        assert_eq!(zone.dnssec_records, vec![ds(1)]);
    }

    #[test]
    fn test_delete_dnssec() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, ds(1)).unwrap();
        zone.add_dnssec(ZONE, ds(2)).unwrap();

        zone.delete_dnssec(ZONE, &ds(1)).unwrap();

        assert_eq!(zone.dnssec_records, vec![ds(2)]);
    }

    #[test]
    fn test_delete_missing_dnssec() {
        let mut zone = Zone::default();
        zone.add_dnssec(ZONE, ds(1)).unwrap();

        let err = zone
            .delete_dnssec(ZONE, &DnssecRecord::new(1, 13, "ABCDEF1"))
            .unwrap_err();

        assert_eq!(
            err,
            PanelError::RecordNotFound {
                zone: ZONE.to_string(),
                kind: RecordKind::Dnssec,
                record: "1 13 ABCDEF1".to_string(),
            }
        );
    }

    // =====================================================
    // Snapshots and serialization
    // =====================================================

    #[test]
    fn test_records_snapshot() {
        let mut zone = zone_with_name_servers(2);
        zone.add_dnssec(ZONE, ds(1)).unwrap();

        assert_eq!(zone.records(RecordKind::NameServer).len(), 2);
        assert_eq!(
            zone.records(RecordKind::Dnssec),
            RecordSet::Dnssec(vec![ds(1)])
        );
    }

    #[test]
    fn test_zone_json_shape() {
        let mut zone = zone_with_name_servers(1);
        zone.add_dnssec(ZONE, DnssecRecord::new(2371, 13, "ABCD")).unwrap();

        let json = serde_json::to_value(&zone).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "NS": { "ns0.example.com": "192.0.2.0" },
                "DNSSEC": [{ "KeyTag": 2371, "Algorithm": 13, "Digest": "ABCD" }]
            })
        );
    }

    #[test]
    fn test_zone_null_record_sets_read_as_empty() {
        let zone: Zone = serde_json::from_str(r#"{"NS": null, "DNSSEC": null}"#).unwrap();

        assert_eq!(zone, Zone::default());
    }

    #[test]
    fn test_zone_missing_record_sets_read_as_empty() {
        let zone: Zone = serde_json::from_str("{}").unwrap();

        assert_eq!(zone, Zone::default());
    }
}
