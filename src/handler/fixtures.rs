//! Canned SWIS payloads
//!
//! Served byte-for-byte. Field names and casing follow what the IPAM client
//! unmarshals (`totalCount` really is lower camel case upstream).

/// `GET /`
pub const ROOT_GREETING: &str = "hello";

/// Subnet whose name contains "test"
pub const TEST_SUBNET: &str = r#"{"totalRows":1,
    "results": [
        {
            "SubnetId": 1234,
            "Address": "10.199.152.0",
            "CIDR": "23",
            "FriendlyName": "test subnet",
            "DisplayName": "test subnet",
            "AvailableCount": 200,
            "ReservedCount": 2,
            "UsedCount": 181,
            "totalCount": 512,
            "Comments": "NFS - VLAN 410",
            "VLAN": 410,
            "AddressMask": "255.255.254.0"
        }
    ]}"#;

pub const DEV_QA_NFS: &str = r#"{"totalRows":1,
    "results": [
        {
            "SubnetId": 1234,
            "Address": "10.199.152.0",
            "CIDR": "23",
            "FriendlyName": "DEV/QA NFS",
            "DisplayName": "DEV/QA NFS",
            "AvailableCount": 200,
            "ReservedCount": 2,
            "UsedCount": 181,
            "totalCount": 512,
            "Comments": "NFS - VLAN 410",
            "VLAN": 410,
            "AddressMask": "255.255.254.0"
        }
    ]}"#;

pub const DEV_QA_NFS2: &str = r#"{"totalRows":1,
    "results": [
        {
            "SubnetId": 1235,
            "Address": "10.199.154.0",
            "CIDR": "23",
            "FriendlyName": "DEV/QA NFS2",
            "DisplayName": "DEV/QA NFS2",
            "AvailableCount": 222,
            "ReservedCount": 6,
            "UsedCount": 191,
            "totalCount": 512,
            "Comments": "NFS - VLAN 412",
            "VLAN": 412,
            "AddressMask": "255.255.254.0"
        }
    ]}"#;

pub const EMPTY_RESULTS: &str = r#"{"results":[]}"#;

/// `IPAM.SubnetManagement/GetFirstAvailableIp`, shaped like the `IpNode`
/// object clients decode it into
pub const FIRST_AVAILABLE_IP: &str =
    r#"{"IpNodeId":4242,"DisplayName":"10.199.152.10","Status":"Available"}"#;

/// `IPAM.SubnetManagement/ChangeIPStatus` has no meaningful result
pub const CHANGE_IP_STATUS: &str = "[]";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn first_result(payload: &str) -> Value {
        let value: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(value["totalRows"], 1);
        value["results"][0].clone()
    }

    #[test]
    fn test_subnet_fixtures_are_valid_json() {
        let test = first_result(TEST_SUBNET);
        assert_eq!(test["DisplayName"], "test subnet");
        assert_eq!(test["SubnetId"], 1234);

        let nfs = first_result(DEV_QA_NFS);
        assert_eq!(nfs["DisplayName"], "DEV/QA NFS");
        assert_eq!(nfs["VLAN"], 410);

        let nfs2 = first_result(DEV_QA_NFS2);
        assert_eq!(nfs2["DisplayName"], "DEV/QA NFS2");
        assert_eq!(nfs2["Address"], "10.199.154.0");
        assert_eq!(nfs2["totalCount"], 512);
    }

    #[test]
    fn test_invoke_fixtures() {
        let ip: Value = serde_json::from_str(FIRST_AVAILABLE_IP).unwrap();
        assert_eq!(ip["IpNodeId"], 4242);
        assert_eq!(ip["DisplayName"], "10.199.152.10");
        assert_eq!(ip["Status"], "Available");

        let status: Value = serde_json::from_str(CHANGE_IP_STATUS).unwrap();
        assert!(status.as_array().unwrap().is_empty());

        let empty: Value = serde_json::from_str(EMPTY_RESULTS).unwrap();
        assert!(empty["results"].as_array().unwrap().is_empty());
    }
}
