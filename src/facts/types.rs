use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated result of one collection run: one entry per collector,
/// keyed by collector name.
#[derive(Debug, Serialize)]
pub struct FactReport {
    pub agent_version: String,
    pub collected_at: DateTime<Utc>,
    pub facts: BTreeMap<String, FactValue>,
}

/// The value a single collector contributes to the fact map.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FactValue {
    Raid(RaidFacts),
    Ipmi(IpmiFacts),
    Smartctl(Vec<SmartDevice>),
}

/// RAID facts. Each key appears only when its source file existed on
/// the host; a host without /proc/scsi/scsi simply has no `scsi_devices`.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct RaidFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scsi_devices: Option<Vec<ScsiDevice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
}

/// One attached SCSI device as reported by /proc/scsi/scsi. All fields
/// are carried verbatim from the kernel's listing.
#[derive(Debug, Serialize, PartialEq)]
pub struct ScsiDevice {
    pub host: String,
    pub channel: String,
    pub id: String,
    pub lun: String,
    pub vendor: String,
    pub model: String,
    pub rev: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// BMC LAN configuration extracted from `ipmitool lan print 1`. Every
/// field is optional: only lines actually found in the tool's report
/// are captured, and the whole value is empty when no IPMI kernel
/// module is loaded or ipmitool is unavailable.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct IpmiFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<String>,
}

/// One device from `smartctl --scan-open` output.
#[derive(Debug, Serialize, PartialEq)]
pub struct SmartDevice {
    pub device: String,
    #[serde(rename = "type")]
    pub device_type: String,
}
