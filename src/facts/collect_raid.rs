use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::PathBuf;

use crate::facts::collector::FactCollector;
use crate::facts::probe::ProbeContext;
use crate::facts::types::{FactValue, RaidFacts, ScsiDevice};

lazy_static! {
    // One match per three-line device block in /proc/scsi/scsi. Labels
    // vary in case between kernels, hence (?i).
    static ref SCSI_DEVICE_RE: Regex = Regex::new(
        r"(?i)host:\s+(.*?)\s+.*channel:\s+(.*?)\s+id:\s+(.*?)\s+lun:\s+(.*?)\n\s+vendor:\s+(.*?)\s+model:\s+(.*?)\s+rev:\s+(.*?)\n\s+type:\s+(.*?)\s+.*"
    )
    .unwrap();

    // Allowlist of RAID/HBA driver module name families.
    static ref RAID_MODULE_RE: Regex = Regex::new(
        r"^(raid.*?|md|megaraid.*?|3w-[x9]xxx|aacraid|arcmsr|cciss|DAC960|dpt_i2o|gdth|hpsa|ips|mpt2?sas|mptscsih)\s+"
    )
    .unwrap();
}

/// Collects attached SCSI devices and loaded RAID controller driver
/// modules. Filesystem-only: a missing source file just omits the
/// corresponding key.
pub struct RaidCollector {
    scsi_path: PathBuf,
    modules_path: PathBuf,
}

impl RaidCollector {
    pub fn new() -> Self {
        Self::with_paths("/proc/scsi/scsi", "/proc/modules")
    }

    pub fn with_paths(scsi_path: impl Into<PathBuf>, modules_path: impl Into<PathBuf>) -> Self {
        RaidCollector {
            scsi_path: scsi_path.into(),
            modules_path: modules_path.into(),
        }
    }
}

impl FactCollector for RaidCollector {
    fn name(&self) -> &'static str {
        "raid"
    }

    fn collect(&self, _probe: &dyn ProbeContext) -> FactValue {
        let scsi_devices = fs::read_to_string(&self.scsi_path)
            .ok()
            .map(|content| parse_scsi_devices(&content));
        let modules = fs::read_to_string(&self.modules_path)
            .ok()
            .map(|content| parse_raid_modules(&content));

        FactValue::Raid(RaidFacts {
            scsi_devices,
            modules,
        })
    }
}

/// Extract one record per device block, in file order. Blocks that do
/// not follow the fixed three-line layout are skipped.
pub(crate) fn parse_scsi_devices(content: &str) -> Vec<ScsiDevice> {
    SCSI_DEVICE_RE
        .captures_iter(content)
        .map(|caps| ScsiDevice {
            host: caps[1].to_string(),
            channel: caps[2].to_string(),
            id: caps[3].to_string(),
            lun: caps[4].to_string(),
            vendor: caps[5].to_string(),
            model: caps[6].to_string(),
            rev: caps[7].to_string(),
            device_type: caps[8].to_string(),
        })
        .collect()
}

/// Filter /proc/modules down to RAID driver names, in file order.
pub(crate) fn parse_raid_modules(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| RAID_MODULE_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::probe::testing::DenyProbe;
    use std::fs;

    const SCSI_CONTENT: &str = "\
Attached devices:
Host: scsi0 Channel: 00 Id: 00 Lun: 00
  Vendor: ATA      Model: SAMSUNG MZ7LM480 Rev: 204Q
  Type:   Direct-Access                    ANSI  SCSI revision: 05
Host: scsi1 Channel: 00 Id: 08 Lun: 00
  Vendor: LSI      Model: MR9361-8i        Rev: 4.68
  Type:   Direct-Access                    ANSI  SCSI revision: 05
";

    #[test]
    fn test_parse_scsi_devices() {
        let devices = parse_scsi_devices(SCSI_CONTENT);

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].host, "scsi0");
        assert_eq!(devices[0].channel, "00");
        assert_eq!(devices[0].id, "00");
        assert_eq!(devices[0].lun, "00");
        assert_eq!(devices[0].vendor, "ATA");
        assert_eq!(devices[0].model, "SAMSUNG MZ7LM480");
        assert_eq!(devices[0].rev, "204Q");
        assert_eq!(devices[0].device_type, "Direct-Access");
        assert_eq!(devices[1].host, "scsi1");
        assert_eq!(devices[1].id, "08");
        assert_eq!(devices[1].vendor, "LSI");
    }

    #[test]
    fn test_parse_scsi_devices_lowercase_labels() {
        let content = "\
host: scsi2 channel: 01 id: 00 lun: 00
  vendor: DELL     model: PERC H730P       rev: 4.30
  type:   Direct-Access                    ANSI  SCSI revision: 05
";
        let devices = parse_scsi_devices(content);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].host, "scsi2");
        assert_eq!(devices[0].model, "PERC H730P");
    }

    #[test]
    fn test_parse_scsi_devices_skips_malformed_blocks() {
        // Header line only, no vendor/type lines following.
        let devices = parse_scsi_devices("Host: scsi0 Channel: 00 Id: 00 Lun: 00\n");
        assert!(devices.is_empty());
    }

    #[test]
    fn test_parse_raid_modules() {
        let content = "\
megaraid_sas 176128 2 - Live 0x0000000000000000
ext4 905216 3 - Live 0x0000000000000000
raid1 49152 1 - Live 0x0000000000000000
md 167936 2 raid1, Live 0x0000000000000000
hpsa 139264 0 - Live 0x0000000000000000
nvme 49152 4 - Live 0x0000000000000000
";
        assert_eq!(
            parse_raid_modules(content),
            vec!["megaraid_sas", "raid1", "md", "hpsa"]
        );
    }

    #[test]
    fn test_parse_raid_modules_requires_leading_token() {
        // The name must start the line; mentions elsewhere don't count.
        assert!(parse_raid_modules("dm_mod 184320 2 md, Live 0x0\n").is_empty());
    }

    #[test]
    fn test_collect_without_source_files() {
        let tmp = tempfile::tempdir().unwrap();
        let collector = RaidCollector::with_paths(
            tmp.path().join("scsi"),
            tmp.path().join("modules"),
        );

        let value = collector.collect(&DenyProbe);

        assert_eq!(
            value,
            FactValue::Raid(RaidFacts {
                scsi_devices: None,
                modules: None,
            })
        );
    }

    #[test]
    fn test_collect_reads_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let scsi = tmp.path().join("scsi");
        let modules = tmp.path().join("modules");
        fs::write(&scsi, SCSI_CONTENT).unwrap();
        fs::write(&modules, "raid456 225280 1 - Live 0x0\n").unwrap();

        let value = RaidCollector::with_paths(scsi, modules).collect(&DenyProbe);

        match value {
            FactValue::Raid(facts) => {
                assert_eq!(facts.scsi_devices.unwrap().len(), 2);
                assert_eq!(facts.modules.unwrap(), vec!["raid456"]);
            }
            other => panic!("expected raid facts, got {:?}", other),
        }
    }
}
