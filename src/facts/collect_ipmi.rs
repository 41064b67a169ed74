use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::PathBuf;

use crate::facts::collector::FactCollector;
use crate::facts::probe::ProbeContext;
use crate::facts::types::{FactValue, IpmiFacts};

lazy_static! {
    static ref IPMI_MODULE_RE: Regex = Regex::new(r"^ipmi_").unwrap();

    // One alternative per LAN configuration field. Character classes
    // match what ipmitool prints for each field type.
    static ref IPMI_LAN_RE: Regex = Regex::new(
        r"IP\sAddress\sSource\s+:\s(?P<source>[ a-zA-Z]+)|IP\sAddress\s+:\s(?P<address>[.0-9]+)|Subnet\sMask\s+:\s(?P<netmask>[.0-9]+)|MAC\sAddress\s+:\s(?P<macaddress>[:0-9a-fA-F]+)|SNMP\sCommunity\sString\s+:\s(?P<snmp_community>[ -.#@=:_a-zA-Z]+)|Default\sGateway\sIP\s+:\s(?P<gateway>[.0-9]+)|802\.1q\sVLAN\sID\s+:\s(?P<vlan_id>[0-9]+)"
    )
    .unwrap();
}

/// Collects BMC LAN configuration via ipmitool, but only on hosts that
/// actually have an IPMI driver loaded. Everything short of a parsed
/// report degrades to an empty value: no module, no tool, failed spawn.
pub struct IpmiCollector {
    modules_path: PathBuf,
}

impl IpmiCollector {
    pub fn new() -> Self {
        Self::with_modules_path("/proc/modules")
    }

    pub fn with_modules_path(modules_path: impl Into<PathBuf>) -> Self {
        IpmiCollector {
            modules_path: modules_path.into(),
        }
    }
}

impl FactCollector for IpmiCollector {
    fn name(&self) -> &'static str {
        "ipmi"
    }

    fn collect(&self, probe: &dyn ProbeContext) -> FactValue {
        let have_ipmi = match fs::read_to_string(&self.modules_path) {
            Ok(content) => has_ipmi_module(&content),
            Err(_) => false,
        };
        if !have_ipmi {
            return FactValue::Ipmi(IpmiFacts::default());
        }

        let ipmitool = match probe.find_binary("ipmitool") {
            Some(path) => path,
            None => return FactValue::Ipmi(IpmiFacts::default()),
        };

        match probe.run_probe(&ipmitool, &["lan", "print", "1"]) {
            Some(output) => FactValue::Ipmi(parse_lan_print(&output.stdout)),
            None => FactValue::Ipmi(IpmiFacts::default()),
        }
    }
}

pub(crate) fn has_ipmi_module(modules: &str) -> bool {
    modules.lines().any(|line| IPMI_MODULE_RE.is_match(line))
}

/// Walk the report line by line, assigning whichever field the line
/// matched. A later line for the same field overwrites the earlier
/// capture; the tool's report is normally single-valued per field.
pub(crate) fn parse_lan_print(output: &str) -> IpmiFacts {
    let mut facts = IpmiFacts::default();

    for line in output.lines() {
        if let Some(caps) = IPMI_LAN_RE.captures(line) {
            assign(&caps, "source", &mut facts.source);
            assign(&caps, "address", &mut facts.address);
            assign(&caps, "netmask", &mut facts.netmask);
            assign(&caps, "macaddress", &mut facts.macaddress);
            assign(&caps, "snmp_community", &mut facts.snmp_community);
            assign(&caps, "gateway", &mut facts.gateway);
            assign(&caps, "vlan_id", &mut facts.vlan_id);
        }
    }

    facts
}

// An empty capture must not clobber an earlier value.
fn assign(caps: &Captures, group: &str, slot: &mut Option<String>) {
    if let Some(m) = caps.name(group) {
        if !m.as_str().is_empty() {
            *slot = Some(m.as_str().to_string());
        }
    }
}
