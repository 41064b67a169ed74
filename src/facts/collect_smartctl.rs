use lazy_static::lazy_static;
use regex::Regex;

use crate::facts::collector::FactCollector;
use crate::facts::probe::ProbeContext;
use crate::facts::types::{FactValue, SmartDevice};

lazy_static! {
    // "<path> -d <type> # <comment>" scan lines; banners don't match.
    static ref SCAN_DEVICE_RE: Regex =
        Regex::new(r"(?m)^(/.*?)\s+-d\s+(.*?)\s+#\s+.*").unwrap();
}

/// Enumerates SMART-capable storage devices via `smartctl --scan-open`.
/// Scan mode lists candidates without deep device queries, so it stays
/// cheap and safe on foreign media.
pub struct SmartctlCollector;

impl FactCollector for SmartctlCollector {
    fn name(&self) -> &'static str {
        "smartctl"
    }

    fn collect(&self, probe: &dyn ProbeContext) -> FactValue {
        let smartctl = match probe.find_binary("smartctl") {
            Some(path) => path,
            None => return FactValue::Smartctl(Vec::new()),
        };

        match probe.run_probe(&smartctl, &["--scan-open"]) {
            Some(output) => FactValue::Smartctl(parse_scan_output(&output.stdout)),
            None => FactValue::Smartctl(Vec::new()),
        }
    }
}

/// Extract `{device, type}` per scan line, in output order.
pub(crate) fn parse_scan_output(output: &str) -> Vec<SmartDevice> {
    SCAN_DEVICE_RE
        .captures_iter(output)
        .map(|caps| SmartDevice {
            device: caps[1].to_string(),
            device_type: caps[2].to_string(),
        })
        .collect()
}
