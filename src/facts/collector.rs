use chrono::Utc;
use std::collections::BTreeMap;

use crate::facts::collect_ipmi::IpmiCollector;
use crate::facts::collect_raid::RaidCollector;
use crate::facts::collect_smartctl::SmartctlCollector;
use crate::facts::probe::ProbeContext;
use crate::facts::types::{FactReport, FactValue};

const AGENT_VERSION: &str = "1.0.0";

/// One hardware domain's fact source. `collect` never fails: missing
/// files, missing tools, and probe errors all degrade to an empty or
/// partial value, so a fleet-wide run always gets an answer per host.
pub trait FactCollector {
    fn name(&self) -> &'static str;
    fn collect(&self, probe: &dyn ProbeContext) -> FactValue;
}

pub fn all_collectors() -> Vec<Box<dyn FactCollector>> {
    vec![
        Box::new(RaidCollector::new()),
        Box::new(IpmiCollector::new()),
        Box::new(SmartctlCollector),
    ]
}

/// Run the given collectors and key each result by collector name.
/// Every collector that ran contributes a key, even when its value is
/// empty on this host.
pub fn collect_facts(
    collectors: &[Box<dyn FactCollector>],
    probe: &dyn ProbeContext,
) -> BTreeMap<String, FactValue> {
    let mut facts = BTreeMap::new();
    for collector in collectors {
        facts.insert(collector.name().to_string(), collector.collect(probe));
    }
    facts
}

pub fn collect_all_facts(probe: &dyn ProbeContext) -> FactReport {
    FactReport {
        agent_version: AGENT_VERSION.to_string(),
        collected_at: Utc::now(),
        facts: collect_facts(&all_collectors(), probe),
    }
}
