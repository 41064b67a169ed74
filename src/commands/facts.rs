use crate::cli::Commands;
use crate::facts::{
    collect_all_facts, FactCollector, IpmiCollector, RaidCollector, SmartctlCollector,
    SystemProbe,
};
use crate::output::output_data;

pub fn handle_facts_command(cmd: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    let probe = SystemProbe;

    match cmd {
        Commands::All { format } => {
            let report = collect_all_facts(&probe);
            output_data(&report, format)?;
        }
        Commands::Raid { format } => {
            let facts = RaidCollector::new().collect(&probe);
            output_data(&facts, format)?;
        }
        Commands::Ipmi { format } => {
            let facts = IpmiCollector::new().collect(&probe);
            output_data(&facts, format)?;
        }
        Commands::Smartctl { format } => {
            let facts = SmartctlCollector.collect(&probe);
            output_data(&facts, format)?;
        }
    }
    Ok(())
}
