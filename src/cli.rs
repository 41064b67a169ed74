use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "extended-facts")]
#[command(about = "Collect extended hardware facts (RAID, IPMI, smartctl)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect facts from every collector
    All {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Collect SCSI controller and RAID driver module facts
    Raid {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Collect BMC LAN configuration facts via ipmitool
    Ipmi {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Enumerate SMART-capable storage devices via smartctl
    Smartctl {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}
