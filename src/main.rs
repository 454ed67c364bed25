use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aeroport::{
    config::{self, Config},
    connection, filter, interface,
    render::{self, ScanReport, PLACEHOLDER},
    scan, AeroportError, Nmcli, WirelessAdapter,
};

#[derive(Parser)]
#[command(name = "aeroport")]
#[command(about = "List nearby wireless networks and join them using saved credentials")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to <config dir>/aeroport/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available wireless networks
    #[command(alias = "list")]
    Scan {
        /// Interface to use (defaults to the first wireless interface)
        #[arg(short, long)]
        interface: Option<String>,

        /// Filter by ssid (regular expression)
        #[arg(short, long)]
        ssid: Option<String>,

        /// Trigger a fresh scan instead of listing the last results
        #[arg(long)]
        no_cache: bool,

        /// Print the networks as JSON
        #[arg(long, conflicts_with = "template")]
        json: bool,

        /// Tera template used to render the list
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Join network
    Join {
        /// Interface to use (defaults to the first wireless interface)
        #[arg(short, long)]
        interface: Option<String>,

        /// BSSID of the network
        #[arg(short, long)]
        bssid: String,
    },

    /// List available wireless interfaces
    Interfaces,

    /// Show the effective configuration
    ShowConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AeroportError>()
        .map(AeroportError::exit_code)
        .unwrap_or(1)
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let cfg = Config::load_from(&config_path)?;
    let nmcli = cfg.backend();

    match cli.command {
        Commands::Scan {
            interface,
            ssid,
            no_cache,
            json,
            template,
        } => cmd_scan(
            &nmcli,
            &cfg,
            interface.as_deref(),
            ssid.as_deref(),
            no_cache,
            json,
            template.as_deref(),
        ),
        Commands::Join { interface, bssid } => cmd_join(&nmcli, &cfg, interface.as_deref(), &bssid),
        Commands::Interfaces => cmd_interfaces(&nmcli),
        Commands::ShowConfig => cmd_show_config(&config_path, &cfg),
    }
}

fn cmd_scan(
    nmcli: &Nmcli,
    cfg: &Config,
    iface_name: Option<&str>,
    ssid: Option<&str>,
    no_cache: bool,
    json: bool,
    template: Option<&Path>,
) -> Result<()> {
    let pattern = filter::compile_pattern(ssid)?;
    let iface_name = iface_name.or(cfg.default_interface.as_deref());
    let iface = interface::resolve_interface(nmcli, iface_name)?;

    let result = scan::find_networks(nmcli, &iface, pattern.as_ref(), !no_cache)?;
    let report = ScanReport::from(&result);

    let output = if json {
        render::to_json(&report)?
    } else {
        render::render(&report, template.or(cfg.template.as_deref()))?
    };
    println!("{}", output.trim_end());

    Ok(())
}

fn cmd_join(nmcli: &Nmcli, cfg: &Config, iface_name: Option<&str>, bssid: &str) -> Result<()> {
    let iface_name = iface_name.or(cfg.default_interface.as_deref());
    let iface = interface::resolve_interface(nmcli, iface_name)?;
    let target = connection::find_target(nmcli, &iface, bssid)?;

    println!(
        "Switching {} to {} (SSID: {})",
        iface.name,
        target.bssid,
        target.ssid.as_deref().unwrap_or(PLACEHOLDER)
    );

    connection::join(nmcli, nmcli, &iface, &target)?;

    Ok(())
}

fn cmd_interfaces(nmcli: &Nmcli) -> Result<()> {
    let interfaces = nmcli.interfaces()?;

    if interfaces.is_empty() {
        println!("No wireless interfaces found.");
        return Ok(());
    }

    println!("{:<16} {}", "INTERFACE", "STATE");
    println!("{}", "-".repeat(32));

    for iface in interfaces {
        println!("{:<16} {}", iface.name, iface.state);
    }

    Ok(())
}

fn cmd_show_config(path: &Path, cfg: &Config) -> Result<()> {
    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("(not present, using defaults)");
    }
    println!();

    println!(
        "default_interface: {}",
        cfg.default_interface.as_deref().unwrap_or("(first available)")
    );
    println!(
        "template:          {}",
        cfg.template
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string())
    );
    println!("nmcli:             {}", cfg.backend().program().display());

    Ok(())
}
