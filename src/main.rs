use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use nix::unistd::Uid;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::changer::apply_mac;
use crate::error::{MacError, MacResult};
use crate::ip::{Interface, IpLink, LinkController};
use crate::mac::MacAddress;
use crate::select::{select_candidate, MacSource};

mod changer;
mod error;
mod ip;
mod mac;
mod prelude;
mod select;

const EXAMPLES: &str = "Examples:
  Change MAC address manually:
    sudo macswap -i eth0 -m AA:BB:CC:DD:EE:FF

  Random selection:
    sudo macswap -i eth0 -r ./mac_list.txt";

/// Change the MAC address of a network interface (Linux)
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, after_help = EXAMPLES)]
#[clap(group(ArgGroup::new("source").required(true).args(["mac", "random"])))]
struct Args {
    /// Destination interface to change MAC address
    #[clap(short, long)]
    interface: String,

    /// New MAC address
    #[clap(short, long)]
    mac: Option<String>,

    /// MAC address file for random selection
    #[clap(short, long, value_name = "FILE")]
    random: Option<PathBuf>,

    /// Seed for random selection, picks the same line for the same file
    #[clap(long)]
    seed: Option<u64>,

    /// Log verbosity, repeat for more
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn source(&self) -> MacResult<MacSource> {
        MacSource::from_options(self.mac.clone(), self.random.clone())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = root_permission() {
        return report(e);
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    let controller = IpLink::default();
    match run(&args, &controller) {
        Ok((mac, iface)) => {
            println!(
                "[+] MAC address successfully changed to {} on {}",
                mac, iface
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn run<C: LinkController + ?Sized>(
    args: &Args,
    controller: &C,
) -> MacResult<(MacAddress, Interface)> {
    let source = args.source()?;
    let candidate = select_candidate(&source, &mut args.rng())?;
    let mac = MacAddress::parse(&candidate)?;
    let iface = Interface::new(&args.interface);
    info!("changing MAC address of {} to {}", iface, mac);

    let mac = apply_mac(controller, &mac, &iface).into_result()?;
    Ok((mac, iface))
}

fn root_permission() -> MacResult<()> {
    if !Uid::effective().is_root() {
        return Err(MacError::Privilege);
    }
    Ok(())
}

fn report(e: MacError) -> ExitCode {
    eprintln!("[-] {}", e);
    ExitCode::from(e.exit_code())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
