use std::fmt;
use std::process::Command;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{MacError, MacResult};
use crate::mac::MacAddress;
use crate::prelude::*;

const DEFAULT_IP_BIN: &str = "ip";

lazy_static! {
    static ref LINK_ETHER_RE: Regex = Regex::new(r"link/ether\s([0-9a-fA-F:]{17})").unwrap();
}

/// Network device name. Existence is only checked by the commands run against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface(String);

impl Interface {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Administrative state, not physical link status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Up,
    Down,
}

impl LinkState {
    pub fn as_arg(&self) -> &'static str {
        match self {
            LinkState::Up => "up",
            LinkState::Down => "down",
        }
    }
}

pub trait LinkController {
    fn set_state(&self, iface: &Interface, state: LinkState) -> MacResult<()>;

    fn set_address(&self, iface: &Interface, mac: &MacAddress) -> MacResult<()>;

    /// `Ok(None)` when the query output carries no `link/ether` token.
    fn current_address(&self, iface: &Interface) -> MacResult<Option<String>>;
}

/// Drives an interface through iproute2's `ip link`.
#[derive(Debug, Clone)]
pub struct IpLink {
    ip_bin: String,
}

impl Default for IpLink {
    fn default() -> Self {
        Self::new(DEFAULT_IP_BIN)
    }
}

impl IpLink {
    pub fn new(ip_bin: &str) -> Self {
        Self {
            ip_bin: ip_bin.to_string(),
        }
    }

    fn run(&self, args: &[&str]) -> Res<String> {
        let cmdline = format!("{} {}", self.ip_bin, args.join(" "));
        debug!("running `{}`", cmdline);
        let output = Command::new(&self.ip_bin)
            .args(args)
            .output()
            .with_context(|| format!("failed to run `{}`", cmdline))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("`{}` exited with {}: {}", cmdline, output.status, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_state_change(&self, args: &[&str]) -> MacResult<()> {
        self.run(args)
            .map(|_| ())
            .map_err(|e| MacError::CommandFailure(format!("{:#}", e)))
    }
}

impl LinkController for IpLink {
    fn set_state(&self, iface: &Interface, state: LinkState) -> MacResult<()> {
        self.run_state_change(&["link", "set", "dev", iface.name(), state.as_arg()])
    }

    fn set_address(&self, iface: &Interface, mac: &MacAddress) -> MacResult<()> {
        let addr = mac.link_layer_text();
        self.run_state_change(&["link", "set", "dev", iface.name(), "address", &addr])
    }

    fn current_address(&self, iface: &Interface) -> MacResult<Option<String>> {
        let output = self
            .run(&["link", "show", iface.name()])
            .map_err(|e| MacError::CommandFailure(format!("{:#}", e)))?;
        Ok(parse_link_ether(&output))
    }
}

pub fn parse_link_ether(output: &str) -> Option<String> {
    LINK_ETHER_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|it| it.as_str().to_string())
}
