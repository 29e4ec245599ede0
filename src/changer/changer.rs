use tracing::{info, warn};

use crate::error::{MacError, MacResult};
use crate::ip::{Interface, LinkController, LinkState};
use crate::mac::MacAddress;

/// Outcome of one apply attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeResult {
    Applied(MacAddress),
    Mismatch {
        expected: MacAddress,
        observed: Option<String>,
    },
    CommandFailed(String),
}

impl ChangeResult {
    pub fn into_result(self) -> MacResult<MacAddress> {
        match self {
            ChangeResult::Applied(mac) => Ok(mac),
            ChangeResult::Mismatch { expected, observed } => Err(MacError::VerificationMismatch {
                expected: expected.to_string(),
                observed,
            }),
            ChangeResult::CommandFailed(detail) => Err(MacError::CommandFailure(detail)),
        }
    }
}

/// Takes the interface down, sets the address, brings it back up, then reads
/// the address back. Stops at the first failed state change and leaves the
/// interface as it is.
pub fn apply_mac<C: LinkController + ?Sized>(
    controller: &C,
    address: &MacAddress,
    iface: &Interface,
) -> ChangeResult {
    if let Err(e) = controller.set_state(iface, LinkState::Down) {
        return command_failed(iface, "down", e);
    }
    if let Err(e) = controller.set_address(iface, address) {
        return command_failed(iface, "address", e);
    }
    if let Err(e) = controller.set_state(iface, LinkState::Up) {
        return command_failed(iface, "up", e);
    }

    let observed = match controller.current_address(iface) {
        Ok(observed) => observed,
        Err(e) => {
            warn!("could not query current address of {}: {}", iface, e);
            None
        }
    };

    match observed {
        Some(ref current) if address.same_hardware(current) => {
            info!("{} now reports {}", iface, current);
            ChangeResult::Applied(address.clone())
        }
        observed => {
            warn!("{} reports {:?} after setting {}", iface, observed, address);
            ChangeResult::Mismatch {
                expected: address.clone(),
                observed,
            }
        }
    }
}

fn command_failed(iface: &Interface, step: &str, e: MacError) -> ChangeResult {
    warn!("{} step failed on {}, not continuing", step, iface);
    match e {
        MacError::CommandFailure(detail) => ChangeResult::CommandFailed(detail),
        other => ChangeResult::CommandFailed(other.to_string()),
    }
}
