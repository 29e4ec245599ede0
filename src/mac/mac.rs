use std::fmt;

use lazy_static::lazy_static;
use macaddr::MacAddr6;
use regex::Regex;

use crate::error::{MacError, MacResult};

lazy_static! {
    // XX:XX:XX:XX:XX:XX or XXXX.XXXX.XXXX
    static ref MAC_RE: Regex = Regex::new(
        r"^(?:(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}|(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4})$"
    )
    .unwrap();
}

pub fn is_valid_mac(candidate: &str) -> bool {
    MAC_RE.is_match(candidate)
}

/// A hardware address that passed `is_valid_mac`. The text is kept exactly
/// as it was given, casing included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddress {
    text: String,
    addr: MacAddr6,
}

impl MacAddress {
    pub fn parse(candidate: &str) -> MacResult<Self> {
        if !is_valid_mac(candidate) {
            return Err(MacError::Validation(candidate.to_string()));
        }
        let addr = candidate
            .parse::<MacAddr6>()
            .map_err(|_| MacError::Validation(candidate.to_string()))?;
        Ok(Self {
            text: candidate.to_string(),
            addr,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_mac_addr6(&self) -> MacAddr6 {
        self.addr
    }

    /// Colon-separated form handed to iproute2, which does not understand
    /// the dotted grouping.
    pub fn link_layer_text(&self) -> String {
        if self.text.contains(':') {
            return self.text.clone();
        }
        let digits = self.text.replace('.', "");
        digits
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// True when `observed` names the same hardware address, regardless of
    /// casing or of which grouping either side uses.
    pub fn same_hardware(&self, observed: &str) -> bool {
        match MacAddress::parse(observed) {
            Ok(observed) => observed.addr == self.addr,
            Err(_) => false,
        }
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_mac() {
        assert!(is_valid_mac("AA:BB:CC:DD:EE:FF"));
        assert!(is_valid_mac("aa:bb:cc:dd:ee:ff"));
        assert!(is_valid_mac("aabb.ccdd.eeff"));
        assert!(is_valid_mac("AaBb.0123.9fE0"));
        assert!(is_valid_mac("00:0e:F6:e0:35:60"));
    }

    #[test]
    fn test_is_valid_mac_rejects() {
        let bad = [
            "",
            "AA:BB:CC:DD:EE",
            "GG:BB:CC:DD:EE:FF",
            "AABBCCDDEEFF",
            "AA-BB-CC-DD-EE-FF",
            "AA:BB:CC:DD:EE:FF:00",
            "AA:BB:CC:DD:EE:F",
            "AA:BB:CC:DD:EE:FFF",
            "AA:BB.CC:DD:EE:FF",
            "aabb:ccdd:eeff",
            "aab.bccd.deeff",
            "aabb.ccdd.eeff.0011",
            "aabb.ccdd",
            " AA:BB:CC:DD:EE:FF",
            "AA:BB:CC:DD:EE:FF\n",
            "xAA:BB:CC:DD:EE:FF",
            "AA:BB:CC:DD:EE:FFx",
            "aabb.ccdd.eefg",
        ];
        for mac in bad {
            assert!(!is_valid_mac(mac), "{:?} should be rejected", mac);
        }
    }

    #[test]
    fn test_parse_keeps_casing() {
        let mac = MacAddress::parse("aA:Bb:cC:01:23:45").unwrap();
        assert_eq!(mac.as_str(), "aA:Bb:cC:01:23:45");
        assert_eq!(mac.to_string(), "aA:Bb:cC:01:23:45");
    }

    #[test]
    fn test_parse_invalid() {
        let err = MacAddress::parse("AA:BB:CC:DD:EE").unwrap_err();
        assert!(matches!(err, MacError::Validation(ref s) if s == "AA:BB:CC:DD:EE"));
    }

    #[test]
    fn test_to_mac_addr6() {
        let colon = MacAddress::parse("00:0E:f6:E0:35:60").unwrap();
        let dot = MacAddress::parse("000e.F6e0.3560").unwrap();
        assert_eq!(
            colon.to_mac_addr6(),
            MacAddr6::new(0x00, 0x0e, 0xf6, 0xe0, 0x35, 0x60)
        );
        assert_eq!(colon.to_mac_addr6(), dot.to_mac_addr6());

        let mixed = MacAddress::parse("aAbB.ccdd.eeff").unwrap();
        assert_eq!(
            mixed.to_mac_addr6().as_bytes(),
            &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
        );
        assert_eq!(mixed.as_str(), "aAbB.ccdd.eeff");
    }

    #[test]
    fn test_link_layer_text() {
        let colon = MacAddress::parse("AA:bb:CC:dd:EE:ff").unwrap();
        assert_eq!(colon.link_layer_text(), "AA:bb:CC:dd:EE:ff");
        let dot = MacAddress::parse("AAbb.CCdd.EEff").unwrap();
        assert_eq!(dot.link_layer_text(), "AA:bb:CC:dd:EE:ff");
    }

    #[test]
    fn test_same_hardware() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
        assert!(mac.same_hardware("aa:bb:cc:dd:ee:ff"));
        assert!(!mac.same_hardware("aa:bb:cc:dd:ee:00"));
        assert!(!mac.same_hardware(":::::::::::::::::"));

        let dot = MacAddress::parse("aabb.ccdd.eeff").unwrap();
        assert!(dot.same_hardware("AA:BB:CC:DD:EE:FF"));
    }
}
