//! Six-byte hardware addresses in `aa:bb:cc:dd:ee:ff` form

/// A MAC address, used for BSSIDs and P2P client lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MacAddr([u8; 6]);

/// Error when parsing a MAC address string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address: {0:?}")]
pub struct ParseMacAddrError(String);

impl MacAddr {
    /// The all-zero address, reported when no BSSID is configured
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl std::fmt::Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl std::str::FromStr for MacAddr {
    type Err = ParseMacAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');

        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2)
                .ok_or_else(|| ParseMacAddrError(s.to_string()))?;
            *octet =
                u8::from_str_radix(part, 16).map_err(|_| ParseMacAddrError(s.to_string()))?;
        }

        if parts.next().is_some() {
            return Err(ParseMacAddrError(s.to_string()));
        }

        Ok(Self(octets))
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl serde::Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MacAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let mac: MacAddr = "02:1A:ff:00:9c:01".parse().unwrap();
        assert_eq!(mac.octets(), [0x02, 0x1a, 0xff, 0x00, 0x9c, 0x01]);
        assert_eq!(mac.to_string(), "02:1a:ff:00:9c:01");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "02:1a:ff:00:9c", "02:1a:ff:00:9c:01:02", "2:1a:ff:00:9c:01", "zz:1a:ff:00:9c:01"] {
            assert!(bad.parse::<MacAddr>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_serde_uses_text_form() {
        let mac = MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        let json = serde_json::to_string(&mac).unwrap();
        assert_eq!(json, "\"de:ad:be:ef:00:01\"");
        assert!(serde_json::from_str::<MacAddr>("\"nope\"").is_err());
    }

    #[test]
    fn test_zero() {
        assert!(MacAddr::ZERO.is_zero());
        assert_eq!(MacAddr::default(), MacAddr::ZERO);
    }
}
