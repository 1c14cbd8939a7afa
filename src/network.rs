//! Koios deployment selection.
//!
//! Each [`Network`] variant maps to exactly one fixed public Koios endpoint.
//! The table is the single authoritative source for these URLs; it is pure
//! data and never changes at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A Koios deployment to issue requests against.
///
/// `Mainnet` is the production network; the remaining variants are the
/// public Cardano test networks Koios serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Cardano mainnet.
    Mainnet,
    /// Pre-production testnet (mirrors mainnet protocol parameters).
    Preprod,
    /// Preview testnet (runs upcoming protocol versions first).
    Preview,
    /// Guild operators network.
    Guild,
    /// SanchoNet governance testnet.
    Sancho,
}

impl Network {
    /// All defined networks, in declaration order.
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Preprod,
        Network::Preview,
        Network::Guild,
        Network::Sancho,
    ];

    /// The fixed base URL of this network's public Koios instance.
    pub fn base_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.koios.rest/api/v1",
            Network::Preprod => "https://preprod.koios.rest/api/v1",
            Network::Preview => "https://preview.koios.rest/api/v1",
            Network::Guild => "https://guild.koios.rest/api/v1",
            Network::Sancho => "https://sancho.koios.rest/api/v1",
        }
    }

    /// The canonical lowercase name of this network.
    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Preprod => "preprod",
            Network::Preview => "preview",
            Network::Guild => "guild",
            Network::Sancho => "sancho",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "preprod" => Ok(Network::Preprod),
            "preview" => Ok(Network::Preview),
            "guild" => Ok(Network::Guild),
            "sancho" | "sanchonet" => Ok(Network::Sancho),
            other => Err(Error::InvalidValue(format!("unknown network: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_network_has_a_base_url() {
        for network in Network::ALL {
            let url = network.base_url();
            assert!(url.starts_with("https://"), "{network}: {url}");
            assert!(url.ends_with("/api/v1"), "{network}: {url}");
        }
    }

    #[test]
    fn mainnet_points_at_production() {
        assert_eq!(Network::Mainnet.base_url(), "https://api.koios.rest/api/v1");
    }

    #[test]
    fn names_parse_back() {
        for network in Network::ALL {
            assert_eq!(network.name().parse::<Network>().unwrap(), network);
        }
        assert_eq!("sanchonet".parse::<Network>().unwrap(), Network::Sancho);
        assert!(matches!(
            "devnet".parse::<Network>(),
            Err(Error::InvalidValue(_))
        ));
    }
}
