// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Peer seeds
//!
//! DNS seeds are resolved by the P2P layer. Fixed seeds are handed out
//! with a random last-seen time between one and two weeks ago, so a node
//! only leans on them until gossip brings fresher addresses.
//!

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

/// Pre-resolved main network peers. These are the addresses behind the
/// main DNS seeds on the default port; no generated seed list ships yet.
pub const MAIN_FIXED_SEEDS: &[([u8; 4], u16)] = &[
    ([95, 213, 200, 76], 43210),
    ([37, 228, 119, 205], 43210),
];

/// A DNS seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DnsSeed {
    /// Operator of the seed
    pub name: String,
    /// Host name to resolve
    pub host: String,
}

impl DnsSeed {
    /// Creates a seed record.
    pub fn new(name: &str, host: &str) -> DnsSeed {
        DnsSeed {
            name: name.to_owned(),
            host: host.to_owned(),
        }
    }
}

/// A fixed seed peer with its advertised last-seen time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedAddress {
    /// Peer address
    pub addr: SocketAddr,
    /// Unix time the peer is advertised as last seen
    pub last_seen: u64,
}

/// Stamps each of `specs` with a last-seen time one to two weeks before now.
pub fn fixed_seeds(specs: &[([u8; 4], u16)]) -> Vec<SeedAddress> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut rng = rand::thread_rng();
    specs
        .iter()
        .map(|&(ip, port)| SeedAddress {
            addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(ip), port)),
            last_seen: now.saturating_sub(rng.gen_range(0..ONE_WEEK)).saturating_sub(ONE_WEEK),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_seen_within_two_weeks() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let seeds = fixed_seeds(MAIN_FIXED_SEEDS);
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].addr.to_string(), "95.213.200.76:43210");
        assert_eq!(seeds[1].addr.to_string(), "37.228.119.205:43210");
        for seed in &seeds {
            assert!(seed.last_seen <= after - ONE_WEEK);
            assert!(seed.last_seen > before - 2 * ONE_WEEK);
        }
    }

    #[test]
    fn no_specs_no_seeds() {
        assert!(fixed_seeds(&[]).is_empty());
        assert_eq!(DnsSeed::new("basexcoin.io", "dnsseed1.basexcoin.io").host, "dnsseed1.basexcoin.io");
    }
}
