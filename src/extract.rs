//! Address extraction, deduplication, and ordering.
//!
//! Extraction is deliberately syntactic: anything shaped like four 1-3 digit
//! groups is a candidate, mirroring what the source pages actually publish.
//! Numerically-invalid quads (an octet above 255) survive by default and are
//! only rejected when octet validation is explicitly enabled.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use cidr::{Cidr, Ipv4Cidr};
use log::{debug, warn};
use regex::Regex;

use crate::config::{CIDR_PATTERN, IP_PATTERN};

static IP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IP_PATTERN).expect("IP pattern compiles"));

static CIDR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CIDR_PATTERN).expect("CIDR pattern compiles"));

/// Extracts every IPv4-shaped token from page text into `out`.
///
/// Deduplication across pages falls out of the shared set; two sources
/// listing the same address contribute one entry.
pub fn extract_addresses(text: &str, out: &mut HashSet<String>) {
    for m in IP_RE.find_iter(text) {
        out.insert(m.as_str().to_string());
    }
}

/// Parses a dotted-quad string into its four numeric groups.
///
/// Groups are `u32` so syntactic matches like `999.999.999.999` still get a
/// well-defined sort position. Returns `None` for anything that is not four
/// dot-separated numbers.
pub fn octets(address: &str) -> Option<[u32; 4]> {
    let mut parts = address.split('.');
    let mut groups = [0u32; 4];
    for slot in &mut groups {
        *slot = parts.next()?.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(groups)
}

/// Whether every group of a dotted quad is within the 0-255 octet range.
pub fn is_valid_quad(address: &str) -> bool {
    octets(address).is_some_and(|groups| groups.iter().all(|g| *g <= 255))
}

/// Orders a deduplicated address set by ascending numeric tuple comparison
/// of the four groups (not lexicographic string comparison, which would put
/// `10.0.0.0` before `2.0.0.0`).
pub fn sort_addresses(addresses: HashSet<String>) -> Vec<String> {
    let mut sorted: Vec<String> = addresses.into_iter().collect();
    sorted.sort_by_key(|ip| octets(ip).unwrap_or([u32::MAX; 4]));
    sorted
}

/// Expands every CIDR block found in list text into member addresses.
///
/// Blocks wider than `max_expand_prefix` are skipped with a warning rather
/// than flooding the run with millions of addresses; unparseable entries are
/// skipped silently at debug level.
pub fn expand_cidrs(text: &str, max_expand_prefix: u8, out: &mut HashSet<String>) {
    for m in CIDR_RE.find_iter(text) {
        let entry = m.as_str();
        let block: Ipv4Cidr = match entry.parse() {
            Ok(block) => block,
            Err(err) => {
                debug!("Skipping unparseable CIDR entry {entry}: {err}");
                continue;
            }
        };
        if block.network_length() < max_expand_prefix {
            warn!(
                "Skipping {entry}: wider than the /{max_expand_prefix} expansion cap"
            );
            continue;
        }
        let first = u32::from(block.first_address());
        let last = u32::from(block.last_address());
        for value in first..=last {
            out.insert(Ipv4Addr::from(value).to_string());
        }
    }
}
