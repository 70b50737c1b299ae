//! FidoNet addresses
//!
//! A FidoNet address identifies a node or point in the network:
//!
//! ```text
//! zone:network/node[.point][@domain]
//! ```
//!
//! ## Examples
//!
//! ```
//! use fidopkt::Address;
//!
//! let addr: Address = "2:5020/1042.7@fidonet".parse().unwrap();
//! assert_eq!(addr.zone, 2);
//! assert_eq!(addr.network, 5020);
//! assert_eq!(addr.node, 1042);
//! assert_eq!(addr.point, 7);
//! assert_eq!(addr.domain, "fidonet");
//! assert_eq!(addr.to_string(), "2:5020/1042.7@fidonet");
//!
//! // A zero point is never written back
//! let addr = fidopkt::parse_address("1:2/3.0@").unwrap();
//! assert_eq!(addr.to_string(), "1:2/3");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{PktError, Result};

/// Maximum digits in the zone component
const ZONE_MAX_DIGITS: usize = 4;
/// Largest zone the four-digit grammar allows
const ZONE_MAX: u16 = 9999;
/// Maximum digits in the network, node and point components
const COMPONENT_MAX_DIGITS: usize = 5;

/// A FidoNet node or point address
///
/// `point == 0` addresses the node itself. An empty `domain` means none.
///
/// The fields are public, so values outside the text grammar can be built:
/// a zone above 9999 or a domain with anything but lowercase ASCII letters
/// composes to text that [`parse_address`] rejects. Use [`Address::checked`]
/// or [`Address::validate`] when the value must survive a text round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Zone number (e.g. 2 for Europe)
    pub zone: u16,
    /// Network number within the zone
    pub network: u16,
    /// Node number within the network
    pub node: u16,
    /// Point number behind the node, 0 for the node itself
    pub point: u16,
    /// Network domain (e.g. "fidonet"), empty if absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub domain: String,
}

impl Address {
    /// Create a node address with no point and no domain
    pub fn new(zone: u16, network: u16, node: u16) -> Self {
        Self {
            zone,
            network,
            node,
            point: 0,
            domain: String::new(),
        }
    }

    /// Create an address, rejecting values the text form cannot carry
    pub fn checked(
        zone: u16,
        network: u16,
        node: u16,
        point: u16,
        domain: impl Into<String>,
    ) -> Result<Self> {
        let addr = Self {
            zone,
            network,
            node,
            point,
            domain: domain.into(),
        };
        addr.validate()?;
        Ok(addr)
    }

    /// Check the address composes to text that parses back to it
    ///
    /// # Errors
    ///
    /// Returns [`PktError::AddressFormat`] for a zone above 9999 or a domain
    /// that is not lowercase ASCII letters.
    pub fn validate(&self) -> Result<()> {
        if self.zone > ZONE_MAX {
            return Err(PktError::AddressFormat(format!(
                "{}: zone above {}",
                self, ZONE_MAX
            )));
        }
        if !self.domain.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(PktError::AddressFormat(format!(
                "{}: domain must be lowercase letters",
                self
            )));
        }
        Ok(())
    }

    /// Set the point number
    #[must_use]
    pub fn with_point(mut self, point: u16) -> Self {
        self.point = point;
        self
    }

    /// Set the domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Whether this address names a point rather than a node
    pub fn is_point(&self) -> bool {
        self.point != 0
    }

    /// The boss node of this address (point cleared, domain kept)
    pub fn node_address(&self) -> Self {
        Self {
            point: 0,
            ..self.clone()
        }
    }

    /// Outbound subdirectory holding mail for the points of this node
    ///
    /// Lowercase hex network and node, four digits each, with a `.pnt`
    /// extension, e.g. `139c0412.pnt` for `2:5020/1042`.
    pub fn point_outbound_dir(&self) -> String {
        format!("{:04x}{:04x}.pnt", self.network, self.node)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.zone, self.network, self.node)?;
        if self.point != 0 {
            write!(f, ".{}", self.point)?;
        }
        if !self.domain.is_empty() {
            write!(f, "@{}", self.domain)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = PktError;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}

/// Parse an address string of the form `zone:network/node[.point][@domain]`
///
/// Zone has 1-4 digits, the other numbers 1-5 digits each and must fit in
/// 16 bits. The domain is lowercase ASCII letters only.
///
/// # Errors
///
/// Returns [`PktError::AddressFormat`] if the text does not match the grammar
/// or a number overflows 16 bits.
pub fn parse_address(text: &str) -> Result<Address> {
    let bad = || PktError::AddressFormat(text.to_string());

    let (numbers, domain) = match text.split_once('@') {
        Some((numbers, domain)) => (numbers, domain),
        None => (text, ""),
    };
    if !domain.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(bad());
    }

    let (zone, rest) = numbers.split_once(':').ok_or_else(bad)?;
    let (network, rest) = rest.split_once('/').ok_or_else(bad)?;
    let (node, point) = match rest.split_once('.') {
        Some((node, point)) => (node, Some(point)),
        None => (rest, None),
    };

    let zone = parse_component(zone, ZONE_MAX_DIGITS).ok_or_else(bad)?;
    let network = parse_component(network, COMPONENT_MAX_DIGITS).ok_or_else(bad)?;
    let node = parse_component(node, COMPONENT_MAX_DIGITS).ok_or_else(bad)?;
    let point = match point {
        Some(point) => parse_component(point, COMPONENT_MAX_DIGITS).ok_or_else(bad)?,
        None => 0,
    };

    Ok(Address {
        zone,
        network,
        node,
        point,
        domain: domain.to_string(),
    })
}

/// Compose an address back into its text form
///
/// Same as `addr.to_string()`.
pub fn compose_address(addr: &Address) -> String {
    addr.to_string()
}

/// Parse one numeric component: 1..=max_digits ASCII digits, fitting in u16
fn parse_component(s: &str, max_digits: usize) -> Option<u16> {
    if s.is_empty() || s.len() > max_digits || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
