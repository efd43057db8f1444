//! Strongly typed node identifier.
//!
//! Node IDs come from the raw street-network source (for OSM data these are
//! the OSM node IDs) and are kept verbatim.  They are opaque: nothing in the
//! engine assumes they are dense or start at zero.

use std::fmt;

/// Identifier of a road-network node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline(always)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    #[inline(always)]
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for u64 {
    #[inline(always)]
    fn from(id: NodeId) -> u64 {
        id.0
    }
}
