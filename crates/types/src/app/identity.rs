// Path: crates/types/src/app/identity.rs

//! Defines the canonical `AccountId` used for every caller, custodian and
//! collaborator reference, and the closed set of ledger roles.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A unique, stable identifier for a ledger principal.
///
/// Callers, custodians, the proof oracle and the registry references are all
/// principals. The all-zero value is the reserved placeholder (the "null"
/// principal) and is never a valid custodian or oracle.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
#[serde(transparent)]
pub struct AccountId(#[serde(with = "crate::app::hex32")] pub [u8; 32]);

impl AccountId {
    /// The reserved placeholder principal.
    pub const PLACEHOLDER: AccountId = AccountId([0u8; 32]);

    /// Returns true if this is the reserved placeholder principal.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::PLACEHOLDER
    }

    /// A short hex prefix suitable for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::app::hex32::parse(s).map(Self)
    }
}

/// The role a principal holds in the supply chain, as reported by the user registry.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Deposits new material batches.
    Consumer,
    /// Carries batches between custodians.
    Collector,
    /// Finalizes batches as processed or rejected.
    Processor,
}

impl Role {
    /// The canonical lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Collector => "collector",
            Role::Processor => "processor",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
