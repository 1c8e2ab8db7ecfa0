//! Opaque connection identity supplied by the transport edge.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Stable opaque identifier for an active client link.
///
/// Allocated monotonically by the transport edge when a socket is accepted.
/// The core only stores and compares identifiers; it never creates or
/// destroys connections itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
pub struct ConnId(u64);
