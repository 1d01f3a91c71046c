//!
//! Decode the raw transactions carried by a block.
//!

use std::fmt;

use alloy_consensus::{TxEnvelope, TxType};
use alloy_eips::eip2718::Decodable2718;

use crate::errors::StreamError;

/// Envelope of a raw transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// RLP list, pre EIP-2718.
    Legacy,
    /// EIP-2718 typed envelope with its type byte.
    Typed(u8),
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Typed(ty) => write!(f, "type-{ty}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    /// `0x` prefixed transaction hash.
    pub hash: String,
    pub kind: TxKind,
    pub size: usize,
}

impl TransactionSummary {
    fn from_raw(index: usize, raw: &[u8]) -> Result<Self, StreamError> {
        let envelope = decode_envelope(raw).map_err(|reason| StreamError::Transaction { index, reason })?;

        let kind = match envelope.tx_type() {
            TxType::Legacy => TxKind::Legacy,
            ty => TxKind::Typed(ty as u8),
        };

        Ok(Self {
            hash: envelope.tx_hash().to_string(),
            kind,
            size: raw.len(),
        })
    }
}

fn decode_envelope(raw: &[u8]) -> Result<TxEnvelope, String> {
    let mut buf = raw;
    let envelope = TxEnvelope::decode_2718(&mut buf).map_err(|err| err.to_string())?;
    if !buf.is_empty() {
        return Err(format!("{} trailing bytes after transaction", buf.len()));
    }
    Ok(envelope)
}

///
/// Decode every transaction of a block, failing on the first one that is not a
/// valid signed transaction envelope.
///
pub fn summarize<T: AsRef<[u8]>>(transactions: &[T]) -> Result<Vec<TransactionSummary>, StreamError> {
    transactions
        .iter()
        .enumerate()
        .map(|(index, raw)| TransactionSummary::from_raw(index, raw.as_ref()))
        .collect()
}
