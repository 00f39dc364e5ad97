//! Event inputs. Built by the caller right before a recorder call.

use std::time::Duration;

use crate::types::{Cid, PeerId, ReportedError, TokenAmount, WalletAddress};

/// Outcome of default wallet selection.
#[derive(Debug, Clone, Default)]
pub struct WalletInfo {
    pub address: Option<WalletAddress>,
    /// When set, `address` is never logged.
    pub error: Option<ReportedError>,
}

impl WalletInfo {
    pub fn loaded(address: impl Into<WalletAddress>) -> Self {
        Self {
            address: Some(address.into()),
            error: None,
        }
    }

    pub fn unavailable(error: ReportedError) -> Self {
        Self {
            address: None,
            error: Some(error),
        }
    }
}

/// A logical retrieval request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub request_cid: Cid,
}

impl RequestInfo {
    pub fn new(request_cid: impl Into<Cid>) -> Self {
        Self {
            request_cid: request_cid.into(),
        }
    }
}

/// A storage provider considered for a request.
///
/// `root_cid` differs from `request_cid` when the request targets a sub-path
/// of a larger DAG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInfo {
    pub request_cid: Cid,
    pub root_cid: Cid,
    pub peer_id: PeerId,
}

impl CandidateInfo {
    pub fn new(
        request_cid: impl Into<Cid>,
        root_cid: impl Into<Cid>,
        peer_id: impl Into<PeerId>,
    ) -> Self {
        Self {
            request_cid: request_cid.into(),
            root_cid: root_cid.into(),
            peer_id: peer_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetCandidatesResult {
    pub count: usize,
    pub error: Option<ReportedError>,
}

impl GetCandidatesResult {
    pub fn found(count: usize) -> Self {
        Self { count, error: None }
    }

    pub fn failed(error: ReportedError) -> Self {
        Self {
            count: 0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub error: Option<ReportedError>,
}

impl QueryResult {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn failed(error: ReportedError) -> Self {
        Self { error: Some(error) }
    }
}

/// Outcome of a full retrieval attempt. Only `error` is meaningful on failure.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    pub error: Option<ReportedError>,
    pub duration: Duration,
    pub bytes_received: u64,
    pub total_payment: TokenAmount,
}

impl RetrievalResult {
    pub fn succeeded(duration: Duration, bytes_received: u64, total_payment: TokenAmount) -> Self {
        Self {
            error: None,
            duration,
            bytes_received,
            total_payment,
        }
    }

    pub fn failed(error: ReportedError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}
