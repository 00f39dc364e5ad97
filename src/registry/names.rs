//! Metric names. Dashboards depend on these exact strings.

pub const BITSWAP_MESSAGES_RECEIVED: &str = "bitswap_messages_received_total";
pub const BITSWAP_RESPONSES: &str = "bitswap_response_total";
pub const BITSWAP_RETRIEVER_REQUESTS: &str = "bitswap_retriever_request_total";
pub const BLOCKSTORE_CACHE_HITS: &str = "blockstore_cache_hit_total";
pub const BYTES_TRANSFERRED: &str = "data_transferred_bytes_total";
pub const RETRIEVAL_DEAL_ACTIVE: &str = "retrieval_deal_active_total";
pub const RETRIEVAL_DEAL_COST: &str = "retrieval_deal_cost_fil";
pub const RETRIEVAL_DEAL_DURATION: &str = "retrieval_deal_duration_seconds";
pub const RETRIEVAL_DEAL_FAILURES: &str = "retrieval_deal_fail_total";
pub const RETRIEVAL_DEAL_SUCCESSES: &str = "retrieval_deal_success_total";
pub const RETRIEVAL_DEAL_SIZE: &str = "retrieval_deal_size_bytes";
pub const RETRIEVAL_DEALS: &str = "retrieval_deal_total";

pub const TAG_BITSWAP_TOPIC: &str = "bitswap_topic";
pub const TAG_ERROR: &str = "error";
pub const TAG_METHOD: &str = "method";
pub const TAG_STATUS: &str = "status";

/// Bucket boundaries (seconds) for deal durations.
pub const DEAL_DURATION_BOUNDS: [f64; 12] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 120.0, 240.0, 480.0, 540.0, 600.0,
];
