//! Metric vocabulary: measures, tag keys and views.
//!
//! Declarations go through a [`RegistryBuilder`] during startup. `build()`
//! freezes the vocabulary into a [`MetricRegistry`] that is shared read-only
//! for the rest of the process lifetime.

mod measure;
pub mod names;
mod view;

pub use measure::{Measure, MeasureKind, TagKey, Unit};
pub use view::{Aggregation, View, ViewDescriptor};

use crate::error::RegistryError;

/// Mutable, startup-only declaration surface.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    measures: Vec<Measure>,
    tag_keys: Vec<TagKey>,
    views: Vec<View>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a measure. Names are unique.
    pub fn declare_measure(
        &mut self,
        name: &str,
        description: &str,
        unit: Unit,
        kind: MeasureKind,
    ) -> Result<Measure, RegistryError> {
        if self.measures.iter().any(|m| m.name() == name) {
            return Err(RegistryError::DuplicateMeasure(name.to_string()));
        }
        let measure = Measure::new(name, description, unit, kind);
        self.measures.push(measure.clone());
        Ok(measure)
    }

    /// Declare a tag key. Names are unique.
    pub fn declare_tag_key(&mut self, name: &str) -> Result<TagKey, RegistryError> {
        if self.tag_keys.iter().any(|k| k.name() == name) {
            return Err(RegistryError::DuplicateTagKey(name.to_string()));
        }
        let key = TagKey::new(name);
        self.tag_keys.push(key.clone());
        Ok(key)
    }

    /// Declare a view over a measure declared by this builder.
    pub fn declare_view(
        &mut self,
        measure: &Measure,
        aggregation: Aggregation,
        tag_keys: &[TagKey],
    ) -> Result<View, RegistryError> {
        if !self.measures.iter().any(|m| m.same_handle(measure)) {
            return Err(RegistryError::UnknownMeasure(measure.name().to_string()));
        }
        for key in tag_keys {
            if !self.tag_keys.iter().any(|k| k.same_handle(key)) {
                return Err(RegistryError::UnknownTagKey(key.name().to_string()));
            }
        }
        if !aggregation.bounds().windows(2).all(|w| w[0] < w[1]) {
            return Err(RegistryError::InvalidBounds(measure.name().to_string()));
        }

        let view = View::new(measure.clone(), aggregation, tag_keys.to_vec());
        self.views.push(view.clone());
        Ok(view)
    }

    pub fn build(self) -> MetricRegistry {
        MetricRegistry {
            measures: self.measures,
            tag_keys: self.tag_keys,
            views: self.views,
        }
    }
}

/// Frozen metric vocabulary.
#[derive(Debug)]
pub struct MetricRegistry {
    measures: Vec<Measure>,
    tag_keys: Vec<TagKey>,
    views: Vec<View>,
}

impl MetricRegistry {
    /// Build the retrieval client's standard vocabulary.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut b = RegistryBuilder::new();

        let messages_received = b.declare_measure(
            names::BITSWAP_MESSAGES_RECEIVED,
            "The total number of bitswap messages received",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let responses = b.declare_measure(
            names::BITSWAP_RESPONSES,
            "The total number of bitswap responses",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let retriever_requests = b.declare_measure(
            names::BITSWAP_RETRIEVER_REQUESTS,
            "The total number of bitswap messages that required a retriever lookup",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let cache_hits = b.declare_measure(
            names::BLOCKSTORE_CACHE_HITS,
            "The number of blocks from the local blockstore served to peers",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let bytes_transferred = b.declare_measure(
            names::BYTES_TRANSFERRED,
            "The number of bytes transferred from storage providers to retrieval clients",
            Unit::Bytes,
            MeasureKind::Int64,
        )?;
        let deal_cost = b.declare_measure(
            names::RETRIEVAL_DEAL_COST,
            "The cost in FIL of a retrieval deal with a storage provider",
            Unit::Dimensionless,
            MeasureKind::Float64,
        )?;
        let deals = b.declare_measure(
            names::RETRIEVAL_DEALS,
            "The number of retrieval deals initiated with storage providers",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let deals_active = b.declare_measure(
            names::RETRIEVAL_DEAL_ACTIVE,
            "The total number of active retrieval deals that have not yet succeeded or failed",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let deal_duration = b.declare_measure(
            names::RETRIEVAL_DEAL_DURATION,
            "The duration in seconds of a retrieval deal with a storage provider",
            Unit::Seconds,
            MeasureKind::Float64,
        )?;
        let deal_failures = b.declare_measure(
            names::RETRIEVAL_DEAL_FAILURES,
            "The number of failed retrieval deals with storage providers",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;
        let deal_size = b.declare_measure(
            names::RETRIEVAL_DEAL_SIZE,
            "The size in bytes of a retrieval deal with a storage provider",
            Unit::Bytes,
            MeasureKind::Int64,
        )?;
        let deal_successes = b.declare_measure(
            names::RETRIEVAL_DEAL_SUCCESSES,
            "The number of successful retrieval deals with storage providers",
            Unit::Dimensionless,
            MeasureKind::Int64,
        )?;

        let topic = b.declare_tag_key(names::TAG_BITSWAP_TOPIC)?;
        b.declare_tag_key(names::TAG_ERROR)?;
        b.declare_tag_key(names::TAG_METHOD)?;
        b.declare_tag_key(names::TAG_STATUS)?;

        // Export order.
        b.declare_view(&messages_received, Aggregation::Count, &[])?;
        b.declare_view(&responses, Aggregation::Count, &[topic])?;
        b.declare_view(&retriever_requests, Aggregation::Count, &[])?;
        b.declare_view(&cache_hits, Aggregation::Count, &[])?;
        b.declare_view(&bytes_transferred, Aggregation::Sum, &[])?;
        b.declare_view(&deals_active, Aggregation::Count, &[])?;
        b.declare_view(&deal_cost, Aggregation::distribution(&[]), &[])?;
        b.declare_view(
            &deal_duration,
            Aggregation::distribution(&names::DEAL_DURATION_BOUNDS),
            &[],
        )?;
        b.declare_view(&deal_failures, Aggregation::Count, &[])?;
        b.declare_view(&deal_successes, Aggregation::Count, &[])?;
        b.declare_view(&deal_size, Aggregation::distribution(&[]), &[])?;
        b.declare_view(&deals, Aggregation::Count, &[])?;

        Ok(b.build())
    }

    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name() == name)
    }

    pub fn tag_key(&self, name: &str) -> Option<&TagKey> {
        self.tag_keys.iter().find(|k| k.name() == name)
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn tag_keys(&self) -> &[TagKey] {
        &self.tag_keys
    }

    /// All declared views, in declaration order.
    pub fn all_views(&self) -> &[View] {
        &self.views
    }

    pub fn descriptors(&self) -> Vec<ViewDescriptor> {
        self.views.iter().map(View::descriptor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_measure_rejected() {
        let mut b = RegistryBuilder::new();
        b.declare_measure("m", "first", Unit::Dimensionless, MeasureKind::Int64)
            .unwrap();
        let err = b
            .declare_measure("m", "second", Unit::Bytes, MeasureKind::Float64)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateMeasure("m".to_string()));
    }

    #[test]
    fn test_duplicate_tag_key_rejected() {
        let mut b = RegistryBuilder::new();
        b.declare_tag_key("status").unwrap();
        assert_eq!(
            b.declare_tag_key("status").unwrap_err(),
            RegistryError::DuplicateTagKey("status".to_string())
        );
    }

    #[test]
    fn test_view_requires_own_handles() {
        let mut other = RegistryBuilder::new();
        let foreign = other
            .declare_measure("m", "d", Unit::Dimensionless, MeasureKind::Int64)
            .unwrap();
        let foreign_key = other.declare_tag_key("k").unwrap();

        let mut b = RegistryBuilder::new();
        let own = b
            .declare_measure("m", "d", Unit::Dimensionless, MeasureKind::Int64)
            .unwrap();
        assert_eq!(
            b.declare_view(&foreign, Aggregation::Count, &[]).unwrap_err(),
            RegistryError::UnknownMeasure("m".to_string())
        );
        assert_eq!(
            b.declare_view(&own, Aggregation::Count, &[foreign_key]).unwrap_err(),
            RegistryError::UnknownTagKey("k".to_string())
        );
    }

    #[test]
    fn test_unordered_bounds_rejected() {
        let mut b = RegistryBuilder::new();
        let m = b
            .declare_measure("d", "d", Unit::Seconds, MeasureKind::Float64)
            .unwrap();
        let err = b
            .declare_view(&m, Aggregation::distribution(&[10.0, 5.0]), &[])
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidBounds("d".to_string()));
    }

    #[test]
    fn test_standard_lookup() {
        let registry = MetricRegistry::standard().unwrap();
        assert_eq!(registry.measures().len(), 12);
        assert_eq!(registry.tag_keys().len(), 4);
        let duration = registry.measure(names::RETRIEVAL_DEAL_DURATION).unwrap();
        assert_eq!(duration.unit(), Unit::Seconds);
        assert_eq!(duration.kind(), MeasureKind::Float64);
        assert!(registry.tag_key(names::TAG_ERROR).is_some());
        assert!(registry.measure("nope").is_none());
    }
}
