//! Content-addressed memo of scan results.
//!
//! A front end typically re-renders with unchanged inputs many times. The
//! cache maps the image content plus every result-affecting parameter to the
//! finished [`ScanResult`], so an identical request is served without
//! recomputation. The cache is an ordinary value owned by the caller;
//! invalidation and lifetime are explicit. A cache built with
//! [`ResultCache::with_max_entries`] evicts its oldest entry when full.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::config::ScanConfig;
use crate::grid::Grid;
use crate::metadata::MetaData;
use crate::pipeline::{run_scan, ScanError, ScanResult};

/// Key identifying one scan: source digest plus scan parameters.
///
/// The digest covers the pixels and the decoded metadata, which together
/// stand in for the uploaded file. Floating-point parameters are keyed by
/// their bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source_digest: [u8; 32],
    emitter_step_bits: u64,
    pub detector_count: usize,
    detector_span_bits: u64,
    pub apply_filter: bool,
    pub animate: bool,
    pub kernel_size: usize,
}

impl CacheKey {
    pub fn new(image: &Grid, metadata: &MetaData, config: &ScanConfig) -> Self {
        Self {
            source_digest: source_digest(image, metadata),
            emitter_step_bits: config.emitter_step.to_bits(),
            detector_count: config.detector_count,
            detector_span_bits: config.detector_span.to_bits(),
            apply_filter: config.apply_filter,
            animate: config.animate,
            kernel_size: config.kernel_size,
        }
    }

    pub fn emitter_step(&self) -> f64 {
        f64::from_bits(self.emitter_step_bits)
    }

    pub fn detector_span(&self) -> f64 {
        f64::from_bits(self.detector_span_bits)
    }
}

/// SHA-256 over the grid dimensions, the bit pattern of every sample, and
/// the decoded metadata values.
pub fn source_digest(image: &Grid, metadata: &MetaData) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((image.width as u64).to_le_bytes());
    hasher.update((image.height as u64).to_le_bytes());
    for value in &image.data {
        hasher.update(value.to_bits().to_le_bytes());
    }
    for entry in metadata.entries() {
        // Length prefix keeps adjacent fields from running together
        hasher.update((entry.decoded().len() as u64).to_le_bytes());
        hasher.update(entry.decoded().as_bytes());
    }
    hasher.finalize().into()
}

/// Memo of finished scans keyed by [`CacheKey`].
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, Arc<ScanResult>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<CacheKey>,
    max_entries: Option<usize>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `max_entries` results (at least one).
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries.max(1)),
            ..Self::default()
        }
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Return the cached result for this request, running the scan on a miss.
    ///
    /// Failed scans are returned to the caller and not stored.
    pub fn get_or_compute(
        &mut self,
        image: &Grid,
        metadata: &MetaData,
        config: &ScanConfig,
    ) -> Result<Arc<ScanResult>, ScanError> {
        let key = CacheKey::new(image, metadata, config);
        if let Some(result) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!("Scan cache hit ({} entries)", self.entries.len());
            return Ok(Arc::clone(result));
        }

        self.misses += 1;
        let result = Arc::new(run_scan(image.clone(), metadata.clone(), config)?);
        if let Some(max) = self.max_entries {
            while self.entries.len() >= max {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
                tracing::debug!("Evicted oldest scan result");
            }
        }
        self.entries.insert(key, Arc::clone(&result));
        self.order.push_back(key);
        tracing::debug!("Scan cache miss, stored ({} entries)", self.entries.len());
        Ok(result)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ScanResult>> {
        self.entries.get(key).cloned()
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.order.retain(|k| k != key);
        self.entries.remove(key).is_some()
    }

    /// Drop every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requests served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Requests that ran a scan.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
