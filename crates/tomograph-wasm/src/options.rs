//! Scan options exposed to JavaScript.

use wasm_bindgen::prelude::*;

/// Scan parameters with JavaScript-friendly accessors.
///
/// Values are checked when a scan runs, not when they are set.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct ScanOptions {
    inner: tomograph_core::ScanConfig,
}

#[wasm_bindgen]
impl ScanOptions {
    /// Create options with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> ScanOptions {
        ScanOptions {
            inner: tomograph_core::ScanConfig::default(),
        }
    }

    /// Get emitter step (degrees)
    #[wasm_bindgen(getter)]
    pub fn emitter_step(&self) -> f64 {
        self.inner.emitter_step
    }

    /// Set emitter step (degrees)
    #[wasm_bindgen(setter)]
    pub fn set_emitter_step(&mut self, value: f64) {
        self.inner.emitter_step = value;
    }

    /// Get detector count
    #[wasm_bindgen(getter)]
    pub fn detector_count(&self) -> usize {
        self.inner.detector_count
    }

    /// Set detector count
    #[wasm_bindgen(setter)]
    pub fn set_detector_count(&mut self, value: usize) {
        self.inner.detector_count = value;
    }

    /// Get detector span (degrees)
    #[wasm_bindgen(getter)]
    pub fn detector_span(&self) -> f64 {
        self.inner.detector_span
    }

    /// Set detector span (degrees)
    #[wasm_bindgen(setter)]
    pub fn set_detector_span(&mut self, value: f64) {
        self.inner.detector_span = value;
    }

    /// Get whether the ramp filter is applied
    #[wasm_bindgen(getter)]
    pub fn apply_filter(&self) -> bool {
        self.inner.apply_filter
    }

    /// Set whether the ramp filter is applied
    #[wasm_bindgen(setter)]
    pub fn set_apply_filter(&mut self, value: bool) {
        self.inner.apply_filter = value;
    }

    /// Get whether a snapshot is kept per angle
    #[wasm_bindgen(getter)]
    pub fn animate(&self) -> bool {
        self.inner.animate
    }

    /// Set whether a snapshot is kept per angle
    #[wasm_bindgen(setter)]
    pub fn set_animate(&mut self, value: bool) {
        self.inner.animate = value;
    }

    /// Get ramp kernel width
    #[wasm_bindgen(getter)]
    pub fn kernel_size(&self) -> usize {
        self.inner.kernel_size
    }

    /// Set ramp kernel width
    #[wasm_bindgen(setter)]
    pub fn set_kernel_size(&mut self, value: usize) {
        self.inner.kernel_size = value;
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON. Missing keys take their defaults.
    pub fn from_json(value: JsValue) -> Result<ScanOptions, JsValue> {
        let inner: tomograph_core::ScanConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOptions {
    pub(crate) fn inner(&self) -> &tomograph_core::ScanConfig {
        &self.inner
    }
}
