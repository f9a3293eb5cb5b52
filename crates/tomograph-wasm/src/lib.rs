//! Tomograph WASM - WebAssembly bindings for Tomograph
//!
//! This crate provides WASM bindings to expose the tomograph-core scan
//! simulator to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `options` - Scan parameters (emitter step, detectors, filter)
//! - `types` - WASM-compatible wrapper types for grids
//! - `scan` - Scanning, cached results, animations and DICOM export payloads
//!
//! # Usage
//!
//! ```typescript
//! import init, { Scanner, ScanOptions } from '@tomograph/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = new Scanner().scan(bytes, new ScanOptions());
//! console.log(`${result.angle_steps} angles, MSE ${result.final_error}`);
//! ```

use wasm_bindgen::prelude::*;

mod options;
mod scan;
mod types;

// Re-export public types
pub use options::ScanOptions;
pub use scan::{scan_image, JsScanResult, Scanner, SCANNER_CACHE_ENTRIES};
pub use types::JsGrid;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default scan options as a plain object
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    ScanOptions::new().to_json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
