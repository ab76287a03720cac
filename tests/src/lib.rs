//! # Docflow Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem scenarios on a wired container
//!     ├── harness.rs    # Container on a fixed clock and in-memory store
//!     ├── invoicing.rs  # Finalize, storno, status proposals
//!     ├── numbering.rs  # Sequences, rollover, fallback numbers
//!     ├── versions.rs   # Delivery-note versions
//!     └── drafts.rs     # Autosave against final records
//! tests/benches/        # criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p df-tests
//! cargo test -p df-tests integration::invoicing
//! cargo bench -p df-tests
//! ```

pub mod integration;
