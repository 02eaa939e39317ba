/// Data layer: core types, loading, and windowing.
///
/// Architecture:
/// ```text
///   signal .csv         peaks .json
///        │                   │
///        ▼                   ▼
///   ┌──────────────────────────┐
///   │          loader          │  parse files → SignalTable, PeakSet
///   └──────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  truncate lead, keep peaks < N, gather amplitudes
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ EcgWindow │  what the plot draws
///   └───────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
