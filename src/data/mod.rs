//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  Description_*.csv            chat CSVs
//!        │                          │
//!        ▼                          ▼
//!   ┌──────────┐   one per row ┌──────────┐
//!   │  loader   │ ────────────▶ │ ChatSession │  Vec<Record> + labels
//!   └──────────┘               └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ ChatDataset │  Vec<ChatSession>
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  match label pairs → matching sessions
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
