//! # NoteMaster Architecture
//!
//! NoteMaster keeps study notes, asks a hosted language model to turn a note
//! into open questions, grades free-text answers on a 0–5 scale and keeps a
//! per-note score history. It is a library with a CLI client, not the other
//! way round.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The study workflow, returns CmdResult                    │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                          │
//!                  ▼                          ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  generator.rs / evaluator.rs  │ │  llm/                     │
//! │  prompts and reply recovery   │ │  CompletionClient trait   │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait over notes/questions/stats blobs    │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout or stderr and nothing calls
//! `std::process::exit`. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## On-disk layout
//!
//! ```text
//! <root>/
//!   notes/<title>.txt
//!   questions/<title>.json
//!   stats/<title>_stats.json
//!   config.json            optional model/endpoint settings
//!   .env                   DEEPSEEK_KEY="..."
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod llm;
pub mod model;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
