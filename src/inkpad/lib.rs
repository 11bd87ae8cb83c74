//! # Inkpad Architecture
//!
//! Inkpad is a **paged notebook engine**: every page carries freehand ink and
//! colored rich text, pages are persisted under one storage key, and the
//! notebook exports as per-page PNGs or a single A4 PDF.
//!
//! It is a library first. The bundled CLI is one client; a browser or GUI
//! host is another. Hosts plug in through capability traits and feed input
//! as [`input::InputEvent`]s.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, replays event logs    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Input Router (input.rs)               │
//! │  - Owns the Session and the export collaborators            │
//! │  - Routes key/pointer/layout events to commands             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Page lifecycle, strokes, typing, mode, export            │
//! │  - Operates on a &mut Session, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage (store/)             │ │  Surfaces (surface/)      │
//! │  - StorageBackend trait       │ │  - DrawingSurface trait   │
//! │  - FsBackend, MemBackend      │ │  - TextSurface trait      │
//! │  - PageStore                  │ │  - Canvas, RichText       │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests over a [`session::HeadlessSession`] backed by
//!    [`store::mem_backend::MemBackend`]. Most coverage lives here.
//! 2. **API**: dispatch of input events to the right command.
//! 3. **Integration** (`tests/`): full notebook sessions, on-disk storage and
//!    the `inkpad` binary.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade every client talks to
//! - [`input`]: input events, key routing, pointer normalization
//! - [`commands`]: notebook logic
//! - [`session`]: all mutable notebook state
//! - [`store`]: storage abstraction and the page collection
//! - [`surface`]: drawing and text surfaces
//! - [`export`]: rasterization, export sinks and the PDF writer
//! - [`codec`]: PNG data-URI encoding
//! - [`mode`]: typing/drawing mode
//! - [`model`]: page records, colors, points, the page counter
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod mode;
pub mod model;
pub mod session;
pub mod store;
pub mod surface;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
