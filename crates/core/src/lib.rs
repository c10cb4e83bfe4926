//! Core library for zink
//!
//! This crate implements the **Functional Core** of the zink application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`zink_core`** (this crate): Pure transformation functions with zero I/O
//! - **`zink`**: Terminal I/O, platform capabilities and orchestration (the Imperative Shell)
//!
//! Everything here is deterministic: the same phone and message always produce
//! the same link, and platform access only happens through the capability
//! traits in [`bridge`], which the shell implements.
//!
//! # Module Organization
//!
//! - [`phone`]: Digit stripping and the `(DD) DDDDD-DDDD` display mask
//! - [`link`]: `wa.me` deep link construction and validation
//! - [`qr`]: QR code rendering and the third-party QR image URL
//! - [`bridge`]: Clipboard and share outcomes over injected capabilities
//! - [`notice`]: User-facing notifications for every outcome
//! - [`state`]: Immutable form snapshot and its reducer
//!
//! # Example Usage
//!
//! ```rust
//! use zink_core::link::build_link;
//! use zink_core::phone::format_phone;
//!
//! assert_eq!(format_phone("11999998888"), "(11) 99999-8888");
//!
//! let link = build_link("(11) 99999-8888", "Olá!").unwrap();
//! assert_eq!(link.as_str(), "https://wa.me/5511999998888?text=Ol%C3%A1!");
//! ```

pub mod bridge;
pub mod link;
pub mod notice;
pub mod phone;
pub mod qr;
pub mod state;
