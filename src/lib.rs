//! GitHub Reverse Proxy Gateway
//!
//! A streaming reverse proxy for GitHub resource URLs built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  GITHUB PROXY                    │
//!                      │                                                  │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│ classify │──▶│   denylist   │  │
//!                      │  │ server  │   │ patterns │   │     gate     │  │
//!                      │  └─────────┘   └──────────┘   └──────┬───────┘  │
//!                      │                                      │          │
//!                      │                                      ▼          │
//!   Client Response    │  ┌─────────┐   ┌──────────┐   ┌──────────────┐  │      GitHub
//!   ◀──────────────────┼──│ stream  │◀──│  proxy   │◀──│   rewrite    │◀─┼────  upstream
//!                      │  │  relay  │   │forwarder │   │ blob -> raw  │  │
//!                      │  └─────────┘   └──────────┘   └──────────────┘  │
//!                      │                                                  │
//!                      │  ┌────────────────────────────────────────────┐ │
//!                      │  │           Cross-Cutting Concerns           │ │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌───────────┐  │ │
//!                      │  │  │ config │ │observability│ │ lifecycle │  │ │
//!                      │  │  └────────┘ └─────────────┘ └───────────┘  │ │
//!                      │  └────────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────────┘
//! ```
//!
//! Request flow: the inbound path is normalized into an `https://` URL,
//! classified against an ordered list of GitHub URL families, checked against
//! the owner denylist, rewritten (`/blob/` views to `/raw/` content), and
//! forwarded through a shared connection-pooled client. Responses stream back
//! chunk by chunk; payloads declaring more than 1 GiB are answered with a 307
//! redirect to the resolved upstream URL instead.

// Core subsystems
pub mod classify;
pub mod config;
pub mod denylist;
pub mod http;
pub mod proxy;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use denylist::Denylist;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::Forwarder;
