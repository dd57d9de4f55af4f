//! JSON-RPC 2.0 bridge between the gallery engine and its host page.
//!
//! The engine runs in an iframe canvas. The host page owns routing, toasts and
//! the platform's immersive-session API; it drives the engine through
//! requests and reports platform events as notifications.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Gallery engine (iframe)
//!        │                                            │
//!        ├─ Request (with ID) ──────────────────────> │
//!        │                                            ├─ dispatch()
//!        │ <───────────────────── Response (with ID) ─┤
//!        │                                            │
//!        ├─ xr_* notification (no ID) ──────────────> │
//!        │ <──────────── notification / *_changed ────┤
//! ```
//!
//! Notifications are applied exactly like requests; they simply never get a
//! response.
//!
//! ## Error Handling
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32001`: Artwork not found in the catalog
//! - `-32002`: Precondition not met (support unresolved or unavailable,
//!   session already running)
//!
//! ## Methods
//!
//! ### Catalog
//! - `list_artworks {filter?, query?}`: Filtered, searched listing
//! - `get_artwork {id}`: One record with favorite flag and category label
//! - `toggle_favorite {id}`: Add or remove from the session favorites
//! - `share_artwork {id}`: Share text and deep-link path
//!
//! ### Routing
//! - `resolve_route {path}`: Deep-link resolution with not-found redirect
//!
//! ### Support
//! - `get_support`: Current verdict and whether a check is running
//! - `retry_support`: Re-run the capability checklist
//!
//! ### View
//! - `select_artwork {id}`, `get_view`, `reset_view`
//! - `zoom_in`, `zoom_out`, `rotate`: Adjust the next placement
//!
//! ### Session
//! - `start_session`: Returns the epoch and session options to request
//! - `end_session`, `commit_placement`, `get_session`, `dismiss_fault`
//!
//! ### Platform callbacks (notifications)
//! - `xr_session_started {epoch}`
//! - `xr_session_ended {epoch?}`
//! - `xr_hit_test {pose: {position, orientation?} | null}`
//! - `xr_select`
//! - `xr_session_error {code?, message?, epoch?}`
//!
//! ### Outgoing notifications
//! - `notification`: `{title, description, level, duration_ms}` toast
//! - `support_changed`: Verdict summary
//! - `session_changed`: Phase, surface detection, placed count, fault

/// Method dispatch over the gallery resources.
pub mod handlers;

/// Message types, the postMessage listener and outgoing queues.
pub mod web_rpc;
