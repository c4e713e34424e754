//! JSON front end for tsxdesk.
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/analyze` | form or JSON `symbol` | `{success, symbol, info, report}` |
//! | `POST` | `/export` | none | `{success, filename}` |
//! | `GET` | `/health` | none | `{status: "ok"}` |
//!
//! Failures are reported as `{success: false, error}` with status 200. Other
//! methods on `/analyze` and `/export` get `Invalid request method` the same way.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
