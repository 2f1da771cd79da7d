//! JSON API for playing the guessing game over HTTP.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 5000
//! nba-mantle serve
//!
//! # Bind to all interfaces with custom weights
//! nba-mantle serve --address 0.0.0.0 --weights weights.json
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/health` - Liveness and number of players loaded
//! - `GET /api/players?mode=classic` - Names eligible under a mode
//! - `POST /api/guess` - Score `{"guess", "target", "mode"}`
//! - `GET /api/stats` - Guesses made against each target
//! - `GET /api/config` - Active resolver cutoff and scoring weights

pub mod server;
