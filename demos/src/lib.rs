// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the Arrowwood crates.
//!
//! See the `examples/` directory; run one with
//! `cargo run -p arrowwood_demos --example grid_navigation`.
