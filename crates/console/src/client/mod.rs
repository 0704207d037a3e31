// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser-side console client: sign-in, authenticated calls, typed resources.

pub mod invoker;
pub mod notice;
pub mod outcome;
pub mod resources;

pub use invoker::{CallOptions, ConsoleClient, SignInError};
pub use outcome::{AuthFailure, CallError, CallOutcome};
