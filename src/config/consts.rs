// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default number of concurrent repository probes
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
/// Default deadline for one verification pass, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Upper bound accepted for `verification.timeout_seconds`
pub const MAX_TIMEOUT_SECONDS: u64 = 600;
/// Port used for SSH repositories that do not set one
pub const DEFAULT_SSH_PORT: u16 = 22;
/// Random mints re-drawn on collision before giving up
pub const MAX_MINT_ATTEMPTS: usize = 8;
