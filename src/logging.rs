// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Tracing subscriber initialization.
//!
//! The terminal belongs to the user interface, so logs are written to a daily
//! rolling file in the application data directory.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `COURSEFINDER_LOG` env var (per-target directives, e.g. `coursefinder=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. Default level: `info`

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "COURSEFINDER_LOG";
const LOG_FILE_PREFIX: &str = "coursefinder.log";
const DEFAULT_LEVEL: &str = "info";

/// Initializes the global subscriber writing under `dir`.
///
/// The returned guard flushes buffered log lines when dropped and must be
/// held until the application exits.
pub(crate) fn init(dir: &Path) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(build_env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with(fmt_layer)
        .try_init()?;

    Ok(guard)
}

/// Builds the filter from the application variable, then `RUST_LOG`, then the
/// default. An unparseable value falls through to the next source.
fn build_env_filter(directives: Option<&str>) -> EnvFilter {
    if let Some(directives) = directives
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(DEFAULT_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_directives_take_priority() {
        let filter = build_env_filter(Some("coursefinder=trace"));
        assert_eq!(filter.to_string(), "coursefinder=trace");
    }

    #[test]
    fn invalid_directives_fall_back() {
        let _filter = build_env_filter(Some("coursefinder=[notalevel"));
        let _filter = build_env_filter(None);
    }
}
