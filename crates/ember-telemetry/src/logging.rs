// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logger initialisation.

use crate::config::TelemetryConfig;
use env_logger::{Builder, Env};

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` wins over `config.log_filter`. Returns `false` when a logger
/// was already installed, in which case nothing changes.
pub fn init_logging(config: &TelemetryConfig) -> bool {
    let installed = Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str()))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logger initialised with default filter '{}'", config.log_filter);
    }
    installed
}
