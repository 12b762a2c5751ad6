// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for creating a [`Display`] client.

use std::time::Duration;

use crate::config::DisplayConfig;

use super::Display;

/// Builder for a [`Display`] with custom configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lglink_lib::Display;
///
/// let display = Display::builder("lg-tv-moxa")
///     .port(4001)
///     .poll_interval(Duration::from_millis(250))
///     .build();
/// ```
#[derive(Debug)]
pub struct DisplayBuilder {
    host: String,
    port: u16,
    poll_interval: Duration,
}

impl DisplayBuilder {
    pub(crate) fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DisplayConfig::DEFAULT_PORT,
            poll_interval: DisplayConfig::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the TCP port of the serial bridge.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the status poll interval.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builds the client.
    ///
    /// The client starts disconnected; call
    /// [`Display::connect`](super::Display::connect) to open the
    /// connection and start polling.
    #[must_use]
    pub fn build(self) -> Display {
        Display::new(DisplayConfig {
            host: self.host,
            port: self.port,
            poll_interval: self.poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let display = DisplayBuilder::new("bridge").build();
        let config = display.config();
        assert_eq!(config.host, "bridge");
        assert_eq!(config.port, DisplayConfig::DEFAULT_PORT);
        assert_eq!(config.poll_interval, DisplayConfig::DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn builder_overrides() {
        let display = DisplayBuilder::new("bridge")
            .port(4001)
            .poll_interval(Duration::from_millis(100))
            .build();
        let config = display.config();
        assert_eq!(config.port, 4001);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }
}
