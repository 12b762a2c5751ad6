// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event subscriptions for device state changes.
//!
//! The display publishes a snapshot on every real state change. This
//! module provides the observer plumbing: a registry of callbacks keyed
//! by [`SubscriptionId`], and the [`Subscribable`] trait implemented by
//! the device client.

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
