// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cars;
pub mod orders;
pub mod tx;
pub mod rates;
pub mod invoice;
pub mod attendance;
pub mod docs;
pub mod exporter;
pub mod doctor;
