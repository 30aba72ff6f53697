// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod convert;
pub mod db;
pub mod invoice;
pub mod models;
pub mod rates;
pub mod utils;
pub mod commands;
