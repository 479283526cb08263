// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod models;
pub mod recurrence;
pub mod services;
pub mod storage;
pub mod utils;
