// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod forecast;
pub mod recurring;
pub mod reset;
pub mod rules;
pub mod transactions;
