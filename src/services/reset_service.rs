// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::warn;

use crate::errors::Result;
use crate::storage::DataReset;

pub struct DataResetService<'a> {
    target: &'a dyn DataReset,
}

impl<'a> DataResetService<'a> {
    pub fn new(target: &'a dyn DataReset) -> Self {
        Self { target }
    }

    pub fn reset(&self) -> Result<()> {
        warn!("wiping all transactions, recurring transactions and rules");
        self.target.reset()
    }
}
