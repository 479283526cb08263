// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod forecast_service;
pub mod recurring_service;
pub mod reset_service;
pub mod rule_service;
pub mod transaction_service;

pub use forecast_service::ForecastService;
pub use recurring_service::RecurringTransactionService;
pub use reset_service::DataResetService;
pub use rule_service::RecurrenceRuleService;
pub use transaction_service::{TransactionFilter, TransactionScope, TransactionService};
