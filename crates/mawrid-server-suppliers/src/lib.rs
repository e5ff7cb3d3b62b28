// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supplier record workflow.
//!
//! Each operation is an ordered chain of calls against three collaborators:
//! the identity provider, the blob store and the document store. Nothing is
//! rolled back. When a step fails, the steps already completed stay done, and
//! the returned [`WorkflowFailure`] carries an [`EffectLedger`] naming exactly
//! what was left behind.
//!
//! | Operation | Steps |
//! |---|---|
//! | create | validate, create identity, upload files, write document |
//! | edit | load, (lookup + relink phone), upload files, write document |
//! | delete | load, delete identity, delete document |
//! | approve | load, set approval |
//! | authenticate | load, lookup identity, (create identity, set uid) |

pub mod clock;
pub mod error;
pub mod ledger;
pub mod workflow;

pub use clock::{Clock, SystemClock};
pub use error::{WorkflowError, WorkflowFailure};
pub use ledger::{Effect, EffectLedger, Operation, Outcome, Step, StepRecord};
pub use workflow::{AuthenticateOutcome, CreateOutcome, SupplierWorkflow};
