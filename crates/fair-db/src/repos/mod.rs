//! Repository methods on [`crate::FairDb`], grouped per table.

mod deposition;
mod license;
mod token;
