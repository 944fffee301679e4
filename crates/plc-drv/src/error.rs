//! The driver's own closed-set failure modes (spec §7, §10.4): the two
//! fatal conditions, wrapped so `main` can match on them without the
//! diagnostics collected in the error sink ever becoming a Rust `Error`.

use thiserror::Error;

use plc_util::{EmitError, SourceError};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}
