use thiserror::Error;

/// Errors that abort a comparison.
///
/// Differences between the operands are never errors; they are reported as
/// [`Diff`](crate::Diff) entries. Only failures to read the compared graph
/// end up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A record did not carry a value for one of its declared fields.
    #[error("cannot read field `{field}` of `{type_name}`: no value recorded")]
    FieldAccess {
        /// Name of the record type being traversed.
        type_name: String,
        /// Name of the field whose value was requested.
        field: String,
    },
}

/// Errors raised while comparing decimal values.
///
/// The engine recovers from these locally: the node is reported as skipped
/// and no difference is produced for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecimalError {
    /// The decimal literal could not be parsed.
    #[error("invalid decimal literal {literal:?}: {reason}")]
    Parse {
        /// The offending literal.
        literal: String,
        /// Parser diagnostic.
        reason: String,
    },
}
