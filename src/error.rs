//! Error types for the recognizer surface and the individual pipeline stages.

use thiserror::Error;

use crate::models::SlipFormat;

/// Failures reported by the recognizer entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecognizerError {
    /// Settings were rejected on create or update.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The recognizer is bound to a recognition run.
    #[error("recognizer is bound to a recognition run")]
    Bound,
}

/// No payload could be obtained from the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The sample does not contain anything resembling a symbol.
    #[error("no symbol found in sample")]
    NoSymbol,

    /// Format information could not be read.
    #[error("format information unreadable")]
    Format,

    /// Row indicators did not yield row count, column count or EC level.
    #[error("symbol metadata unreadable")]
    Metadata,

    /// Reed-Solomon correction failed.
    #[error("error correction failed")]
    ErrorCorrection,

    /// Codewords were corrected but their content is not well-formed.
    #[error("malformed codeword stream")]
    Codewords,

    /// Damaged payload could not be reconstructed into a valid slip.
    #[error("damaged payload could not be reconstructed")]
    Unrecoverable,
}

/// The payload could not be split into a slip field set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Empty payload.
    #[error("payload is empty")]
    Empty,

    /// The first line is not a known slip header.
    #[error("unknown slip format discriminator {0:?}")]
    UnknownFormat(String),

    /// The payload has fewer lines than the layout requires.
    #[error("{format:?} payload has {found} lines, expected at least {expected}")]
    MissingFields {
        /// Detected format.
        format: SlipFormat,
        /// Minimum line count of the layout.
        expected: usize,
        /// Lines present.
        found: usize,
    },
}

/// A single field failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// IBAN is absent.
    #[error("IBAN is missing")]
    MissingIban,

    /// IBAN has the wrong length or characters.
    #[error("IBAN {0:?} is malformed")]
    MalformedIban(String),

    /// IBAN does not start with the Croatian country code.
    #[error("IBAN {0:?} has a foreign country code")]
    ForeignIban(String),

    /// IBAN fails the mod-97 check.
    #[error("IBAN {0:?} fails the checksum")]
    IbanChecksum(String),

    /// Bank code / account number pair is malformed.
    #[error("account {0:?} is malformed")]
    MalformedAccount(String),

    /// Currency is neither HRK nor EUR.
    #[error("unknown currency {0:?}")]
    Currency(String),

    /// Amount text is not a fixed-decimal number.
    #[error("malformed amount {0:?}")]
    Amount(String),

    /// Due date is not a calendar date.
    #[error("unparseable due date {0:?}")]
    DueDate(String),

    /// Reference model is not `HR` followed by two digits.
    #[error("malformed reference model {0:?}")]
    ReferenceModel(String),

    /// Purpose code is not four upper-case letters.
    #[error("malformed purpose code {0:?}")]
    PurposeCode(String),
}
