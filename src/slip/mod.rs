//! Payment slip stages: parsing, validation, conversion and assembly
//!
//! Everything here works on a [`RawPayload`] and is symbology agnostic.

/// Field set to payment record
pub mod assembler;
/// HRK/EUR conversion
pub mod currency;
/// HUB1 and HUB3 line layouts
pub mod layout;
/// Positional field split
pub mod parser;
/// Rebuilding partly erased payloads
pub mod reconstruct;
/// Payload character sets
pub mod text;
/// Per-field structural checks
pub mod validate;

use crate::models::{PaymentRecord, RawPayload, ResultState};
use crate::settings::CommonSettings;

pub use layout::Field;
pub use parser::SlipFields;
pub use validate::format_due_date;

/// Parse, validate and convert a payload into a payment record
pub fn extract(payload: &RawPayload, settings: &CommonSettings, uncertain: bool) -> PaymentRecord {
    match parser::parse(payload) {
        Ok(fields) => assembler::assemble(&fields, settings, uncertain),
        Err(err) => {
            tracing::debug!(%err, "payload is not a payment slip");
            PaymentRecord::with_state(ResultState::Invalid)
        }
    }
}

/// Whether `payload` yields a structurally valid slip
pub fn is_acceptable(payload: &RawPayload, settings: &CommonSettings) -> bool {
    extract(payload, settings, true).state.is_valid()
}
