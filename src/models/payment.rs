use chrono::NaiveDate;

/// Generation of the Croatian payment slip standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlipFormat {
    /// Legacy slip: bank code and account number, no detailed addresses
    Hub1,
    /// Current slip: IBAN, detailed addresses, due date and optional data
    Hub3,
}

/// Overall state of a recognition result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultState {
    /// Nothing was recognized, or no attempt was made yet
    #[default]
    Empty,
    /// Mandatory fields are valid but an optional field failed validation
    Uncertain,
    /// A payload was read but is not a valid slip
    Invalid,
    /// All validated fields passed
    Valid,
}

impl ResultState {
    /// Valid or uncertain-but-valid
    pub fn is_valid(self) -> bool {
        matches!(self, ResultState::Valid | ResultState::Uncertain)
    }
}

/// Payment data extracted from one slip barcode
///
/// Amounts are in minor units (lipa, cent) and both are 0 until a slip has
/// been recognized. When `conversion_to_eur_performed` is set, `amount_eur`
/// was computed from `amount_hrk` and the configured rate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentRecord {
    /// Overall result state
    pub state: ResultState,
    /// Amount in lipa
    pub amount_hrk: i64,
    /// Amount in cents
    pub amount_eur: i64,
    /// EUR amount was derived from the HRK amount
    pub conversion_to_eur_performed: bool,
    /// Payer name
    pub payer_name: String,
    /// Payer address
    pub payer_address: String,
    /// Payer postal code and place; HUB3 only
    pub payer_detailed_address: String,
    /// Recipient name
    pub recipient_name: String,
    /// Recipient address
    pub recipient_address: String,
    /// Recipient postal code and place; HUB3 only
    pub recipient_detailed_address: String,
    /// Recipient account number
    pub account_number: String,
    /// Recipient bank code
    pub bank_code: String,
    /// Recipient IBAN
    pub iban: String,
    /// Reference model, e.g. `HR01`
    pub reference_model: String,
    /// Reference number
    pub reference: String,
    /// Purpose code, e.g. `COST`
    pub purpose_code: String,
    /// Payment description
    pub payment_description: String,
    /// Payment description code; HUB1 only
    pub payment_description_code: String,
    /// Due date; HUB3 only
    pub due_date: Option<NaiveDate>,
    /// Trailing optional data; HUB3 only
    pub optional_data: String,
    /// Slip format, once a slip has been parsed
    pub slip_id: Option<SlipFormat>,
    /// The payload was reconstructed or not confirmed by error correction
    pub uncertain: bool,
}

impl PaymentRecord {
    /// Empty record with the given state and no payment data
    pub fn with_state(state: ResultState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// No payment data has been filled in
    pub fn is_blank(&self) -> bool {
        let blank = Self::with_state(self.state);
        *self == blank
    }
}
