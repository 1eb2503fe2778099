//! Field set to payment record, with the validation verdict

use crate::error::FieldError;
use crate::models::{PaymentRecord, ResultState, SlipFormat};
use crate::settings::CommonSettings;
use crate::slip::currency::{Amounts, convert};
use crate::slip::layout::Field;
use crate::slip::parser::SlipFields;
use crate::slip::validate::{
    Account, check_purpose_code, check_reference_model, parse_account, parse_amount,
    parse_currency, parse_due_date, parse_iban,
};

/// Mandatory fields that passed validation
struct Mandatory {
    account: Account,
    amounts: Amounts,
}

fn check_mandatory(fields: &SlipFields, settings: &CommonSettings) -> Result<Mandatory, FieldError> {
    let currency = parse_currency(fields.get(Field::Currency))?;
    let amount = parse_amount(fields.get(Field::Amount))?;
    let account = match fields.format() {
        SlipFormat::Hub3 => parse_iban(fields.get(Field::Iban))?,
        SlipFormat::Hub1 => parse_account(fields.get(Field::Account))?,
    };
    let amounts = convert(amount, currency, settings)
        .ok_or_else(|| FieldError::Amount(fields.get(Field::Amount).to_string()))?;
    Ok(Mandatory { account, amounts })
}

/// Build the record for `fields`
///
/// A failed mandatory check yields a blank `Invalid` record. Failed optional
/// checks keep the data and report `Uncertain`.
pub fn assemble(fields: &SlipFields, settings: &CommonSettings, uncertain: bool) -> PaymentRecord {
    let Mandatory { account, amounts } = match check_mandatory(fields, settings) {
        Ok(mandatory) => mandatory,
        Err(err) => {
            tracing::debug!(%err, format = ?fields.format(), "mandatory field rejected");
            return PaymentRecord::with_state(ResultState::Invalid);
        }
    };

    let mut soft_failures = Vec::new();
    let due_date_text = fields.get(Field::DueDate);
    let due_date = if due_date_text.is_empty() {
        None
    } else {
        parse_due_date(due_date_text)
            .map_err(|err| soft_failures.push(err))
            .ok()
    };
    if let Err(err) = check_reference_model(fields.get(Field::ReferenceModel)) {
        soft_failures.push(err);
    }
    if let Err(err) = check_purpose_code(fields.get(Field::PurposeCode)) {
        soft_failures.push(err);
    }

    let state = if soft_failures.is_empty() {
        ResultState::Valid
    } else {
        tracing::debug!(?soft_failures, "optional fields failed validation");
        ResultState::Uncertain
    };

    let text = |field: Field| fields.get(field).to_string();
    PaymentRecord {
        state,
        amount_hrk: amounts.hrk,
        amount_eur: amounts.eur,
        conversion_to_eur_performed: amounts.conversion_to_eur_performed,
        payer_name: text(Field::PayerName),
        payer_address: text(Field::PayerAddress),
        payer_detailed_address: text(Field::PayerDetailedAddress),
        recipient_name: text(Field::RecipientName),
        recipient_address: text(Field::RecipientAddress),
        recipient_detailed_address: text(Field::RecipientDetailedAddress),
        account_number: account.account_number,
        bank_code: account.bank_code,
        iban: account.iban,
        reference_model: text(Field::ReferenceModel),
        reference: text(Field::Reference),
        purpose_code: text(Field::PurposeCode),
        payment_description: text(Field::Description),
        payment_description_code: text(Field::DescriptionCode),
        due_date,
        optional_data: text(Field::OptionalData),
        slip_id: Some(fields.format()),
        uncertain,
    }
}
