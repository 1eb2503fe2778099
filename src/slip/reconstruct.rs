//! Rebuilding a payload whose bytes were partly erased
//!
//! Lines that do not touch an erasure survive. Lines before the first damage
//! keep their position; each later run of intact lines is re-anchored on a
//! field it contains that can be recognized on its own, or counted back from
//! the end of layouts without trailing optional data. Damaged fields come
//! back empty.

use std::collections::BTreeMap;

use crate::decoder::config::pdf417_max_erased_percent;
use crate::error::DecodeError;
use crate::models::{PayloadLine, RawPayload};
use crate::slip::layout::{Field, Layout};
use crate::slip::text::{Charset, clean};
use crate::slip::validate::{check_reference_model, parse_account, parse_iban};

/// Field a line can be identified as without knowing its position
fn recognize(layout: &Layout, charset: Charset, line: &[u8]) -> Option<Field> {
    let text = charset.decode(line);
    let text = clean(&text).trim_start();
    if text.is_empty() {
        return None;
    }
    if layout.index_of(Field::Iban).is_some() && parse_iban(text).is_ok() {
        return Some(Field::Iban);
    }
    if layout.index_of(Field::Account).is_some() && parse_account(text).is_ok() {
        return Some(Field::Account);
    }
    if check_reference_model(text).is_ok() {
        return Some(Field::ReferenceModel);
    }
    if text.len() == 15 && text.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Field::Amount);
    }
    None
}

/// Contiguous intact lines following a damaged region
struct Run<'a> {
    lines: Vec<&'a [u8]>,
    at_end: bool,
}

/// Layout index of the run's first line, never before `next_free`
fn anchor(layout: &Layout, charset: Charset, run: &Run<'_>, next_free: usize) -> Option<usize> {
    let anchored = run.lines.iter().enumerate().find_map(|(offset, line)| {
        let field = recognize(layout, charset, line)?;
        let start = layout.index_of(field)?.checked_sub(offset)?;
        if start < next_free {
            tracing::trace!(?field, start, next_free, "anchor overlaps placed lines");
            return None;
        }
        Some(start)
    });
    anchored.or_else(|| {
        (run.at_end && !layout.has_trailing_data())
            .then(|| layout.fields.len().checked_sub(run.lines.len()))
            .flatten()
            .filter(|&start| start >= next_free)
    })
}

/// Rebuild a damaged payload with every surviving line at its layout position
///
/// The result is complete but unverified; lines that could not be placed
/// come back empty, padded up to the layout's required count. Fails when too
/// much was erased or the header is lost.
pub fn reconstruct(payload: &RawPayload) -> Result<RawPayload, DecodeError> {
    let total = payload.bytes().len();
    let erased: usize = payload.erasures().iter().map(|r| r.len()).sum();
    if total == 0 || erased * 100 > pdf417_max_erased_percent() * total {
        tracing::debug!(erased, total, "too much of the payload is erased");
        return Err(DecodeError::Unrecoverable);
    }

    let charset = Charset::detect(payload);
    let lines = payload.lines();
    let header = match lines.first() {
        Some(PayloadLine {
            bytes,
            damaged: false,
        }) => charset.decode(bytes),
        _ => return Err(DecodeError::Unrecoverable),
    };
    let layout = Layout::for_header(&header).ok_or(DecodeError::Unrecoverable)?;

    let leading = lines.iter().take_while(|l| !l.damaged).count();
    let mut placed: BTreeMap<usize, &[u8]> = lines[..leading]
        .iter()
        .enumerate()
        .map(|(i, l)| (i, l.bytes))
        .collect();
    // the first damaged line occupies at least this slot
    let mut next_free = leading + 1;

    let mut rest = lines[leading..].iter().peekable();
    while rest.peek().is_some() {
        // skip damaged lines, then collect the following intact run
        while rest.next_if(|l| l.damaged).is_some() {}
        let run_lines: Vec<&[u8]> = std::iter::from_fn(|| rest.next_if(|l| !l.damaged))
            .map(|l| l.bytes)
            .collect();
        if run_lines.is_empty() {
            break;
        }
        let run = Run {
            lines: run_lines,
            at_end: rest.peek().is_none(),
        };
        match anchor(layout, charset, &run, next_free) {
            Some(start) => {
                tracing::trace!(start, lines = run.lines.len(), "re-anchored intact lines");
                for (offset, &line) in run.lines.iter().enumerate() {
                    placed.insert(start + offset, line);
                }
                next_free = start + run.lines.len() + 1;
            }
            None => tracing::debug!(lines = run.lines.len(), "dropping unanchored lines"),
        }
    }

    let last = placed.keys().next_back().copied().unwrap_or(0);
    let count = (last + 1).max(layout.required);
    let mut bytes = Vec::with_capacity(total);
    for index in 0..count {
        if let Some(line) = placed.get(&index) {
            bytes.extend_from_slice(line);
        }
        bytes.push(b'\n');
    }
    Ok(RawPayload::unverified(payload.symbology(), bytes, Vec::new()).with_eci(payload.eci()))
}
