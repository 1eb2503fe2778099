//! Symbology capabilities plugged into the generic recognizer
//!
//! A strategy decodes its symbol sample into one or more [`RawPayload`]
//! readings and, when none could be verified, may attempt a reconstruction
//! that the recognizer then accepts or rejects.

use image::GrayImage;

use crate::decoder::pdf417::Pdf417Decoder;
use crate::decoder::qr_decoder::QrDecoder;
use crate::error::{DecodeError, RecognizerError};
use crate::models::{Pdf417Symbol, RawPayload, Symbology};
use crate::settings::{CommonSettings, Pdf417Settings, QrSettings};
use crate::slip::reconstruct::reconstruct;

/// Symbol decoding and payload recovery for one symbology
pub trait SymbolStrategy: Send + Sync {
    /// Sample the strategy decodes
    type Symbol: ?Sized;
    /// Settings of recognizers using this strategy
    type Settings: Copy + Send + std::fmt::Debug + AsRef<CommonSettings>;

    /// Symbology handled
    const SYMBOLOGY: Symbology;

    /// Decode a symbol into its readings, most likely first
    ///
    /// A verified reading is always alone.
    fn decode(
        &self,
        symbol: &Self::Symbol,
        settings: &Self::Settings,
    ) -> Result<Vec<RawPayload>, DecodeError>;

    /// Recover a usable payload from one error correction could not verify
    ///
    /// `accept` tells whether a candidate yields a structurally valid slip.
    fn reconstruct(
        &self,
        payload: &RawPayload,
        settings: &Self::Settings,
        accept: &dyn Fn(&RawPayload) -> bool,
    ) -> Result<RawPayload, DecodeError>;

    /// Validate settings before a recognizer accepts them
    fn validate(settings: &Self::Settings) -> Result<(), RecognizerError> {
        settings.as_ref().validate()
    }
}

/// PDF417 slips, with reconstruction of damaged symbols
#[derive(Debug, Clone, Copy, Default)]
pub struct Pdf417Strategy;

impl SymbolStrategy for Pdf417Strategy {
    type Symbol = Pdf417Symbol;
    type Settings = Pdf417Settings;

    const SYMBOLOGY: Symbology = Symbology::Pdf417;

    fn decode(
        &self,
        symbol: &Pdf417Symbol,
        settings: &Pdf417Settings,
    ) -> Result<Vec<RawPayload>, DecodeError> {
        let readings = Pdf417Decoder::readings(symbol)?;
        if !readings.iter().any(RawPayload::is_verified) && !settings.uncertain_decoding {
            tracing::debug!("unverified PDF417 payload rejected, uncertain decoding is off");
            return Err(DecodeError::ErrorCorrection);
        }
        Ok(readings)
    }

    fn reconstruct(
        &self,
        payload: &RawPayload,
        settings: &Pdf417Settings,
        accept: &dyn Fn(&RawPayload) -> bool,
    ) -> Result<RawPayload, DecodeError> {
        if !settings.uncertain_decoding {
            return Err(DecodeError::Unrecoverable);
        }
        // a complete payload beats a partial reconstruction
        if payload.is_complete() && accept(payload) {
            tracing::debug!("accepting complete unverified payload");
            return Ok(payload.clone());
        }
        let rebuilt = reconstruct(payload)?;
        if accept(&rebuilt) {
            tracing::debug!("accepting reconstructed payload");
            Ok(rebuilt)
        } else {
            tracing::debug!("reconstructed payload failed validation");
            Err(DecodeError::Unrecoverable)
        }
    }
}

/// QR slips, with an optional exhaustive scan
#[derive(Debug, Clone, Copy, Default)]
pub struct QrStrategy;

impl SymbolStrategy for QrStrategy {
    type Symbol = GrayImage;
    type Settings = QrSettings;

    const SYMBOLOGY: Symbology = Symbology::Qr;

    fn decode(
        &self,
        symbol: &GrayImage,
        settings: &QrSettings,
    ) -> Result<Vec<RawPayload>, DecodeError> {
        let qr = QrDecoder::decode(symbol, settings.slower_thorough_scan)?;
        tracing::trace!(version = qr.version, ec = ?qr.error_correction, "QR decoded");
        Ok(vec![RawPayload::verified(Symbology::Qr, qr.data).with_eci(qr.eci)])
    }

    fn reconstruct(
        &self,
        _payload: &RawPayload,
        _settings: &QrSettings,
        _accept: &dyn Fn(&RawPayload) -> bool,
    ) -> Result<RawPayload, DecodeError> {
        // QR payloads are always verified by error correction
        Err(DecodeError::Unrecoverable)
    }
}
