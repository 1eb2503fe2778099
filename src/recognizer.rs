//! Payment slip recognizers and their Idle/Bound lifecycle
//!
//! A recognizer owns its settings and the result of its last attempt. Binding
//! it to a [`RecognitionRun`] freezes the settings until the run is dropped;
//! `update` and `clear` are rejected meanwhile instead of being queued.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::RecognizerError;
use crate::models::{PaymentRecord, RawPayload, ResultState};
use crate::slip;
use crate::strategy::{Pdf417Strategy, QrStrategy, SymbolStrategy};

/// Recognizer of PDF417 payment slips
pub type Pdf417PaymentRecognizer = Recognizer<Pdf417Strategy>;

/// Recognizer of QR payment slips
pub type QrPaymentRecognizer = Recognizer<QrStrategy>;

#[derive(Debug)]
struct State<T> {
    settings: T,
    result: PaymentRecord,
    bound: bool,
}

/// Generic payment slip recognizer over a symbology strategy
#[derive(Debug)]
pub struct Recognizer<S: SymbolStrategy> {
    strategy: S,
    state: Mutex<State<S::Settings>>,
}

impl<S: SymbolStrategy + Default> Recognizer<S> {
    /// Create a recognizer with validated settings and an empty result
    pub fn new(settings: S::Settings) -> Result<Self, RecognizerError> {
        Self::with_strategy(S::default(), settings)
    }
}

impl<S: SymbolStrategy> Recognizer<S> {
    /// Create a recognizer around an explicit strategy value
    pub fn with_strategy(strategy: S, settings: S::Settings) -> Result<Self, RecognizerError> {
        S::validate(&settings)?;
        Ok(Self {
            strategy,
            state: Mutex::new(State {
                settings,
                result: PaymentRecord::default(),
                bound: false,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State<S::Settings>> {
        // the state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the settings; rejected while bound
    pub fn update(&self, settings: S::Settings) -> Result<(), RecognizerError> {
        S::validate(&settings)?;
        let mut state = self.lock();
        if state.bound {
            tracing::warn!(symbology = ?S::SYMBOLOGY, "settings update rejected while bound");
            return Err(RecognizerError::Bound);
        }
        state.settings = settings;
        Ok(())
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> S::Settings {
        self.lock().settings
    }

    /// Snapshot of the last result
    pub fn result(&self) -> PaymentRecord {
        self.lock().result.clone()
    }

    /// Reset the result to the empty record; rejected while bound
    pub fn clear(&self) -> Result<(), RecognizerError> {
        let mut state = self.lock();
        if state.bound {
            return Err(RecognizerError::Bound);
        }
        state.result = PaymentRecord::default();
        Ok(())
    }

    /// Whether a recognition run currently holds the recognizer
    pub fn is_bound(&self) -> bool {
        self.lock().bound
    }

    /// Bind the recognizer to a run, freezing its settings
    pub fn bind(&self) -> Result<RecognitionRun<'_, S>, RecognizerError> {
        let mut state = self.lock();
        if state.bound {
            return Err(RecognizerError::Bound);
        }
        state.bound = true;
        Ok(RecognitionRun {
            recognizer: self,
            settings: state.settings,
        })
    }

    /// Bind for a single attempt on `symbol`
    pub fn recognize(&self, symbol: &S::Symbol) -> Result<ResultState, RecognizerError> {
        let mut run = self.bind()?;
        Ok(run.recognize(symbol))
    }

    fn process(&self, symbol: &S::Symbol, settings: &S::Settings) -> PaymentRecord {
        let common = settings.as_ref();
        let readings = match self.strategy.decode(symbol, settings) {
            Ok(readings) => readings,
            Err(err) => {
                tracing::debug!(symbology = ?S::SYMBOLOGY, %err, "no payload decoded");
                return PaymentRecord::default();
            }
        };
        if let Some(verified) = readings.iter().find(|p| p.is_verified()) {
            return slip::extract(verified, common, false);
        }

        let accept = |candidate: &RawPayload| slip::is_acceptable(candidate, common);
        let recovered = readings.iter().enumerate().find_map(|(reading, payload)| {
            match self.strategy.reconstruct(payload, settings, &accept) {
                Ok(recovered) => Some(recovered),
                Err(err) => {
                    tracing::trace!(symbology = ?S::SYMBOLOGY, reading, %err, "reading rejected");
                    None
                }
            }
        });
        match recovered {
            Some(recovered) => slip::extract(&recovered, common, true),
            None => {
                let readings = readings.len();
                tracing::debug!(symbology = ?S::SYMBOLOGY, readings, "unverified payload discarded");
                PaymentRecord::default()
            }
        }
    }
}

/// A recognizer bound for one or more attempts
///
/// Dropping the run returns the recognizer to idle.
#[derive(Debug)]
pub struct RecognitionRun<'a, S: SymbolStrategy> {
    recognizer: &'a Recognizer<S>,
    settings: S::Settings,
}

impl<S: SymbolStrategy> RecognitionRun<'_, S> {
    /// Recognize `symbol`, overwrite the recognizer's result and return its state
    pub fn recognize(&mut self, symbol: &S::Symbol) -> ResultState {
        let record = self.recognizer.process(symbol, &self.settings);
        let state = record.state;
        tracing::debug!(symbology = ?S::SYMBOLOGY, ?state, uncertain = record.uncertain, "recognition finished");
        self.recognizer.lock().result = record;
        state
    }

    /// Settings frozen for this run
    pub fn settings(&self) -> &S::Settings {
        &self.settings
    }
}

impl<S: SymbolStrategy> Drop for RecognitionRun<'_, S> {
    fn drop(&mut self) {
        self.recognizer.lock().bound = false;
    }
}
