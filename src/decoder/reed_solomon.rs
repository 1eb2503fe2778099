//! Reed-Solomon error correction for QR codewords
//!
//! RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11d).
//! The generator polynomial has roots alpha^0 .. alpha^(k-1) and codewords are
//! stored most significant coefficient first.

use crate::error::DecodeError;

/// GF(256) field operations using log/exp tables
pub struct Gf256;

const PRIMITIVE: u16 = 0x11d;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

static TABLES: ([u8; 256], [u8; 256]) = build_tables();

#[inline]
fn exp(n: usize) -> u8 {
    TABLES.0[n % 255]
}

#[inline]
fn log(a: u8) -> usize {
    TABLES.1[a as usize] as usize
}

impl Gf256 {
    /// Field product
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        exp(log(a) + log(b))
    }

    /// Field quotient; `None` when dividing by zero
    pub fn div(a: u8, b: u8) -> Option<u8> {
        if b == 0 {
            return None;
        }
        if a == 0 {
            return Some(0);
        }
        Some(exp(log(a) + 255 - log(b)))
    }

    /// `a` raised to `n`
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        exp(log(a) * (n % 255))
    }

    /// alpha^n
    pub fn alpha(n: usize) -> u8 {
        exp(n)
    }
}

/// Reed-Solomon decoder for one QR block
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` check codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning the number of repaired codewords
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, DecodeError> {
        let syndrome = self.syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.error_locator(&syndrome)?;
        if sigma.len() - 1 > self.num_ecc_codewords / 2 {
            return Err(DecodeError::ErrorCorrection);
        }
        let positions = self.error_positions(&sigma, received.len())?;
        let values = self.error_values(&sigma, &syndrome, &positions, received.len())?;

        for (&pos, &value) in positions.iter().zip(&values) {
            received[pos] ^= value;
        }

        if self.syndrome(received).iter().any(|&s| s != 0) {
            return Err(DecodeError::ErrorCorrection);
        }
        Ok(positions.len())
    }

    fn syndrome(&self, received: &[u8]) -> Vec<u8> {
        let n = received.len();
        (0..self.num_ecc_codewords)
            .map(|i| {
                received.iter().enumerate().fold(0u8, |acc, (j, &c)| {
                    acc ^ Gf256::mul(c, Gf256::alpha(i * (n - 1 - j)))
                })
            })
            .collect()
    }

    /// Berlekamp-Massey
    fn error_locator(&self, syndrome: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(i) {
                if let Some(&s) = sigma.get(j) {
                    delta ^= Gf256::mul(s, syndrome[i - j]);
                }
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let scale = Gf256::div(delta, prev_delta).ok_or(DecodeError::ErrorCorrection)?;
            let snapshot = sigma.clone();
            if sigma.len() < prev.len() + m {
                sigma.resize(prev.len() + m, 0);
            }
            for (j, &b) in prev.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(scale, b);
            }

            if 2 * l <= i {
                prev = snapshot;
                prev_delta = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        Ok(sigma)
    }

    /// Chien search over every codeword position
    fn error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, DecodeError> {
        let positions: Vec<usize> = (0..n)
            .filter(|&i| {
                let x_inv = Gf256::alpha(255 - (n - 1 - i) % 255);
                eval(sigma, x_inv) == 0
            })
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err(DecodeError::ErrorCorrection);
        }
        Ok(positions)
    }

    /// Forney
    fn error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        positions
            .iter()
            .map(|&pos| {
                let power = (n - 1 - pos) % 255;
                let x_inv = Gf256::alpha(255 - power);

                // formal derivative keeps only odd terms in characteristic 2
                let sigma_prime = sigma
                    .iter()
                    .enumerate()
                    .skip(1)
                    .step_by(2)
                    .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::pow(x_inv, i - 1)));

                let quotient =
                    Gf256::div(eval(&omega, x_inv), sigma_prime).ok_or(DecodeError::ErrorCorrection)?;
                Ok(Gf256::mul(Gf256::alpha(power), quotient))
            })
            .collect()
    }
}

/// Evaluate a polynomial stored lowest degree first
fn eval(poly: &[u8], x: u8) -> u8 {
    poly.iter()
        .rev()
        .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}
