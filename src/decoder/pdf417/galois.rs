//! Reed-Solomon over GF(929) for PDF417 codewords
//!
//! The generator polynomial has roots 3^1 .. 3^k where k = 2^(level + 1).
//! Codewords are stored most significant coefficient first, data first and
//! check codewords last. Decoding handles errors and known erasures together.

use crate::error::DecodeError;

/// Field modulus
pub const MODULUS: u32 = 929;
const ORDER: usize = 928;

const fn build_tables() -> ([u16; ORDER], [u16; MODULUS as usize]) {
    let mut exp = [0u16; ORDER];
    let mut log = [0u16; MODULUS as usize];
    let mut x: u32 = 1;
    let mut i = 0;
    while i < ORDER {
        exp[i] = x as u16;
        log[x as usize] = i as u16;
        x = x * 3 % MODULUS;
        i += 1;
    }
    (exp, log)
}

static TABLES: ([u16; ORDER], [u16; MODULUS as usize]) = build_tables();

/// GF(929) arithmetic with generator 3
pub struct Gf929;

impl Gf929 {
    /// 3^n
    pub fn alpha(n: usize) -> u32 {
        TABLES.0[n % ORDER] as u32
    }

    fn log(a: u32) -> usize {
        TABLES.1[a as usize] as usize
    }

    /// Field sum
    pub fn add(a: u32, b: u32) -> u32 {
        (a + b) % MODULUS
    }

    /// Field difference
    pub fn sub(a: u32, b: u32) -> u32 {
        (MODULUS + a - b) % MODULUS
    }

    /// Field product
    pub fn mul(a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        Self::alpha(Self::log(a) + Self::log(b))
    }

    /// Multiplicative inverse; `None` for zero
    pub fn inv(a: u32) -> Option<u32> {
        (a != 0).then(|| Self::alpha(ORDER - Self::log(a)))
    }
}

/// Number of check codewords at `level` (0-8)
pub fn ecc_count(level: u8) -> usize {
    2usize << level.min(8)
}

/// Check codewords for `data` at `level`, appended after the data
pub fn generate(data: &[u16], level: u8) -> Vec<u16> {
    let k = ecc_count(level);

    // generator coefficients, highest degree first
    let mut generator = vec![1u32];
    for i in 1..=k {
        let root = Gf929::alpha(i);
        let mut next = vec![0u32; generator.len() + 1];
        for (j, &c) in generator.iter().enumerate() {
            next[j] = Gf929::add(next[j], c);
            next[j + 1] = Gf929::sub(next[j + 1], Gf929::mul(c, root));
        }
        generator = next;
    }

    let mut rem = vec![0u32; k];
    for &d in data {
        let factor = Gf929::add(d as u32, rem[0]);
        rem.rotate_left(1);
        rem[k - 1] = 0;
        for j in 0..k {
            rem[j] = Gf929::sub(rem[j], Gf929::mul(generator[j + 1], factor));
        }
    }
    rem.into_iter().map(|v| ((MODULUS - v) % MODULUS) as u16).collect()
}

/// Evaluate a polynomial stored highest degree first
fn eval_desc(poly: &[u16], x: u32) -> u32 {
    poly.iter()
        .fold(0, |acc, &c| Gf929::add(Gf929::mul(acc, x), c as u32))
}

/// Evaluate a polynomial stored lowest degree first
fn eval_asc(poly: &[u32], x: u32) -> u32 {
    poly.iter()
        .rev()
        .fold(0, |acc, &c| Gf929::add(Gf929::mul(acc, x), c))
}

/// Correct `codewords` in place given `k` check codewords and known erasure positions
///
/// Erased positions are zeroed first. Returns the number of corrected codewords,
/// erasures included.
pub fn correct(codewords: &mut [u16], k: usize, erasures: &[usize]) -> Result<usize, DecodeError> {
    let n = codewords.len();
    let rho = erasures.len();
    if rho > k || k >= n {
        return Err(DecodeError::ErrorCorrection);
    }
    for &e in erasures {
        codewords[e] = 0;
    }

    let syndromes: Vec<u32> = (1..=k).map(|i| eval_desc(codewords, Gf929::alpha(i))).collect();
    if syndromes.iter().all(|&s| s == 0) {
        return Ok(0);
    }
    // S_r for r in 1..=k
    let s = |r: usize| syndromes[r - 1];

    let locator = |pos: usize| Gf929::alpha((n - 1 - pos) % ORDER);

    // erasure locator seeds Berlekamp-Massey
    let mut lambda = vec![1u32];
    for &e in erasures {
        let x = locator(e);
        let mut next = lambda.clone();
        next.push(0);
        for (j, &c) in lambda.iter().enumerate() {
            next[j + 1] = Gf929::sub(next[j + 1], Gf929::mul(c, x));
        }
        lambda = next;
    }
    let mut b = lambda.clone();
    let mut l = rho;

    for r in rho + 1..=k {
        let delta = lambda
            .iter()
            .enumerate()
            .filter(|&(j, _)| r > j)
            .fold(0, |acc, (j, &c)| Gf929::add(acc, Gf929::mul(c, s(r - j))));

        let mut xb = Vec::with_capacity(b.len() + 1);
        xb.push(0);
        xb.extend_from_slice(&b);

        if delta == 0 {
            b = xb;
            continue;
        }

        let len = lambda.len().max(xb.len());
        let updated: Vec<u32> = (0..len)
            .map(|j| {
                let lj = lambda.get(j).copied().unwrap_or(0);
                let bj = xb.get(j).copied().unwrap_or(0);
                Gf929::sub(lj, Gf929::mul(delta, bj))
            })
            .collect();

        if 2 * l < r + rho {
            let inv = Gf929::inv(delta).ok_or(DecodeError::ErrorCorrection)?;
            b = lambda.iter().map(|&c| Gf929::mul(c, inv)).collect();
            l = r + rho - l;
        } else {
            b = xb;
        }
        lambda = updated;
    }

    while lambda.len() > 1 && lambda.last() == Some(&0) {
        lambda.pop();
    }
    let degree = lambda.len() - 1;
    if degree < rho || 2 * (degree - rho) + rho > k {
        return Err(DecodeError::ErrorCorrection);
    }

    // Chien search
    let positions: Vec<usize> = (0..n)
        .filter(|&pos| {
            Gf929::inv(locator(pos)).is_some_and(|x_inv| eval_asc(&lambda, x_inv) == 0)
        })
        .collect();
    if positions.len() != degree {
        return Err(DecodeError::ErrorCorrection);
    }

    // omega = S(x) * lambda(x) mod x^k with S(x) = sum S_i x^(i-1)
    let mut omega = vec![0u32; k];
    for (i, slot) in omega.iter_mut().enumerate() {
        for (j, &c) in lambda.iter().enumerate().take(i + 1) {
            *slot = Gf929::add(*slot, Gf929::mul(c, syndromes[i - j]));
        }
    }
    let derivative: Vec<u32> = lambda
        .iter()
        .enumerate()
        .skip(1)
        .map(|(j, &c)| Gf929::mul(j as u32 % MODULUS, c))
        .collect();

    // Forney
    for &pos in &positions {
        let x_inv = Gf929::inv(locator(pos)).ok_or(DecodeError::ErrorCorrection)?;
        let denominator = eval_asc(&derivative, x_inv);
        let denominator_inv = Gf929::inv(denominator).ok_or(DecodeError::ErrorCorrection)?;
        let magnitude = Gf929::mul(eval_asc(&omega, x_inv), denominator_inv);
        // e = -omega / lambda'; c -= e
        codewords[pos] = Gf929::add(codewords[pos] as u32, magnitude) as u16;
    }

    if (1..=k).any(|i| eval_desc(codewords, Gf929::alpha(i)) != 0) {
        return Err(DecodeError::ErrorCorrection);
    }
    Ok(positions.len())
}
