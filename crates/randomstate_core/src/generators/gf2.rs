//! Polynomial arithmetic over GF(2) for checking jump polynomials.
//!
//! A jump by `2^k` steps of a linear generator with characteristic
//! polynomial `P` is the polynomial `x^(2^k) mod P`. `P` is recovered from
//! one output bit per step with Berlekamp-Massey.

/// Bit `i` of the word vector is the coefficient of `x^i`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Poly(Vec<u64>);

impl Poly {
    fn monomial(i: usize) -> Self {
        let mut p = Self::default();
        p.flip(i);
        p
    }

    fn bit(&self, i: usize) -> bool {
        self.0.get(i / 64).is_some_and(|w| (w >> (i % 64)) & 1 == 1)
    }

    fn flip(&mut self, i: usize) {
        if self.0.len() <= i / 64 {
            self.0.resize(i / 64 + 1, 0);
        }
        self.0[i / 64] ^= 1 << (i % 64);
    }

    pub(crate) fn degree(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * 64 + 63 - w.leading_zeros() as usize)
    }

    /// `self ^= other * x^shift`
    fn xor_shifted(&mut self, other: &Poly, shift: usize) {
        let (ws, bs) = (shift / 64, shift % 64);
        let need = other.0.len() + ws + 1;
        if self.0.len() < need {
            self.0.resize(need, 0);
        }
        for (i, &w) in other.0.iter().enumerate() {
            self.0[i + ws] ^= w << bs;
            if bs != 0 {
                self.0[i + ws + 1] ^= w >> (64 - bs);
            }
        }
    }

    /// Squaring in GF(2) spreads coefficient `i` to `2i`.
    fn square(&self) -> Poly {
        let spread = |half: u64| (0..32).fold(0u64, |acc, b| acc | ((half >> b) & 1) << (2 * b));
        let mut out = Vec::with_capacity(self.0.len() * 2);
        for &w in &self.0 {
            out.push(spread(w & 0xffff_ffff));
            out.push(spread(w >> 32));
        }
        Poly(out)
    }

    fn reduce(&mut self, modulus: &Poly) {
        let Some(dm) = modulus.degree() else {
            return;
        };
        while let Some(d) = self.degree() {
            if d < dm {
                break;
            }
            self.xor_shifted(modulus, d - dm);
        }
    }

    /// Coefficients packed into exactly `n` words, low word first.
    pub(crate) fn to_words(&self, n: usize) -> Vec<u64> {
        let mut words = self.0.clone();
        words.resize(n, 0);
        words
    }
}

/// Characteristic polynomial of the shortest linear recurrence producing
/// `bits`.
pub(crate) fn characteristic_polynomial(bits: &[bool]) -> Poly {
    let mut c = Poly::monomial(0);
    let mut b = Poly::monomial(0);
    let mut len = 0usize;
    let mut gap = 1usize;
    for i in 0..bits.len() {
        let mut discrepancy = bits[i];
        for j in 1..=len {
            if c.bit(j) && bits[i - j] {
                discrepancy = !discrepancy;
            }
        }
        if !discrepancy {
            gap += 1;
        } else if 2 * len <= i {
            let previous = c.clone();
            c.xor_shifted(&b, gap);
            len = i + 1 - len;
            b = previous;
            gap = 1;
        } else {
            c.xor_shifted(&b, gap);
            gap += 1;
        }
    }
    // reciprocal of the connection polynomial
    let mut p = Poly::default();
    for j in 0..=len {
        if c.bit(j) {
            p.flip(len - j);
        }
    }
    p
}

/// `x^(2^k) mod modulus`
pub(crate) fn x_pow_two_pow(k: u32, modulus: &Poly) -> Poly {
    let mut r = Poly::monomial(1);
    r.reduce(modulus);
    for _ in 0..k {
        r = r.square();
        r.reduce(modulus);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_small_recurrence() {
        // s[n] = s[n-1] ^ s[n-3], characteristic x^3 + x^2 + 1
        let mut bits = vec![true, false, false];
        for n in 3..40 {
            bits.push(bits[n - 1] ^ bits[n - 3]);
        }
        let p = characteristic_polynomial(&bits);
        assert_eq!(p.to_words(1), vec![0b1101]);
    }

    #[test]
    fn test_power_reduces_modulo() {
        // x^3 + x + 1 is primitive: x^7 = 1, so x^(2^3) = x^8 = x
        let m = Poly(vec![0b1011]);
        assert_eq!(x_pow_two_pow(3, &m).to_words(1), vec![0b10]);
        // x^4 = x^2 + x
        assert_eq!(x_pow_two_pow(2, &m).to_words(1), vec![0b110]);
    }
}
