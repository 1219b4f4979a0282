//! Pseudo-random IBAN generation for demo and test seeding
//!
//! The core treats account ids as opaque strings; only the demo driver and
//! tests rely on this shape.

use rand::Rng;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ACCOUNT_DIGITS: usize = 20;

/// Generate an IBAN-shaped identifier: two letters, two digits, two
/// letters, twenty digits
pub fn generate() -> String {
    let mut rng = rand::thread_rng();

    let mut iban = String::with_capacity(6 + ACCOUNT_DIGITS);
    push_letters(&mut rng, &mut iban, 2);
    push_digits(&mut rng, &mut iban, 2);
    push_letters(&mut rng, &mut iban, 2);
    push_digits(&mut rng, &mut iban, ACCOUNT_DIGITS);
    iban
}

fn push_letters(rng: &mut impl Rng, out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    }
}

fn push_digits(rng: &mut impl Rng, out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(char::from_digit(rng.gen_range(0..10), 10).unwrap_or('0'));
    }
}
