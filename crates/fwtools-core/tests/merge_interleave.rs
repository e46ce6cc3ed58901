// crates/fwtools-core/tests/merge_interleave.rs

use std::io::Cursor;

use fwtools_core::merge::{merge_bits, merge_units};
use fwtools_core::{CancelToken, FwError};

fn lcg_next(x: &mut u64) -> u64 {
    // deterministic, not crypto
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

fn units(inputs: &[&[u8]], unit: usize) -> Vec<u8> {
    let token = CancelToken::new();
    let mut readers: Vec<Cursor<Vec<u8>>> =
        inputs.iter().map(|i| Cursor::new(i.to_vec())).collect();
    let mut output = Vec::new();
    merge_units(&token, &mut readers, &mut output, unit).expect("merge ok");
    output
}

fn bits(inputs: &[&[u8]]) -> Vec<u8> {
    let token = CancelToken::new();
    let mut readers: Vec<Cursor<Vec<u8>>> =
        inputs.iter().map(|i| Cursor::new(i.to_vec())).collect();
    let mut output = Vec::new();
    merge_bits(&token, &mut readers, &mut output).expect("merge ok");
    output
}

/// Bit `idx` of the stream, LSB-first within each byte.
fn bit_at(bytes: &[u8], idx: usize) -> u8 {
    (bytes[idx / 8] >> (idx % 8)) & 1
}

/// Re-split lane `lane` out of a `k`-way bit merge.
fn resplit(merged: &[u8], k: usize, lane: usize, lane_bytes: usize) -> Vec<u8> {
    let mut out = vec![0u8; lane_bytes];
    for n in 0..lane_bytes * 8 {
        out[n / 8] |= bit_at(merged, n * k + lane) << (n % 8);
    }
    out
}

#[test]
fn byte_merge_two_inputs() {
    assert_eq!(units(&[b"abcd", b"1234"], 1), b"a1b2c3d4");
}

#[test]
fn byte_merge_three_inputs() {
    assert_eq!(units(&[b"abcd", b"1234", b"zxcv"], 1), b"a1zb2xc3cd4v");
}

#[test]
fn word_merge_three_inputs() {
    assert_eq!(units(&[b"abcd", b"1234", b"zxcv"], 2), b"ab12zxcd34cv");
}

#[test]
fn dword_merge_two_inputs() {
    assert_eq!(units(&[b"abcdefgh", b"12345678"], 4), b"abcd1234efgh5678");
}

#[test]
fn unit_merge_output_is_sum_of_input_lengths() {
    let out = units(&[b"abcdef", b"123456", b"zxcvbn"], 2);
    assert_eq!(out.len(), 18);
}

#[test]
fn bit_merge_golden_pair() {
    // A = 1010_1010, B = 1111_0000; packed LSB-first:
    // a0 b0 a1 b1 a2 b2 a3 b3 -> 0x44, a4 b4 a5 b5 a6 b6 a7 b7 -> 0xee
    let out = bits(&[&[0xaa], &[0xf0]]);
    assert_eq!(out, vec![0x44, 0xee]);
}

#[test]
fn bit_merge_length_and_resplit_roundtrip() {
    let mut seed: u64 = 0x0dd0_feed_0000_0001;
    for k in 2..=4usize {
        for len in [1usize, 3, 8, 17] {
            let lanes: Vec<Vec<u8>> = (0..k)
                .map(|_| (0..len).map(|_| (lcg_next(&mut seed) >> 48) as u8).collect())
                .collect();
            let refs: Vec<&[u8]> = lanes.iter().map(|l| l.as_slice()).collect();
            let merged = bits(&refs);

            assert_eq!(merged.len(), k * len, "k={k} len={len}");
            for (lane, original) in lanes.iter().enumerate() {
                let back = resplit(&merged, k, lane, len);
                assert_eq!(&back, original, "k={k} len={len} lane={lane}");
            }
        }
    }
}

#[test]
fn empty_input_set_terminates_with_empty_output() {
    let token = CancelToken::new();
    let mut readers: Vec<Cursor<Vec<u8>>> = Vec::new();
    let mut output = Vec::new();

    merge_units(&token, &mut readers, &mut output, 1).expect("unit merge ok");
    assert!(output.is_empty());

    merge_bits(&token, &mut readers, &mut output).expect("bit merge ok");
    assert!(output.is_empty());
}

#[test]
fn cancelled_token_stops_merge() {
    let token = CancelToken::new();
    token.cancel();
    let mut readers = vec![Cursor::new(vec![1u8; 64]), Cursor::new(vec![2u8; 64])];
    let mut output = Vec::new();
    let err = merge_units(&token, &mut readers, &mut output, 1).unwrap_err();
    assert!(matches!(err, FwError::Cancelled));
    assert!(output.is_empty());

    let err = merge_bits(&token, &mut readers, &mut output).unwrap_err();
    assert!(matches!(err, FwError::Cancelled));
    assert!(output.is_empty());
}
