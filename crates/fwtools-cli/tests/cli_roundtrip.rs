// crates/fwtools-cli/tests/cli_roundtrip.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fwtools-cli"))
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).expect("write input");
    path
}

fn run_ok(cmd: &mut Command) {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn cut_strips_page_metadata() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(dir.path(), "dump.bin", b"aaaabbbbccccddddeeeeffff");

    run_ok(bin().args([
        "cut",
        input.to_str().unwrap(),
        "--page",
        "8",
        "--skip",
        "4",
    ]));

    let out = fs::read(dir.path().join("dump-cutted.bin")).expect("read output");
    assert_eq!(out, b"aaaabbbbddddeeee");
}

#[test]
fn merge_by_byte_interleaves_round_robin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.bin", b"abcd");
    let b = write_file(dir.path(), "b.bin", b"1234");
    let out = dir.path().join("merged.bin");

    run_ok(bin().args([
        "merge",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--bytes",
        "--output",
        out.to_str().unwrap(),
    ]));

    assert_eq!(fs::read(&out).expect("read output"), b"a1b2c3d4");
}

#[test]
fn merge_rejects_unequal_inputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.bin", b"abcd");
    let b = write_file(dir.path(), "b.bin", b"123456");
    let out = dir.path().join("never.bin");

    let res = bin()
        .args([
            "merge",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--bytes",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("spawn command");

    assert!(!res.status.success());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(
        stderr.contains("size mismatch") && stderr.contains("b.bin"),
        "stderr: {stderr}"
    );
    assert!(!out.exists());
}

#[test]
fn merge_mode_flags_are_mutually_exclusive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write_file(dir.path(), "a.bin", b"ab");
    let b = write_file(dir.path(), "b.bin", b"12");

    let res = bin()
        .args([
            "merge",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--bytes",
            "--words",
        ])
        .output()
        .expect("spawn command");
    assert!(!res.status.success());
}

#[test]
fn swap_twice_restores_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data: Vec<u8> = (0..=255u8).collect();
    let input = write_file(dir.path(), "fw.bin", &data);

    run_ok(bin().args(["swap", input.to_str().unwrap(), "--bits", "--words"]));

    let once = dir.path().join("fw-bits-words.bin");
    assert_ne!(fs::read(&once).expect("read swapped"), data);

    run_ok(bin().args(["swap", once.to_str().unwrap(), "--bits", "--words"]));

    let twice = dir.path().join("fw-bits-words-bits-words.bin");
    assert_eq!(fs::read(&twice).expect("read restored"), data);
}

#[test]
fn swap_reports_alignment_violation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(dir.path(), "odd.bin", &[0u8; 10]);

    let res = bin()
        .args(["swap", input.to_str().unwrap(), "--dwords"])
        .output()
        .expect("spawn command");

    assert!(!res.status.success());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("multiple of 8"), "stderr: {stderr}");
}
