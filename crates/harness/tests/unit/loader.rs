//! # Image Loader Tests
//!
//! Image files picked by extension, and streaming into RAM through the write port with
//! undefined bytes left untouched.

use pretty_assertions::assert_eq;
use rv32tb_core::HarnessError;
use rv32tb_core::circuit::DebugSurface;
use rv32tb_core::signal::Port;
use rv32tb_core::sim::{ImageWord, MemoryImage, load_into};

use crate::common::harness::{ram_session, soc_session};

#[test]
fn extension_selects_the_format() {
    let dir = tempfile::tempdir().unwrap();
    let dhex = dir.path().join("prog.dhex");
    let ihex = dir.path().join("prog.HEX");
    std::fs::write(&dhex, "000000:0001f0b7\n").unwrap();
    std::fs::write(&ihex, ":04000000B7F0010054\n:00000001FF\n").unwrap();

    let from_words = MemoryImage::load(&dhex).unwrap();
    let from_intel = MemoryImage::load(&ihex).unwrap();
    assert_eq!(from_words, from_intel);
    assert_eq!(
        from_words.words(),
        [ImageWord {
            addr: 0,
            value: 0x0001_f0b7,
            strobe: 0xf
        }]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MemoryImage::load(dir.path().join("absent.dhex")).unwrap_err();
    assert!(matches!(err, HarnessError::Io(_)));
}

#[test]
fn malformed_value_names_its_line() {
    let err = MemoryImage::parse_dhex("000000:00000013\n000004:12xx\n").unwrap_err();
    assert!(matches!(err, HarnessError::MemoryImage { line: 2, .. }));

    let err = MemoryImage::parse_dhex("0:13\n4:1_3\n").unwrap_err();
    assert!(matches!(err, HarnessError::MemoryImage { line: 2, .. }));
}

#[test]
fn short_values_are_fully_defined_words() {
    let image = MemoryImage::parse_dhex("0:13\n4:fff00093\n8:0\n").unwrap();
    let words: Vec<_> = image.words().iter().map(|w| (w.addr, w.value, w.strobe)).collect();
    assert_eq!(words, vec![(0, 0x13, 0xf), (4, 0xfff0_0093, 0xf), (8, 0, 0xf)]);
}

#[test]
fn streaming_keeps_undefined_lanes() {
    let mut session = ram_session();
    session.drive(Port::Addr, 0x41);
    session.drive(Port::DataIn, 0xaaaa_aaaa);
    session.drive(Port::WrEn, 1);
    session.eval().unwrap();

    let image = MemoryImage::parse_dhex("000100:00000013\n000104:12xxxx78\n").unwrap();
    load_into(&mut session, &image).unwrap();

    let memory = session.circuit().memory();
    assert_eq!(memory.read(0x40), 0x0000_0013);
    assert_eq!(memory.read(0x41), 0x12aa_aa78);
    assert!(!session.is_high(Port::WrEn));
}

#[test]
fn streaming_takes_one_step_per_word_plus_two() {
    let mut session = ram_session();
    let image = MemoryImage::from_program(0, &[0x13; 5]);
    load_into(&mut session, &image).unwrap();
    assert_eq!(session.stats().steps, 7);
}

#[test]
fn system_image_lands_while_the_core_is_held() {
    let mut session = soc_session();
    let image = MemoryImage::from_program(0x80, &[0x0050_0093, 0x0000_0013]);
    load_into(&mut session, &image).unwrap();

    assert_eq!(session.circuit().memory().read(0x20), 0x0050_0093);
    assert_eq!(session.circuit().memory().read(0x21), 0x0000_0013);
    assert_eq!(session.circuit().pc(), 0);
    assert_eq!(session.peek(Port::ResetN), 0);
}
