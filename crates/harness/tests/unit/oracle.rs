//! # Oracle Tests
//!
//! Register comparison reports every mismatching register before failing.

use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rv32tb_core::Session;
use rv32tb_core::circuit::Rv32Core;
use rv32tb_core::sim::oracle::{self, RegisterSnapshot};

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn compare_logs_each_mismatching_register() {
    let logs = Captured::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let mut session = Session::untraced(Rv32Core::default());
    let mut expected = RegisterSnapshot::new();
    expected.set(2, 0x10);
    expected.set(9, 0x20);
    expected.set(30, 0x30);

    let err = tracing::subscriber::with_default(subscriber, || {
        oracle::check_regs(&mut session, &expected).unwrap_err()
    });
    assert!(err.is_assertion());

    let text = logs.text();
    let lines: Vec<_> = text.lines().filter(|l| l.contains("!= expected")).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("r2 0x0 != expected 0x10"));
    assert!(lines[1].contains("r9 0x0 != expected 0x20"));
    assert!(lines[2].contains("r30 0x0 != expected 0x30"));
}

#[test]
fn matching_snapshot_logs_nothing_and_passes() {
    let mut session = Session::untraced(Rv32Core::default());
    let current = oracle::grab(&session);
    oracle::check_regs(&mut session, &current).unwrap();
    assert_eq!(session.stats().assertions, 1);
}
