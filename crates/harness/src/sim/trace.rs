//! Waveform tracing.
//!
//! The clock stepper records one sample per half-step through the `TraceSink` trait.
//! Two sinks are provided:
//! - [`VcdTrace`]: a Value Change Dump writer with one `$var` per schema port; each sample
//!   emits a `#time` marker and the ports whose value changed.
//! - [`NullTrace`]: discards samples, for runs with tracing disabled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::common::error::HarnessResult;
use crate::signal::{Port, PortSchema, PortSet};

/// Receiver of waveform samples.
pub trait TraceSink {
    /// Records the value of every port at virtual time `time`.
    fn sample(&mut self, time: u64, ports: &PortSet) -> HarnessResult<()>;

    /// Flushes and closes the output. Called once at teardown.
    fn close(&mut self) -> HarnessResult<()>;
}

/// Sink that drops every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn sample(&mut self, _time: u64, _ports: &PortSet) -> HarnessResult<()> {
        Ok(())
    }

    fn close(&mut self) -> HarnessResult<()> {
        Ok(())
    }
}

/// VCD writer over any byte sink.
#[derive(Debug)]
pub struct VcdTrace<W: Write> {
    out: W,
    vars: Vec<(Port, String, u8)>,
    last: Option<[u64; Port::COUNT]>,
    closed: bool,
}

impl VcdTrace<BufWriter<File>> {
    /// Creates `path` and writes the VCD header for `schema`.
    pub fn create(path: impl AsRef<Path>, schema: &PortSchema) -> HarnessResult<Self> {
        let path = path.as_ref();
        debug!("opening waveform {}", path.display());
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), schema)
    }
}

impl<W: Write> VcdTrace<W> {
    /// Writes the VCD header for `schema` to `out`.
    pub fn new(mut out: W, schema: &PortSchema) -> HarnessResult<Self> {
        let vars: Vec<_> = schema
            .ports()
            .enumerate()
            .map(|(idx, (port, spec))| (port, vcd_id(idx), spec.width))
            .collect();

        writeln!(out, "$timescale 1ns $end")?;
        writeln!(out, "$scope module {} $end", schema.module)?;
        for ((_, id, width), (_, spec)) in vars.iter().zip(schema.ports()) {
            writeln!(out, "$var wire {width} {id} {} $end", spec.name)?;
        }
        writeln!(out, "$upscope $end")?;
        writeln!(out, "$enddefinitions $end")?;

        Ok(Self {
            out,
            vars,
            last: None,
            closed: false,
        })
    }

    /// The underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_value(&mut self, value: u64, width: u8, id: &str) -> HarnessResult<()> {
        if width == 1 {
            writeln!(self.out, "{}{id}", value & 1)?;
        } else {
            writeln!(self.out, "b{value:0width$b} {id}", width = usize::from(width))?;
        }
        Ok(())
    }
}

impl<W: Write> TraceSink for VcdTrace<W> {
    fn sample(&mut self, time: u64, ports: &PortSet) -> HarnessResult<()> {
        writeln!(self.out, "#{time}")?;

        let first = self.last.is_none();
        if first {
            writeln!(self.out, "$dumpvars")?;
        }
        let last = self.last.get_or_insert([0; Port::COUNT]);

        let mut changes = Vec::new();
        for (port, id, width) in &self.vars {
            let value = ports.get(*port);
            if first || last[port.index()] != value {
                last[port.index()] = value;
                changes.push((value, *width, id.clone()));
            }
        }
        for (value, width, id) in changes {
            self.write_value(value, width, &id)?;
        }

        if first {
            writeln!(self.out, "$end")?;
        }
        Ok(())
    }

    fn close(&mut self) -> HarnessResult<()> {
        if !self.closed {
            self.closed = true;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// VCD identifier for the `idx`-th variable (printable ASCII `!`..`~`, base 94).
fn vcd_id(idx: usize) -> String {
    const BASE: usize = 94;
    const FIRST: u8 = b'!';

    let mut id = String::new();
    let mut n = idx;
    loop {
        id.insert(0, char::from(FIRST + (n % BASE) as u8));
        n /= BASE;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, Ram};

    #[test]
    fn ids_are_printable_and_distinct() {
        assert_eq!(vcd_id(0), "!");
        assert_eq!(vcd_id(93), "~");
        assert_eq!(vcd_id(94), "!!");
        assert_ne!(vcd_id(95), vcd_id(94));
    }

    #[test]
    fn only_changed_ports_follow_the_first_sample() {
        let mut ram = Ram::default();
        let mut vcd = VcdTrace::new(Vec::new(), ram.schema()).unwrap();
        vcd.sample(1, ram.ports()).unwrap();
        ram.poke(Port::Clk, 1);
        vcd.sample(2, ram.ports()).unwrap();
        vcd.close().unwrap();

        let text = String::from_utf8(vcd.get_ref().clone()).unwrap();
        assert!(text.contains("$scope module ram $end"));
        assert!(text.contains("$var wire 32 # data_in $end"));
        let tail = text.split("#2\n").nth(1).unwrap();
        assert_eq!(tail, "1!\n");
    }
}
