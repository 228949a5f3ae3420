use mockall::mock;
use rv32tb_core::HarnessResult;
use rv32tb_core::signal::PortSet;
use rv32tb_core::sim::TraceSink;

mock! {
    pub Trace {}
    impl TraceSink for Trace {
        fn sample(&mut self, time: u64, ports: &PortSet) -> HarnessResult<()>;
        fn close(&mut self) -> HarnessResult<()>;
    }
}

/// A trace that accepts any number of samples and expects exactly one close.
pub fn closed_once() -> MockTrace {
    let mut trace = MockTrace::new();
    let _ = trace.expect_sample().returning(|_, _| Ok(()));
    let _ = trace.expect_close().times(1).returning(|| Ok(()));
    trace
}
