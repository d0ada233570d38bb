use crate::{PortInfo, Result};

/// A minimal blocking channel that carries one ASCII command line per call.
pub trait LineChannel {
    /// Open a channel by port name (e.g., "/dev/ttyUSB0", "mock0").
    fn open(name: &str) -> Result<Self>
    where
        Self: Sized;

    /// Attempt to list available ports for this backend.
    fn list() -> Result<Vec<PortInfo>>
    where
        Self: Sized;

    /// Send one command line. Exactly one `\n` terminator is appended; the
    /// line itself must not contain one.
    fn send_line(&mut self, line: &str) -> Result<()>;

    /// Drain any echo lines the device has written back. Echo is logged by
    /// callers, never parsed.
    fn drain_echo(&mut self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
