use crate::{LineChannel, PortInfo, Result, TransportError};

/// A simple in-process mock channel. Each instance is independent: it records
/// every line sent and echoes an acknowledgement per line so REPL flows are
/// testable without hardware.
pub struct MockChannel {
    name: String,
    sent: Vec<String>,
    pending_echo: Vec<String>,
}

impl MockChannel {
    /// Lines sent so far, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
}

impl LineChannel for MockChannel {
    fn open(name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            sent: Vec::new(),
            pending_echo: Vec::new(),
        })
    }

    fn list() -> Result<Vec<PortInfo>> {
        Ok(vec![PortInfo {
            name: "mock0".to_string(),
            driver: "mock".to_string(),
        }])
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        if line.contains('\n') {
            return Err(TransportError::InvalidLine("embedded newline"));
        }
        self.sent.push(line.to_string());
        self.pending_echo.push(format!("{} ack: {}", self.name, line));
        Ok(())
    }

    fn drain_echo(&mut self) -> Result<Vec<String>> {
        Ok(std::mem::take(&mut self.pending_echo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_and_echoes_per_line() -> anyhow::Result<()> {
        let mut ch = MockChannel::open("mock0")?;
        ch.send_line("CMD:LED=ON")?;
        ch.send_line("CMD:COLOR=red")?;
        assert_eq!(ch.sent(), &["CMD:LED=ON", "CMD:COLOR=red"]);
        assert_eq!(ch.drain_echo()?.len(), 2);
        assert!(ch.drain_echo()?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_embedded_newline() -> anyhow::Result<()> {
        let mut ch = MockChannel::open("mock0")?;
        assert!(ch.send_line("CMD:LED=ON\nCMD:STOP").is_err());
        Ok(())
    }
}
