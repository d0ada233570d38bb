use crate::{LineChannel, PortInfo, Result, TransportError};
use serialport::{SerialPort, SerialPortType};
use std::io::{Read, Write};
use std::time::Duration;

const BAUD: u32 = 115_200;
const IO_TIMEOUT: Duration = Duration::from_millis(200);

/// Newline-terminated ASCII commands over a USB serial port (ESP32-class
/// controllers enumerate as USB CDC devices).
pub struct SerialChannel {
    _port_path: String,
    port: Box<dyn SerialPort>,
}

impl LineChannel for SerialChannel {
    fn open(path: &str) -> Result<Self>
    where
        Self: Sized,
    {
        let port = serialport::new(path, BAUD)
            .timeout(IO_TIMEOUT)
            .open()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(SerialChannel {
            _port_path: path.to_string(),
            port,
        })
    }

    fn list() -> Result<Vec<PortInfo>> {
        let mut out = Vec::new();
        for p in serialport::available_ports().map_err(|e| TransportError::Io(e.to_string()))? {
            match p.port_type {
                SerialPortType::UsbPort(_u) => {
                    out.push(PortInfo {
                        name: p.port_name,
                        driver: "usb-serial".to_string(),
                    });
                }
                _ => {
                    // Still include other serial ports; user can pick
                    out.push(PortInfo {
                        name: p.port_name,
                        driver: "serial".to_string(),
                    });
                }
            }
        }
        Ok(out)
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        if line.contains('\n') {
            return Err(TransportError::InvalidLine("embedded newline"));
        }
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.port.write_all(&buf).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("timed out") {
                TransportError::Timeout
            } else {
                TransportError::Io(msg)
            }
        })?;
        Ok(())
    }

    fn drain_echo(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut acc: Vec<u8> = Vec::with_capacity(64);
        let mut buf = [0u8; 128];
        loop {
            let waiting = self
                .port
                .bytes_to_read()
                .map_err(|e| TransportError::Io(e.to_string()))?;
            if waiting == 0 {
                break;
            }
            match self.port.read(&mut buf) {
                Ok(n) if n > 0 => {
                    acc.extend_from_slice(&buf[..n]);
                    while let Some(pos) = acc.iter().position(|&b| b == b'\n') {
                        let line = acc.drain(..=pos).collect::<Vec<u8>>();
                        let text = String::from_utf8_lossy(&line).trim().to_string();
                        if !text.is_empty() {
                            lines.push(text);
                        }
                    }
                }
                Ok(_) => break,
                Err(e) => {
                    let msg = e.to_string();
                    if msg.contains("timed out") {
                        break;
                    }
                    return Err(TransportError::Io(msg));
                }
            }
        }
        Ok(lines)
    }
}
