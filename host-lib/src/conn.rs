//! Serial connection to the tester fixture
//!
//! The fixture speaks a raw byte protocol: the host writes one request
//! buffer, then blocks on exactly one response record. There is no framing
//! beyond the known record sizes, and never more than one request in
//! flight.


use std::{
    io,
    time::Duration,
};

use log::trace;

use serialport::{
    self,
    SerialPort,
    SerialPortSettings,
};

use protocol::BAUD_RATE;


/// A connection to the tester fixture
pub struct Conn {
    port: Box<dyn SerialPort>,
}

impl Conn {
    /// Open the connection
    ///
    /// The fixture's baud rate is fixed; the port is opened once per run,
    /// and failure to open is fatal to the whole run.
    pub fn new(path: &str) -> Result<Self, ConnInitError> {
        let port =
            serialport::open_with_settings(
                path,
                &SerialPortSettings {
                    baud_rate: BAUD_RATE,
                    .. SerialPortSettings::default()
                }
            )
            .map_err(|err| ConnInitError(err))?;

        Ok(
            Self {
                port,
            }
        )
    }

    /// Send one request buffer, whole
    pub fn send(&mut self, data: &[u8]) -> Result<(), ConnSendError> {
        trace!("sending {} bytes", data.len());

        self.port.write_all(data)
            .map_err(|err| ConnSendError(err))
    }

    /// Read exactly `buf.len()` response bytes
    ///
    /// Blocks up to `timeout`; the fixture executes the full test loop
    /// before answering, so the caller sizes the timeout to the test.
    pub fn receive(&mut self, buf: &mut [u8], timeout: Duration)
        -> Result<(), ConnReceiveError>
    {
        self.port.set_timeout(timeout)
            .map_err(|err| ConnReceiveError(err.into()))?;
        self.port.read_exact(buf)
            .map_err(|err| ConnReceiveError(err.into()))?;

        trace!("received {} bytes", buf.len());

        Ok(())
    }
}


/// Error opening the connection to the fixture
#[derive(Debug)]
pub struct ConnInitError(pub serialport::Error);


/// Error sending a request to the fixture
#[derive(Debug)]
pub struct ConnSendError(pub io::Error);


/// Error receiving a response record from the fixture
#[derive(Debug)]
pub struct ConnReceiveError(pub ConnReceiveErrorKind);

impl ConnReceiveError {
    pub fn is_timeout(&self) -> bool {
        match &self.0 {
            ConnReceiveErrorKind::Io(err)
                if err.kind() == io::ErrorKind::TimedOut
            => {
                true
            }
            _ => {
                false
            }
        }
    }
}

#[derive(Debug)]
pub enum ConnReceiveErrorKind {
    Io(io::Error),
    Serial(serialport::Error),
}

impl From<io::Error> for ConnReceiveErrorKind {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serialport::Error> for ConnReceiveErrorKind {
    fn from(err: serialport::Error) -> Self {
        Self::Serial(err)
    }
}
