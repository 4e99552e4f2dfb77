//! Test execution against the fixture
//!
//! One exchange per test: upload the encoded frame plus a loop count, then
//! block for the fixture's verdict. A FAIL verdict carries the index of
//! the first failing compiled vector and a snapshot of every pin's observed
//! level at that step, which is enough to reconstruct an expected-versus-
//! observed view per named pin.


use std::{
    fmt,
    time::{
        Duration,
        Instant,
    },
};

use log::debug;

use protocol::{
    pin_field_len,
    ResponseCode,
    TestKind,
};

use crate::{
    conn::Conn,
    frame::EncodedFrame,
    part::Part,
    test::{
        self,
        Test,
    },
    vector,
    Error,
};


/// Drives tests against the fixture, one at a time
pub struct Tester {
    conn: Conn,
}

impl Tester {
    pub fn new(conn: Conn) -> Self {
        Self {
            conn,
        }
    }

    /// Run one test, `loops` times
    ///
    /// Encodes the whole request before touching the transport; an invalid
    /// loop count or any encode error is rejected without sending a byte.
    /// Fixture-reported faults and malformed responses fail this test but
    /// leave the connection usable for the next one.
    pub fn run(
        &mut self,
        part: &Part,
        test: &Test,
        loops: u32,
        timeout: Duration,
    )
        -> Result<Execution, Error>
    {
        let loops_wire = test::validate_loops(loops)
            .map_err(Error::Test)?;

        let frame = EncodedFrame::build(part, test)?;

        let mut request = frame.as_bytes().to_vec();
        request.extend_from_slice(&loops_wire.to_le_bytes());

        debug!(
            "running test `{}`: {} vectors, {} loops",
            test.name(),
            frame.vector_count(),
            loops,
        );

        let start = Instant::now();
        self.conn.send(&request)?;

        let mut code = [0];
        self.conn.receive(&mut code, timeout)?;

        let code = ResponseCode::from_wire(code[0])
            .ok_or(Error::Device(DeviceError::UnknownResponse(code[0])))?;

        let execution = match code {
            ResponseCode::Pass => {
                Execution {
                    verdict: Verdict::Pass,
                    elapsed: start.elapsed(),
                    failure: None,
                }
            }
            ResponseCode::TimingFail => {
                Execution {
                    verdict: Verdict::TimingFail,
                    elapsed: start.elapsed(),
                    failure: None,
                }
            }
            ResponseCode::Fail => {
                let failure = self.receive_failure(part, timeout)?;
                Execution {
                    verdict: Verdict::Fail,
                    elapsed: start.elapsed(),
                    failure: Some(failure),
                }
            }
            ResponseCode::Err => {
                return Err(Error::Device(DeviceError::FixtureFault));
            }
            ResponseCode::Ok => {
                // Not a valid verdict for a test run.
                return Err(Error::Device(
                    DeviceError::UnexpectedResponse(ResponseCode::Ok),
                ));
            }
        };

        debug!(
            "test `{}` finished: {:?} after {:?}",
            test.name(),
            execution.verdict,
            execution.elapsed,
        );

        Ok(execution)
    }

    fn receive_failure(&mut self, part: &Part, timeout: Duration)
        -> Result<Failure, Error>
    {
        let mut index = [0; 2];
        self.conn.receive(&mut index, timeout)
            .map_err(|_| Error::Device(DeviceError::ShortResponse))?;

        let mut snapshot = vec![0; pin_field_len(part.pin_count())];
        self.conn.receive(&mut snapshot, timeout)
            .map_err(|_| Error::Device(DeviceError::ShortResponse))?;

        Ok(
            Failure {
                vector_index: u16::from_le_bytes(index),
                snapshot: PinSnapshot {
                    pin_count: part.pin_count(),
                    data: snapshot,
                },
            }
        )
    }
}


/// The fixture's verdict for one test run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// Every checked vector matched in every loop
    Pass,
    /// A vector mismatched; diagnostics are attached
    Fail,
    /// Outputs arrived, but outside the configured read-delay window
    ///
    /// Reported, but doesn't block running further tests.
    TimingFail,
}


/// Outcome of one test run
///
/// Failing is a first-class outcome, not an error: the interesting output
/// of a tester is exactly the diagnostics of a bad part.
#[derive(Debug)]
pub struct Execution {
    pub verdict: Verdict,
    pub elapsed: Duration,
    /// Failure details; present exactly for [`Verdict::Fail`]
    pub failure: Option<Failure>,
}

impl Execution {
    /// Reconstruct expected-versus-observed levels per named pin
    ///
    /// Uses the test's cached compiled vectors to find the failing step and
    /// pairs each of the test's pins with the level the fixture observed.
    /// Empty for verdicts other than FAIL, and for test kinds without
    /// vectors.
    pub fn pin_diffs(&self, part: &Part, test: &Test)
        -> Result<Vec<PinDiff>, Error>
    {
        let failure = match &self.failure {
            Some(failure) => failure,
            None => return Ok(Vec::new()),
        };

        // DRAM and univibrator bodies run entirely in firmware; a failing
        // index doesn't refer to anything host-side.
        if test.kind() != TestKind::Logic {
            return Ok(Vec::new());
        }

        let vectors = test.vectors()?;
        let failed = match vectors.get(failure.vector_index as usize) {
            Some(vector) => vector,
            None => {
                return Err(Error::Device(DeviceError::FailedVectorOutOfRange {
                    index: failure.vector_index,
                    count: vectors.len(),
                }));
            }
        };

        let mut diffs = Vec::new();

        for (i, &position) in test.inputs().iter().enumerate() {
            diffs.push(PinDiff {
                position,
                name: pin_name(part, position),
                expected: Some(failed.inputs()[i]),
                observed: failure.snapshot.level(position),
            });
        }
        for (i, &position) in test.outputs().iter().enumerate() {
            diffs.push(PinDiff {
                position,
                name: pin_name(part, position),
                expected: failed.outputs().map(|outputs| outputs[i]),
                observed: failure.snapshot.level(position),
            });
        }

        Ok(diffs)
    }
}

fn pin_name(part: &Part, position: u8) -> String {
    part.pin(position)
        .map(|pin| pin.name().to_owned())
        .unwrap_or_else(|| format!("pin {}", position))
}


/// Failure details from a FAIL response record
#[derive(Debug)]
pub struct Failure {
    /// 0-based index of the first failing compiled vector
    pub vector_index: u16,
    /// Observed level of every socket position at the failing step
    pub snapshot: PinSnapshot,
}


/// Observed pin levels, decoded from the fixture's bit-packed field
#[derive(Debug)]
pub struct PinSnapshot {
    pin_count: u8,
    data: Vec<u8>,
}

impl PinSnapshot {
    /// Decode a snapshot from its wire form
    pub fn from_wire(pin_count: u8, data: Vec<u8>)
        -> Result<Self, DeviceError>
    {
        if data.len() != pin_field_len(pin_count) {
            return Err(DeviceError::ShortResponse);
        }

        Ok(
            Self {
                pin_count,
                data,
            }
        )
    }

    /// The observed level at a 1-based socket position
    pub fn level(&self, position: u8) -> bool {
        vector::position_level(&self.data, position)
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }
}


/// Expected and observed level of one test pin at the failing step
#[derive(Debug, Eq, PartialEq)]
pub struct PinDiff {
    pub position: u8,
    pub name: String,
    /// `None` when the failing step didn't check outputs
    pub expected: Option<bool>,
    pub observed: bool,
}

impl PinDiff {
    pub fn is_mismatch(&self) -> bool {
        self.expected
            .map(|expected| expected != self.observed)
            .unwrap_or(false)
    }
}


/// A fault reported by, or attributed to, the fixture
///
/// Fatal to the current test only; the caller may continue with the next
/// test on the same connection.
#[derive(Debug)]
pub enum DeviceError {
    /// The fixture reported an internal fault (e.g. overcurrent)
    FixtureFault,
    /// The response code byte is not part of the protocol
    UnknownResponse(u8),
    /// A known response code that isn't a valid test verdict
    UnexpectedResponse(ResponseCode),
    /// The response record ended early
    ShortResponse,
    /// The reported failing vector index doesn't exist in this test
    FailedVectorOutOfRange {
        index: u16,
        count: usize,
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FixtureFault => {
                write!(f, "the fixture reported an internal fault")
            }
            Self::UnknownResponse(code) => {
                write!(f, "unknown response code {}", code)
            }
            Self::UnexpectedResponse(code) => {
                write!(f, "unexpected response code {:?}", code)
            }
            Self::ShortResponse => {
                write!(f, "response record ended early")
            }
            Self::FailedVectorOutOfRange { index, count } => {
                write!(
                    f,
                    "fixture reported failing vector {} of {}",
                    index, count,
                )
            }
        }
    }
}
