use std::fmt;

use crate::{
    config::ConfigReadError,
    conn::{
        ConnInitError,
        ConnReceiveError,
        ConnSendError,
    },
    pin::InvalidPinConfiguration,
    part::{
        PartDefinitionError,
        PartEncodeError,
    },
    test::TestDefinitionError,
    tester::DeviceError,
    vector::CompileError,
};


pub type Result<T = ()> = std::result::Result<T, Error>;


/// Error type aggregating everything that can go wrong in this library
///
/// The variants follow the failure domains: definition and encode errors
/// are local to one encode call, compile errors to one test, connection
/// errors to the whole run, device errors to the current test.
#[derive(Debug)]
pub enum Error {
    /// A pin definition the ZIF hardware cannot express
    Pin(InvalidPinConfiguration),

    /// A part definition that doesn't cover its package
    PartDefinition(PartDefinitionError),

    /// A part that can't be encoded for the fixture
    PartEncode(PartEncodeError),

    /// A test definition the part or fixture can't satisfy
    Test(TestDefinitionError),

    /// A symbolic vector body that doesn't compile
    Compile(CompileError),

    /// Failure to open the connection to the fixture
    ConnInit(ConnInitError),

    /// Failure to send a request
    ConnSend(ConnSendError),

    /// Failure to receive a response record
    ConnReceive(ConnReceiveError),

    /// Failure to read the host configuration file
    Config(ConfigReadError),

    /// A fault reported by, or attributed to, the fixture
    Device(DeviceError),
}

impl From<InvalidPinConfiguration> for Error {
    fn from(err: InvalidPinConfiguration) -> Self {
        Self::Pin(err)
    }
}

impl From<PartDefinitionError> for Error {
    fn from(err: PartDefinitionError) -> Self {
        Self::PartDefinition(err)
    }
}

impl From<PartEncodeError> for Error {
    fn from(err: PartEncodeError) -> Self {
        Self::PartEncode(err)
    }
}

impl From<TestDefinitionError> for Error {
    fn from(err: TestDefinitionError) -> Self {
        Self::Test(err)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Self::Compile(err)
    }
}

impl From<ConnInitError> for Error {
    fn from(err: ConnInitError) -> Self {
        Self::ConnInit(err)
    }
}

impl From<ConnSendError> for Error {
    fn from(err: ConnSendError) -> Self {
        Self::ConnSend(err)
    }
}

impl From<ConnReceiveError> for Error {
    fn from(err: ConnReceiveError) -> Self {
        Self::ConnReceive(err)
    }
}

impl From<ConfigReadError> for Error {
    fn from(err: ConfigReadError) -> Self {
        Self::Config(err)
    }
}

impl From<DeviceError> for Error {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Pin(err) => err.fmt(f),
            Self::PartDefinition(err) => err.fmt(f),
            Self::PartEncode(err) => err.fmt(f),
            Self::Test(err) => err.fmt(f),
            Self::Compile(err) => err.fmt(f),
            Self::ConnInit(err) => write!(f, "{:?}", err),
            Self::ConnSend(err) => write!(f, "{:?}", err),
            Self::ConnReceive(err) => write!(f, "{:?}", err),
            Self::Config(err) => write!(f, "{:?}", err),
            Self::Device(err) => err.fmt(f),
        }
    }
}
