//! Host-side library for driving the IC tester fixture
//!
//! This library turns a part description (package plus per-pin electrical
//! roles) and a test description (pin sets plus a symbolic vector body or
//! firmware algorithm parameters) into the fixture's compact byte protocol,
//! and interprets the fixture's verdict, including per-pin failure
//! diagnostics.
//!
//! The part catalog and any user interface live outside this crate; all
//! this crate asks of its environment is a serial device path.


pub mod config;
pub mod conn;
pub mod error;
pub mod frame;
pub mod part;
pub mod pin;
pub mod tester;
pub mod vector;


pub use self::{
    error::{
        Error,
        Result,
    },
    frame::EncodedFrame,
    part::{
        Package,
        Part,
    },
    pin::{
        Pin,
        PinRole,
    },
    test::Test,
    tester::{
        Execution,
        Tester,
        Verdict,
    },
};
