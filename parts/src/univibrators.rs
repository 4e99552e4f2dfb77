//! Mono-stable multivibrator parts
//!
//! Pulse timing can't be expressed as plain vectors, so these tests run
//! entirely in firmware; the host only names the device variant and the
//! test to perform. The external RC network pins connect to the fixture's
//! timing network.


use host_lib::{
    part::Package,
    pin::{
        Pin,
        PinRole,
    },
    Part,
    Test,
};

use crate::Device;


/// Univibrator device variants understood by the firmware
const UNIVIB_74123: u8 = 2;

/// Firmware univibrator test subtypes
const TEST_TRIGGER: u8 = 0;
const TEST_RETRIGGER: u8 = 1;
const TEST_CLEAR: u8 = 2;


pub fn part_74123() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip16(),
        vec![
            (1, Pin::new("1~A", PinRole::In)?),
            (2, Pin::new("1B", PinRole::In)?),
            (3, Pin::new("1~CLR", PinRole::In)?),
            (4, Pin::new("1~Q", PinRole::Out)?),
            (5, Pin::new("2Q", PinRole::Out)?),
            (6, Pin::new("2Cext", PinRole::NotConnected)?),
            (7, Pin::new("2Rext/Cext", PinRole::Rc)?),
            (9, Pin::new("2~A", PinRole::In)?),
            (10, Pin::new("2B", PinRole::In)?),
            (11, Pin::new("2~CLR", PinRole::In)?),
            (12, Pin::new("2~Q", PinRole::Out)?),
            (13, Pin::new("1Q", PinRole::Out)?),
            (14, Pin::new("1Cext", PinRole::NotConnected)?),
            (15, Pin::new("1Rext/Cext", PinRole::Rc)?),
        ],
    )?;

    let inputs = vec![1, 2, 3, 9, 10, 11];
    let outputs = vec![4, 5, 12, 13];

    let tests = vec![
        Test::univib(
            "Trigger",
            inputs.clone(),
            outputs.clone(),
            UNIVIB_74123,
            TEST_TRIGGER,
        ),
        Test::univib(
            "Retrigger",
            inputs.clone(),
            outputs.clone(),
            UNIVIB_74123,
            TEST_RETRIGGER,
        ),
        Test::univib(
            "Clear",
            inputs,
            outputs,
            UNIVIB_74123,
            TEST_CLEAR,
        ),
    ];

    Ok(
        Device {
            name: "74123",
            desc: "Dual retriggerable monostable multivibrator",
            part,
            tests,
        }
    )
}
