//! Memory parts: static RAM tested with generated vector bodies, DRAM
//! handed to the firmware's dedicated array test engine


use host_lib::{
    part::Package,
    pin::{
        Pin,
        PinRole,
    },
    test::{
        binary_combinator,
        VectorSource,
    },
    vector::{
        Sym,
        SymbolicVector,
    },
    Part,
    Test,
};

use crate::Device;


/// DRAM geometry classes understood by the firmware
const MEM_SIZE_256K: u8 = 2;

/// Firmware DRAM test algorithms (March C- variants)
const MARCH_C_MINUS_RMW: u8 = 0;
const MARCH_C_MINUS_RW: u8 = 1;
const MARCH_C_MINUS_PAGE: u8 = 2;


fn rw_row(addr: &[Sym], tail: [u8; 6], outputs: [u8; 4]) -> SymbolicVector {
    let mut inputs = addr.to_vec();
    inputs.extend(tail.iter().map(|&bit| Sym::bit(bit)));

    SymbolicVector::new(
        inputs,
        outputs.iter().map(|&bit| bit != 0).collect(),
    )
}

/// Write, write-inhibit and read back one 4-bit word at one address
///
/// Outputs are open-collector and inverting: reads return the complement
/// of the stored word, and the outputs sit high whenever the chip drives
/// nothing.
fn rw_cycle(addr: &[Sym]) -> Vec<SymbolicVector> {
    vec![
        // write 1s
        rw_row(addr, [1, 1, 1, 1, 1, 1], [1, 1, 1, 1]),
        rw_row(addr, [1, 1, 1, 1, 0, 0], [0, 0, 0, 0]),
        rw_row(addr, [1, 1, 1, 1, 1, 1], [1, 1, 1, 1]),
        rw_row(addr, [0, 0, 0, 0, 1, 0], [1, 1, 1, 1]),
        // read 1s
        rw_row(addr, [1, 1, 1, 1, 0, 1], [0, 0, 0, 0]),
        rw_row(addr, [1, 1, 1, 1, 1, 1], [1, 1, 1, 1]),
        // write 0s
        rw_row(addr, [0, 0, 0, 0, 1, 1], [1, 1, 1, 1]),
        rw_row(addr, [0, 0, 0, 0, 0, 0], [1, 1, 1, 1]),
        rw_row(addr, [0, 0, 0, 0, 1, 1], [1, 1, 1, 1]),
        rw_row(addr, [1, 1, 1, 1, 1, 0], [0, 0, 0, 0]),
        // read 0s
        rw_row(addr, [0, 0, 0, 0, 0, 1], [1, 1, 1, 1]),
        rw_row(addr, [0, 0, 0, 0, 1, 1], [1, 1, 1, 1]),
    ]
}


pub fn part_7489() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip16(),
        vec![
            (1, Pin::new("A0", PinRole::In)?),
            (2, Pin::new("~ME", PinRole::In)?),
            (3, Pin::new("~WE", PinRole::In)?),
            (4, Pin::new("D1", PinRole::In)?),
            (5, Pin::new("~Q1", PinRole::OpenCollector)?),
            (6, Pin::new("D2", PinRole::In)?),
            (7, Pin::new("~Q2", PinRole::OpenCollector)?),
            (9, Pin::new("~Q3", PinRole::OpenCollector)?),
            (10, Pin::new("D3", PinRole::In)?),
            (11, Pin::new("~Q4", PinRole::OpenCollector)?),
            (12, Pin::new("D4", PinRole::In)?),
            (13, Pin::new("A3", PinRole::In)?),
            (14, Pin::new("A2", PinRole::In)?),
            (15, Pin::new("A1", PinRole::In)?),
        ],
    )?;

    let tests = vec![
        Test::logic(
            "Complete array",
            vec![1, 15, 14, 13, 4, 6, 10, 12, 2, 3],
            vec![5, 7, 9, 11],
            VectorSource::Generator(Box::new(|| {
                let mut body = Vec::new();
                for addr in binary_combinator(4) {
                    body.extend(rw_cycle(&addr));
                }
                body
            })),
        )
        .with_loops(256),
    ];

    Ok(
        Device {
            name: "7489",
            desc: "64-bit random-access read/write memory",
            part,
            tests,
        }
    )
}


pub fn part_41256() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip16_rotated(),
        vec![
            (1, Pin::new("A8", PinRole::In)?),
            (2, Pin::new("Din", PinRole::In)?),
            (3, Pin::new("~WE", PinRole::In)?),
            (4, Pin::new("~RAS", PinRole::In)?),
            (5, Pin::new("A0", PinRole::In)?),
            (6, Pin::new("A2", PinRole::In)?),
            (7, Pin::new("A1", PinRole::In)?),
            (9, Pin::new("A7", PinRole::In)?),
            (10, Pin::new("A5", PinRole::In)?),
            (11, Pin::new("A4", PinRole::In)?),
            (12, Pin::new("A3", PinRole::In)?),
            (13, Pin::new("A6", PinRole::In)?),
            (14, Pin::new("Dout", PinRole::Out)?),
            (15, Pin::new("~CAS", PinRole::In)?),
        ],
    )?;

    let inputs = vec![1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 15];
    let outputs = vec![14];

    let tests = vec![
        Test::dram(
            "MARCH C- Read-Modify-Write mode",
            inputs.clone(),
            outputs.clone(),
            MEM_SIZE_256K,
            MARCH_C_MINUS_RMW,
        ),
        Test::dram(
            "MARCH C- Read+Write mode",
            inputs.clone(),
            outputs.clone(),
            MEM_SIZE_256K,
            MARCH_C_MINUS_RW,
        ),
        Test::dram(
            "MARCH C- Page access mode",
            inputs,
            outputs,
            MEM_SIZE_256K,
            MARCH_C_MINUS_PAGE,
        ),
    ];

    Ok(
        Device {
            name: "41256",
            desc: "262144 x 1bit DRAM memory",
            part,
            tests,
        }
    )
}
