//! Combinational gate parts, with generated truth-table bodies


use host_lib::{
    part::Package,
    pin::{
        Pin,
        PinRole,
    },
    test::{
        binary_fun_gen,
        VectorSource,
    },
    Part,
    Test,
};

use crate::Device;


pub fn part_7400() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip14(),
        vec![
            (1, Pin::new("1A", PinRole::In)?),
            (2, Pin::new("1B", PinRole::In)?),
            (3, Pin::new("1Y", PinRole::Out)?),
            (4, Pin::new("2A", PinRole::In)?),
            (5, Pin::new("2B", PinRole::In)?),
            (6, Pin::new("2Y", PinRole::Out)?),
            (8, Pin::new("3Y", PinRole::Out)?),
            (9, Pin::new("3A", PinRole::In)?),
            (10, Pin::new("3B", PinRole::In)?),
            (11, Pin::new("4Y", PinRole::Out)?),
            (12, Pin::new("4A", PinRole::In)?),
            (13, Pin::new("4B", PinRole::In)?),
        ],
    )?;

    let tests = vec![
        Test::logic(
            "Complete logic",
            vec![1, 2, 4, 5, 10, 9, 13, 12],
            vec![3, 6, 8, 11],
            VectorSource::Literal(
                binary_fun_gen(4, 2, |b| b[0] && b[1], true),
            ),
        ),
    ];

    Ok(
        Device {
            name: "7400",
            desc: "Quad 2-input positive-NAND gates",
            part,
            tests,
        }
    )
}


pub fn part_7402() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip14(),
        vec![
            (1, Pin::new("1Y", PinRole::Out)?),
            (2, Pin::new("1A", PinRole::In)?),
            (3, Pin::new("1B", PinRole::In)?),
            (4, Pin::new("2Y", PinRole::Out)?),
            (5, Pin::new("2A", PinRole::In)?),
            (6, Pin::new("2B", PinRole::In)?),
            (8, Pin::new("3A", PinRole::In)?),
            (9, Pin::new("3B", PinRole::In)?),
            (10, Pin::new("3Y", PinRole::Out)?),
            (11, Pin::new("4A", PinRole::In)?),
            (12, Pin::new("4B", PinRole::In)?),
            (13, Pin::new("4Y", PinRole::Out)?),
        ],
    )?;

    let tests = vec![
        Test::logic(
            "Complete logic",
            vec![2, 3, 5, 6, 8, 9, 11, 12],
            vec![1, 4, 10, 13],
            VectorSource::Literal(
                binary_fun_gen(4, 2, |b| b[0] || b[1], true),
            ),
        ),
    ];

    Ok(
        Device {
            name: "7402",
            desc: "Quad 2-input positive-NOR gates",
            part,
            tests,
        }
    )
}


pub fn part_7404() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip14(),
        vec![
            (1, Pin::new("1A", PinRole::In)?),
            (2, Pin::new("1Y", PinRole::Out)?),
            (3, Pin::new("2A", PinRole::In)?),
            (4, Pin::new("2Y", PinRole::Out)?),
            (5, Pin::new("3A", PinRole::In)?),
            (6, Pin::new("3Y", PinRole::Out)?),
            (8, Pin::new("6Y", PinRole::Out)?),
            (9, Pin::new("6A", PinRole::In)?),
            (10, Pin::new("5Y", PinRole::Out)?),
            (11, Pin::new("5A", PinRole::In)?),
            (12, Pin::new("4Y", PinRole::Out)?),
            (13, Pin::new("4A", PinRole::In)?),
        ],
    )?;

    let tests = vec![
        Test::logic(
            "Complete logic",
            vec![1, 3, 5, 9, 11, 13],
            vec![2, 4, 6, 8, 10, 12],
            VectorSource::Literal(binary_fun_gen(6, 1, |b| b[0], true)),
        ),
    ];

    Ok(
        Device {
            name: "7404",
            desc: "Hex inverters",
            part,
            tests,
        }
    )
}


pub fn part_7408() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip14(),
        vec![
            (1, Pin::new("1A", PinRole::In)?),
            (2, Pin::new("1B", PinRole::In)?),
            (3, Pin::new("1Y", PinRole::Out)?),
            (4, Pin::new("2A", PinRole::In)?),
            (5, Pin::new("2B", PinRole::In)?),
            (6, Pin::new("2Y", PinRole::Out)?),
            (8, Pin::new("3Y", PinRole::Out)?),
            (9, Pin::new("3A", PinRole::In)?),
            (10, Pin::new("3B", PinRole::In)?),
            (11, Pin::new("4Y", PinRole::Out)?),
            (12, Pin::new("4A", PinRole::In)?),
            (13, Pin::new("4B", PinRole::In)?),
        ],
    )?;

    let tests = vec![
        Test::logic(
            "Complete logic",
            vec![1, 2, 4, 5, 10, 9, 13, 12],
            vec![3, 6, 8, 11],
            VectorSource::Literal(
                binary_fun_gen(4, 2, |b| b[0] && b[1], false),
            ),
        ),
    ];

    Ok(
        Device {
            name: "7408",
            desc: "Quad 2-input positive-AND gates",
            part,
            tests,
        }
    )
}
