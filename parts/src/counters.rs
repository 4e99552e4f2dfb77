//! Sequential counter parts


use host_lib::{
    part::Package,
    pin::{
        Pin,
        PinRole,
    },
    test::VectorSource,
    vector::{
        Sym,
        Sym::{
            High as H,
            Low as L,
        },
        SymbolicVector,
    },
    Part,
    Test,
};

use crate::Device;


// Clock edges: sampled at the rising edge, cleared on the falling edge.
const R: Sym = Sym::RisingEdge;
const F: Sym = Sym::FallingEdge;

fn row(inputs: [Sym; 9], outputs: [u8; 5]) -> SymbolicVector {
    SymbolicVector::new(
        inputs.to_vec(),
        outputs.iter().map(|&bit| bit != 0).collect(),
    )
}


pub fn part_74161() -> host_lib::Result<Device> {
    let part = Part::new(
        Package::dip16(),
        vec![
            (1, Pin::new("~CLR", PinRole::In)?),
            (2, Pin::new("CLK", PinRole::In)?),
            (3, Pin::new("A", PinRole::In)?),
            (4, Pin::new("B", PinRole::In)?),
            (5, Pin::new("C", PinRole::In)?),
            (6, Pin::new("D", PinRole::In)?),
            (7, Pin::new("ENP", PinRole::In)?),
            (9, Pin::new("~LOAD", PinRole::In)?),
            (10, Pin::new("ENT", PinRole::In)?),
            (11, Pin::new("QD", PinRole::Out)?),
            (12, Pin::new("QC", PinRole::Out)?),
            (13, Pin::new("QB", PinRole::Out)?),
            (14, Pin::new("QA", PinRole::Out)?),
            (15, Pin::new("RCO", PinRole::Out)?),
        ],
    )?;

    // Input order: ~CLR, ~LOAD, CLK, ENT, ENP, D, C, B, A.
    // Output order: QD, QC, QB, QA, RCO.
    //
    // Enable transitions happen while the clock is high; some chips are
    // more sensitive to that.
    let body = vec![
        // initial clear
        row([F, H, H, L, L, L, L, L, L], [0, 0, 0, 0, 0]),
        row([H, H, H, L, L, L, L, L, L], [0, 0, 0, 0, 0]),
        // loads
        row([H, L, H, L, L, L, L, L, L], [0, 0, 0, 0, 0]),
        row([H, L, R, L, L, L, L, L, H], [0, 0, 0, 1, 0]),
        row([H, L, R, L, L, L, L, H, L], [0, 0, 1, 0, 0]),
        row([H, L, R, L, L, L, L, H, H], [0, 0, 1, 1, 0]),
        row([H, L, R, L, L, L, H, L, L], [0, 1, 0, 0, 0]),
        row([H, L, R, L, L, L, H, L, H], [0, 1, 0, 1, 0]),
        row([H, L, R, L, L, L, H, H, L], [0, 1, 1, 0, 0]),
        row([H, L, R, L, L, L, H, H, H], [0, 1, 1, 1, 0]),
        row([H, L, R, L, L, H, L, L, L], [1, 0, 0, 0, 0]),
        row([H, L, R, L, L, H, L, L, H], [1, 0, 0, 1, 0]),
        row([H, L, R, L, L, H, L, H, L], [1, 0, 1, 0, 0]),
        row([H, L, R, L, L, H, L, H, H], [1, 0, 1, 1, 0]),
        row([H, L, R, L, L, H, H, L, L], [1, 1, 0, 0, 0]),
        row([H, L, R, L, L, H, H, L, H], [1, 1, 0, 1, 0]),
        row([H, L, R, L, L, H, H, H, L], [1, 1, 1, 0, 0]),
        row([H, L, R, L, L, H, H, H, H], [1, 1, 1, 1, 0]),
        // disable load, enable count
        row([H, H, H, H, H, L, L, L, L], [1, 1, 1, 1, 1]),
        // count all the way around
        row([H, H, R, H, H, L, L, L, L], [0, 0, 0, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 0, 0, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 0, 1, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 0, 1, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 1, 0, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 1, 0, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 1, 1, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [0, 1, 1, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 0, 0, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 0, 0, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 0, 1, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 0, 1, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 1, 0, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 1, 0, 1, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 1, 1, 0, 0]),
        row([H, H, R, H, H, L, L, L, L], [1, 1, 1, 1, 1]),
        // count inhibit
        row([H, H, H, L, H, L, L, L, L], [1, 1, 1, 1, 0]),
        row([H, H, L, L, H, L, L, L, L], [1, 1, 1, 1, 0]),
        row([H, H, H, L, H, L, L, L, L], [1, 1, 1, 1, 0]),
        row([H, H, H, H, L, L, L, L, L], [1, 1, 1, 1, 1]),
        row([H, H, L, H, L, L, L, L, L], [1, 1, 1, 1, 1]),
        row([H, H, H, H, L, L, L, L, L], [1, 1, 1, 1, 1]),
        row([H, H, H, L, L, L, L, L, L], [1, 1, 1, 1, 0]),
        row([H, H, L, L, L, L, L, L, L], [1, 1, 1, 1, 0]),
        row([H, H, H, L, L, L, L, L, L], [1, 1, 1, 1, 0]),
    ];

    let tests = vec![
        Test::logic(
            "Complete logic",
            vec![1, 9, 2, 10, 7, 6, 5, 4, 3],
            vec![11, 12, 13, 14, 15],
            VectorSource::Literal(body),
        ),
    ];

    Ok(
        Device {
            name: "74161",
            desc: "Synchronous presettable 4-bit counter",
            part,
            tests,
        }
    )
}
