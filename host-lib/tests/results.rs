//! Result interpretation: loop count validation and reconstruction of
//! per-pin diagnostics from a FAIL response record.


use std::time::Duration;

use protocol::ResponseCode;

use host_lib::{
    error::Error,
    test::{
        self,
        binary_fun_gen,
        TestDefinitionError,
        VectorSource,
    },
    tester::{
        DeviceError,
        Execution,
        Failure,
        PinSnapshot,
        Verdict,
    },
    Package,
    Part,
    Pin,
    PinRole,
    Test,
};


fn quad_nand_part() -> Part {
    Part::new(
        Package::dip14(),
        vec![
            (1, Pin::new("1A", PinRole::In).unwrap()),
            (2, Pin::new("1B", PinRole::In).unwrap()),
            (3, Pin::new("1Y", PinRole::Out).unwrap()),
            (4, Pin::new("2A", PinRole::In).unwrap()),
            (5, Pin::new("2B", PinRole::In).unwrap()),
            (6, Pin::new("2Y", PinRole::Out).unwrap()),
            (8, Pin::new("3Y", PinRole::Out).unwrap()),
            (9, Pin::new("3A", PinRole::In).unwrap()),
            (10, Pin::new("3B", PinRole::In).unwrap()),
            (11, Pin::new("4Y", PinRole::Out).unwrap()),
            (12, Pin::new("4A", PinRole::In).unwrap()),
            (13, Pin::new("4B", PinRole::In).unwrap()),
        ],
    )
    .unwrap()
}

fn quad_nand_test() -> Test {
    // The truth table twice over, so a failure late in the sequence has
    // something to point at.
    let mut body = binary_fun_gen(4, 2, |b| b[0] && b[1], true);
    body.extend(binary_fun_gen(4, 2, |b| b[0] && b[1], true));

    Test::logic(
        "Complete logic",
        vec![1, 2, 4, 5, 9, 10, 12, 13],
        vec![3, 6, 8, 11],
        VectorSource::Literal(body),
    )
}

fn failed_execution(vector_index: u16, snapshot: Vec<u8>) -> Execution {
    Execution {
        verdict: Verdict::Fail,
        elapsed: Duration::from_secs(0),
        failure: Some(Failure {
            vector_index,
            snapshot: PinSnapshot::from_wire(14, snapshot).unwrap(),
        }),
    }
}


#[test]
fn loop_count_is_validated_before_anything_is_sent() {
    assert_eq!(test::validate_loops(1).unwrap(), 1);
    assert_eq!(test::validate_loops(65_535).unwrap(), 65_535);

    assert!(matches!(
        test::validate_loops(0),
        Err(TestDefinitionError::LoopCountOutOfRange(0)),
    ));
    assert!(matches!(
        test::validate_loops(70_000),
        Err(TestDefinitionError::LoopCountOutOfRange(70_000)),
    ));
}

#[test]
fn fail_record_recovers_per_pin_diffs() {
    let part = quad_nand_part();
    let test = quad_nand_test();

    // Failing vector 5 applies 01 to every gate and expects all outputs
    // high. The snapshot below matches that, except gate 1's output
    // (position 3) stuck low. VCC reads high, as it always does.
    let execution = failed_execution(5, vec![0b0011_0110, 0b1011_0010]);

    let diffs = execution.pin_diffs(&part, &test).unwrap();
    assert_eq!(diffs.len(), 12);

    let diff = |position: u8| {
        diffs.iter().find(|d| d.position == position).unwrap()
    };

    let bad = diff(3);
    assert_eq!(bad.name, "1Y");
    assert_eq!(bad.expected, Some(true));
    assert!(!bad.observed);
    assert!(bad.is_mismatch());

    let good = diff(6);
    assert_eq!(good.expected, Some(true));
    assert!(good.observed);
    assert!(!good.is_mismatch());

    // Inputs echo what the fixture drove.
    assert_eq!(diff(1).expected, Some(false));
    assert!(!diff(1).observed);
    assert_eq!(diff(2).expected, Some(true));
    assert!(diff(2).observed);

    assert_eq!(
        diffs.iter().filter(|d| d.is_mismatch()).count(),
        1,
    );
}

#[test]
fn passing_execution_has_no_diffs() {
    let part = quad_nand_part();
    let test = quad_nand_test();

    let execution = Execution {
        verdict: Verdict::Pass,
        elapsed: Duration::from_secs(0),
        failure: None,
    };

    assert!(execution.pin_diffs(&part, &test).unwrap().is_empty());
}

#[test]
fn out_of_range_failing_vector_is_rejected() {
    let part = quad_nand_part();
    let test = quad_nand_test();

    // The NAND body compiles to 8 vectors; index 99 can't be one of them.
    let execution = failed_execution(99, vec![0x00, 0x00]);

    let result = execution.pin_diffs(&part, &test);
    assert!(matches!(
        result,
        Err(Error::Device(DeviceError::FailedVectorOutOfRange {
            index: 99,
            count: 8,
        })),
    ));
}

#[test]
fn firmware_run_tests_have_no_vector_diffs() {
    let part = quad_nand_part();
    let test = Test::dram(
        "MARCH C- Read+Write mode",
        vec![1, 2, 4, 5, 9, 10, 12, 13],
        vec![3],
        2,
        1,
    );

    // The firmware runs the body itself; whatever index it reports, there
    // is no host-side vector to diff against.
    let execution = failed_execution(0, vec![0x00, 0x00]);

    assert!(execution.pin_diffs(&part, &test).unwrap().is_empty());
}

#[test]
fn invalid_verdicts_name_the_code() {
    let err = DeviceError::UnexpectedResponse(ResponseCode::Ok);
    assert_eq!(err.to_string(), "unexpected response code Ok");
}

#[test]
fn snapshot_length_must_match_the_package() {
    assert!(PinSnapshot::from_wire(14, vec![0x00]).is_err());
    assert!(PinSnapshot::from_wire(14, vec![0x00, 0x00]).is_ok());
    assert!(PinSnapshot::from_wire(16, vec![0x00, 0x00, 0x00]).is_err());
}
