//! Symbolic test vectors, clock-edge expansion, and bit packing
//!
//! Logic test bodies are written symbolically: each step lists input levels
//! (possibly containing clock-edge markers) and the outputs expected once
//! those inputs are applied. Before upload the body is compiled: edge
//! markers expand into multiple concrete steps, and each concrete step is
//! bit-packed into the fixture's wire order.


use std::fmt;

use protocol::pin_field_len;

use crate::part::Part;


/// One symbolic input level
///
/// The marker variants come in two families. The settled pair (`+`/`-` in
/// the original notation) expands into three steps, leaving a full step for
/// the DUT to settle after the edge before outputs are checked. The
/// edge-only pair (`/`/`\`) expands into two steps and checks outputs at
/// the edge itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sym {
    Low,
    High,
    /// Input level doesn't matter for this step; packed as low
    DontCare,
    /// Clock edge ending high, outputs checked one step after the edge
    RisingSettled,
    /// Clock edge ending low, outputs checked one step after the edge
    FallingSettled,
    /// Clock edge ending high, outputs checked at the edge
    RisingEdge,
    /// Clock edge ending low, outputs checked at the edge
    FallingEdge,
}

impl Sym {
    /// Level notation shorthand: `0`/`1` to `Low`/`High`
    pub fn bit(value: u8) -> Self {
        if value == 0 { Self::Low } else { Self::High }
    }

    fn is_settled_marker(self) -> bool {
        matches!(self, Self::RisingSettled | Self::FallingSettled)
    }

    fn is_edge_marker(self) -> bool {
        matches!(self, Self::RisingEdge | Self::FallingEdge)
    }

    /// The concrete level of this symbol in the pre-edge (`false`) or
    /// target (`true`) phase of expansion
    fn resolve(self, target: bool) -> bool {
        match self {
            Self::Low | Self::DontCare => false,
            Self::High => true,
            Self::RisingSettled | Self::RisingEdge => target,
            Self::FallingSettled | Self::FallingEdge => !target,
        }
    }
}


/// One symbolic step of a logic test body
#[derive(Clone, Debug)]
pub struct SymbolicVector {
    inputs: Vec<Sym>,
    outputs: Option<Vec<bool>>,
}

impl SymbolicVector {
    /// A step with declared output expectations
    pub fn new(inputs: Vec<Sym>, outputs: Vec<bool>) -> Self {
        Self {
            inputs,
            outputs: Some(outputs),
        }
    }

    /// A step that applies inputs without checking outputs
    ///
    /// Used to settle asynchronous logic before an edge, or to skip
    /// indeterminate outputs.
    pub fn unchecked(inputs: Vec<Sym>) -> Self {
        Self {
            inputs,
            outputs: None,
        }
    }

    pub fn inputs(&self) -> &[Sym] {
        &self.inputs
    }

    pub fn outputs(&self) -> Option<&[bool]> {
        self.outputs.as_deref()
    }
}


/// One concrete test step: pure levels, ready for packing
///
/// Produced once per test by [`compile`], then only read. `outputs` of
/// `None` means the fixture applies the inputs but doesn't compare the
/// outputs for this step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledVector {
    inputs: Vec<bool>,
    outputs: Option<Vec<bool>>,
}

impl CompiledVector {
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    pub fn outputs(&self) -> Option<&[bool]> {
        self.outputs.as_deref()
    }

    pub fn is_checked(&self) -> bool {
        self.outputs.is_some()
    }
}


/// Compile a symbolic body into concrete steps
///
/// Validates the arity of every step against the declared pin counts and
/// expands edge markers. Expansion preserves step order: a settled marker
/// yields 3 steps, an edge-only marker 2, a plain step 1.
pub fn compile(
    body: &[SymbolicVector],
    input_count: usize,
    output_count: usize,
)
    -> Result<Vec<CompiledVector>, CompileError>
{
    let mut compiled = Vec::new();

    for vector in body {
        expand(vector, input_count, output_count, &mut compiled)?;
    }

    Ok(compiled)
}

fn expand(
    vector: &SymbolicVector,
    input_count: usize,
    output_count: usize,
    compiled: &mut Vec<CompiledVector>,
)
    -> Result<(), CompileError>
{
    if vector.inputs.len() != input_count {
        return Err(CompileError::ArityMismatch {
            expected: input_count,
            found: vector.inputs.len(),
        });
    }
    if let Some(outputs) = &vector.outputs {
        if outputs.len() != output_count {
            return Err(CompileError::ArityMismatch {
                expected: output_count,
                found: outputs.len(),
            });
        }
    }

    let has_settled = vector.inputs.iter().any(|s| s.is_settled_marker());
    let has_edge = vector.inputs.iter().any(|s| s.is_edge_marker());

    if has_settled && has_edge {
        return Err(CompileError::MixedEdgeMarkers);
    }

    let resolve = |target| -> Vec<bool> {
        vector.inputs.iter()
            .map(|s| s.resolve(target))
            .collect()
    };

    if has_settled {
        // Pre-settle, then the edge itself, neither checked. Outputs are
        // compared one full step after the edge, once the DUT has settled.
        compiled.push(CompiledVector {
            inputs: resolve(false),
            outputs: None,
        });
        compiled.push(CompiledVector {
            inputs: resolve(true),
            outputs: None,
        });
        compiled.push(CompiledVector {
            inputs: resolve(true),
            outputs: vector.outputs.clone(),
        });
    } else if has_edge {
        // Outputs are sampled at the edge.
        compiled.push(CompiledVector {
            inputs: resolve(false),
            outputs: None,
        });
        compiled.push(CompiledVector {
            inputs: resolve(true),
            outputs: vector.outputs.clone(),
        });
    } else {
        compiled.push(CompiledVector {
            inputs: resolve(true),
            outputs: vector.outputs.clone(),
        });
    }

    Ok(())
}


/// Pack one compiled vector into the fixture's wire order
///
/// Each input/output level lands at its socket position; positions not used
/// by the test stay low. Positions are then read out in descending numeric
/// order, MSB first, into `ceil(pin_count / 8)` bytes. If the step doesn't
/// check outputs, the bit at every supply-rail (VCC) position is forced
/// high; VCC can never carry a test level, so it serves as the in-band
/// "no check" channel.
///
/// Packing depends only on socket positions, never on the order in which
/// the test declared its pins.
pub fn pack(
    part: &Part,
    input_pins: &[u8],
    output_pins: &[u8],
    vector: &CompiledVector,
)
    -> Vec<u8>
{
    let mut levels = vec![false; part.pin_count() as usize + 1];

    for (&position, &level) in input_pins.iter().zip(vector.inputs()) {
        levels[position as usize] = level;
    }
    if let Some(outputs) = vector.outputs() {
        for (&position, &level) in output_pins.iter().zip(outputs) {
            levels[position as usize] = level;
        }
    } else {
        for position in part.vcc() {
            levels[position as usize] = true;
        }
    }

    pack_positions(part.pin_count(), |position| levels[position as usize])
}

/// Bit-pack one flag per socket position, descending order, MSB first
///
/// Position `p` lands in bit `(p - 1) % 8` of byte `len - 1 - (p - 1) / 8`,
/// which is the layout a big-endian byte dump of the position bitstring
/// produces. Shared by vectors, presence bitmaps, and snapshot decoding.
pub(crate) fn pack_positions<F>(pin_count: u8, level: F) -> Vec<u8>
    where F: Fn(u8) -> bool
{
    let len = pin_field_len(pin_count);
    let mut data = vec![0; len];

    for position in 1..=pin_count {
        if level(position) {
            let bit = (position as usize - 1) % 8;
            let byte = len - 1 - (position as usize - 1) / 8;
            data[byte] |= 1 << bit;
        }
    }

    data
}

/// Read the level of one socket position out of a bit-packed pin field
pub(crate) fn position_level(data: &[u8], position: u8) -> bool {
    let bit = (position as usize - 1) % 8;
    let byte = data.len() - 1 - (position as usize - 1) / 8;
    data[byte] & (1 << bit) != 0
}


/// Error compiling a symbolic test body
#[derive(Debug, Eq, PartialEq)]
pub enum CompileError {
    /// A test references a socket position the part can't test
    UnknownPinPosition(u8),
    /// Settled and edge-only markers in the same symbolic vector
    MixedEdgeMarkers,
    /// A vector's length doesn't match the test's declared pin sets
    ArityMismatch {
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownPinPosition(position) => {
                write!(
                    f,
                    "test references socket position {} which the part \
                    cannot test",
                    position,
                )
            }
            Self::MixedEdgeMarkers => {
                write!(
                    f,
                    "settled and edge-only clock markers cannot be mixed in \
                    one vector",
                )
            }
            Self::ArityMismatch { expected, found } => {
                write!(
                    f,
                    "vector length {} doesn't match the declared pin count \
                    {}",
                    found, expected,
                )
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sym_row(bits: &[u8]) -> Vec<Sym> {
        bits.iter().map(|&b| Sym::bit(b)).collect()
    }

    #[test]
    fn plain_vector_compiles_to_one_step() {
        let body = [SymbolicVector::new(sym_row(&[1, 0]), vec![true])];
        let compiled = compile(&body, 2, 1).unwrap();

        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].inputs(), &[true, false]);
        assert_eq!(compiled[0].outputs(), Some(&[true][..]));
    }

    #[test]
    fn settled_marker_expands_to_three_steps() {
        let body = [SymbolicVector::new(
            vec![Sym::RisingSettled, Sym::High],
            vec![true, false],
        )];
        let compiled = compile(&body, 2, 2).unwrap();

        assert_eq!(compiled.len(), 3);
        assert_eq!(compiled[0].inputs(), &[false, true]);
        assert_eq!(compiled[0].outputs(), None);
        assert_eq!(compiled[1].inputs(), &[true, true]);
        assert_eq!(compiled[1].outputs(), None);
        assert_eq!(compiled[2].inputs(), &[true, true]);
        assert_eq!(compiled[2].outputs(), Some(&[true, false][..]));
    }

    #[test]
    fn edge_marker_expands_to_two_steps() {
        let body = [SymbolicVector::new(
            vec![Sym::FallingEdge, Sym::Low],
            vec![false],
        )];
        let compiled = compile(&body, 2, 1).unwrap();

        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].inputs(), &[true, false]);
        assert_eq!(compiled[0].outputs(), None);
        assert_eq!(compiled[1].inputs(), &[false, false]);
        assert_eq!(compiled[1].outputs(), Some(&[false][..]));
    }

    #[test]
    fn markers_of_one_family_resolve_together() {
        // Divergent polarities under one marker family are permitted; each
        // marker transitions towards its own target level.
        let body = [SymbolicVector::new(
            vec![Sym::RisingSettled, Sym::FallingSettled],
            vec![true],
        )];
        let compiled = compile(&body, 2, 1).unwrap();

        assert_eq!(compiled[0].inputs(), &[false, true]);
        assert_eq!(compiled[1].inputs(), &[true, false]);
        assert_eq!(compiled[2].inputs(), &[true, false]);
    }

    #[test]
    fn mixed_marker_families_are_rejected() {
        let body = [SymbolicVector::new(
            vec![Sym::RisingSettled, Sym::RisingEdge],
            vec![true],
        )];
        assert_eq!(
            compile(&body, 2, 1),
            Err(CompileError::MixedEdgeMarkers),
        );
    }

    #[test]
    fn arity_is_checked_per_vector() {
        let body = [SymbolicVector::new(sym_row(&[1, 0, 1]), vec![true])];
        assert_eq!(
            compile(&body, 2, 1),
            Err(CompileError::ArityMismatch { expected: 2, found: 3 }),
        );
    }

    #[test]
    fn dont_care_packs_low() {
        let body = [SymbolicVector::new(
            vec![Sym::DontCare, Sym::High],
            vec![true],
        )];
        let compiled = compile(&body, 2, 1).unwrap();
        assert_eq!(compiled[0].inputs(), &[false, true]);
    }

    #[test]
    fn positions_pack_descending_msb_first() {
        // Positions 1 and 9 set on a 14-pin package: two bytes, position 9
        // in the high byte, position 1 as the lowest bit of the low byte.
        let data = pack_positions(14, |p| p == 1 || p == 9);
        assert_eq!(data, vec![0b0000_0001, 0b0000_0001]);

        assert!(position_level(&data, 1));
        assert!(position_level(&data, 9));
        assert!(!position_level(&data, 14));
    }
}
