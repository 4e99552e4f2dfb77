//! Request frame assembly
//!
//! One test run uploads a single buffer: the part descriptor, the test
//! header, and every packed vector, back to back. The frame is built once
//! and sent verbatim.


use log::debug;

use crate::{
    part::Part,
    test::Test,
    vector,
    Error,
};


/// A fully encoded test request, ready for the transport
#[derive(Debug)]
pub struct EncodedFrame {
    data: Vec<u8>,
    vector_count: usize,
}

impl EncodedFrame {
    /// Encode `part` and `test` into one request buffer
    ///
    /// Compiles the test's vectors (or reuses the cached compilation) and
    /// packs them in sequence order. Fails on any part, test, or vector
    /// error; nothing is sent from here.
    pub fn build(part: &Part, test: &Test) -> Result<Self, Error> {
        test.validate_pins(part)?;

        let mut data = part.encode()?;
        data.extend(test.encode_header(part)?);

        let vectors = test.vectors()?;
        for vector in vectors {
            data.extend(vector::pack(
                part,
                test.inputs(),
                test.outputs(),
                vector,
            ));
        }

        debug!(
            "encoded frame for test `{}`: {} vectors, {} bytes",
            test.name(),
            vectors.len(),
            data.len(),
        );

        Ok(
            Self {
                data,
                vector_count: vectors.len(),
            }
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of compiled vectors contained in the frame
    pub fn vector_count(&self) -> usize {
        self.vector_count
    }
}
