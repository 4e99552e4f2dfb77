//! Static part catalog
//!
//! Every supported device registers itself in a plain table, keyed by part
//! name; there is no runtime discovery. A catalog entry is a builder
//! function so that parts are only constructed when actually looked up.
//!
//! The set here is a representative sample of the device families the
//! fixture handles: combinational gates driven by generated truth tables,
//! a sequential counter exercising clock-edge markers, static and dynamic
//! memory, and a mono-stable multivibrator.


use std::collections::HashMap;

use lazy_static::lazy_static;

use host_lib::{
    Part,
    Test,
};


mod counters;
mod gates;
mod memory;
mod univibrators;


/// A catalog entry: one device and its test suite
pub struct Device {
    pub name: &'static str,
    pub desc: &'static str,
    pub part: Part,
    pub tests: Vec<Test>,
}

impl Device {
    /// The test with the given name, if the device has one
    pub fn test(&self, name: &str) -> Option<&Test> {
        self.tests.iter().find(|test| test.name() == name)
    }
}


type Builder = fn() -> host_lib::Result<Device>;

lazy_static! {
    static ref CATALOG: HashMap<&'static str, Builder> = {
        let mut catalog: HashMap<&'static str, Builder> = HashMap::new();

        catalog.insert("7400", gates::part_7400);
        catalog.insert("7402", gates::part_7402);
        catalog.insert("7404", gates::part_7404);
        catalog.insert("7408", gates::part_7408);
        catalog.insert("74161", counters::part_74161);
        catalog.insert("7489", memory::part_7489);
        catalog.insert("41256", memory::part_41256);
        catalog.insert("74123", univibrators::part_74123);

        catalog
    };
}

/// Build the catalog entry for a part name
pub fn lookup(name: &str) -> Option<host_lib::Result<Device>> {
    CATALOG.get(name).map(|build| build())
}

/// All part names in the catalog, sorted
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = CATALOG.keys().copied().collect();
    names.sort_unstable();
    names
}
