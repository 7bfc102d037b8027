use serde::{Deserialize, Serialize};

/// Region name the record is stored under (`CONF_abc = { ... };`).
pub const ABC_REGION: &str = "abc";

/// Top-level configuration record.
///
/// Field order is the order entries are written back to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abc {
    pub a: i32,
    pub b: f64,
    pub c: f64,
    pub xyz: Xyz,
    pub abc_mnp: Mnp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Xyz {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub mnp: Mnp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mnp {
    pub m: i32,
    pub n: i32,
    pub p: i32,
}

impl Abc {
    /// Overwrites every field with the fixed demo values.
    pub fn apply_literals(&mut self) {
        self.a = 100;
        self.b = 1000.0;
        self.c = 10000.0;
        self.xyz = Xyz {
            x: 1111,
            y: 2222,
            z: 3333,
            mnp: Mnp {
                m: 4444,
                n: 5555,
                p: 6666,
            },
        };
        self.abc_mnp = Mnp {
            m: 7777,
            n: 8888,
            p: 9999,
        };
    }
}
