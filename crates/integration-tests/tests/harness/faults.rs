//! Fault types raised by test handlers

use std::fmt;

use faultgate_core::{Fault, FaultKind, FaultType};

macro_rules! fault_type {
    ($name:ident, $kind:literal) => {
        #[derive(Debug)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(message: impl Into<String>) -> Self {
                Self(message.into())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::error::Error for $name {}

        impl Fault for $name {
            fn kind(&self) -> FaultKind {
                Self::KIND
            }
        }

        impl FaultType for $name {
            const KIND: FaultKind = FaultKind::new($kind);
        }
    };
}

fault_type!(KindA, "kind_a");
fault_type!(KindB, "kind_b");
fault_type!(KindC, "kind_c");
fault_type!(KindD, "kind_d");

/// Fault whose kind is chosen at runtime, for tests that need many kinds
#[derive(Debug)]
pub struct Numbered {
    pub index: usize,
}

impl Numbered {
    pub fn kind_name(index: usize) -> String {
        format!("numbered_{index}")
    }
}

impl fmt::Display for Numbered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault number {}", self.index)
    }
}

impl std::error::Error for Numbered {}

impl Fault for Numbered {
    fn kind(&self) -> FaultKind {
        FaultKind::from(Self::kind_name(self.index))
    }
}
