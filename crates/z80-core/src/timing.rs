//! Per-opcode cycle costs.

/// Cost charged for any opcode without an override, supported or not.
pub const DEFAULT_CYCLE_COST: u8 = 1;

/// Fixed override list applied on top of [`DEFAULT_CYCLE_COST`].
///
/// Register-to-register loads and `NOP` are absent and cost the default.
pub const CYCLE_COST_OVERRIDES: &[(u8, u8)] = &[
    // HALT
    (0x76, 1),
    // INC BC
    (0x03, 4),
    // INC r / DEC r
    (0x04, 4),
    (0x05, 4),
    (0x0C, 4),
    (0x0D, 4),
    (0x14, 4),
    (0x15, 4),
    (0x1C, 4),
    (0x1D, 4),
    (0x24, 4),
    (0x25, 4),
    (0x2C, 4),
    (0x2D, 4),
    (0x3C, 4),
    (0x3D, 4),
    // ADD A,r
    (0x80, 4),
    (0x81, 4),
    (0x82, 4),
    (0x83, 4),
    (0x84, 4),
    (0x85, 4),
    (0x87, 4),
    // SUB r
    (0x90, 4),
    (0x91, 4),
    (0x92, 4),
    (0x93, 4),
    (0x94, 4),
    (0x95, 4),
    (0x97, 4),
    // AND r
    (0xA0, 4),
    (0xA1, 4),
    (0xA2, 4),
    (0xA3, 4),
    (0xA4, 4),
    (0xA5, 4),
    (0xA7, 4),
    // XOR r
    (0xA8, 4),
    (0xA9, 4),
    (0xAA, 4),
    (0xAB, 4),
    (0xAC, 4),
    (0xAD, 4),
    (0xAF, 4),
    // OR r
    (0xB0, 4),
    (0xB1, 4),
    (0xB2, 4),
    (0xB3, 4),
    (0xB4, 4),
    (0xB5, 4),
    (0xB7, 4),
    // LD r,n
    (0x06, 7),
    (0x0E, 7),
    (0x16, 7),
    (0x1E, 7),
    (0x26, 7),
    (0x2E, 7),
    (0x3E, 7),
    // LD HL,nn
    (0x21, 10),
    // INC (HL) / DEC (HL)
    (0x34, 11),
    (0x35, 11),
    // LD (HL),n
    (0x36, 10),
    // LD (HL),B / LD B,(HL)
    (0x70, 7),
    (0x46, 7),
];

/// 256-entry opcode to cycle-cost table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CycleTable {
    costs: Box<[u8]>,
}

impl Default for CycleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleTable {
    /// Builds the table: every opcode at the default, then the overrides.
    #[must_use]
    pub fn new() -> Self {
        let mut costs = vec![DEFAULT_CYCLE_COST; 256].into_boxed_slice();
        for &(opcode, cycles) in CYCLE_COST_OVERRIDES {
            costs[usize::from(opcode)] = cycles;
        }
        Self { costs }
    }

    /// Cycle cost charged when `opcode` is fetched.
    #[must_use]
    pub fn cost(&self, opcode: u8) -> u8 {
        self.costs[usize::from(opcode)]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{CycleTable, CYCLE_COST_OVERRIDES, DEFAULT_CYCLE_COST};

    #[test]
    fn override_list_has_unique_opcodes() {
        let opcodes: HashSet<_> = CYCLE_COST_OVERRIDES.iter().map(|(op, _)| *op).collect();
        assert_eq!(opcodes.len(), CYCLE_COST_OVERRIDES.len());
    }

    #[test]
    fn table_values_match_canonical_costs() {
        let table = CycleTable::new();
        assert_eq!(table.cost(0x00), 1);
        assert_eq!(table.cost(0x76), 1);
        assert_eq!(table.cost(0x03), 4);
        assert_eq!(table.cost(0x3C), 4);
        assert_eq!(table.cost(0x80), 4);
        assert_eq!(table.cost(0x06), 7);
        assert_eq!(table.cost(0x21), 10);
        assert_eq!(table.cost(0x34), 11);
        assert_eq!(table.cost(0x35), 11);
        assert_eq!(table.cost(0x36), 10);
        assert_eq!(table.cost(0x70), 7);
        assert_eq!(table.cost(0x46), 7);
        assert_eq!(table.cost(0x41), DEFAULT_CYCLE_COST);
    }

    #[test]
    fn unlisted_opcodes_cost_the_default() {
        let table = CycleTable::new();
        let listed: HashSet<_> = CYCLE_COST_OVERRIDES.iter().map(|(op, _)| *op).collect();
        for opcode in 0_u8..=u8::MAX {
            if !listed.contains(&opcode) {
                assert_eq!(table.cost(opcode), DEFAULT_CYCLE_COST);
            }
        }
    }

    #[test]
    fn every_override_resolves_via_lookup() {
        let table = CycleTable::new();
        for &(opcode, cycles) in CYCLE_COST_OVERRIDES {
            assert_eq!(table.cost(opcode), cycles);
        }
    }
}
