//! Shallow comparisons used by the low precision levels

use super::tester::EquivalenceTester;
use crate::features::slicing::merge_frontier;
use crate::shared::models::{NodeId, OpNode, Operand, ProgramUnit};

impl EquivalenceTester {
    /// Two condition operands compute the same expression shape
    ///
    /// Identical operands match. Distinct operations match when they share
    /// a non-merge opcode and arity and their operands match pairwise.
    pub fn same_static_pattern(&mut self, unit: &ProgramUnit, a: &Operand, b: &Operand) -> bool {
        self.same_static_pattern_at(unit, a, b, 0)
    }

    fn same_static_pattern_at(
        &mut self,
        unit: &ProgramUnit,
        a: &Operand,
        b: &Operand,
        depth: usize,
    ) -> bool {
        if a == b {
            return true;
        }
        let (Operand::Node(p), Operand::Node(q)) = (a, b) else {
            return false;
        };
        let (Some(x), Some(y)) = (unit.node(*p), unit.node(*q)) else {
            return false;
        };
        if x.opcode != y.opcode
            || x.opcode.is_merge()
            || x.operands.len() != y.operands.len()
            || x.operands.is_empty()
        {
            return false;
        }
        if self.depth_exceeded(depth) {
            return false;
        }

        x.operands
            .iter()
            .zip(&y.operands)
            .all(|(op_x, op_y)| self.same_static_pattern_at(unit, op_x, op_y, depth + 1))
    }
}

/// Check whose condition only depends on one loop induction merge
///
/// Every non-merge operation is expanded; the check qualifies when exactly
/// one merge is reached and its name starts with `prefix`.
pub fn is_induction_guard(unit: &ProgramUnit, branch: NodeId, prefix: &str) -> bool {
    let Some(condition) = unit.node(branch).and_then(OpNode::condition) else {
        return false;
    };
    let merges = merge_frontier(unit, condition);
    if merges.len() != 1 {
        return false;
    }
    merges
        .iter()
        .filter_map(|&id| unit.node(id))
        .filter_map(|node| node.name.as_deref())
        .any(|name| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Constant, Opcode, UnitBuilder};

    fn int(v: u64) -> Operand {
        Operand::Constant(Constant::Int(v))
    }

    #[test]
    fn test_static_pattern() {
        let mut b = UnitBuilder::new("pattern");
        let f = b.procedure("main");
        let bb = b.block(f);
        let p = b.external("p");
        let x = b.op(bb, Opcode::MemoryRead, vec![p.into()]);
        let c1 = b.op(bb, Opcode::generic("icmp.ult"), vec![x.into(), int(10)]);
        let c2 = b.op(bb, Opcode::generic("icmp.ult"), vec![x.into(), int(10)]);
        let c3 = b.op(bb, Opcode::generic("icmp.ult"), vec![x.into(), int(11)]);
        let c4 = b.op(bb, Opcode::generic("icmp.slt"), vec![x.into(), int(10)]);
        let y = b.op(bb, Opcode::MemoryRead, vec![p.into()]);
        let c5 = b.op(bb, Opcode::generic("icmp.ult"), vec![y.into(), int(10)]);
        let m1 = b.op(bb, Opcode::ControlMerge, vec![x.into(), int(0)]);
        let m2 = b.op(bb, Opcode::ControlMerge, vec![x.into(), int(0)]);
        let unit = b.build();

        let mut tester = EquivalenceTester::default();
        assert!(tester.same_static_pattern(&unit, &c1.into(), &c2.into()));
        assert!(!tester.same_static_pattern(&unit, &c1.into(), &c3.into()));
        assert!(!tester.same_static_pattern(&unit, &c1.into(), &c4.into()));
        // distinct reads of the same pointer share a shape
        assert!(tester.same_static_pattern(&unit, &c1.into(), &c5.into()));
        assert!(!tester.same_static_pattern(&unit, &m1.into(), &m2.into()));
        assert!(tester.same_static_pattern(&unit, &m1.into(), &m1.into()));
    }

    fn loop_unit(names: &[&str]) -> (ProgramUnit, NodeId) {
        let mut b = UnitBuilder::new("loop");
        let f = b.procedure("main");
        let entry = b.block(f);
        let header = b.block(f);
        let exit = b.block(f);
        b.jump(entry, header);

        let mut acc: Option<NodeId> = None;
        for name in names {
            let phi = b.named_op(header, Opcode::ControlMerge, vec![int(0)], *name);
            acc = Some(match acc {
                None => phi,
                Some(prev) => b.op(header, Opcode::generic("add"), vec![prev.into(), phi.into()]),
            });
        }
        let value = acc.map(Operand::Node).unwrap_or_else(|| int(0));
        let cmp = b.op(header, Opcode::generic("icmp.ult"), vec![value, int(100)]);
        let br = b.branch(header, cmp, header, exit);
        (b.build(), br)
    }

    #[test]
    fn test_induction_guard() {
        let (unit, br) = loop_unit(&["indvars.iv"]);
        assert!(is_induction_guard(&unit, br, "indvars"));

        let (unit, br) = loop_unit(&["i.0"]);
        assert!(!is_induction_guard(&unit, br, "indvars"));

        let (unit, br) = loop_unit(&["indvars.iv", "indvars.iv2"]);
        assert!(!is_induction_guard(&unit, br, "indvars"));

        let (unit, br) = loop_unit(&[]);
        assert!(!is_induction_guard(&unit, br, "indvars"));
    }
}
