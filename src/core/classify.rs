//! Best-effort structure descriptions for computed groups
//!
//! Works from the group order and cheap probes of the generating set
//! (element orders, pairwise commutation). Exact parity with a full
//! small-groups catalogue is out of scope; anything unrecognized falls
//! back to a plain order statement.

use std::collections::BTreeSet;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use once_cell::sync::Lazy;

use crate::algebra::Permutation;

/// A row of the small-groups table: matches on the group order, the
/// abelian probe, and which element orders appear in the generating set
struct TableEntry {
    order: u64,
    abelian: bool,
    /// element orders that must all appear among the generators
    needs: &'static [u64],
    /// element orders that must not appear
    avoids: &'static [u64],
    name: &'static str,
}

/// Fixed lookup table for orders up to 16, checked in row order
static SMALL_GROUPS: Lazy<Vec<TableEntry>> = Lazy::new(|| {
    vec![
        TableEntry {
            order: 4,
            abelian: true,
            needs: &[],
            avoids: &[4],
            name: "Klein four-group",
        },
        TableEntry {
            order: 6,
            abelian: false,
            needs: &[],
            avoids: &[],
            name: "symmetric group of degree 3",
        },
        TableEntry {
            order: 6,
            abelian: true,
            needs: &[],
            avoids: &[],
            name: "cyclic group of order 6",
        },
        TableEntry {
            order: 8,
            abelian: true,
            needs: &[],
            avoids: &[4, 8],
            name: "elementary abelian group of order 8",
        },
        TableEntry {
            order: 8,
            abelian: false,
            needs: &[4],
            avoids: &[2],
            name: "quaternion group",
        },
        TableEntry {
            order: 8,
            abelian: false,
            needs: &[],
            avoids: &[],
            name: "dihedral group of order 8",
        },
        TableEntry {
            order: 9,
            abelian: true,
            needs: &[],
            avoids: &[9],
            name: "elementary abelian group of order 9",
        },
        TableEntry {
            order: 10,
            abelian: true,
            needs: &[],
            avoids: &[],
            name: "cyclic group of order 10",
        },
        TableEntry {
            order: 10,
            abelian: false,
            needs: &[],
            avoids: &[],
            name: "dihedral group of order 10",
        },
        TableEntry {
            order: 12,
            abelian: false,
            needs: &[4],
            avoids: &[],
            name: "dicyclic group of order 12",
        },
        TableEntry {
            order: 12,
            abelian: false,
            needs: &[3],
            avoids: &[4, 6],
            name: "alternating group of degree 4",
        },
        TableEntry {
            order: 12,
            abelian: false,
            needs: &[],
            avoids: &[],
            name: "dihedral group of order 12",
        },
        TableEntry {
            order: 14,
            abelian: true,
            needs: &[],
            avoids: &[],
            name: "cyclic group of order 14",
        },
        TableEntry {
            order: 14,
            abelian: false,
            needs: &[],
            avoids: &[],
            name: "dihedral group of order 14",
        },
        TableEntry {
            order: 15,
            abelian: true,
            needs: &[],
            avoids: &[],
            name: "cyclic group of order 15",
        },
        TableEntry {
            order: 16,
            abelian: true,
            needs: &[],
            avoids: &[4, 8, 16],
            name: "elementary abelian group of order 16",
        },
    ]
});

/// Describe the group of the given order generated by `generators`
///
/// Rules are applied in order: trivial, prime cyclic, cyclic witnessed
/// by a generator of full order, the small-groups table, then the
/// fallback `"group of order N"`.
pub fn describe_group(order: &BigUint, generators: &[Permutation]) -> String {
    if order.is_one() {
        return "trivial group".to_string();
    }

    if let Some(small) = order.to_u64() {
        if is_prime(small) {
            return format!("cyclic group of order {}", small);
        }
    }

    let gen_orders: BTreeSet<u64> = generators
        .iter()
        .filter(|g| !g.is_identity())
        .map(|g| g.element_order())
        .collect();

    if gen_orders
        .iter()
        .any(|&o| BigUint::from(o) == *order)
    {
        return format!("cyclic group of order {}", order);
    }

    if let Some(small) = order.to_u64() {
        let abelian = is_abelian(generators);
        for entry in SMALL_GROUPS.iter() {
            if entry.order == small
                && entry.abelian == abelian
                && entry.needs.iter().all(|o| gen_orders.contains(o))
                && entry.avoids.iter().all(|o| !gen_orders.contains(o))
            {
                return entry.name.to_string();
            }
        }
    }

    format!("group of order {}", order)
}

/// A group is abelian iff its generators pairwise commute
fn is_abelian(generators: &[Permutation]) -> bool {
    generators
        .iter()
        .enumerate()
        .all(|(i, p)| generators[i + 1..].iter().all(|q| p.commutes_with(q)))
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
